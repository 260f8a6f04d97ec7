use std::sync::Arc;

use anyhow::{Context, Result};
use serenity::all::{ChannelId, ChannelType, CreateMessage, GatewayIntents, Http};
use serenity::async_trait;
use serenity::client::Context as SerenityContext;
use serenity::prelude::*;
use tracing::{error, info, warn};

use crate::config::{Config, DiscordConfig};
use crate::daily::{self, DailyTrigger, Dataset};

pub struct Handler {
    config: Config,
    trigger: Arc<DailyTrigger>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: SerenityContext, ready: serenity::model::gateway::Ready) {
        info!(user = %ready.user.name, "Bot connected");

        // 再接続で ready が再発火しても日次ジョブは一度だけ起動する
        if !self.trigger.try_start() {
            return;
        }

        let http = ctx.http.clone();

        if self.config.discord.startup_notice {
            send_startup_notice(&http, &self.config.discord).await;
        }

        if self.config.preview.on_start {
            send_preview(&http, &self.config).await;
        }

        let config = self.config.clone();
        let trigger = self.trigger.clone();
        tokio::spawn(async move {
            run_daily_job(http, config, trigger).await;
        });
    }

    async fn message(&self, ctx: SerenityContext, msg: serenity::model::channel::Message) {
        if msg.author.bot {
            return;
        }

        if msg.content.starts_with("$hello")
            && let Err(e) = msg.channel_id.say(&ctx.http, "Hello!").await
        {
            error!(error = %e, "Failed to reply");
        }
    }
}

/// 設定された時刻まで眠り、当日分の問題を投稿するループ。
async fn run_daily_job(http: Arc<Http>, config: Config, trigger: Arc<DailyTrigger>) {
    let schedule = &config.schedule;
    info!(
        hour = schedule.hour,
        minute = schedule.minute,
        "Daily job registered"
    );

    while !trigger.is_stopped() {
        let now = chrono::Utc::now().with_timezone(&chrono_tz::Asia::Kolkata);
        let Some(next) =
            daily::next_occurrence(now, schedule.hour, schedule.minute, schedule.start_date)
        else {
            error!(
                hour = schedule.hour,
                minute = schedule.minute,
                "Invalid schedule time, daily job not running"
            );
            return;
        };

        info!(next = %next, "Next daily post scheduled");

        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        if trigger.is_stopped() {
            break;
        }

        post_daily(&http, &config).await;
    }
}

/// 当日 (IST) の行を厳密一致で解決して投稿する。該当行がなければ何もしない。
async fn post_daily(http: &Http, config: &Config) {
    let target = daily::today_ist();

    let Some(dataset) = load_dataset(config) else {
        return;
    };

    let Some(row) = daily::resolve_exact(&dataset, &config.dataset.date_column, target) else {
        info!(date = %target, "No problem scheduled for today");
        return;
    };

    let fields = daily::map_fields(row, &config.dataset);
    let content = daily::render(&fields, &config.dataset.prefix_text);

    send_to_channel(http, &config.discord, content).await;
}

/// 当日または次回分の行をプレビューとして投稿する。
async fn send_preview(http: &Http, config: &Config) {
    let target = config
        .preview
        .date
        .as_deref()
        .and_then(daily::parse_date)
        .unwrap_or_else(daily::today_ist);

    let Some(dataset) = load_dataset(config) else {
        return;
    };

    let Some(row) = daily::resolve_exact_or_next(&dataset, &config.dataset.date_column, target)
    else {
        info!(date = %target, "Preview: no suitable row found");
        return;
    };

    let scheduled_for = daily::row_date(row, &config.dataset.date_column);
    let fields = daily::map_fields(row, &config.dataset);
    let content = daily::render_preview(&fields, &config.dataset.prefix_text, scheduled_for);

    send_to_channel(http, &config.discord, content).await;
}

async fn send_startup_notice(http: &Http, config: &DiscordConfig) {
    let now = chrono::Utc::now().with_timezone(&chrono_tz::Asia::Kolkata);
    let content = format!(
        "✅ Daily DSA Zap: Bot is online. ({})",
        now.format("%Y-%m-%d %H:%M:%S %Z")
    );

    send_to_channel(http, config, content).await;
}

/// データセットを読み込む。読めない場合は警告を残して `None`。
///
/// ファイルがないのは「今日のデータがない」のと同じ扱いで、致命的ではない。
fn load_dataset(config: &Config) -> Option<Dataset> {
    match Dataset::load(&config.dataset.path) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            warn!(
                error = %e,
                path = %config.dataset.path.display(),
                "Failed to read dataset"
            );
            None
        }
    }
}

/// 送信先チャンネルを解決する。
///
/// channel_id が設定されていれば取得を試み、失敗したら channel_name の
/// 大文字小文字を無視した走査にフォールバックする。
async fn resolve_channel(http: &Http, config: &DiscordConfig) -> Option<ChannelId> {
    if let Some(id) = config.channel_id {
        let channel_id = ChannelId::new(id);
        match http.get_channel(channel_id).await {
            Ok(_) => return Some(channel_id),
            Err(e) => {
                warn!(error = %e, channel_id = id, "Failed to fetch channel by id")
            }
        }
    }

    let wanted = config.channel_name.to_lowercase();

    let guilds = match http.get_guilds(None, None).await {
        Ok(guilds) => guilds,
        Err(e) => {
            warn!(error = %e, "Failed to list guilds");
            return None;
        }
    };

    for guild in guilds {
        let Ok(channels) = http.get_channels(guild.id).await else {
            continue;
        };

        if let Some(channel) = channels
            .iter()
            .find(|ch| ch.kind == ChannelType::Text && ch.name.to_lowercase() == wanted)
        {
            return Some(channel.id);
        }
    }

    None
}

/// 解決済みチャンネルへメッセージを送る。失敗はログに残すだけで伝播しない。
async fn send_to_channel(http: &Http, config: &DiscordConfig, content: String) {
    let Some(channel) = resolve_channel(http, config).await else {
        warn!(
            channel_name = %config.channel_name,
            "No channel configured or found"
        );
        return;
    };

    let message = CreateMessage::new().content(content);
    match channel.send_message(http, message).await {
        Ok(_) => info!(channel_id = channel.get(), "Message sent"),
        Err(e) => error!(error = %e, "Failed to send message"),
    }
}

pub async fn run(config: Config) -> Result<()> {
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let trigger = Arc::new(DailyTrigger::new());
    let handler = Handler {
        config: config.clone(),
        trigger: trigger.clone(),
    };

    let mut client = Client::builder(&config.discord.token, intents)
        .event_handler(handler)
        .await
        .context("Failed to create client")?;

    info!("Starting bot");
    let result = client.start().await.context("Client error");

    // クライアントが終了したら日次ループも止める
    trigger.stop();
    result
}
