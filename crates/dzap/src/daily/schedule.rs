//! 日次投稿のタイミング計算と、多重起動を防ぐライフサイクルガード。

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono::TimeZone as _;
use chrono_tz::Tz;

/// 日次ジョブのライフサイクル。
///
/// serenity の ready イベントは再接続のたびに発火するため、
/// ジョブの起動はプロセスごとに一度だけにする。二度目の起動要求は
/// エラーではなく単なる no-op。
#[derive(Debug, Default)]
pub struct DailyTrigger {
    started: AtomicBool,
    stopped: AtomicBool,
}

impl DailyTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 起動を試みる。はじめての呼び出しのみ true を返す。
    pub fn try_start(&self) -> bool {
        !self.started.swap(true, Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// 次に投稿すべき日時を返す。
///
/// `hour:minute` の壁時計時刻で、`now` より厳密に未来、かつ
/// `start_date` (指定時) 以降の最初の日時。時刻が不正なら `None`。
pub fn next_occurrence(
    now: DateTime<Tz>,
    hour: u32,
    minute: u32,
    start_date: Option<NaiveDate>,
) -> Option<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;

    let mut date = now.date_naive();
    if now.time() >= time {
        date = date.succ_opt()?;
    }
    if let Some(start) = start_date
        && date < start
    {
        date = start;
    }

    now.timezone().from_local_datetime(&date.and_time(time)).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Kolkata;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
        Kolkata
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn fires_same_day_before_schedule_time() {
        let next = next_occurrence(at(2025, 12, 26, 7, 30), 8, 0, None).unwrap();
        assert_eq!(next, at(2025, 12, 26, 8, 0));
    }

    #[test]
    fn fires_next_day_at_or_after_schedule_time() {
        let next = next_occurrence(at(2025, 12, 26, 8, 0), 8, 0, None).unwrap();
        assert_eq!(next, at(2025, 12, 27, 8, 0));

        let next = next_occurrence(at(2025, 12, 26, 9, 15), 8, 0, None).unwrap();
        assert_eq!(next, at(2025, 12, 27, 8, 0));
    }

    #[test]
    fn waits_for_activation_date() {
        let start = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let next = next_occurrence(at(2025, 12, 20, 7, 0), 8, 0, Some(start)).unwrap();
        assert_eq!(next, at(2025, 12, 25, 8, 0));
    }

    #[test]
    fn past_activation_date_has_no_effect() {
        let start = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let next = next_occurrence(at(2025, 12, 26, 7, 0), 8, 0, Some(start)).unwrap();
        assert_eq!(next, at(2025, 12, 26, 8, 0));
    }

    #[test]
    fn invalid_time_yields_none() {
        assert!(next_occurrence(at(2025, 12, 26, 7, 0), 24, 0, None).is_none());
    }

    #[test]
    fn trigger_starts_exactly_once() {
        let trigger = DailyTrigger::new();
        assert!(trigger.try_start());
        assert!(!trigger.try_start());
        assert!(!trigger.try_start());
    }

    #[test]
    fn trigger_stop_is_observable() {
        let trigger = DailyTrigger::new();
        assert!(!trigger.is_stopped());
        trigger.stop();
        assert!(trigger.is_stopped());
    }
}
