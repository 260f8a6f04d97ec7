use vergen_gitcl::{BuildBuilder, CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitted = Emitter::default()
        .add_instructions(&BuildBuilder::default().build_date(true).build()?)?
        .add_instructions(&CargoBuilder::default().target_triple(true).build()?)?
        .add_instructions(&GitclBuilder::default().sha(true).build()?)?
        .emit();

    // git が使えない環境では固定値にフォールバック
    if emitted.is_err() {
        for (key, value) in [
            ("VERGEN_GIT_SHA", "unknown"),
            ("VERGEN_BUILD_DATE", "unknown"),
            ("VERGEN_CARGO_TARGET_TRIPLE", "unknown"),
        ] {
            println!("cargo::rustc-env={key}={value}");
        }
    }

    Ok(())
}
