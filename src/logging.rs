use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Lambda stamps each log line itself, so no timestamps here.
pub fn init_logging(max_level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
