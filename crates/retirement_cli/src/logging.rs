//! Tracing setup shared by every subcommand.

use tracing_subscriber::EnvFilter;

pub fn init(log_level: &str) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}
