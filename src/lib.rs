pub mod api;
pub mod cli;
pub mod config;

/// Entry point for the `medicare` binary.
pub async fn run() -> anyhow::Result<()> {
    env_logger::init();
    cli::run().await
}
