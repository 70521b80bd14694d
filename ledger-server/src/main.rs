use ledger_server::utils::logger;
use ledger_server::{Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        "Starting ledger-server (env: {}, tz: {})",
        config.environment,
        config.business_timezone
    );

    if let Some(dir) = config
        .database_url
        .strip_prefix("sqlite:")
        .filter(|p| !p.starts_with(":memory:"))
        .and_then(|p| std::path::Path::new(p.trim_start_matches("//")).parent())
        .filter(|d| !d.as_os_str().is_empty())
    {
        std::fs::create_dir_all(dir)?;
    }

    Server::new(config).run().await
}
