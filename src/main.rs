// src/main.rs
use clap::Parser;
use league_standings::cli::{Args, Command};
use league_standings::clock::SystemClock;
use league_standings::commands::{handle_config_command, run_command};
use league_standings::config::Config;
use league_standings::error::AppError;
use league_standings::logging::setup_logging;
use league_standings::service::LeagueService;
use league_standings::storage::JsonFileStore;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if let Command::Config {
        data_dir,
        log_file_path,
        clear_log_file_path,
        time_zone,
    } = &args.command
    {
        // Config commands must work even when the current config is invalid
        return handle_config_command(
            data_dir.clone(),
            log_file_path.clone(),
            *clear_log_file_path,
            time_zone.clone(),
        )
        .await;
    }

    let config = Config::load().await?;

    // Keep the guard alive until main returns so buffered logs are flushed
    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    info!("Logging to {log_file_path}");

    let data_dir = args.data_dir.clone().unwrap_or_else(|| config.data_dir());
    info!("Using data directory {data_dir}");

    let clock = SystemClock::from_name(&config.time_zone)?;
    let service = LeagueService::new(JsonFileStore::new(data_dir), clock);

    let result = run_command(&service, args.command).await;
    if let Err(e) = &result {
        error!("Command failed: {e}");
    }
    result
}
