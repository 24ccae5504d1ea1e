use clap::Parser;
use wirebox::args::{Args, Command};
use wirebox::bootstrap;
use wirebox::config::AppConfig;
use wirebox::errors::AppError;
use wirebox::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply_to(&mut config)?;
    init_logging(&config.logging)?;

    match args.command() {
        Command::Probe => {
            let info = bootstrap::run(&config).await?;
            println!(
                "engine {} (api {}, client api {}) on {}/{}",
                info.version, info.api_version, info.negotiated_api_version, info.os, info.arch
            );
        }
        Command::Services => {
            let container = bootstrap::build_container(&config);
            for name in container.service_names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
