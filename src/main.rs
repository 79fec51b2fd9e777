use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod api;
mod cmd;
mod config;
mod constants;
mod server;
mod shared_types;
mod utils;

use crate::cmd::config::ConfigCommand;
use crate::cmd::ls::LsCommand;
use crate::cmd::serve::ServeCommand;
use crate::config::CliConfig;
use crate::shared_types::CliSubCmd;

#[derive(Parser)]
/// local api and editor host for a markdown blog
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve(ServeCommand),
    Config(ConfigCommand),
    Ls(LsCommand),
}

fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_level().as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .init();
}

#[tokio::main]
pub async fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", format!("could not load config: {:#}", err).red());
            std::process::exit(1);
        }
    };
    init_logging(&config);

    let result = match cli.commands {
        Commands::Serve(_cmd) => _cmd.run(&config).await,
        Commands::Config(_cmd) => _cmd.run(&config).await,
        Commands::Ls(_cmd) => _cmd.run(&config).await,
    };

    if let Err(err) = result {
        eprintln!("{}", format!("{:#}", err).red());
        std::process::exit(1);
    }
}
