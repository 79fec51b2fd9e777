use clap::Parser;
use colored::Colorize;

use crate::{
    config::{CliConfig, LogLevel},
    shared_types::CliSubCmd,
};

#[derive(Parser)]
#[group(required = true, multiple = true)]
pub struct ConfigCommand {
    #[arg(long)]
    /// directory holding the markdown posts
    set_blog_path: Option<String>,

    #[arg(long)]
    /// directory receiving uploaded images (stored below img/blog/<post>/)
    set_assets_path: Option<String>,

    #[arg(long)]
    /// directory with the editor ui files, defaults to assets/editor-ui next to the binary
    set_ui_path: Option<String>,

    #[arg(long)]
    /// port of the local api, default is 30078
    set_port: Option<u16>,

    #[arg(long)]
    /// default log level is "chirpy", "stfu" only reports warnings and errors
    set_log_level: Option<LogLevel>,

    #[arg(long)]
    /// print the config file contents
    show: bool,
}

impl CliSubCmd for ConfigCommand {
    async fn run(&self, _config: &CliConfig) -> anyhow::Result<()> {
        // the file as written, without environment overrides mixed in
        let config_filepath = CliConfig::get_config_filepath()?;
        let mut config = CliConfig::load_from(&config_filepath)?;

        let mut changed = false;
        if let Some(blog_path) = &self.set_blog_path {
            config.set_blog_path(blog_path.clone());
            changed = true;
        }
        if let Some(assets_path) = &self.set_assets_path {
            config.set_assets_path(assets_path.clone());
            changed = true;
        }
        if let Some(ui_path) = &self.set_ui_path {
            config.set_ui_path(ui_path.clone());
            changed = true;
        }
        if let Some(port) = self.set_port {
            config.set_port(port);
            changed = true;
        }
        if let Some(log_level) = self.set_log_level {
            config.set_log_level(log_level);
            changed = true;
        }

        if changed {
            config.save_to(&config_filepath)?;
            println!(
                "{}",
                format!("Saved {}", config_filepath.display()).green()
            );
        }

        if self.show {
            println!("{}", config_filepath.display().to_string().dimmed());
            println!("{}", config.to_toml()?);
        }

        Ok(())
    }
}
