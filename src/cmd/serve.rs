use clap::Parser;
use colored::Colorize;

use crate::{
    config::CliConfig,
    constants,
    server::{ApiServer, ServerContext},
    shared_types::CliSubCmd,
    utils::net::{get_editor_url, get_loopback_addr},
};

#[derive(Parser)]
pub struct ServeCommand {
    #[arg(long, short)]
    /// port to listen on (localhost only), defaults to the configured port
    port: Option<u16>,

    #[arg(long)]
    /// directory holding the markdown posts, overrides config and BLOG_PATH
    blog_path: Option<String>,

    #[arg(long)]
    /// directory receiving uploaded images, overrides config and ASSETS_PATH
    assets_path: Option<String>,

    #[arg(long)]
    /// directory with index.html, styles.css and app.js of the editor
    ui_path: Option<String>,
}

impl CliSubCmd for ServeCommand {
    async fn run(&self, config: &CliConfig) -> anyhow::Result<()> {
        let mut config = config.clone();
        if let Some(blog_path) = &self.blog_path {
            config.set_blog_path(blog_path.clone());
        }
        if let Some(assets_path) = &self.assets_path {
            config.set_assets_path(assets_path.clone());
        }
        if let Some(ui_path) = &self.ui_path {
            config.set_ui_path(ui_path.clone());
        }

        let ctx = ServerContext::from_config(&config)?;
        let addr = get_loopback_addr(self.port.unwrap_or(config.get_port()));

        println!("{}", format!("Blog:   {}", ctx.blog_root.display()).dimmed());
        println!("{}", format!("Assets: {}", ctx.assets_root.display()).dimmed());

        let server = ApiServer::start(addr, ctx)?;
        println!(
            "Editor running at {}",
            get_editor_url(&server.local_addr()).bold().cyan()
        );
        println!("{}", "Press Ctrl-C to stop.".dimmed());

        tokio::signal::ctrl_c().await?;
        println!();
        println!("Shutting down...");

        server.stop(constants::SHUTDOWN_GRACE_PERIOD).await;

        Ok(())
    }
}
