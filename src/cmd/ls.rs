use clap::Parser;
use colored::Colorize;
use terminal_size::terminal_size;

use crate::{
    config::CliConfig, shared_types::CliSubCmd, utils::files, utils::term::get_formatted_cols,
};

#[derive(Parser)]
pub struct LsCommand {
    #[arg(long)]
    /// print the same json the editor receives from GET /list
    json: bool,
}

impl CliSubCmd for LsCommand {
    async fn run(&self, config: &CliConfig) -> anyhow::Result<()> {
        let blog_root = config.get_blog_dir()?;
        let mut entries = files::list_markdown_files(&blog_root);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if entries.is_empty() {
            println!("{}", "No posts found.".dimmed());
            return Ok(());
        }

        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let max_col_size = entries
            .iter()
            .map(|entry| entry.relative_path.len())
            .max()
            .unwrap_or(0);
        let n_cols = match terminal_size() {
            Some((w, _)) => ((w.0 as usize) / (max_col_size + 2).max(2)).max(1),
            None => 1,
        };

        println!("{}", blog_root.display().to_string().bold().dimmed());
        let rel_paths = entries.iter().map(|entry| entry.relative_path.as_str());
        println!("{}", get_formatted_cols(rel_paths, n_cols).blue());
        println!(
            "{}",
            format!("{} post(s), newest first", entries.len()).dimmed()
        );

        Ok(())
    }
}
