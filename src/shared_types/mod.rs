mod api;
mod errors;
mod models;
mod requests;

pub use api::*;
pub use errors::*;
pub use models::*;
pub use requests::*;

use crate::config::CliConfig;

pub trait CliSubCmd {
    async fn run(&self, config: &CliConfig) -> anyhow::Result<()>;
}
