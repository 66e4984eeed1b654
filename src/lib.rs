pub mod api;
pub mod cli;
pub mod config;
pub mod model;
pub mod search;
pub mod ui;

use anyhow::Result;

pub use cli::{Cli, CliError};
pub use config::default_data_dir;

/// Library entrypoint: resolve configuration and dispatch the command.
pub async fn run(cli: Cli) -> Result<()> {
    cli::execute(cli).await
}
