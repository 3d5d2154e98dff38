use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod browse;
mod config;
mod error;
mod list;
mod prelude;
mod render;
mod source;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search, sort and page through a remote product catalog"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Product API endpoint (overrides CATALOG_API_URL)
    #[clap(long, global = true)]
    api_url: Option<String>,

    /// Read products from a local JSON file instead of the API (overrides CATALOG_FILE)
    #[clap(long, global = true)]
    file: Option<PathBuf>,

    /// Request timeout in seconds (overrides CATALOG_TIMEOUT)
    #[clap(long, global = true)]
    timeout: Option<u64>,

    /// Whether to display additional information.
    #[clap(long, env = "CATALOG_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    /// Resolve the source configuration from the environment and CLI flags
    pub fn config(&self) -> Result<config::CatalogConfig> {
        Ok(config::CatalogConfig::from_env()?.with_overrides(
            self.api_url.clone(),
            self.file.clone(),
            self.timeout,
        ))
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Print one page of the catalog
    List(crate::list::ListOptions),

    /// Browse the catalog interactively (search, sort, page from stdin)
    Browse(crate::browse::BrowseOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global).await,
        SubCommands::Browse(options) => crate::browse::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
