use crate::prelude::{eprintln, *};
use clap::Parser;
use std::path::PathBuf;

mod controller;
mod error;
mod mcp;
mod prelude;
mod service;
mod tools;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse, filter and extend a catalog of third-party tools"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// JSON file of tool records to seed the catalog with (defaults to the built-in catalog)
    #[clap(long, env = "TOOLSHELF_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Number of tools per page
    #[clap(
        long,
        env = "TOOLSHELF_PAGE_SIZE",
        global = true,
        default_value_t = toolshelf_core::pagination::DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(usize)
    )]
    page_size: usize,

    /// Whether to display additional information.
    #[clap(long, env = "TOOLSHELF_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Catalog operations: list, facets, submit, info, browse
    Tools(crate::tools::App),

    /// JSON-RPC server exposing the catalog
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    if app.global.page_size == 0 {
        return Err(eyre!("--page-size must be greater than zero"));
    }

    let service = CatalogService::load(app.global.catalog.as_deref())?;

    if app.global.verbose {
        eprintln!("Catalog ready with {} tools", service.len().await);
    }

    match app.command {
        SubCommands::Tools(sub_app) => crate::tools::run(sub_app, app.global, service).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global, service).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
