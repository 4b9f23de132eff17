#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
#[command(about = "JSON-RPC server exposing catalog query, facets, submission and URL info")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Serve over stdio, one JSON-RPC request per line
    #[clap(name = "stdio")]
    Stdio,

    /// Serve over HTTP (POST /message, GET /sse)
    #[clap(name = "sse")]
    Sse(SseOptions),
}

#[derive(Debug, clap::Args)]
pub struct SseOptions {
    /// Port to listen on
    #[arg(short, long, env = "TOOLSHELF_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "TOOLSHELF_HOST", default_value = "127.0.0.1")]
    pub host: String,
}
