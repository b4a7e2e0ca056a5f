mod app;
mod cli;
mod render;

use clap::Parser;
use news_core::ClientConfig;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();
    let mut config = ClientConfig::load(args.config.as_deref());
    if let Some(url) = &args.base_url {
        config.apply_base_url(url);
    }

    let runtime = Runtime::new()?;
    runtime.block_on(app::run(config, args))
}

fn init_tracing() {
    // Logs go to stderr so they do not interleave with printed articles.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("newshub=info,news_core=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
