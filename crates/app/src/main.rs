use clap::Parser;

use taller_app::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    taller_observability::init();
    cli::run(Cli::parse()).await
}
