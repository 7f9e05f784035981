use anyhow::Result;
use clap::Parser;
use spi_dashboard::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    spi_dashboard::run(cli).await
}
