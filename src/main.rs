use anyhow::Result;
use clap::Parser;

use polylint::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if !cli.run().await? {
        std::process::exit(1);
    }
    Ok(())
}
