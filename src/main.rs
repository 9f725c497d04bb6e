use anyhow::Context;
use clap::Parser;
use proximity_labeler::cli::{run, Cli};
use proximity_labeler::utils::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    run(cli).await.context("proximity labeling run failed")
}
