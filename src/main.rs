use clap::Parser;
use millpath::cli::{run, Cli};
use millpath::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.log_json)?;
    tracing::debug!(version = millpath::VERSION, built = millpath::BUILD_DATE, "millpath starting");

    run(cli)
}
