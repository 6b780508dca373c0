use std::io;

use anyhow::Result;
use clap::Parser;
use common::logging;
use reporter::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(logging::default_level(cli.verbose));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    reporter::run(&cli, &mut out)
}
