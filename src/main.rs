//! CLI entry point for the edge-matched tiling generator

use clap::Parser;
use sockettile::io::cli::{Cli, Runner, init_logging};

fn main() -> sockettile::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());
    let runner = Runner::new(cli);
    runner.run()
}
