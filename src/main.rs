//! Compile LESS files to CSS.

use anyhow::Result;
use lesscss::cli::{Cli, Parser};
use log::LevelFilter;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    lesscss::cli::run(&cli)
}
