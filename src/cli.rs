//! Command line utilities.

use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
pub use clap::Parser;
use clap::Args;
use log::info;

use crate::{Config, LessCompiler};

/// Command line usage description.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Source LESS file
    pub input: PathBuf,

    /// Target CSS file [default: standard output]
    pub output: Option<PathBuf>,

    /// Command line options.
    #[command(flatten)]
    pub opts: Opts,
}

/// Command line options.
#[derive(Debug, Args, Clone, Default)]
pub struct Opts {
    /// Configuration file [default: "lesscss.toml"]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory searched for imported files
    #[arg(short = 'I', long = "include-path", value_name = "DIR")]
    pub include_paths: Vec<PathBuf>,

    /// Remove whitespace and comments from the output
    #[arg(short = 'x', long)]
    pub compress: bool,

    /// Minify the output with a CSS minifier
    #[arg(long = "yui-compress")]
    pub yuicompress: bool,

    /// Optimization level [default: 1]
    #[arg(short = 'O', long, value_name = "LEVEL")]
    pub optimization: Option<u8>,
}

/// Compile the input file of the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_opts(&cli.opts).context("loading configuration")?;

    let compiler = LessCompiler::new(config.compile_options());

    info!("Compiling {:?}", cli.input);

    let css = compiler
        .compile_file(&cli.input)
        .with_context(|| format!("compiling {:?}", cli.input))?;

    match cli.output.as_ref() {
        Some(output) => {
            if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating directory {dir:?}"))?;
            }

            info!("Writing {output:?}");

            std::fs::write(output, css).with_context(|| format!("writing {output:?}"))?;
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(css.as_bytes())
                .context("writing to standard output")?;
            stdout.flush()?;
        },
    }

    Ok(())
}
