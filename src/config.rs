//! Configure the compiler.
//!
//! Options are read from a TOML file, then overridden by command line
//! options.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;
use serde::Deserialize;

use crate::{cli::Opts, less::DEFAULT_OPTIMIZATION, util::toml::read_file, CompileOptions};

/// Configuration file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "lesscss.toml";

/// Configuration for the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directories searched for imported files.
    ///
    /// Relative paths are resolved against the directory of the
    /// configuration file.
    pub include_paths: Vec<PathBuf>,

    /// Remove whitespace and comments from the output.
    pub compress: bool,

    /// Minify the output with a CSS minifier.
    pub yuicompress: bool,

    /// Optimization level.
    #[serde(default = "default_optimization")]
    pub optimization: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_paths: Vec::new(),
            compress: false,
            yuicompress: false,
            optimization: default_optimization(),
        }
    }
}

impl Config {
    /// Load the configuration from command line options.
    pub fn from_opts(opts: &Opts) -> Result<Self> {
        let mut config = match opts.config.as_ref() {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            },
            None => Self::default(),
        };

        config.include_paths.extend(opts.include_paths.iter().cloned());
        config.compress |= opts.compress;
        config.yuicompress |= opts.yuicompress;

        if let Some(level) = opts.optimization {
            config.optimization = level;
        }

        Ok(config)
    }

    /// Load the configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        debug!("Loading configuration from {path:?}");

        let mut config: Self = read_file(path)?;

        if let Some(dir) = path.parent() {
            for include_path in config.include_paths.iter_mut() {
                if include_path.is_relative() {
                    *include_path = dir.join(&include_path);
                }
            }
        }

        Ok(config)
    }

    /// Options passed to the compiler.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            include_paths: self.include_paths.clone(),
            compress: self.compress,
            yuicompress: self.yuicompress,
            optimization: self.optimization,
        }
    }
}

fn default_optimization() -> u8 {
    DEFAULT_OPTIMIZATION
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use assert_fs::prelude::*;

    use super::{default_optimization, Config};
    use crate::{cli::Opts, util::toml::read_str};

    #[test]
    fn load_config_str() {
        const CONTENT: &str = r#"
            include_paths = ["styles", "/usr/share/less"]
            compress = true
            optimization = 2
        "#;

        let config: Config = read_str(CONTENT).unwrap();

        assert_eq!(
            config.include_paths,
            [PathBuf::from("styles"), PathBuf::from("/usr/share/less")]
        );
        assert!(config.compress);
        assert!(!config.yuicompress);
        assert_eq!(config.optimization, 2);
    }

    #[test]
    fn load_config_empty() {
        let config: Config = read_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.optimization, default_optimization());
    }

    #[test]
    fn unknown_field() {
        assert!(read_str::<Config, _>("compression = true").is_err());
    }

    #[test]
    fn options_override_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = assert_fs::TempDir::new()?;
        let file = dir.child("lesscss.toml");
        file.write_str("include_paths = [\"lib\"]\noptimization = 0\n")?;

        let opts = Opts {
            config: Some(file.path().to_path_buf()),
            include_paths: vec![PathBuf::from("vendor")],
            compress: true,
            yuicompress: false,
            optimization: Some(2),
        };

        let config = Config::from_opts(&opts)?;

        assert_eq!(
            config.include_paths,
            [dir.path().join("lib"), PathBuf::from("vendor")]
        );
        assert!(config.compress);
        assert_eq!(config.optimization, 2);

        Ok(())
    }
}
