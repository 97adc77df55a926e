use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

/// Generate a Watchlist configuration file from ICE COREREF reference data.
#[derive(Clone, Debug, Parser)]
#[command(name = "makeconfig", version)]
pub struct Options {
    /// Directory searched recursively for COREREF_*.txt.bz2 files.
    #[arg(value_parser = existing_path)]
    pub data_directory: PathBuf,

    /// JSON file mapping each source id to its instrument symbols.
    #[arg(value_parser = existing_path)]
    pub path_to_input_file: PathBuf,

    /// Directory where the configuration file is written (default: current directory).
    #[arg(short, long, env = "MAKECONFIG_WRITE_TO", value_parser = existing_path)]
    pub write_to: Option<PathBuf>,

    /// Report the discovered contracts without writing the file.
    #[arg(long)]
    pub dry_run: bool,

    /// Log output format on stderr.
    #[arg(long, env = "RUST_LOG_FORMAT", value_enum, ignore_case = true, default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if Path::new(value).exists() {
        Ok(path)
    } else {
        Err(format!("path '{value}' does not exist"))
    }
}
