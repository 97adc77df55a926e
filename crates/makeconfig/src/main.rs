//! makeconfig: generate a Watchlist configuration file.
//!
//! Finds every COREREF file below the data directory, collects the futures
//! contracts of the instruments listed in the input file, and writes them to
//! `watchlist_config_<YYYYMMDD>.csv`.
//!
//! Usage:
//!   makeconfig /data/ice instruments.json
//!   makeconfig /data/ice instruments.json --write-to /etc/watchlist
//!   makeconfig /data/ice instruments.json --dry-run

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use watchlist_config::{
    config_file_writer, find_all_coreref_files, json_loader, process_all_coreref_files,
};

mod config;

use config::{LogFormat, Options};

const DEFAULT_LOG_FILTER: &str = "makeconfig=info,watchlist_config=info";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let opts = Options::parse();
    init_tracing(opts.log_format);

    match run(&opts) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("makeconfig failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn run(opts: &Options) -> Result<String> {
    tracing::info!(
        "makeconfig: data={}, input={}, dry_run={}",
        opts.data_directory.display(),
        opts.path_to_input_file.display(),
        opts.dry_run
    );

    let files = find_all_coreref_files(&opts.data_directory).with_context(|| {
        format!("searching {} for COREREF files", opts.data_directory.display())
    })?;
    tracing::info!("Found {} COREREF files", files.len());

    let instruments = json_loader(&opts.path_to_input_file).context("loading instruments file")?;
    let pairs = process_all_coreref_files(&files, &instruments)
        .context("scanning COREREF files")?;

    if opts.dry_run {
        return Ok(format!(
            "{} symbols discovered in {} reference data files.",
            pairs.len(),
            files.len()
        ));
    }

    let write_to = match &opts.write_to {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("resolving current directory")?,
    };
    let summary = config_file_writer(&write_to, &pairs).with_context(|| {
        format!("writing configuration file to {}", write_to.display())
    })?;

    Ok(summary.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options(data: PathBuf, input: PathBuf, write_to: Option<PathBuf>, dry_run: bool) -> Options {
        Options {
            data_directory: data,
            path_to_input_file: input,
            write_to,
            dry_run,
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn test_run_writes_header_for_empty_data_dir() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let input = data.path().join("instruments.json");
        std::fs::write(&input, r#"{"207": ["F:FESX"]}"#).unwrap();

        let summary = run(&options(
            data.path().to_path_buf(),
            input,
            Some(out.path().to_path_buf()),
            false,
        ))
        .unwrap();

        assert_eq!(
            summary,
            "Configuration file successfully written.\n0 symbols were added to the file."
        );
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let input = data.path().join("instruments.json");
        std::fs::write(&input, "{}").unwrap();

        let summary = run(&options(
            data.path().to_path_buf(),
            input,
            Some(out.path().to_path_buf()),
            true,
        ))
        .unwrap();

        assert_eq!(summary, "0 symbols discovered in 0 reference data files.");
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_bad_instruments_file_fails() {
        let data = tempfile::tempdir().unwrap();
        let input = data.path().join("instruments.json");
        std::fs::write(&input, "not json").unwrap();

        let err = run(&options(data.path().to_path_buf(), input, None, true)).unwrap_err();

        assert!(format!("{err:#}").contains("loading instruments file"));
    }
}
