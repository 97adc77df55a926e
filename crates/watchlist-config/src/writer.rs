//! Watchlist configuration file writer

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{Result, WatchlistError};
use crate::types::{SourceSymbolPair, WriteSummary};

pub const CONFIG_FILE_HEADER: [&str; 2] = ["sourceId", "RTSsymbol"];

/// Path of today's (UTC) configuration file in `directory`
pub fn generate_config_file_path(directory: impl AsRef<Path>) -> PathBuf {
    config_file_path_for(directory, Utc::now().date_naive())
}

/// `<directory>/watchlist_config_<YYYYMMDD>.csv`
pub fn config_file_path_for(directory: impl AsRef<Path>, date: NaiveDate) -> PathBuf {
    directory
        .as_ref()
        .join(format!("watchlist_config_{}.csv", date.format("%Y%m%d")))
}

/// Writes the discovered contracts to today's configuration file in `directory`.
///
/// The directory is created if needed and an existing file for the same day is
/// replaced.
pub fn config_file_writer(
    directory: impl AsRef<Path>,
    pairs: &[SourceSymbolPair],
) -> Result<WriteSummary> {
    let directory = directory.as_ref();
    fs::create_dir_all(directory).map_err(|e| WatchlistError::io(directory, e))?;

    let path = generate_config_file_path(directory);
    let file = File::create(&path).map_err(|e| WatchlistError::io(&path, e))?;
    // Header written explicitly so an empty run still produces it
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote(b'"')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(file);

    writer.write_record(CONFIG_FILE_HEADER)?;
    for pair in pairs {
        writer.serialize(pair)?;
    }
    writer.flush().map_err(|e| WatchlistError::io(&path, e))?;

    tracing::info!("Wrote {} symbols to {}", pairs.len(), path.display());
    Ok(WriteSummary {
        path,
        symbols_written: pairs.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today_file_name() -> String {
        format!("watchlist_config_{}.csv", Utc::now().format("%Y%m%d"))
    }

    #[test]
    fn test_config_file_path() {
        let date = NaiveDate::from_ymd_opt(2020, 10, 16).unwrap();

        let path = config_file_path_for("C:/Users/some_user/config_files", date);

        assert_eq!(
            path,
            Path::new("C:/Users/some_user/config_files").join("watchlist_config_20201016.csv")
        );
    }

    #[test]
    fn test_generated_path_uses_todays_date() {
        let path = generate_config_file_path("/tmp/config_files");
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), today_file_name());
    }

    #[test]
    fn test_file_created_with_proper_name() {
        let dir = tempfile::tempdir().unwrap();
        let pairs = vec![SourceSymbolPair::new("367", "F2:TN\\H21")];

        let summary = config_file_writer(dir.path(), &pairs).unwrap();

        assert!(summary.path.is_file());
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![today_file_name()]);
    }

    #[test]
    fn test_empty_input_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();

        let summary = config_file_writer(dir.path(), &[]).unwrap();

        assert_eq!(fs::read_to_string(&summary.path).unwrap(), "sourceId,RTSsymbol\r\n");
        assert_eq!(summary.symbols_written, 0);
    }

    #[test]
    fn test_file_has_expected_content() {
        let dir = tempfile::tempdir().unwrap();
        let pairs = vec![
            SourceSymbolPair::new("207", "F:FBTP\\H21"),
            SourceSymbolPair::new("207", "F:FBTP\\M21"),
            SourceSymbolPair::new("207", "F:FBTS\\Z20"),
        ];

        let summary = config_file_writer(dir.path(), &pairs).unwrap();

        let content = fs::read_to_string(&summary.path).unwrap();
        assert_eq!(
            content,
            "sourceId,RTSsymbol\r\n207,F:FBTP\\H21\r\n207,F:FBTP\\M21\r\n207,F:FBTS\\Z20\r\n"
        );
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        let pairs = vec![SourceSymbolPair::new("207", "F:ODD,SYMBOL")];

        let summary = config_file_writer(dir.path(), &pairs).unwrap();

        let content = fs::read_to_string(&summary.path).unwrap();
        assert!(content.ends_with("207,\"F:ODD,SYMBOL\"\r\n"));
    }

    #[test]
    fn test_creates_missing_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("config");

        config_file_writer(&target, &[SourceSymbolPair::new("673", "F2:ES\\H21")]).unwrap();
        let summary = config_file_writer(&target, &[]).unwrap();

        assert_eq!(fs::read_to_string(&summary.path).unwrap(), "sourceId,RTSsymbol\r\n");
    }

    #[test]
    fn test_summary_counts_symbols() {
        let dir = tempfile::tempdir().unwrap();
        let pairs: Vec<SourceSymbolPair> = ["H21", "M21", "U21", "Z20", "Z21"]
            .iter()
            .flat_map(|c| {
                [
                    SourceSymbolPair::new("673", format!("F2:ES\\{c}")),
                    SourceSymbolPair::new("673", format!("F2:NQ\\{c}")),
                ]
            })
            .collect();

        let summary = config_file_writer(dir.path(), &pairs).unwrap();

        assert_eq!(
            summary.to_string(),
            "Configuration file successfully written.\n10 symbols were added to the file."
        );
    }
}
