//! COREREF scanning
//!
//! Streams bzip2-compressed COREREF files line by line and collects the
//! contracts of the configured instruments.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use bzip2::read::MultiBzDecoder;
use rayon::prelude::*;
use regex::Regex;

use crate::discovery::get_source_id_from_file_path;
use crate::error::{Result, WatchlistError};
use crate::instruments::retrieve_instruments;
use crate::patterns::{find_contract, ContractMatcher};
use crate::types::{InstrumentsBySource, SourceSymbolPair};

/// Collects the contracts defined in one COREREF file.
///
/// Every line matching `message_pattern` contributes the first match of
/// `instrument_pattern`, paired with the source id of the file. File order and
/// duplicates are preserved.
pub fn retrieve_source_symbol_pairs(
    path: &Path,
    message_pattern: &Regex,
    instrument_pattern: &Regex,
) -> Result<Vec<SourceSymbolPair>> {
    let source_id = get_source_id_from_file_path(path)?;
    let file = File::open(path).map_err(|e| WatchlistError::io(path, e))?;
    let mut reader = BufReader::new(MultiBzDecoder::new(file));

    let mut pairs = Vec::new();
    let mut buf = Vec::new();
    let mut lines = 0usize;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| WatchlistError::io(path, e))?;
        if read == 0 {
            break;
        }
        lines += 1;

        let line = String::from_utf8_lossy(&buf);
        if let Some(contract) = find_contract(message_pattern, instrument_pattern, &line) {
            pairs.push(SourceSymbolPair::new(source_id.clone(), contract));
        }
    }

    tracing::debug!(
        "{}: {} contracts in {} messages",
        path.display(),
        pairs.len(),
        lines
    );
    Ok(pairs)
}

/// Collects the contracts of the instruments configured for the file's source.
///
/// Files of sources without configured instruments yield nothing.
pub fn process_coreref_file(
    path: &Path,
    instruments: &InstrumentsBySource,
) -> Result<Vec<SourceSymbolPair>> {
    let source_id = get_source_id_from_file_path(path)?;
    let symbols = retrieve_instruments(&source_id, instruments).unwrap_or_default();

    let matcher = match ContractMatcher::new(source_id, symbols)? {
        Some(matcher) => matcher,
        None => {
            tracing::warn!(
                "No instruments configured for {}, skipping",
                path.display()
            );
            return Ok(Vec::new());
        }
    };

    retrieve_source_symbol_pairs(path, matcher.message_pattern(), matcher.instrument_pattern())
}

/// Collects the contracts of every file, in the order the files are given.
///
/// Files are scanned in parallel. The error of the first failing file, in
/// input order, aborts the run.
pub fn process_all_coreref_files(
    paths: &[PathBuf],
    instruments: &InstrumentsBySource,
) -> Result<Vec<SourceSymbolPair>> {
    let per_file: Vec<Result<Vec<SourceSymbolPair>>> = paths
        .par_iter()
        .map(|path| process_coreref_file(path, instruments))
        .collect();

    let mut pairs = Vec::new();
    for file_pairs in per_file {
        pairs.extend(file_pairs?);
    }
    tracing::info!(
        "Discovered {} contracts in {} COREREF files",
        pairs.len(),
        paths.len()
    );
    Ok(pairs)
}
