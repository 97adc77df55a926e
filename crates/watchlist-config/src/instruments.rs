//! Instruments input file
//!
//! A JSON object mapping each ICE source id to the stable symbols of the
//! futures instruments of interest for that source:
//!
//! ```json
//! { "207": ["F:FDAX", "F:FESX"], "673": ["F2:ES", "F2:NQ"] }
//! ```

use std::fs;
use std::path::Path;

use crate::error::{Result, WatchlistError};
use crate::types::{InstrumentsBySource, SourceId};

/// Reads the instruments file into a source id → symbols map
pub fn json_loader(path: impl AsRef<Path>) -> Result<InstrumentsBySource> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| WatchlistError::io(path, e))?;

    let instruments: InstrumentsBySource =
        serde_json::from_str(&content).map_err(|source| WatchlistError::InvalidInstruments {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        "Loaded {} sources ({} symbols) from {}",
        instruments.len(),
        instruments.values().map(Vec::len).sum::<usize>(),
        path.display()
    );
    Ok(instruments)
}

/// Instruments of interest for one source, `None` if the source is not configured
pub fn retrieve_instruments<'a>(
    source_id: &SourceId,
    instruments: &'a InstrumentsBySource,
) -> Option<&'a [String]> {
    instruments.get(source_id.as_str()).map(Vec::as_slice)
}
