use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Source id to the stable instrument symbols wanted for that source
pub type InstrumentsBySource = BTreeMap<String, Vec<String>>;

/// ICE source id, e.g. `207`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A contract discovered in a COREREF file, e.g. (`207`, `F:FESX\H21`).
///
/// Serialized as one `sourceId,RTSsymbol` row of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSymbolPair {
    pub source_id: SourceId,
    pub symbol: String,
}

impl SourceSymbolPair {
    pub fn new(source_id: impl Into<SourceId>, symbol: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            symbol: symbol.into(),
        }
    }
}

/// Outcome of writing a configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub symbols_written: usize,
}

impl fmt::Display for WriteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Configuration file successfully written.\n{} symbols were added to the file.",
            self.symbols_written
        )
    }
}
