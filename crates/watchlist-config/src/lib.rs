//! Watchlist configuration generator.
//!
//! Scans ICE COREREF reference data files for the futures contracts of a set
//! of instruments and writes them to a Watchlist configuration CSV.

pub mod coreref;
pub mod discovery;
pub mod error;
pub mod instruments;
pub mod patterns;
pub mod types;
pub mod writer;

pub use coreref::{process_all_coreref_files, process_coreref_file, retrieve_source_symbol_pairs};
pub use discovery::{find_all_coreref_files, get_source_id_from_file_path, search_files};
pub use error::{Result, WatchlistError};
pub use instruments::{json_loader, retrieve_instruments};
pub use patterns::{
    combine_multiple_regexes, create_dc_message_level_pattern, create_instrument_level_pattern,
    create_specific_instrument_regex, ContractMatcher,
};
pub use types::{InstrumentsBySource, SourceId, SourceSymbolPair, WriteSummary};
pub use writer::{config_file_path_for, config_file_writer, generate_config_file_path};
