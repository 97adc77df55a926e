//! Contract matching patterns
//!
//! Futures contracts follow the naming convention
//! `<instrument symbol>\<month code><two digit year>`, e.g. `F:FESX\H21` for the
//! EURO STOXX 50 future with March 2021 delivery. Contract definitions are
//! carried by DC messages, `DC|<sourceId>|<contract symbol>|...`.

use regex::Regex;

use crate::error::Result;
use crate::types::SourceId;

/// Regex matching every contract of one instrument symbol
pub fn create_specific_instrument_regex(instrument_symbol: &str) -> String {
    format!(r"{}\\[A-Z][0-9]{{2}}", regex::escape(instrument_symbol))
}

/// Alternation of the contract regexes of all `instrument_symbols`, as one group
pub fn create_instrument_level_pattern<S: AsRef<str>>(instrument_symbols: &[S]) -> String {
    let regexes: Vec<String> = instrument_symbols
        .iter()
        .map(|symbol| create_specific_instrument_regex(symbol.as_ref()))
        .collect();
    format!("({})", regexes.join("|"))
}

/// Regex selecting the DC messages of `source_id` that define a contract of
/// one of `instrument_symbols`
pub fn create_dc_message_level_pattern<S: AsRef<str>>(
    source_id: &SourceId,
    instrument_symbols: &[S],
) -> String {
    format!(
        r"^DC\|{}\|{}",
        regex::escape(source_id.as_str()),
        create_instrument_level_pattern(instrument_symbols)
    )
}

/// Compiles the alternation of several regexes
pub fn combine_multiple_regexes<S: AsRef<str>>(regexes: &[S]) -> Result<Regex> {
    let combined = regexes
        .iter()
        .map(|r| r.as_ref())
        .collect::<Vec<_>>()
        .join("|");
    Ok(Regex::new(&combined)?)
}

/// Compiled patterns for the contracts of one source
#[derive(Debug, Clone)]
pub struct ContractMatcher {
    source_id: SourceId,
    message_pattern: Regex,
    instrument_pattern: Regex,
}

impl ContractMatcher {
    /// Returns `None` when there are no instruments to look for
    pub fn new<S: AsRef<str>>(source_id: SourceId, instrument_symbols: &[S]) -> Result<Option<Self>> {
        if instrument_symbols.is_empty() {
            return Ok(None);
        }

        let message_pattern =
            Regex::new(&create_dc_message_level_pattern(&source_id, instrument_symbols))?;
        let instrument_pattern = Regex::new(&create_instrument_level_pattern(instrument_symbols))?;

        Ok(Some(Self {
            source_id,
            message_pattern,
            instrument_pattern,
        }))
    }

    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    pub fn message_pattern(&self) -> &Regex {
        &self.message_pattern
    }

    pub fn instrument_pattern(&self) -> &Regex {
        &self.instrument_pattern
    }

    /// Contract symbol defined by `line`, if it is a wanted DC message
    pub fn find<'l>(&self, line: &'l str) -> Option<&'l str> {
        find_contract(&self.message_pattern, &self.instrument_pattern, line)
    }
}

pub(crate) fn find_contract<'l>(
    message_pattern: &Regex,
    instrument_pattern: &Regex,
    line: &'l str,
) -> Option<&'l str> {
    if !message_pattern.is_match(line) {
        return None;
    }
    instrument_pattern.find(line).map(|m| m.as_str())
}
