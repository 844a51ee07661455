//! Heuristic parsing of academic affiliation strings.
//!
//! An affiliation such as
//! `"Dept. of Surgery, Univ. of Rochester, Rochester, NY 14642, jdoe@example.com"`
//! is turned into an [`AffiliationRecord`] through the following pipeline:
//!
//! 1. Fold accents to ASCII and normalize ([`normalize`]).
//! 2. Extract the email and zip code and cut them out of the text ([`fields`]).
//! 3. Split into segments and classify institutions, departments and the
//!    trailing location ([`segment`]).
//! 4. Find the country and U.S. state, then resolve the U.S. city against
//!    the gazetteer ([`fields`], [`city`]).
//! 5. Append the campus city to multi-campus institution names.
//!
//! The free functions use a parser over the bundled gazetteer, built on first
//! use. Build an [`AffiliationParser`] directly to use custom reference data.

pub mod city;
pub mod fields;
pub mod normalize;
mod parser;
mod record;
pub mod segment;
mod text;

use once_cell::sync::Lazy;

pub use affiliation_gazetteer::{Gazetteer, GazetteerBuilder, GazetteerError};
pub use fields::StateMatch;
pub use parser::AffiliationParser;
pub use record::{AffiliationRecord, UNITED_KINGDOM, UNITED_STATES};

static BUNDLED_PARSER: Lazy<Option<AffiliationParser>> =
    Lazy::new(|| match AffiliationParser::bundled() {
        Ok(parser) => Some(parser),
        Err(e) => {
            tracing::error!(error = %e, "bundled gazetteer failed to load");
            None
        }
    });

/// Parser over the bundled gazetteer, or `None` if the bundled data could
/// not be loaded.
pub fn bundled_parser() -> Option<&'static AffiliationParser> {
    BUNDLED_PARSER.as_ref()
}

/// Parse one affiliation with the bundled gazetteer.
///
/// Falls back to an empty record if the bundled gazetteer is unavailable.
pub fn parse_affiliation(text: &str) -> AffiliationRecord {
    match bundled_parser() {
        Some(parser) => parser.parse(text),
        None => AffiliationRecord::default(),
    }
}

/// Split and parse a multi-affiliation string with the bundled gazetteer.
pub fn split_multiple_affiliations(text: &str) -> Vec<AffiliationRecord> {
    match bundled_parser() {
        Some(parser) => parser.split_multiple(text),
        None => Vec::new(),
    }
}

/// First email address in `text`, or an empty string.
pub fn parse_email(text: &str) -> String {
    fields::extract_email(text)
}

/// First zip code in `text`, or an empty string.
pub fn parse_zipcode(text: &str) -> String {
    fields::extract_zip(text)
}
