//! Read-only reference data for affiliation parsing.
//!
//! A [`Gazetteer`] holds U.S. cities (with per-state membership and
//! population), the fixed state table, and the ordered rule tables used by
//! the parser: institution/department/exclusion keywords, country variants,
//! abbreviation expansions and multi-campus hints. It is built once through
//! [`GazetteerBuilder`] and never mutated afterwards, so a single instance can
//! be shared across threads.

mod config;
mod loader;
pub mod states;
pub mod tables;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use regex::{NoExpand, Regex};
use thiserror::Error;

pub use config::{DEFAULT_TOP_CITIES, GazetteerBuilder, ListOverride};
pub use loader::canonical_city_name;

#[derive(Error, Debug)]
pub enum GazetteerError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },
    #[error("malformed row at line {line} of {origin}: {reason}")]
    Malformed {
        origin: String,
        line: u64,
        reason: String,
    },
    #[error("unrecognized state abbreviation {abbr:?} at line {line} of {origin}")]
    UnknownState {
        origin: String,
        line: u64,
        abbr: String,
    },
    #[error("abbreviation {variant:?} reappears in the expansion {canonical:?}")]
    SelfExpandingAbbreviation { variant: String, canonical: String },
    #[error("invalid abbreviation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A canonical name and the surface forms that stand for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub canonical: String,
    pub variants: Vec<String>,
}

impl Alias {
    pub fn new<I, S>(canonical: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical: canonical.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn from_table(table: &[(&str, &[&str])]) -> Vec<Self> {
        table
            .iter()
            .map(|(canonical, variants)| Self::new(*canonical, variants.iter().copied()))
            .collect()
    }

    pub(crate) fn lowercased(self) -> Self {
        Self {
            canonical: self.canonical.to_lowercase(),
            variants: self.variants.iter().map(|v| v.to_lowercase()).collect(),
        }
    }
}

/// An institution with several campuses and the cities that identify them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusHint {
    pub institution: String,
    pub cities: Vec<String>,
}

impl CampusHint {
    pub fn new<I, S>(institution: impl Into<String>, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            institution: institution.into(),
            cities: cities.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn from_table(table: &[(&str, &[&str])]) -> Vec<Self> {
        table
            .iter()
            .map(|(institution, cities)| Self::new(*institution, cities.iter().copied()))
            .collect()
    }

    pub(crate) fn lowercased(self) -> Self {
        Self {
            institution: self.institution.to_lowercase(),
            cities: self.cities.iter().map(|c| c.to_lowercase()).collect(),
        }
    }
}

/// An abbreviation expansion with its variants compiled to whole-token
/// matchers.
#[derive(Debug, Clone)]
pub struct AbbreviationRule {
    pub canonical: String,
    pub variants: Vec<String>,
    patterns: Vec<Regex>,
}

impl AbbreviationRule {
    pub(crate) fn compile(alias: Alias) -> Result<Self, regex::Error> {
        let patterns = alias
            .variants
            .iter()
            .map(|v| Regex::new(&token_pattern(v)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            canonical: alias.canonical,
            variants: alias.variants,
            patterns,
        })
    }

    /// The first variant of this rule that occurs as a token in `text`.
    pub fn matching_variant(&self, text: &str) -> Option<&str> {
        self.variants
            .iter()
            .zip(&self.patterns)
            .find(|(_, re)| re.is_match(text))
            .map(|(v, _)| v.as_str())
    }

    /// Replace every occurrence of the first matching variant with the
    /// canonical form. `None` if no variant occurs.
    pub fn expand(&self, text: &str) -> Option<String> {
        let re = self.patterns.iter().find(|re| re.is_match(text))?;
        Some(re.replace_all(text, NoExpand(&self.canonical)).into_owned())
    }
}

/// Word boundaries are only asserted next to word characters, so variants
/// like "U Penn" or "P.R." still anchor correctly.
fn token_pattern(variant: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let lead = if is_word(variant.chars().next()) { r"\b" } else { "" };
    let trail = if is_word(variant.chars().next_back()) { r"\b" } else { "" };
    format!("{lead}{}{trail}", regex::escape(variant))
}

/// Immutable reference data consulted by every parsing step.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    cities: HashSet<String>,
    cities_by_state: HashMap<String, HashSet<String>>,
    populations: HashMap<String, u64>,
    top_cities: HashSet<String>,
    max_city_words: usize,
    hospitals: HashSet<String>,
    institution_keywords: Vec<String>,
    department_keywords: Vec<String>,
    exclusion_keywords: Vec<String>,
    countries: Vec<Alias>,
    abbreviations: Vec<AbbreviationRule>,
    campus_hints: Vec<CampusHint>,
}

impl Gazetteer {
    /// Gazetteer over the bundled city table and the built-in rule tables.
    pub fn bundled() -> Result<Self, GazetteerError> {
        GazetteerBuilder::new().build()
    }

    pub fn builder() -> GazetteerBuilder {
        GazetteerBuilder::new()
    }

    /// Every known city name (uppercase, no periods).
    pub fn cities(&self) -> &HashSet<String> {
        &self.cities
    }

    /// Cities of one state, keyed by 2-letter abbreviation.
    pub fn cities_in_state(&self, abbr: &str) -> Option<&HashSet<String>> {
        self.cities_by_state.get(abbr)
    }

    pub fn city_population(&self, city: &str) -> Option<u64> {
        self.populations.get(city).copied()
    }

    /// The most populous cities, used to scope matches when no state is known.
    pub fn top_cities(&self) -> &HashSet<String> {
        &self.top_cities
    }

    pub fn is_top_city(&self, city: &str) -> bool {
        self.top_cities.contains(city)
    }

    /// Word count of the longest city name; bounds n-gram generation.
    pub fn max_city_words(&self) -> usize {
        self.max_city_words
    }

    pub fn state_abbrev_to_name(&self, abbr: &str) -> Option<&'static str> {
        states::abbrev_to_name(abbr)
    }

    pub fn state_scan_order(&self) -> &'static [&'static str] {
        states::STATE_SCAN_ORDER
    }

    pub fn countries(&self) -> &[Alias] {
        &self.countries
    }

    pub fn institution_keywords(&self) -> &[String] {
        &self.institution_keywords
    }

    pub fn department_keywords(&self) -> &[String] {
        &self.department_keywords
    }

    pub fn exclusion_keywords(&self) -> &[String] {
        &self.exclusion_keywords
    }

    pub fn abbreviation_rules(&self) -> &[AbbreviationRule] {
        &self.abbreviations
    }

    pub fn campus_hints(&self) -> &[CampusHint] {
        &self.campus_hints
    }

    /// Whether an uppercased segment names a known hospital.
    pub fn is_hospital(&self, upper: &str) -> bool {
        self.hospitals.contains(upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pattern_boundaries() {
        let rule = AbbreviationRule::compile(Alias::new("Massachusetts Institute of Technology", ["MIT"]))
            .unwrap();
        assert!(rule.expand("SMITH College").is_none());
        assert_eq!(
            rule.expand("MIT, Cambridge / MIT Media Lab").unwrap(),
            "Massachusetts Institute of Technology, Cambridge / Massachusetts Institute of Technology Media Lab"
        );
    }

    #[test]
    fn test_token_pattern_non_word_edges() {
        assert_eq!(token_pattern("P.R."), r"\bP\.R\.");
        assert_eq!(token_pattern("U Penn"), r"\bU Penn\b");
    }

    #[test]
    fn test_expansion_is_literal() {
        let rule = AbbreviationRule::compile(Alias::new("Costs $1", ["CST"])).unwrap();
        assert_eq!(rule.expand("CST").unwrap(), "Costs $1");
    }

    #[test]
    fn test_bundled_lookups() {
        let gaz = Gazetteer::bundled().unwrap();
        assert!(gaz.cities_in_state("NY").unwrap().contains("ROCHESTER"));
        assert!(gaz.cities_in_state("MN").unwrap().contains("ROCHESTER"));
        assert!(gaz.cities().contains("ST LOUIS"));
        assert!(gaz.is_top_city("NEW YORK"));
        assert_eq!(gaz.state_abbrev_to_name("NY"), Some("New York"));
        assert!(gaz.max_city_words() >= 3);
        assert!(gaz.city_population("NEW YORK").unwrap() > gaz.city_population("YORK").unwrap());
    }

    #[test]
    fn test_gazetteer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Gazetteer>();
    }
}
