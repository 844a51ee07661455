//! Extractors for the self-contained fields: email, zip code, country and
//! U.S. state.

use affiliation_gazetteer::{Gazetteer, states};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::record::UNITED_KINGDOM;
use crate::text::contains_token;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+").unwrap());

static ZIP5_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]{5})(-)?([0-9]{4})?").unwrap());

static ZIP3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]{3})(-)?([0-9]{4})?").unwrap());

/// A U.S. state found in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateMatch {
    /// Full state name, e.g. "New York".
    pub name: &'static str,
    /// Two-letter postal abbreviation, e.g. "NY".
    pub abbreviation: &'static str,
    /// The surface form that matched: either the abbreviation or the name.
    pub token: &'static str,
}

/// First email-looking token, with a single trailing period dropped.
pub fn extract_email(text: &str) -> String {
    match EMAIL_RE.find(text) {
        Some(m) => {
            let email = m.as_str();
            email.strip_suffix('.').unwrap_or(email).to_string()
        }
        None => String::new(),
    }
}

/// First 5-digit zip (optionally ZIP+4), falling back to a 3-digit form.
/// The result is the concatenation of the matched groups, so a bare dash
/// after the digits is kept.
pub fn extract_zip(text: &str) -> String {
    match ZIP5_RE.captures(text).or_else(|| ZIP3_RE.captures(text)) {
        Some(caps) => concat_groups(&caps),
        None => String::new(),
    }
}

fn concat_groups(caps: &Captures<'_>) -> String {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .collect()
}

/// Canonical lowercase country name for the first country whose variant
/// occurs in `text`, in table order.
///
/// Matching is case-insensitive and a variant must not be flanked by
/// letters. If nothing matches, a standalone uppercase "UK" still counts as
/// the United Kingdom.
pub fn extract_country(text: &str, gazetteer: &Gazetteer) -> String {
    let lower = text.to_lowercase();
    let found = gazetteer
        .countries()
        .iter()
        .find(|country| country.variants.iter().any(|v| contains_token(&lower, v)));
    if let Some(country) = found {
        return country.canonical.clone();
    }
    if contains_token(text, "UK") {
        return UNITED_KINGDOM.to_string();
    }
    String::new()
}

/// First U.S. state in scan order: every abbreviation before any full name.
///
/// Abbreviations are case-sensitive and must not touch another letter on
/// either side, so "IN" matches "Bloomington, IN 47405" but not "INDIANA" or
/// "in". The leading guard keeps acronyms that end in a state code ("SUNY",
/// "CUNY", "UCLA") from reading as a state. Full names are case-sensitive
/// substrings.
pub fn extract_state(text: &str, gazetteer: &Gazetteer) -> Option<StateMatch> {
    gazetteer.state_scan_order().iter().find_map(|&token| {
        if token.len() == 2 {
            if !contains_token(text, token) {
                return None;
            }
            let name = states::abbrev_to_name(token)?;
            Some(StateMatch {
                name,
                abbreviation: token,
                token,
            })
        } else {
            if !text.contains(token) {
                return None;
            }
            let abbreviation = states::name_to_abbrev(token)?;
            Some(StateMatch {
                name: token,
                abbreviation,
                token,
            })
        }
    })
}
