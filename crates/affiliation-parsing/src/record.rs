use serde::{Deserialize, Serialize};

/// Canonical country name assigned whenever a U.S. state is found.
pub const UNITED_STATES: &str = "united states of america";

/// Canonical country name for a standalone "UK".
pub const UNITED_KINGDOM: &str = "united kingdom";

/// The structured result of parsing one affiliation string.
///
/// Every field is always present; a field that could not be determined is
/// an empty string or an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationRecord {
    /// The cleaned working text after the email and zip code are removed.
    pub full_text: String,
    /// Institution names in order of appearance, without duplicates.
    pub institutions: Vec<String>,
    /// Department-like segments in order of appearance, without duplicates.
    pub departments: Vec<String>,
    pub email: String,
    pub zipcode: String,
    /// Segments after the last institution, joined with ", ", periods removed.
    pub location: String,
    /// Lowercase canonical country name.
    pub country: String,
    /// Full name of the U.S. state.
    pub us_state: String,
    /// Uppercase city name as it appears in the gazetteer.
    pub us_city: String,
}

impl AffiliationRecord {
    /// Whether the record locates the affiliation in the United States.
    pub fn is_us(&self) -> bool {
        self.country == UNITED_STATES
    }
}
