use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Full state name and its postal abbreviation.
pub const STATES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Puerto Rico", "PR"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Order in which state tokens are searched for; the first hit wins.
///
/// Abbreviations come first: a bare "MO" after "Kansas City" is a better
/// signal than the "Kansas" inside the city name. Among full names, a name
/// that contains another name must precede it ("West Virginia" before
/// "Virginia", "Arkansas" before "Kansas").
pub const STATE_SCAN_ORDER: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "PR", "RI", "SC", "SD", "TN", "TX",
    "UT", "VT", "VA", "WA", "WV", "WI", "WY",
    "West Virginia",
    "Arkansas",
    "District of Columbia",
    "North Carolina",
    "South Carolina",
    "North Dakota",
    "South Dakota",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "Rhode Island",
    "Puerto Rico",
    "Alabama",
    "Alaska",
    "Arizona",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "Wisconsin",
    "Wyoming",
];

static ABBREV_TO_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATES.iter().map(|&(name, abbr)| (abbr, name)).collect());

static NAME_TO_ABBREV: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATES.iter().map(|&(name, abbr)| (name, abbr)).collect());

/// Full state name for a 2-letter abbreviation.
pub fn abbrev_to_name(abbr: &str) -> Option<&'static str> {
    ABBREV_TO_NAME.get(abbr).copied()
}

/// 2-letter abbreviation for a full state name.
pub fn name_to_abbrev(name: &str) -> Option<&'static str> {
    NAME_TO_ABBREV.get(name).copied()
}

pub fn is_known_abbrev(abbr: &str) -> bool {
    ABBREV_TO_NAME.contains_key(abbr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_order_covers_every_state_once() {
        assert_eq!(STATE_SCAN_ORDER.len(), STATES.len() * 2);
        for &(name, abbr) in STATES {
            assert_eq!(
                STATE_SCAN_ORDER.iter().filter(|t| **t == name).count(),
                1,
                "{name}"
            );
            assert_eq!(
                STATE_SCAN_ORDER.iter().filter(|t| **t == abbr).count(),
                1,
                "{abbr}"
            );
        }
    }

    #[test]
    fn test_abbreviations_precede_full_names() {
        let first_name = STATE_SCAN_ORDER
            .iter()
            .position(|t| t.len() > 2)
            .unwrap();
        assert!(STATE_SCAN_ORDER[..first_name].iter().all(|t| t.len() == 2));
        assert!(STATE_SCAN_ORDER[first_name..].iter().all(|t| t.len() > 2));
    }

    #[test]
    fn test_containing_names_come_first() {
        for (i, later) in STATE_SCAN_ORDER.iter().enumerate() {
            for earlier in &STATE_SCAN_ORDER[..i] {
                assert!(
                    !later.contains(earlier) || later == earlier || earlier.len() == 2,
                    "{later:?} contains {earlier:?} but is scanned after it"
                );
            }
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(abbrev_to_name("NY"), Some("New York"));
        assert_eq!(name_to_abbrev("West Virginia"), Some("WV"));
        assert_eq!(abbrev_to_name("XX"), None);
        assert!(is_known_abbrev("DC"));
    }
}
