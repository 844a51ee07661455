//! The parsing pipeline.

use std::sync::Arc;

use affiliation_gazetteer::{Gazetteer, GazetteerError};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{AffiliationRecord, UNITED_STATES};
use crate::text::remove_all;
use crate::{city, fields, normalize, segment};

/// Splits a multi-affiliation string: any semicolon, or a period followed by
/// whitespace or the end of the text.
static MULTI_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r";|\.(?:\s|$)").unwrap());

/// Parses affiliation strings against a shared [`Gazetteer`].
///
/// Cheap to clone; clones share the gazetteer. Parsing never fails: any
/// field that cannot be determined is left empty.
#[derive(Debug, Clone)]
pub struct AffiliationParser {
    gazetteer: Arc<Gazetteer>,
}

/// Where the location fields landed.
struct Place {
    location: String,
    country: String,
    us_state: String,
    us_city: String,
}

impl AffiliationParser {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }

    /// Parser over the bundled gazetteer.
    pub fn bundled() -> Result<Self, GazetteerError> {
        Ok(Self::new(Arc::new(Gazetteer::bundled()?)))
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Accent folding followed by normalization, as the first step of
    /// [`parse`](Self::parse) sees it.
    pub fn clean(&self, text: &str) -> String {
        normalize::clean(&normalize::fold_accents(text), &self.gazetteer)
    }

    /// Parse one affiliation string.
    pub fn parse(&self, text: &str) -> AffiliationRecord {
        let gazetteer = &*self.gazetteer;
        let cleaned = self.clean(text);

        let email = fields::extract_email(&cleaned);
        let without_email = remove_all(&cleaned, &email);
        let zipcode = fields::extract_zip(&without_email);
        let working = normalize::tidy_residue(&remove_all(&without_email, &zipcode));

        let segmentation = segment::segment(&working, gazetteer);
        let place = self.resolve_place(&working, &segmentation.location);

        let mut institutions: Vec<String> = Vec::with_capacity(segmentation.institutions.len());
        for inst in &segmentation.institutions {
            let named = segment::append_campus_city(inst, &place.location, gazetteer);
            if !institutions.contains(&named) {
                institutions.push(named);
            }
        }

        let record = AffiliationRecord {
            full_text: working,
            institutions,
            departments: segmentation.departments,
            email,
            zipcode,
            location: place.location,
            country: place.country,
            us_state: place.us_state,
            us_city: place.us_city,
        };
        tracing::debug!(
            institutions = record.institutions.len(),
            departments = record.departments.len(),
            country = %record.country,
            state = %record.us_state,
            city = %record.us_city,
            "parsed affiliation"
        );
        record
    }

    /// Parse text that may be missing; `None` yields an all-empty record.
    pub fn parse_optional(&self, text: Option<&str>) -> AffiliationRecord {
        match text {
            Some(text) => self.parse(text),
            None => AffiliationRecord::default(),
        }
    }

    pub fn parse_email(&self, text: &str) -> String {
        fields::extract_email(text)
    }

    pub fn parse_zipcode(&self, text: &str) -> String {
        fields::extract_zip(text)
    }

    /// Split a string holding several affiliations and parse each piece.
    ///
    /// The email and zip code are cut out of the whole string first, and
    /// `Dept.`/`Univ.`/`Surg.` are expanded so their periods do not split a
    /// fragment in two.
    pub fn split_multiple(&self, text: &str) -> Vec<AffiliationRecord> {
        let folded = normalize::fold_accents(text);
        let email = fields::extract_email(&folded);
        let without_email = remove_all(&folded, &email);
        let zipcode = fields::extract_zip(&without_email);
        let remaining = normalize::expand_literal_abbreviations(&remove_all(&without_email, &zipcode));

        MULTI_SPLIT_RE
            .split(&remaining)
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| self.parse(fragment))
            .collect()
    }

    fn resolve_place(&self, full: &str, location: &str) -> Place {
        let gazetteer = &*self.gazetteer;
        let location = location.replace('.', "").trim().to_string();

        let mut country = fields::extract_country(&location, gazetteer);
        if country.is_empty() {
            country = fields::extract_country(full, gazetteer);
        }

        let state = fields::extract_state(&location, gazetteer)
            .or_else(|| fields::extract_state(full, gazetteer));

        let us_city = if state.is_some() || country.is_empty() || country == UNITED_STATES {
            let from_location = city::resolve_city(&location, state.as_ref(), gazetteer);
            if from_location.is_empty() {
                city::resolve_city(full, state.as_ref(), gazetteer)
            } else {
                from_location
            }
        } else {
            String::new()
        };

        if state.is_some() || (country.is_empty() && gazetteer.is_top_city(&us_city)) {
            country = UNITED_STATES.to_string();
        }

        Place {
            location,
            country,
            us_state: state.map(|s| s.name.to_string()).unwrap_or_default(),
            us_city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: &str = "city,state_id,population\n\
        New York,NY,8000000\n\
        Rochester,NY,210000\n\
        Rochester,MN,120000\n\
        Boston,MA,650000\n\
        Cambridge,MA,118000\n\
        Stanford,CA,21000\n\
        Los Angeles,CA,3900000\n\
        Cambridge,MD,13000\n";

    fn parser() -> AffiliationParser {
        let gazetteer = Gazetteer::builder().cities_csv(CITIES).build().unwrap();
        AffiliationParser::new(Arc::new(gazetteer))
    }

    #[test]
    fn test_parse_full_us_affiliation() {
        let record = parser().parse(
            "Dept. of Surgery, Univ. of Rochester, Rochester, NY 14642, jdoe@example.com",
        );
        assert_eq!(record.email, "jdoe@example.com");
        assert_eq!(record.zipcode, "14642");
        assert_eq!(record.institutions, vec!["University of Rochester"]);
        assert_eq!(record.departments, vec!["Department of Surgery"]);
        assert_eq!(record.location, "Rochester, NY");
        assert_eq!(record.us_state, "New York");
        assert_eq!(record.us_city, "ROCHESTER");
        assert_eq!(record.country, UNITED_STATES);
        assert_eq!(
            record.full_text,
            "Department of Surgery, University of Rochester, Rochester, NY"
        );
    }

    #[test]
    fn test_parse_non_us_skips_city() {
        let record = parser().parse("Univ. of Cambridge, Cambridge, UK");
        assert_eq!(record.institutions, vec!["University of Cambridge"]);
        assert_eq!(record.country, "united kingdom");
        assert_eq!(record.us_state, "");
        assert_eq!(record.us_city, "");
    }

    #[test]
    fn test_top_city_implies_us() {
        let record = parser().parse("Boston Medical Center, Boston");
        assert_eq!(record.us_city, "BOSTON");
        assert_eq!(record.us_state, "");
        assert_eq!(record.country, UNITED_STATES);
    }

    #[test]
    fn test_campus_city_appended() {
        let record = parser().parse("University of California, Los Angeles, CA 90095");
        assert_eq!(
            record.institutions,
            vec!["University of California Los Angeles"]
        );
        assert_eq!(record.us_city, "LOS ANGELES");
        assert_eq!(record.zipcode, "90095");
    }

    #[test]
    fn test_location_periods_removed() {
        let record = parser().parse("Harvard University, Boston, Mass., U.S.A.");
        assert_eq!(record.location, "Boston, Mass, USA");
        assert_eq!(record.country, UNITED_STATES);
        assert_eq!(record.us_city, "BOSTON");
    }

    #[test]
    fn test_parse_empty_and_missing() {
        let p = parser();
        assert_eq!(p.parse(""), AffiliationRecord::default());
        assert_eq!(p.parse_optional(None), AffiliationRecord::default());
        assert_eq!(p.parse_optional(Some("")), AffiliationRecord::default());
    }

    #[test]
    fn test_parse_email_and_zip_directly() {
        let p = parser();
        assert_eq!(p.parse_email("write to a@b.org."), "a@b.org");
        assert_eq!(p.parse_zipcode("Boston, MA 02115"), "02115");
    }

    #[test]
    fn test_split_multiple() {
        let records = parser().split_multiple(
            "Dept. of Surgery, Univ. of Rochester, Rochester, NY; \
             Harvard University, Boston, MA. jdoe@example.com",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].institutions, vec!["University of Rochester"]);
        assert_eq!(records[0].us_city, "ROCHESTER");
        assert_eq!(records[1].institutions, vec!["Harvard University"]);
        assert_eq!(records[1].us_city, "BOSTON");
        assert!(records.iter().all(|r| r.email.is_empty()));
    }

    #[test]
    fn test_split_multiple_empty() {
        assert!(parser().split_multiple("").is_empty());
        assert!(parser().split_multiple(" ; . ").is_empty());
    }
}
