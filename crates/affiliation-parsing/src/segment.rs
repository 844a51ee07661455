//! Segmentation of a cleaned affiliation into institutions, departments and
//! the trailing location.

use affiliation_gazetteer::Gazetteer;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::token_positions;

static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s|/").unwrap());

/// How many trailing segments stand in for the location when no segment
/// names an institution.
const FALLBACK_LOCATION_SEGMENTS: usize = 3;

/// The classified pieces of one affiliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub institutions: Vec<String>,
    pub departments: Vec<String>,
    pub location: String,
}

/// Split on ", " and "/", trimming and dropping empty pieces.
pub fn split_segments(text: &str) -> Vec<String> {
    DELIMITER_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// Classify the segments of `text`.
///
/// A segment is an institution when it contains an institution keyword or
/// names a known hospital; the location is everything after the last
/// institution (or the last three segments if there is none). Institutions
/// that read like sub-units are dropped unless they say "university", and
/// department-like segments are removed from the location.
pub fn segment(text: &str, gazetteer: &Gazetteer) -> Segmentation {
    let segments = split_segments(text);

    let mut institutions: Vec<String> = Vec::new();
    let mut last_institution = None;
    for (i, seg) in segments.iter().enumerate() {
        let lower = seg.to_lowercase();
        let is_institution = contains_any(&lower, gazetteer.institution_keywords())
            || gazetteer.is_hospital(&seg.to_uppercase());
        if is_institution && !institutions.contains(seg) {
            institutions.push(seg.clone());
            last_institution = Some(i);
        }
    }

    let location_segments: &[String] = match last_institution {
        Some(i) => &segments[i + 1..],
        None => &segments[segments.len().saturating_sub(FALLBACK_LOCATION_SEGMENTS)..],
    };

    institutions.retain(|inst| {
        let lower = inst.to_lowercase();
        lower.contains("university") || !contains_any(&lower, gazetteer.exclusion_keywords())
    });

    let is_department =
        |seg: &str| contains_any(&seg.to_lowercase(), gazetteer.department_keywords());

    let mut location = location_segments
        .iter()
        .filter(|seg| !is_department(seg))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if location.is_empty() {
        location = segments.last().cloned().unwrap_or_default();
    }

    let mut departments: Vec<String> = Vec::new();
    for seg in segments.iter().filter(|seg| is_department(seg)) {
        if !departments.contains(seg) {
            departments.push(seg.clone());
        }
    }

    Segmentation {
        institutions,
        departments,
        location,
    }
}

/// Append the campus city to a multi-campus institution name.
///
/// If `institution` belongs to a multi-campus system and one of its campus
/// cities occurs in `location` but not already in the name, the city is
/// appended with the casing it has in `location`.
pub fn append_campus_city(institution: &str, location: &str, gazetteer: &Gazetteer) -> String {
    let inst_lower = institution.to_ascii_lowercase();
    // ASCII lowercasing keeps byte offsets aligned with `location`.
    let loc_lower = location.to_ascii_lowercase();
    for hint in gazetteer.campus_hints() {
        if !inst_lower.contains(hint.institution.as_str()) {
            continue;
        }
        for city in &hint.cities {
            if inst_lower.contains(city.as_str()) {
                continue;
            }
            if let Some(start) = token_positions(&loc_lower, city).next() {
                let original = &location[start..start + city.len()];
                return format!("{institution} {original}");
            }
        }
    }
    institution.to_string()
}
