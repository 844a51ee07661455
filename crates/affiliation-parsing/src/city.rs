//! U.S. city resolution by n-gram lookup against the gazetteer.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use affiliation_gazetteer::Gazetteer;

use crate::fields::StateMatch;
use crate::text::token_positions;

/// Prepare text for city lookup: periods vanish ("St. Louis" becomes
/// "St Louis"), other punctuation except hyphens and apostrophes becomes a
/// space, and whitespace collapses. Case is preserved so the result can be
/// searched for the state token as it was matched.
fn normalize_for_cities(text: &str) -> String {
    let replaced: String = text
        .chars()
        .filter(|&c| c != '.')
        .map(|c| {
            if c.is_ascii_punctuation() && c != '-' && c != '\'' {
                ' '
            } else {
                c
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every run of 1 to `max_words` consecutive words, uppercased.
pub fn candidate_ngrams(text: &str, max_words: usize) -> HashSet<String> {
    let upper = normalize_for_cities(text).to_uppercase();
    let words: Vec<&str> = upper.split(' ').filter(|w| !w.is_empty()).collect();
    let mut grams = HashSet::new();
    for n in 1..=max_words.min(words.len()) {
        for window in words.windows(n) {
            grams.insert(window.join(" "));
        }
    }
    grams
}

/// Resolve the U.S. city named in `text`, or return an empty string.
///
/// Candidates are the n-grams that name a city in `state` (or, with no
/// state, one of the gazetteer's most populous cities). A candidate that is
/// a substring of another candidate is dropped. When more than one remains,
/// the candidate whose last occurrence before the state token is closest to
/// it wins; ties go to the longer name, then the larger population.
pub fn resolve_city(text: &str, state: Option<&StateMatch>, gazetteer: &Gazetteer) -> String {
    let scope = match state {
        Some(state) => match gazetteer.cities_in_state(state.abbreviation) {
            Some(cities) => cities,
            None => return String::new(),
        },
        None => gazetteer.top_cities(),
    };

    let grams = candidate_ngrams(text, gazetteer.max_city_words());
    let candidates: BTreeSet<&str> = grams
        .iter()
        .filter(|g| scope.contains(*g))
        .map(String::as_str)
        .collect();
    let survivors: Vec<&str> = candidates
        .iter()
        .filter(|c| !candidates.iter().any(|other| other != *c && other.contains(**c)))
        .copied()
        .collect();

    match survivors.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        _ => disambiguate(text, &survivors, state, gazetteer),
    }
}

/// Larger than any real character distance; candidates with no occurrence
/// before the state token sort behind every candidate that has one.
const FAR: usize = usize::MAX;

fn disambiguate(
    text: &str,
    survivors: &[&str],
    state: Option<&StateMatch>,
    gazetteer: &Gazetteer,
) -> String {
    let Some(state) = state else {
        tracing::trace!(?survivors, "several cities and no state to anchor on");
        return String::new();
    };

    let cased = normalize_for_cities(text);
    let Some(state_pos) = token_positions(&cased, state.token).last() else {
        tracing::trace!(token = state.token, "state token missing from city text");
        return String::new();
    };
    // ASCII uppercasing keeps byte offsets aligned with `cased`.
    let upper = cased.to_ascii_uppercase();

    let best = survivors.iter().min_by_key(|&&city| {
        let distance = token_positions(&upper, city)
            .filter(|&start| start < state_pos)
            .last()
            .map_or(FAR, |start| state_pos - start);
        let words = city.split(' ').count();
        let population = gazetteer.city_population(city).unwrap_or(0);
        (distance, Reverse(words), Reverse(population), city)
    });
    best.map(|city| city.to_string()).unwrap_or_default()
}
