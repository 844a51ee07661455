use std::path::{Path, PathBuf};

use crate::loader::{self, CityTable};
use crate::tables;
use crate::{AbbreviationRule, Alias, CampusHint, Gazetteer, GazetteerError};

/// Default size of the most-populous city tier used when no state is known.
pub const DEFAULT_TOP_CITIES: usize = 1000;

/// The city table compiled into the crate.
pub(crate) const BUNDLED_CITIES: &str = include_str!("../data/uscities.csv");

/// Controls how a built-in table is overridden.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults. Appended entries are scanned
    /// after every built-in entry.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }

    fn push(&mut self, item: T) {
        match self {
            ListOverride::Replace(v) | ListOverride::Extend(v) => v.push(item),
            ListOverride::Default => *self = ListOverride::Extend(vec![item]),
        }
    }
}

#[derive(Debug, Clone, Default)]
enum CitySource {
    #[default]
    Bundled,
    Path(PathBuf),
    Inline(String),
}

/// Builder for [`Gazetteer`].
///
/// Reference files are read once in [`build()`](Self::build). A missing file
/// degrades to an empty table; a file that exists but cannot be parsed fails
/// the build.
#[derive(Debug, Clone)]
pub struct GazetteerBuilder {
    cities: CitySource,
    hospitals_path: Option<PathBuf>,
    hospitals: Vec<String>,
    top_cities: usize,
    institution_keywords: ListOverride<String>,
    department_keywords: ListOverride<String>,
    exclusion_keywords: ListOverride<String>,
    countries: ListOverride<Alias>,
    abbreviations: ListOverride<Alias>,
    campus_hints: ListOverride<CampusHint>,
}

impl Default for GazetteerBuilder {
    fn default() -> Self {
        Self {
            cities: CitySource::Bundled,
            hospitals_path: None,
            hospitals: Vec::new(),
            top_cities: DEFAULT_TOP_CITIES,
            institution_keywords: ListOverride::Default,
            department_keywords: ListOverride::Default,
            exclusion_keywords: ListOverride::Default,
            countries: ListOverride::Default,
            abbreviations: ListOverride::Default,
            campus_hints: ListOverride::Default,
        }
    }
}

impl GazetteerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reference files ──

    /// Load the city table from a CSV file instead of the bundled one.
    pub fn cities_path(mut self, path: impl AsRef<Path>) -> Self {
        self.cities = CitySource::Path(path.as_ref().to_path_buf());
        self
    }

    /// Use in-memory CSV text (same format as the file) as the city table.
    pub fn cities_csv(mut self, csv: impl Into<String>) -> Self {
        self.cities = CitySource::Inline(csv.into());
        self
    }

    pub fn hospitals_path(mut self, path: impl AsRef<Path>) -> Self {
        self.hospitals_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn add_hospital(mut self, name: impl Into<String>) -> Self {
        self.hospitals.push(name.into());
        self
    }

    /// Number of most-populous cities accepted when no state is known.
    pub fn top_cities(mut self, n: usize) -> Self {
        self.top_cities = n;
        self
    }

    // ── Keyword lists ──

    pub fn set_institution_keywords(mut self, keywords: Vec<String>) -> Self {
        self.institution_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_institution_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.institution_keywords.push(keyword.into());
        self
    }

    pub fn set_department_keywords(mut self, keywords: Vec<String>) -> Self {
        self.department_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_department_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.department_keywords.push(keyword.into());
        self
    }

    pub fn set_exclusion_keywords(mut self, keywords: Vec<String>) -> Self {
        self.exclusion_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_exclusion_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.exclusion_keywords.push(keyword.into());
        self
    }

    // ── Ordered rule tables ──

    pub fn set_countries(mut self, countries: Vec<Alias>) -> Self {
        self.countries = ListOverride::Replace(countries);
        self
    }

    pub fn add_country(mut self, country: Alias) -> Self {
        self.countries.push(country);
        self
    }

    pub fn set_abbreviations(mut self, abbreviations: Vec<Alias>) -> Self {
        self.abbreviations = ListOverride::Replace(abbreviations);
        self
    }

    pub fn add_abbreviation(mut self, abbreviation: Alias) -> Self {
        self.abbreviations.push(abbreviation);
        self
    }

    pub fn set_campus_hints(mut self, hints: Vec<CampusHint>) -> Self {
        self.campus_hints = ListOverride::Replace(hints);
        self
    }

    pub fn add_campus_hint(mut self, hint: CampusHint) -> Self {
        self.campus_hints.push(hint);
        self
    }

    /// Read the reference files and produce an immutable [`Gazetteer`].
    pub fn build(self) -> Result<Gazetteer, GazetteerError> {
        let city_table = match &self.cities {
            CitySource::Bundled => CityTable::from_csv_str(BUNDLED_CITIES, "bundled city table")?,
            CitySource::Inline(text) => CityTable::from_csv_str(text, "inline city table")?,
            CitySource::Path(path) => loader::load_city_table(path)?,
        };

        let mut hospitals = match &self.hospitals_path {
            Some(path) => loader::load_hospital_names(path)?,
            None => Default::default(),
        };
        hospitals.extend(
            self.hospitals
                .iter()
                .map(|h| h.trim().to_uppercase())
                .filter(|h| !h.is_empty()),
        );

        let lowercase = |list: Vec<String>| -> Vec<String> {
            list.into_iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.trim().is_empty())
                .collect()
        };
        let defaults = |table: &[&str]| -> Vec<String> { table.iter().map(|s| s.to_string()).collect() };

        let institution_keywords =
            lowercase(self.institution_keywords.resolve(&defaults(tables::INSTITUTION_KEYWORDS)));
        let department_keywords =
            lowercase(self.department_keywords.resolve(&defaults(tables::DEPARTMENT_KEYWORDS)));
        let exclusion_keywords =
            lowercase(self.exclusion_keywords.resolve(&defaults(tables::EXCLUSION_KEYWORDS)));

        let countries: Vec<Alias> = self
            .countries
            .resolve(&Alias::from_table(tables::COUNTRIES))
            .into_iter()
            .map(Alias::lowercased)
            .collect();

        let abbreviations = self
            .abbreviations
            .resolve(&Alias::from_table(tables::ABBREVIATIONS))
            .into_iter()
            .map(AbbreviationRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        check_abbreviations_terminate(&abbreviations)?;

        let campus_hints: Vec<CampusHint> = self
            .campus_hints
            .resolve(&CampusHint::from_table(tables::MULTI_CAMPUS))
            .into_iter()
            .map(CampusHint::lowercased)
            .collect();

        let top_cities = city_table.top(self.top_cities);
        tracing::debug!(
            cities = city_table.len(),
            top = top_cities.len(),
            hospitals = hospitals.len(),
            countries = countries.len(),
            abbreviations = abbreviations.len(),
            "gazetteer built"
        );

        Ok(Gazetteer {
            max_city_words: city_table.max_words(),
            cities: city_table.names,
            cities_by_state: city_table.by_state,
            populations: city_table.populations,
            top_cities,
            hospitals,
            institution_keywords,
            department_keywords,
            exclusion_keywords,
            countries,
            abbreviations,
            campus_hints,
        })
    }
}

/// Reject tables where an expansion reintroduces an abbreviation token;
/// the normalizer would otherwise never reach a fixed point.
fn check_abbreviations_terminate(rules: &[AbbreviationRule]) -> Result<(), GazetteerError> {
    for rule in rules {
        for other in rules {
            if let Some(variant) = other.matching_variant(&rule.canonical) {
                return Err(GazetteerError::SelfExpandingAbbreviation {
                    variant: variant.to_string(),
                    canonical: rule.canonical.clone(),
                });
            }
        }
    }
    Ok(())
}
