//! CSV loaders for the city and hospital reference tables.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::GazetteerError;
use crate::states;

/// Parsed city table: distinct names, per-state membership and population.
#[derive(Debug, Default)]
pub(crate) struct CityTable {
    pub names: HashSet<String>,
    pub by_state: HashMap<String, HashSet<String>>,
    pub populations: HashMap<String, u64>,
    /// Distinct names, most populous first; ties keep file order.
    pub ranked: Vec<String>,
}

impl CityTable {
    pub fn from_csv_str(text: &str, origin: &str) -> Result<Self, GazetteerError> {
        Self::from_reader(text.as_bytes(), origin)
    }

    pub fn from_reader<R: Read>(reader: R, origin: &str) -> Result<Self, GazetteerError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut table = CityTable::default();
        // (first row index, best population) per name, for ranking
        let mut rank_keys: HashMap<String, (usize, u64)> = HashMap::new();

        for (idx, record) in rdr.records().enumerate() {
            let record = record.map_err(|source| GazetteerError::Csv {
                origin: origin.to_string(),
                source,
            })?;
            let line = line_of(&record);
            let row = parse_city_row(&record).map_err(|reason| GazetteerError::Malformed {
                origin: origin.to_string(),
                line,
                reason,
            })?;

            if !states::is_known_abbrev(&row.state) {
                return Err(GazetteerError::UnknownState {
                    origin: origin.to_string(),
                    line,
                    abbr: row.state,
                });
            }

            table
                .by_state
                .entry(row.state)
                .or_default()
                .insert(row.city.clone());

            if let Some(pop) = row.population {
                let best = table.populations.entry(row.city.clone()).or_insert(pop);
                *best = (*best).max(pop);
            }
            let key = rank_keys.entry(row.city.clone()).or_insert((idx, 0));
            key.1 = key.1.max(row.population.unwrap_or(0));
            table.names.insert(row.city);
        }

        let mut ranked: Vec<(String, (usize, u64))> = rank_keys.into_iter().collect();
        ranked.sort_by(|(_, (ia, pa)), (_, (ib, pb))| pb.cmp(pa).then(ia.cmp(ib)));
        table.ranked = ranked.into_iter().map(|(name, _)| name).collect();

        tracing::debug!(
            origin,
            cities = table.names.len(),
            states = table.by_state.len(),
            "loaded city table"
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// The `n` most populous distinct city names.
    pub fn top(&self, n: usize) -> HashSet<String> {
        self.ranked.iter().take(n).cloned().collect()
    }

    /// Word count of the longest city name.
    pub fn max_words(&self) -> usize {
        self.names
            .iter()
            .map(|n| n.split_whitespace().count())
            .max()
            .unwrap_or(0)
    }
}

struct CityRow {
    city: String,
    state: String,
    population: Option<u64>,
}

/// Canonical form of a city name: uppercase, trimmed, periods removed.
pub fn canonical_city_name(raw: &str) -> String {
    raw.trim().to_uppercase().replace('.', "")
}

fn parse_city_row(record: &StringRecord) -> Result<CityRow, String> {
    let city = canonical_city_name(record.get(0).unwrap_or(""));
    if city.is_empty() {
        return Err("empty city name".to_string());
    }
    let state = record
        .get(1)
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing state for {city}"))?;
    let population = match record.get(2).map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_population(raw).ok_or_else(|| format!("bad population {raw:?}"))?),
    };
    Ok(CityRow {
        city,
        state,
        population,
    })
}

/// Accepts integer counts and the float form some exports use ("8804190.0").
fn parse_population(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Open a reference file. `Ok(None)` means it does not exist.
fn open_optional(path: &Path) -> Result<Option<File>, GazetteerError> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "reference table not found, continuing with an empty table");
            Ok(None)
        }
        Err(source) => Err(GazetteerError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn load_city_table(path: &Path) -> Result<CityTable, GazetteerError> {
    let Some(file) = open_optional(path)? else {
        return Ok(CityTable::default());
    };
    let origin = path.display().to_string();
    let table = CityTable::from_reader(file, &origin)?;
    tracing::info!(path = %path.display(), cities = table.len(), "loaded city table");
    Ok(table)
}

/// Read hospital names from a CSV with a header row. The `institution`
/// column is used when present, otherwise the first column.
pub(crate) fn load_hospital_names(path: &Path) -> Result<HashSet<String>, GazetteerError> {
    let Some(file) = open_optional(path)? else {
        return Ok(HashSet::new());
    };
    let origin = path.display().to_string();
    let names = hospital_names_from_reader(file, &origin)?;
    tracing::info!(path = %path.display(), hospitals = names.len(), "loaded hospital names");
    Ok(names)
}

pub(crate) fn hospital_names_from_reader<R: Read>(
    reader: R,
    origin: &str,
) -> Result<HashSet<String>, GazetteerError> {
    let csv_err = |source| GazetteerError::Csv {
        origin: origin.to_string(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let column = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .position(|h| h.eq_ignore_ascii_case("institution"))
        .unwrap_or(0);

    let mut names = HashSet::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        if let Some(name) = record.get(column) {
            let name = name.trim().to_uppercase();
            if !name.is_empty() {
                names.insert(name);
            }
        }
    }
    Ok(names)
}
