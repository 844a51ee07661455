use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub gazetteer: Option<GazetteerConfig>,
    pub keywords: Option<KeywordsConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerConfig {
    pub cities_path: Option<String>,
    pub hospitals_path: Option<String>,
    pub top_cities: Option<usize>,
}

/// Keywords appended to the built-in tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordsConfig {
    pub extra_institutions: Option<Vec<String>>,
    pub extra_departments: Option<Vec<String>>,
    pub extra_exclusions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: Option<bool>,
}

/// Platform config directory path: `<config_dir>/affiliation-parser/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("affiliation-parser").join("config.toml"))
}

/// Load config by cascading CWD `.affiliation-parser.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".affiliation-parser.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed; a parse failure is logged.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        gazetteer: Some(GazetteerConfig {
            cities_path: overlay
                .gazetteer
                .as_ref()
                .and_then(|g| g.cities_path.clone())
                .or_else(|| base.gazetteer.as_ref().and_then(|g| g.cities_path.clone())),
            hospitals_path: overlay
                .gazetteer
                .as_ref()
                .and_then(|g| g.hospitals_path.clone())
                .or_else(|| {
                    base.gazetteer
                        .as_ref()
                        .and_then(|g| g.hospitals_path.clone())
                }),
            top_cities: overlay
                .gazetteer
                .as_ref()
                .and_then(|g| g.top_cities)
                .or_else(|| base.gazetteer.as_ref().and_then(|g| g.top_cities)),
        }),
        keywords: Some(KeywordsConfig {
            extra_institutions: overlay
                .keywords
                .as_ref()
                .and_then(|k| k.extra_institutions.clone())
                .or_else(|| {
                    base.keywords
                        .as_ref()
                        .and_then(|k| k.extra_institutions.clone())
                }),
            extra_departments: overlay
                .keywords
                .as_ref()
                .and_then(|k| k.extra_departments.clone())
                .or_else(|| {
                    base.keywords
                        .as_ref()
                        .and_then(|k| k.extra_departments.clone())
                }),
            extra_exclusions: overlay
                .keywords
                .as_ref()
                .and_then(|k| k.extra_exclusions.clone())
                .or_else(|| {
                    base.keywords
                        .as_ref()
                        .and_then(|k| k.extra_exclusions.clone())
                }),
        }),
        output: Some(OutputConfig {
            pretty: overlay
                .output
                .as_ref()
                .and_then(|o| o.pretty)
                .or_else(|| base.output.as_ref().and_then(|o| o.pretty)),
        }),
    }
}
