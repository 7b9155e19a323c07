//! Configuration layer: search options plus site settings with layered
//! precedence (site config file → environment → CLI).
//!
//! The search options live where the theme expects them, under
//! `params.fuseOpts` in the site generator's config, and are handed to the
//! engine as-is. Validation is limited to what the engine itself needs.

use std::{fmt, path::Path, str::FromStr, time::Duration};

use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{level_filters::LevelFilter, warn};
use url::Url;

use crate::error::ConfigError;
use crate::fuzzy::QueryMatcher;
use crate::types::RecordField;

pub const DEFAULT_THRESHOLD: f64 = 0.4;
pub const DEFAULT_DISTANCE: usize = 100;
pub const DEFAULT_INDEX_PATH: &str = "/index.json";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const INDEX_FILE_NAME: &str = "index.json";
const ENV_PREFIX: &str = "BLOGSIFT";
const SITE_CONFIG_BASENAMES: [&str; 2] = ["hugo", "config"];
const SEARCH_OPTION_KEYS: [&str; 2] = ["params.fuseOpts", "params.fuseopts"];
const BASE_URL_KEYS: [&str; 2] = ["baseURL", "baseurl"];
const HOME_OUTPUTS_KEYS: [&str; 1] = ["outputs.home"];

// =============================================================================
// SEARCH OPTIONS
// =============================================================================

/// A key's field name. Names that aren't index fields are kept: they
/// select nothing and never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyName {
    Field(RecordField),
    Other(String),
}

impl KeyName {
    pub fn field(&self) -> Option<RecordField> {
        match self {
            KeyName::Field(field) => Some(*field),
            KeyName::Other(_) => None,
        }
    }
}

impl From<RecordField> for KeyName {
    fn from(field: RecordField) -> Self {
        KeyName::Field(field)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyName::Field(field) => fmt::Display::fmt(field, f),
            KeyName::Other(name) => f.write_str(name),
        }
    }
}

/// A matched key: a bare field name, or a field with a relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    Name(KeyName),
    Weighted {
        name: KeyName,
        #[serde(default = "default_weight")]
        weight: f64,
    },
}

fn default_weight() -> f64 {
    1.0
}

impl KeySpec {
    pub fn name(&self) -> &KeyName {
        match self {
            KeySpec::Name(name) | KeySpec::Weighted { name, .. } => name,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            KeySpec::Name(_) => default_weight(),
            KeySpec::Weighted { weight, .. } => *weight,
        }
    }
}

impl From<RecordField> for KeySpec {
    fn from(field: RecordField) -> Self {
        KeySpec::Name(field.into())
    }
}

/// A key with its weight normalized so all keys sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedKey {
    pub name: KeyName,
    pub weight: f64,
}

/// Everything the match engine can be told, in the theme's own vocabulary.
///
/// Serialized names follow the site config (`isCaseSensitive`,
/// `minMatchCharLength`, ...). Lowercased aliases cover config sources that
/// fold key case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    pub keys: Vec<KeySpec>,
    #[serde(alias = "iscasesensitive")]
    pub is_case_sensitive: bool,
    #[serde(alias = "shouldsort")]
    pub should_sort: bool,
    pub location: usize,
    pub distance: usize,
    pub threshold: f64,
    /// `0` and `1` both mean "no minimum".
    #[serde(alias = "minmatchcharlength")]
    pub min_match_char_length: usize,
    #[serde(alias = "ignorelocation")]
    pub ignore_location: bool,
    #[serde(alias = "ignorefieldnorm")]
    pub ignore_field_norm: bool,
    #[serde(alias = "fieldnormweight")]
    pub field_norm_weight: f64,
    #[serde(alias = "includematches")]
    pub include_matches: bool,
    #[serde(alias = "ignorediacritics")]
    pub ignore_diacritics: bool,
    pub limit: Option<usize>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            keys: vec![
                RecordField::Title.into(),
                RecordField::Content.into(),
                RecordField::Tags.into(),
            ],
            is_case_sensitive: false,
            should_sort: true,
            location: 0,
            distance: DEFAULT_DISTANCE,
            threshold: DEFAULT_THRESHOLD,
            min_match_char_length: 0,
            ignore_location: false,
            ignore_field_norm: false,
            field_norm_weight: 1.0,
            include_matches: false,
            ignore_diacritics: false,
            limit: None,
        }
    }
}

impl EngineOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weighted_keys().map(|_| ())
    }

    /// Resolve keys into normalized weights.
    pub fn weighted_keys(&self) -> Result<Vec<WeightedKey>, ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::invalid_option(
                "keys",
                "at least one key is required",
            ));
        }

        let mut total = 0.0;
        for key in &self.keys {
            let weight = key.weight();
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigError::invalid_option(
                    "keys",
                    format!("weight for `{}` must be a positive number", key.name()),
                ));
            }
            total += weight;
        }

        Ok(self
            .keys
            .iter()
            .map(|key| {
                if let KeyName::Other(name) = key.name() {
                    warn!(key = %name, "key is not an index field and never matches");
                }
                WeightedKey {
                    name: key.name().clone(),
                    weight: key.weight() / total,
                }
            })
            .collect())
    }

    /// Compile `query` with these options.
    pub fn matcher(&self, query: &str) -> QueryMatcher {
        QueryMatcher::new(query, self)
    }
}

// =============================================================================
// LOGGING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Logging {
                value: value.to_string(),
                message: "expected `compact` or `json`".to_string(),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            format: LogFormat::Compact,
        }
    }
}

pub fn parse_level(value: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(value).map_err(|err| ConfigError::Logging {
        value: value.to_string(),
        message: err.to_string(),
    })
}

// =============================================================================
// SITE SETTINGS
// =============================================================================

/// Settings resolved from the site config and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub search: EngineOptions,
    pub base_url: Option<Url>,
    /// Where the index lives: a filesystem path or an http(s) URL.
    pub index: String,
    /// Whether the home page emits JSON output; `None` when the config
    /// doesn't say.
    pub json_output: Option<bool>,
    /// Upper bound on an HTTP index fetch.
    pub fetch_timeout: Duration,
    pub logging: LoggingSettings,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            search: EngineOptions::default(),
            base_url: None,
            index: DEFAULT_INDEX_PATH.to_string(),
            json_output: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            logging: LoggingSettings::default(),
        }
    }
}

impl SiteSettings {
    /// Load settings from `config_file`, or from `hugo.*` / `config.*` in
    /// the working directory when no file is given, then the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                for basename in SITE_CONFIG_BASENAMES {
                    builder = builder.add_source(File::with_name(basename).required(false));
                }
            }
        }

        let raw = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Self::from_config(&raw)
    }

    pub fn from_config(raw: &Config) -> Result<Self, ConfigError> {
        let search: EngineOptions = get_optional(raw, &SEARCH_OPTION_KEYS)?.unwrap_or_default();
        search.validate()?;

        let base_url = match get_optional::<String>(raw, &BASE_URL_KEYS)? {
            Some(value) => Some(
                Url::parse(&value).map_err(|source| ConfigError::BaseUrl { value, source })?,
            ),
            None => None,
        };

        let index = match get_optional::<String>(raw, &["index"])? {
            Some(index) => index,
            None => base_url
                .as_ref()
                .and_then(index_url)
                .unwrap_or_else(|| DEFAULT_INDEX_PATH.to_string()),
        };

        let json_output = get_optional::<Vec<String>>(raw, &HOME_OUTPUTS_KEYS)?
            .map(|outputs| outputs.iter().any(|o| o.eq_ignore_ascii_case("json")));

        let fetch_timeout = match get_optional::<f64>(raw, &["fetch_timeout"])? {
            Some(secs) => parse_timeout(secs)?,
            None => DEFAULT_FETCH_TIMEOUT,
        };

        let mut logging = LoggingSettings::default();
        if let Some(level) = get_optional::<String>(raw, &["log_level"])? {
            logging.level = parse_level(&level)?;
        }
        if let Some(format) = get_optional::<String>(raw, &["log_format"])? {
            logging.format = format.parse()?;
        }

        Ok(Self {
            search,
            base_url,
            index,
            json_output,
            fetch_timeout,
            logging,
        })
    }
}

/// A fetch timeout given in seconds.
pub fn parse_timeout(secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|timeout| !timeout.is_zero())
        .ok_or_else(|| ConfigError::invalid_option("timeout", "must be a positive number of seconds"))
}

/// `index.json` under `base`. The base is a directory even without a
/// trailing slash, so `https://example.com/blog` keeps its `/blog`.
fn index_url(base: &Url) -> Option<String> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(INDEX_FILE_NAME).ok().map(String::from)
}

/// First of `keys` present in `raw`; a missing key is not an error.
fn get_optional<T: DeserializeOwned>(raw: &Config, keys: &[&str]) -> Result<Option<T>, ConfigError> {
    for key in keys {
        match raw.get::<T>(key) {
            Ok(value) => return Ok(Some(value)),
            Err(config::ConfigError::NotFound(_)) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(None)
}
