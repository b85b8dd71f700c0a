//! Layered CLI configuration.
//!
//! Values resolve in increasing priority: built-in defaults, an optional
//! TOML file, environment variables, then command-line flags.
//!
//! ```toml
//! data_url = "https://example.org/incidents.csv"
//! page_size = 25
//! limit = 20000
//! state = "CA"
//! ```

use std::path::{Path, PathBuf};

use incident_map_analytics_models::DEFAULT_PAGE_SIZE;
use incident_map_geography_models::StateFilter;
use incident_map_source::WASHINGTON_POST_CSV_URL;
use serde::Deserialize;

/// Environment variable naming the data URL.
pub const DATA_URL_ENV: &str = "INCIDENT_MAP_DATA_URL";

/// Environment variable naming the table page size.
pub const PAGE_SIZE_ENV: &str = "INCIDENT_MAP_PAGE_SIZE";

/// Environment variable pointing at a TOML config file.
pub const CONFIG_PATH_ENV: &str = "INCIDENT_MAP_CONFIG";

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`FileConfig`].
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Setting name.
        key: String,
        /// Rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Where records are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    /// A local CSV or JSON file.
    File(PathBuf),
    /// A CSV or JSON document served over HTTP.
    Url(String),
}

/// Settings read from a TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    /// URL to download records from.
    pub data_url: Option<String>,
    /// Local CSV or JSON file; wins over `data_url`.
    pub data_file: Option<PathBuf>,
    /// Rows per table page.
    pub page_size: Option<usize>,
    /// Maximum number of raw records to read.
    pub limit: Option<u64>,
    /// Initial state filter.
    pub state: Option<StateFilter>,
}

impl FileConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed or has
    /// unknown keys.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Toml`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--config`
    pub config: Option<PathBuf>,
    /// `--url`
    pub data_url: Option<String>,
    /// `--file`
    pub data_file: Option<PathBuf>,
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--limit`
    pub limit: Option<u64>,
    /// `--state`
    pub state: Option<StateFilter>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where records are loaded from.
    pub location: DataLocation,
    /// Rows per table page, at least 1.
    pub page_size: usize,
    /// Maximum number of raw records to read, if any.
    pub limit: Option<u64>,
    /// Initial state filter.
    pub state: StateFilter,
}

impl Config {
    /// Resolves configuration from the process environment and `overrides`.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_with`].
    pub fn resolve(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves configuration with `env` standing in for the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be loaded or the
    /// page size from the environment is not a positive integer.
    pub fn resolve_with(
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config_path = overrides
            .config
            .clone()
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from));
        let file = config_path
            .as_deref()
            .map(FileConfig::load)
            .transpose()?
            .unwrap_or_default();

        let env_page_size = env(PAGE_SIZE_ENV)
            .map(|value| parse_page_size(PAGE_SIZE_ENV, &value))
            .transpose()?;

        let page_size = overrides
            .page_size
            .or(env_page_size)
            .or(file.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "page_size".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let location = if let Some(path) = &overrides.data_file {
            DataLocation::File(path.clone())
        } else if let Some(url) = &overrides.data_url {
            DataLocation::Url(url.clone())
        } else if let Some(url) = env(DATA_URL_ENV) {
            DataLocation::Url(url)
        } else if let Some(path) = file.data_file {
            DataLocation::File(path)
        } else {
            DataLocation::Url(
                file.data_url
                    .unwrap_or_else(|| WASHINGTON_POST_CSV_URL.to_string()),
            )
        };

        Ok(Self {
            location,
            page_size,
            limit: overrides.limit.or(file.limit),
            state: overrides.state.clone().or(file.state).unwrap_or_default(),
        })
    }
}

fn parse_page_size(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_washington_post() {
        let config = Config::resolve_with(&Overrides::default(), env_of(&[])).unwrap();

        assert_eq!(
            config.location,
            DataLocation::Url(WASHINGTON_POST_CSV_URL.to_string())
        );
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.state, StateFilter::All);
        assert_eq!(config.limit, None);
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = env_of(&[(DATA_URL_ENV, "http://env/data.csv"), (PAGE_SIZE_ENV, "25")]);
        let config = Config::resolve_with(&Overrides::default(), &env).unwrap();
        assert_eq!(config.location, DataLocation::Url("http://env/data.csv".to_string()));
        assert_eq!(config.page_size, 25);

        let overrides = Overrides {
            data_file: Some(PathBuf::from("local.csv")),
            page_size: Some(5),
            ..Overrides::default()
        };
        let config = Config::resolve_with(&overrides, &env).unwrap();
        assert_eq!(config.location, DataLocation::File(PathBuf::from("local.csv")));
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn invalid_env_page_size_is_an_error() {
        let result = Config::resolve_with(&Overrides::default(), env_of(&[(PAGE_SIZE_ENV, "ten")]));

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let overrides = Overrides {
            page_size: Some(0),
            ..Overrides::default()
        };

        assert!(Config::resolve_with(&overrides, env_of(&[])).is_err());
    }

    #[test]
    fn parses_toml() {
        let config = FileConfig::parse(
            r#"
            data_file = "incidents.csv"
            page_size = 20
            limit = 500
            state = "ca"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_file, Some(PathBuf::from("incidents.csv")));
        assert_eq!(config.page_size, Some(20));
        assert_eq!(config.limit, Some(500));
        assert_eq!(config.state, Some(StateFilter::State("CA".to_string())));
    }

    #[test]
    fn rejects_unknown_toml_keys_and_bad_states() {
        assert!(matches!(
            FileConfig::parse("colour = \"blue\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            FileConfig::parse("state = \"Atlantis\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn file_values_apply_below_env_and_flags() {
        let path = std::env::temp_dir().join(format!("incident_map_config_{}.toml", std::process::id()));
        std::fs::write(&path, "data_url = \"http://file/data.csv\"\npage_size = 30\nstate = \"TX\"").unwrap();

        let overrides = Overrides {
            config: Some(path.clone()),
            ..Overrides::default()
        };
        let config = Config::resolve_with(&overrides, env_of(&[])).unwrap();
        assert_eq!(config.location, DataLocation::Url("http://file/data.csv".to_string()));
        assert_eq!(config.page_size, 30);
        assert_eq!(config.state, StateFilter::State("TX".to_string()));

        let config = Config::resolve_with(&overrides, env_of(&[(PAGE_SIZE_ENV, "12")])).unwrap();
        assert_eq!(config.page_size, 12);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let overrides = Overrides {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Overrides::default()
        };

        assert!(matches!(
            Config::resolve_with(&overrides, env_of(&[])),
            Err(ConfigError::Io { .. })
        ));
    }
}
