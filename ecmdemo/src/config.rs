//! Application configuration management.
//!
//! Configuration is merged from built-in defaults, an optional file and the
//! environment, in increasing order of precedence.

use crate::Cli;
use ecm_core::models::ValuationConfig;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration
    #[serde(default)]
    pub server: ecm_axum::config::AxumConfig,

    /// Database configuration
    #[serde(default)]
    pub database: ecm_sqlite::config::SqliteConfig,

    /// The context contracts are valued in
    #[serde(default)]
    pub valuation: ValuationConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `APP_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export APP_DATABASE__DATABASE_PATH="/data/contracts.db"
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    /// export APP_VALUATION__LOOKUP="strict"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            config = config.add_source(config::File::from(path.as_path()));
        }

        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        config.build()?.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecm_core::models::{LookupPolicy, VolumeShapeKind};
    use std::io::Write as _;

    #[test]
    fn defaults_without_a_file() {
        let cli = Cli {
            config: None,
            command: None,
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.database.database_path, None);
        assert_eq!(config.server.bind_address.port(), 8080);
        assert_eq!(config.valuation, ValuationConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("ecmdemo-{}.toml", uuid::Uuid::now_v7()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[valuation]\nlookup = \"strict\"\ndefault_state = \"VIC\"\ndefault_shape = \"solar\"\n\n[database]\nbusy_timeout_secs = 30"
        )
        .unwrap();

        let cli = Cli {
            config: Some(path.clone()),
            command: None,
        };
        let config = AppConfig::load(&cli);
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert_eq!(config.valuation.lookup, LookupPolicy::Strict);
        assert_eq!(config.valuation.default_state, "VIC");
        assert_eq!(config.valuation.default_shape, VolumeShapeKind::Solar);
        assert_eq!(config.database.busy_timeout_secs, 30);
        assert!(config.database.create_if_missing);
    }

    #[test]
    fn missing_file_is_an_error() {
        let cli = Cli {
            config: Some("/nonexistent/ecmdemo.toml".into()),
            command: None,
        };
        assert!(AppConfig::load(&cli).is_err());
    }
}
