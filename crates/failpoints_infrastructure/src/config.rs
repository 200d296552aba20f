//! Failpoint configuration loading
//!
//! Failpoints can be preset from a TOML file and environment variables,
//! so a process can start with faults already armed:
//!
//! ```toml
//! namespace = "storage"
//!
//! [points]
//! flush = true
//! slow_disk = { probability = 0.25, max_count = 10 }
//! reject_user = { probability = 1.0, args = { user_id = 123 } }
//! ```
//!
//! Environment variables use the `FAILPOINTS` prefix and `__` as separator,
//! e.g. `FAILPOINTS__POINTS__FLUSH=true` or
//! `FAILPOINTS__POINTS__SLOW_DISK__PROBABILITY=0.5`. Names coming from the
//! environment are lowercased.

use std::{collections::HashMap, path::Path, sync::Arc};

use config::{FileFormat, Source};
use failpoints_application::{DEFAULT_NAMESPACE, FailpointError, NamespaceTable, Registry};
use failpoints_domain::FailpointState;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::telemetry::TelemetryConfig;

/// Default config file name, resolved without extension
pub const DEFAULT_CONFIG_FILE: &str = "failpoints";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "FAILPOINTS";

/// Separator between prefix and nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Errors while loading or applying failpoint configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration sources could not be read or deserialized
    #[error("Failed to load failpoint configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Some configured failpoints were rejected; the others were applied
    #[error("Failed to apply failpoint configuration: {0}")]
    Apply(#[source] FailpointError),
}

/// Preset failpoints for one namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailpointsConfig {
    /// Namespace the failpoints belong to
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Failpoint states keyed by name
    #[serde(default)]
    pub points: HashMap<String, FailpointState>,

    /// Logging setup
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for FailpointsConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            points: HashMap::new(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Environment source with the failpoint prefix and separator
#[must_use]
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

impl FailpointsConfig {
    /// Load from an optional `failpoints.{toml,json,...}` in the working
    /// directory, overridden by environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
            environment(),
        )
    }

    /// Load from an explicit file, overridden by environment variables
    ///
    /// Unlike [`FailpointsConfig::load`], a missing file is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_sources(config::File::from(path.as_ref()).required(true), environment())
    }

    /// Parse a TOML document, ignoring the environment
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(content, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from a file source and an environment source, the latter winning
    pub fn from_sources<F>(file: F, env: config::Environment) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .set_default("namespace", DEFAULT_NAMESPACE)?
            // Load from file if present
            .add_source(file)
            // Override with environment variables (e.g., FAILPOINTS__POINTS__FLUSH)
            .add_source(env)
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Set every configured failpoint on `registry`
    ///
    /// Points are applied in name order. A rejected point does not stop the
    /// rest; all rejections are returned together.
    ///
    /// Returns the number of failpoints applied.
    pub fn apply(&self, registry: &Registry) -> Result<usize, ConfigError> {
        let mut names: Vec<&String> = self.points.keys().collect();
        names.sort();

        let mut applied = 0;
        let mut failures = Vec::new();
        for name in names {
            let state = self.points[name].clone();
            match registry.set(name, state) {
                Ok(()) => {
                    debug!(namespace = registry.namespace(), failpoint = %name, "Preset failpoint");
                    applied += 1;
                },
                Err(e) => {
                    warn!(
                        namespace = registry.namespace(),
                        failpoint = %name,
                        error = %e,
                        "Skipping invalid failpoint preset"
                    );
                    failures.extend(e.into_failures());
                },
            }
        }

        if failures.is_empty() {
            info!(
                namespace = registry.namespace(),
                count = applied,
                "Failpoint presets applied"
            );
            Ok(applied)
        } else {
            Err(ConfigError::Apply(FailpointError::SetAll { failures }))
        }
    }

    /// Resolve the configured namespace in `table` and apply the presets
    pub fn bootstrap(&self, table: &NamespaceTable) -> Result<Arc<Registry>, ConfigError> {
        let registry = table.get_or_create(&self.namespace);
        self.apply(&registry)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use failpoints_domain::{TriggerConfig, ValidationError};

    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(source))
    }

    fn empty_file() -> config::File<config::FileSourceString, FileFormat> {
        config::File::from_str("", FileFormat::Toml)
    }

    #[test]
    fn default_config_uses_default_namespace() {
        let config = FailpointsConfig::default();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert!(config.points.is_empty());
    }

    #[test]
    fn parses_toggles_and_tables() {
        let config = FailpointsConfig::from_toml_str(
            r#"
            namespace = "storage"

            [points]
            flush = true
            disabled = false
            slow_disk = { probability = 0.25, max_count = 10, max_duration_ms = 500 }
            "#,
        )
        .unwrap();

        assert_eq!(config.namespace, "storage");
        assert_eq!(config.points["flush"], FailpointState::Toggle(true));
        assert_eq!(config.points["disabled"], FailpointState::Toggle(false));
        assert_eq!(
            config.points["slow_disk"],
            FailpointState::Configured(
                TriggerConfig::with_probability(0.25)
                    .with_max_count(10)
                    .with_max_duration_ms(500)
            )
        );
    }

    #[test]
    fn parses_args() {
        let config = FailpointsConfig::from_toml_str(
            r"
            [points.reject_user]
            probability = 1
            args = { user_id = 123 }
            ",
        )
        .unwrap();

        let registry = Registry::unregistered();
        config.apply(&registry).unwrap();
        let args = registry.get_args("reject_user").unwrap();
        assert_eq!(args.get_i64("user_id"), Some(123));
    }

    #[test]
    fn namespace_defaults_when_missing() {
        let config = FailpointsConfig::from_toml_str("[points]\nflush = true").unwrap();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
    }

    #[test]
    fn environment_overrides_file() {
        let config = FailpointsConfig::from_sources(
            config::File::from_str(
                "namespace = \"storage\"\n[points]\nflush = false",
                FileFormat::Toml,
            ),
            env(&[
                ("FAILPOINTS__POINTS__FLUSH", "true"),
                ("FAILPOINTS__NAMESPACE", "network"),
            ]),
        )
        .unwrap();

        assert_eq!(config.namespace, "network");
        assert_eq!(config.points["flush"], FailpointState::Toggle(true));
    }

    #[test]
    fn environment_builds_nested_config() {
        let config = FailpointsConfig::from_sources(
            empty_file(),
            env(&[("FAILPOINTS__POINTS__SLOW_DISK__PROBABILITY", "0.5")]),
        )
        .unwrap();

        assert_eq!(
            config.points["slow_disk"],
            FailpointState::Configured(TriggerConfig::with_probability(0.5))
        );
    }

    #[test]
    fn apply_sets_every_point() {
        let config = FailpointsConfig::from_toml_str(
            "[points]\nflush = true\nslow_disk = { probability = 0.0 }",
        )
        .unwrap();
        let registry = Registry::unregistered();

        assert_eq!(config.apply(&registry).unwrap(), 2);
        assert!(registry.should_fail("flush"));
        assert!(!registry.should_fail("slow_disk"));
    }

    #[test]
    fn apply_continues_past_invalid_points() {
        let config = FailpointsConfig::from_toml_str(
            r"
            [points]
            a_bad = { probability = 2.0 }
            b_good = true
            c_bad = { probability = 1.0, max_count = 0 }
            ",
        )
        .unwrap();
        let registry = Registry::unregistered();

        let failures = match config.apply(&registry) {
            Err(ConfigError::Apply(FailpointError::SetAll { failures })) => failures,
            other => panic!("expected apply failures, got {other:?}"),
        };
        assert_eq!(
            failures,
            vec![
                ("a_bad".to_string(), ValidationError::InvalidProbability(2.0)),
                ("c_bad".to_string(), ValidationError::InvalidMaxCount(0)),
            ]
        );
        assert!(registry.should_fail("b_good"));
    }

    #[test]
    fn bootstrap_uses_configured_namespace() {
        let config = FailpointsConfig::from_toml_str(
            "namespace = \"storage\"\n[points]\nflush = true",
        )
        .unwrap();
        let table = NamespaceTable::new();

        let registry = config.bootstrap(&table).unwrap();
        assert_eq!(registry.namespace(), "storage");
        assert!(table.get_or_create("storage").should_fail("flush"));
    }

    #[test]
    fn invalid_toml_is_a_load_error() {
        let err = FailpointsConfig::from_toml_str("points = [").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
