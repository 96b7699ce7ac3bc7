// Bot configuration
//
// Loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. TOML file named by PAGEKIT_CONFIG
// 3. Built-in defaults (lowest priority)

use std::{env, fs};

use anyhow::Context as _;
use pagekit_core::{PaginatorOptions, parse_timeout_secs};
use serde::Deserialize;

/// Path of the optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "PAGEKIT_CONFIG";
const TIMEOUT_VAR: &str = "PAGEKIT_TIMEOUT_SECS";
const OWNER_IDS_VAR: &str = "PAGEKIT_OWNER_IDS";
const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Options applied to every paginator the bot sends.
    pub paginator: PaginatorOptions,
    /// Users treated as bot owners by the access policy.
    pub owner_ids: Vec<u64>,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            paginator: PaginatorOptions::default(),
            owner_ids: Vec::new(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Config file layout; every section is optional.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    paginator: PaginatorOptions,
    owner_ids: Option<Vec<u64>>,
    log_filter: Option<String>,
}

impl BotConfig {
    /// Load from the process environment and the file it points at.
    pub fn load() -> anyhow::Result<Self> {
        let file = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Some(
                fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?,
            ),
            Err(_) => None,
        };

        Self::from_sources(file.as_deref(), |key| env::var(key).ok())
    }

    /// Merge file contents with environment lookups.
    pub fn from_sources(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let file: FileConfig = match file {
            Some(raw) => toml::from_str(raw).context("failed to parse config file")?,
            None => FileConfig::default(),
        };

        let mut paginator = file.paginator;
        if let Some(raw) = env(TIMEOUT_VAR) {
            paginator.timeout_secs = parse_timeout_secs(&raw)
                .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds"))?;
        }

        let owner_ids = match env(OWNER_IDS_VAR) {
            Some(raw) => parse_owner_ids(&raw)?,
            None => file.owner_ids.unwrap_or_default(),
        };

        let log_filter = env(LOG_FILTER_VAR)
            .or(file.log_filter)
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            paginator,
            owner_ids,
            log_filter,
        })
    }
}

/// Parse a comma separated list of user ids.
fn parse_owner_ids(raw: &str) -> anyhow::Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u64>()
                .with_context(|| format!("invalid owner id `{id}` in {OWNER_IDS_VAR}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pagekit_core::AfterAction;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_source() {
        let config = BotConfig::from_sources(None, env_of(&[])).unwrap();
        assert_eq!(config, BotConfig::default());
    }

    #[test]
    fn file_values_are_read() {
        let raw = r#"
            owner_ids = [1, 2]
            log_filter = "debug"

            [paginator]
            timeout_secs = 60
            after_timeout = "disable_items"
        "#;
        let config = BotConfig::from_sources(Some(raw), env_of(&[])).unwrap();
        assert_eq!(config.owner_ids, [1, 2]);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.paginator.timeout_secs, Some(60));
        assert_eq!(config.paginator.after_timeout, AfterAction::DisableItems);
    }

    #[test]
    fn environment_overrides_the_file() {
        let raw = "owner_ids = [1]\n[paginator]\ntimeout_secs = 60\n";
        let env = env_of(&[
            ("PAGEKIT_TIMEOUT_SECS", "15"),
            ("PAGEKIT_OWNER_IDS", "7, 8"),
            ("RUST_LOG", "pagekit_twilight=trace"),
        ]);
        let config = BotConfig::from_sources(Some(raw), env).unwrap();
        assert_eq!(config.paginator.timeout_secs, Some(15));
        assert_eq!(config.owner_ids, [7, 8]);
        assert_eq!(config.log_filter, "pagekit_twilight=trace");
    }

    #[test]
    fn zero_timeout_from_the_environment_disables_expiry() {
        let raw = "[paginator]\ntimeout_secs = 60\n";
        let env = env_of(&[("PAGEKIT_TIMEOUT_SECS", "0")]);
        let config = BotConfig::from_sources(Some(raw), env).unwrap();
        assert_eq!(config.paginator.timeout_secs, None);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(BotConfig::from_sources(Some("owner_ids = \"x\""), env_of(&[])).is_err());
        assert!(
            BotConfig::from_sources(None, env_of(&[("PAGEKIT_OWNER_IDS", "1,abc")])).is_err()
        );
        assert!(
            BotConfig::from_sources(None, env_of(&[("PAGEKIT_TIMEOUT_SECS", "soon")])).is_err()
        );
    }
}
