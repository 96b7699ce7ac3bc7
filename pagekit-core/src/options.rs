//! Session options shared by every display surface.

use serde::{Deserialize, Deserializer};

/// Default lifetime of an idle paginator session.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// What to do with the paginator message once a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterAction {
    /// Delete the paginator message.
    DeleteMessage,
    /// Keep every control but disable it.
    DisableItems,
    /// Remove every control from the message.
    ClearItems,
    #[default]
    Nothing,
}

/// Tunables for a paginator session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginatorOptions {
    /// Idle seconds before the session times out; re-armed on every interaction.
    /// `None` keeps the session alive until it is stopped. Config files spell
    /// that as `timeout_secs = 0`.
    #[serde(deserialize_with = "timeout_from_secs")]
    pub timeout_secs: Option<u64>,
    /// Applied when a user presses stop.
    pub after_stop: AfterAction,
    /// Applied when the session times out.
    pub after_timeout: AfterAction,
    /// Append `Page n of m` to the rendered page.
    pub add_page_string: bool,
    /// Let configured bot owners operate any session.
    pub always_allow_owners: bool,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            after_stop: AfterAction::Nothing,
            after_timeout: AfterAction::Nothing,
            add_page_string: true,
            always_allow_owners: false,
            title: None,
            description: None,
        }
    }
}

/// Read an idle timeout in seconds, where zero means never.
pub fn parse_timeout_secs(raw: &str) -> Result<Option<u64>, std::num::ParseIntError> {
    let secs: u64 = raw.trim().parse()?;
    Ok((secs > 0).then_some(secs))
}

fn timeout_from_secs<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok((secs > 0).then_some(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options: PaginatorOptions = toml::from_str("after_timeout = \"clear_items\"").unwrap();
        assert_eq!(options.after_timeout, AfterAction::ClearItems);
        assert_eq!(options.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        assert!(options.add_page_string);
    }

    #[test]
    fn parses_every_field() {
        let raw = r#"
            timeout_secs = 30
            after_stop = "delete_message"
            after_timeout = "disable_items"
            add_page_string = false
            always_allow_owners = true
            title = "Catalog"
        "#;
        let options: PaginatorOptions = toml::from_str(raw).unwrap();
        assert_eq!(options.timeout_secs, Some(30));
        assert_eq!(options.after_stop, AfterAction::DeleteMessage);
        assert_eq!(options.after_timeout, AfterAction::DisableItems);
        assert!(!options.add_page_string);
        assert!(options.always_allow_owners);
        assert_eq!(options.title.as_deref(), Some("Catalog"));
        assert_eq!(options.description, None);
    }

    #[test]
    fn zero_timeout_never_expires() {
        let options: PaginatorOptions = toml::from_str("timeout_secs = 0").unwrap();
        assert_eq!(options.timeout_secs, None);

        assert_eq!(parse_timeout_secs(" 0 "), Ok(None));
        assert_eq!(parse_timeout_secs("45"), Ok(Some(45)));
        assert!(parse_timeout_secs("soon").is_err());
    }
}
