//! User settings for the tariff advisor
//!
//! Manages the currency label, the administrative recipient that receives
//! copies of every report, and the bound on the analysis period.

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::paths::AdvisorPaths;
use crate::error::AdvisorError;
use crate::models::ChatId;

/// Settings for the tariff advisor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency label printed next to amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Chat that receives a copy of every generated report
    #[serde(default)]
    pub admin_chat_id: ChatId,

    /// Longest analysis period accepted by the wizard, in months
    #[serde(default = "default_max_months")]
    pub max_months: u32,

    /// Timestamp format for history records (strftime format)
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Lines written at the bottom of every calculation workbook
    #[serde(default)]
    pub sheet_footer: Vec<FooterLine>,
}

/// One labelled footer line, e.g. a channel name or a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLine {
    pub label: String,
    pub value: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "RUB".to_string()
}

fn default_max_months() -> u32 {
    1200 // 100 years
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: default_currency(),
            admin_chat_id: ChatId::default(),
            max_months: default_max_months(),
            timestamp_format: default_timestamp_format(),
            sheet_footer: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AdvisorPaths) -> Result<Self, AdvisorError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AdvisorError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AdvisorError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values that would fail later at use
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(AdvisorError::Config(format!(
                "Invalid timestamp format '{}'",
                self.timestamp_format
            )));
        }
        Ok(())
    }

    /// Format a history timestamp with the configured format
    pub fn format_timestamp<Tz>(&self, time: &DateTime<Tz>) -> Result<String, AdvisorError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut output = String::new();
        write!(output, "{}", time.format(&self.timestamp_format)).map_err(|_| {
            AdvisorError::Config(format!(
                "Invalid timestamp format '{}'",
                self.timestamp_format
            ))
        })?;
        Ok(output)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AdvisorPaths) -> Result<(), AdvisorError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AdvisorError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            AdvisorError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency, "RUB");
        assert_eq!(settings.admin_chat_id, ChatId(0));
        assert_eq!(settings.max_months, 1200);
        assert_eq!(settings.timestamp_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdvisorPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.admin_chat_id = ChatId(42);
        settings.currency = "EUR".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.admin_chat_id, ChatId(42));
        assert_eq!(loaded.currency, "EUR");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"admin_chat_id": 7}"#).unwrap();
        assert_eq!(settings.admin_chat_id, ChatId(7));
        assert_eq!(settings.max_months, 1200);
        assert_eq!(settings.currency, "RUB");
        assert!(settings.sheet_footer.is_empty());
    }

    #[test]
    fn test_sheet_footer_from_json() {
        let settings: Settings = serde_json::from_str(
            r#"{"sheet_footer": [{"label": "Link:", "value": "@fair_tariffs"}]}"#,
        )
        .unwrap();
        assert_eq!(
            settings.sheet_footer,
            vec![FooterLine {
                label: "Link:".into(),
                value: "@fair_tariffs".into()
            }]
        );
    }

    #[test]
    fn test_unknown_timestamp_specifier_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdvisorPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"timestamp_format":"%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, AdvisorError::Config(_)));
    }

    #[test]
    fn test_format_timestamp() {
        let time = chrono::Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).unwrap();

        let settings = Settings::default();
        assert_eq!(settings.format_timestamp(&time).unwrap(), "2025-03-01 09:05");

        let broken = Settings {
            timestamp_format: "%Y-%Q".into(),
            ..Settings::default()
        };
        assert!(matches!(
            broken.format_timestamp(&time),
            Err(AdvisorError::Config(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdvisorPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, AdvisorError::Config(_)));
    }
}
