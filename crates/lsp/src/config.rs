// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Hint Configuration
//!
//! Client-side settings for insert hints.
//!
//! ## Settings Shape
//!
//! Both `initializationOptions` and `workspace/didChangeConfiguration`
//! settings carry the same section:
//!
//! ```json
//! {
//!   "sqlInsertHints": {
//!     "enabled": true,
//!     "kind": "parameter",
//!     "tooltip": true,
//!     "languages": ["sql", "mysql", "postgresql"]
//!   }
//! }
//! ```
//!
//! Missing keys keep their defaults and unknown keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sql_insert_hints_core::HintState;
use sql_insert_hints_grammar::{DEFAULT_LANGUAGE_IDS, is_sql_language_id};
use tower_lsp::lsp_types::InlayHintKind;

/// Name of the settings section
pub const SETTINGS_SECTION: &str = "sqlInsertHints";

/// Visual class of rendered hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintStyle {
    /// Rendered as a type hint
    Type,
    /// Rendered as a parameter hint
    #[default]
    Parameter,
    /// No kind, client default styling
    None,
}

impl HintStyle {
    /// Get the LSP inlay hint kind for this style
    pub fn inlay_hint_kind(&self) -> Option<InlayHintKind> {
        match self {
            HintStyle::Type => Some(InlayHintKind::TYPE),
            HintStyle::Parameter => Some(InlayHintKind::PARAMETER),
            HintStyle::None => None,
        }
    }
}

/// Insert hint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HintConfig {
    /// Whether hints are produced
    pub enabled: bool,

    /// Visual class of rendered hints
    pub kind: HintStyle,

    /// Attach a `schema.table.column` tooltip to each hint
    pub tooltip: bool,

    /// Language identifiers treated as SQL
    pub languages: Vec<String>,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: HintStyle::default(),
            tooltip: true,
            languages: DEFAULT_LANGUAGE_IDS.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl HintConfig {
    /// Parse hint config from an LSP settings payload
    ///
    /// # Returns
    ///
    /// - `Ok(Some(config))` - The settings carry a `sqlInsertHints` section
    /// - `Ok(None)` - No section present
    /// - `Err(ConfigError)` - The section is malformed or invalid
    pub fn from_lsp_settings(settings: &Value) -> Result<Option<Self>, ConfigError> {
        let Some(section) = settings.get(SETTINGS_SECTION) else {
            return Ok(None);
        };

        let config: HintConfig = serde_json::from_value(section.clone())?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }

        if let Some(blank) = self.languages.iter().find(|id| id.trim().is_empty()) {
            return Err(ConfigError::InvalidLanguageId(blank.clone()));
        }

        Ok(())
    }

    /// Get the toggle state
    pub fn state(&self) -> HintState {
        HintState::from_enabled(self.enabled)
    }

    /// Set the toggle state
    pub fn set_state(&mut self, state: HintState) {
        self.enabled = state.is_enabled();
    }

    /// Check if a document language is treated as SQL
    pub fn is_sql_language(&self, language_id: &str) -> bool {
        is_sql_language_id(language_id, &self.languages)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Settings section could not be decoded
    #[error("Invalid {SETTINGS_SECTION} settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// Empty language list
    #[error("At least one SQL language id is required")]
    NoLanguages,

    /// Blank language id
    #[error("Invalid language id: {0:?}")]
    InvalidLanguageId(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = HintConfig::default();

        assert!(config.enabled);
        assert_eq!(config.kind, HintStyle::Parameter);
        assert!(config.tooltip);
        assert!(config.is_sql_language("sql"));
        assert!(config.is_sql_language("MySQL"));
        assert!(!config.is_sql_language("rust"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lsp_settings_full() {
        let settings = json!({
            "sqlInsertHints": {
                "enabled": false,
                "kind": "type",
                "tooltip": false,
                "languages": ["tsql"]
            }
        });

        let config = HintConfig::from_lsp_settings(&settings).unwrap().unwrap();

        assert!(!config.enabled);
        assert_eq!(config.kind, HintStyle::Type);
        assert!(!config.tooltip);
        assert!(config.is_sql_language("tsql"));
        assert!(!config.is_sql_language("sql"));
    }

    #[test]
    fn test_from_lsp_settings_partial_uses_defaults() {
        let settings = json!({ "sqlInsertHints": { "kind": "none", "unknownKey": 1 } });

        let config = HintConfig::from_lsp_settings(&settings).unwrap().unwrap();

        assert!(config.enabled);
        assert_eq!(config.kind, HintStyle::None);
        assert_eq!(config.languages, HintConfig::default().languages);
    }

    #[test]
    fn test_from_lsp_settings_missing_section() {
        let settings = json!({ "otherTool": { "enabled": true } });
        assert!(HintConfig::from_lsp_settings(&settings).unwrap().is_none());
        assert!(HintConfig::from_lsp_settings(&Value::Null).unwrap().is_none());
    }

    #[test]
    fn test_from_lsp_settings_invalid_type() {
        let settings = json!({ "sqlInsertHints": { "enabled": "yes" } });

        let result = HintConfig::from_lsp_settings(&settings);
        assert!(matches!(result, Err(ConfigError::InvalidSettings(_))));
    }

    #[test]
    fn test_from_lsp_settings_empty_languages() {
        let settings = json!({ "sqlInsertHints": { "languages": [] } });

        let result = HintConfig::from_lsp_settings(&settings);
        assert!(matches!(result, Err(ConfigError::NoLanguages)));
    }

    #[test]
    fn test_state_round_trip() {
        let mut config = HintConfig::default();
        assert_eq!(config.state(), HintState::Enabled);

        config.set_state(config.state().toggled());
        assert!(!config.enabled);
        assert_eq!(config.state(), HintState::Disabled);
    }

    #[test]
    fn test_style_to_inlay_kind() {
        assert_eq!(HintStyle::Type.inlay_hint_kind(), Some(InlayHintKind::TYPE));
        assert_eq!(
            HintStyle::Parameter.inlay_hint_kind(),
            Some(InlayHintKind::PARAMETER)
        );
        assert_eq!(HintStyle::None.inlay_hint_kind(), None);
    }
}
