// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Commands
//!
//! `workspace/executeCommand` handlers.
//!
//! The toggle flips [`HintState`] for every SQL document. It has to be run
//! from an open SQL document, whose URI is the first command argument.

use serde_json::{Value, json};
use sql_insert_hints_core::HintState;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;
use tracing::info;

use crate::config::HintConfig;
use crate::document::DocumentStore;

/// Command that toggles insert hints
pub const TOGGLE_COMMAND: &str = "sqlInsertHints.toggle";

/// All commands the server executes
pub const COMMANDS: &[&str] = &[TOGGLE_COMMAND];

/// Reasons a toggle is refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleRejection {
    #[error("Insert hints can only be toggled from an open SQL document")]
    MissingDocument,

    #[error("Invalid document URI: {0}")]
    InvalidUri(String),

    #[error("Document is not open: {0}")]
    NotOpen(Url),

    #[error("Insert hints are only available in SQL documents, not '{language_id}'")]
    NotSql { uri: Url, language_id: String },
}

/// Read the target document URI from the command arguments
pub fn toggle_target(arguments: &[Value]) -> Result<Url, ToggleRejection> {
    let raw = match arguments.first() {
        Some(Value::String(raw)) => raw.as_str(),
        Some(Value::Object(map)) => map
            .get("uri")
            .and_then(Value::as_str)
            .ok_or(ToggleRejection::MissingDocument)?,
        Some(Value::Null) | None => return Err(ToggleRejection::MissingDocument),
        Some(other) => return Err(ToggleRejection::InvalidUri(other.to_string())),
    };

    Url::parse(raw).map_err(|_| ToggleRejection::InvalidUri(raw.to_string()))
}

/// Toggle insert hints
///
/// # Returns
///
/// - `Ok(state)` - The new state
/// - `Err(ToggleRejection)` - Nothing changed
pub async fn toggle_hints(
    documents: &DocumentStore,
    config: &RwLock<HintConfig>,
    arguments: &[Value],
) -> Result<HintState, ToggleRejection> {
    let uri = toggle_target(arguments)?;

    let document = documents
        .get_document(&uri)
        .await
        .ok_or_else(|| ToggleRejection::NotOpen(uri.clone()))?;

    let mut config = config.write().await;
    if !config.is_sql_language(document.language_id()) {
        return Err(ToggleRejection::NotSql {
            uri,
            language_id: document.language_id().to_string(),
        });
    }

    let state = config.state().toggled();
    config.set_state(state);

    info!("Insert hints {}: uri={}", state_name(state), uri);
    Ok(state)
}

/// JSON result of a toggle
pub fn toggle_response(state: HintState) -> Value {
    json!({ "enabled": state.is_enabled() })
}

fn state_name(state: HintState) -> &'static str {
    if state.is_enabled() { "enabled" } else { "disabled" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_target() {
        let uri = toggle_target(&[json!("file:///seed.sql")]).unwrap();
        assert_eq!(uri.as_str(), "file:///seed.sql");

        let uri = toggle_target(&[json!({ "uri": "file:///seed.sql" })]).unwrap();
        assert_eq!(uri.as_str(), "file:///seed.sql");

        assert_eq!(toggle_target(&[]), Err(ToggleRejection::MissingDocument));
        assert_eq!(
            toggle_target(&[Value::Null]),
            Err(ToggleRejection::MissingDocument)
        );
        assert!(matches!(
            toggle_target(&[json!("not a uri")]),
            Err(ToggleRejection::InvalidUri(_))
        ));
        assert!(matches!(
            toggle_target(&[json!(42)]),
            Err(ToggleRejection::InvalidUri(_))
        ));
    }

    #[test]
    fn test_toggle_response() {
        assert_eq!(toggle_response(HintState::Enabled), json!({ "enabled": true }));
        assert_eq!(toggle_response(HintState::Disabled), json!({ "enabled": false }));
    }
}
