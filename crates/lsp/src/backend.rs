// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP Backend Implementation
//!
//! This module provides the main LSP server backend using tower-lsp.
//!
//! ## Overview
//!
//! The backend handles:
//! - Document lifecycle (open, change, close) and reparsing
//! - `textDocument/inlayHint` requests
//! - The `sqlInsertHints.toggle` command
//! - Hint configuration from `initializationOptions` and
//!   `workspace/didChangeConfiguration`
//!
//! ## Architecture
//!
//! ```text
//! Client → LSP Backend → Document Store ←─ DocumentSync (parse)
//!                ↓                ↓
//!           HintConfig ──→ inlay_hints (one pass per request)
//! ```
//!
//! Hints are pulled: each request recomputes them from a snapshot of the
//! document, and the client replaces what it showed for that range. Toggling
//! or reconfiguring asks the client to pull again.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sql_insert_hints_lsp::LspBackend;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (service, socket) = LspService::new(LspBackend::new);
//!     Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
//!         .serve(service)
//!         .await;
//! }
//! ```

use crate::commands::{self, COMMANDS, TOGGLE_COMMAND};
use crate::config::{ConfigError, HintConfig};
use crate::document::{DocumentError, DocumentStore};
use crate::inlay_hints::document_inlay_hints;
use crate::parsing::ParseResult;
use crate::sync::DocumentSync;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error as RpcError, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

/// LSP backend implementation
///
/// Main entry point for all LSP protocol operations.
pub struct LspBackend {
    /// LSP client for sending notifications and requests
    client: Client,

    /// Document store for managing open documents
    documents: Arc<DocumentStore>,

    /// Hint configuration, including the toggle state
    config: Arc<RwLock<HintConfig>>,

    /// Document synchronization and parsing manager
    doc_sync: Arc<DocumentSync>,
}

impl LspBackend {
    /// Create a new LSP backend
    pub fn new(client: Client) -> Self {
        let config = Arc::new(RwLock::new(HintConfig::default()));
        let doc_sync = Arc::new(DocumentSync::new(config.clone()));

        Self {
            client,
            documents: Arc::new(DocumentStore::new()),
            config,
            doc_sync,
        }
    }

    /// Get the document store
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Get a snapshot of the hint configuration
    pub async fn get_config(&self) -> HintConfig {
        self.config.read().await.clone()
    }

    /// Apply an LSP settings payload
    ///
    /// With `keep_state`, the current toggle state survives the new settings
    /// and `enabled` is ignored. Only `initialize` takes `enabled` as the
    /// starting state.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` - A new config was applied
    /// - `Ok(false)` - The payload has no `sqlInsertHints` section
    /// - `Err(ConfigError)` - The section is invalid; the previous config stays
    pub async fn apply_settings(
        &self,
        settings: &Value,
        keep_state: bool,
    ) -> std::result::Result<bool, ConfigError> {
        let Some(mut config) = HintConfig::from_lsp_settings(settings)? else {
            return Ok(false);
        };

        let mut current = self.config.write().await;
        if keep_state {
            config.set_state(current.state());
        }

        info!(
            "Hint configuration updated: enabled={}, kind={:?}, languages={:?}",
            config.enabled, config.kind, config.languages
        );
        *current = config;
        Ok(true)
    }

    /// Log a message to the client
    async fn log_message(&self, message: &str, message_type: MessageType) {
        self.client.log_message(message_type, message).await;
    }

    /// Show a message to the user
    async fn show_message(&self, message: &str, message_type: MessageType) {
        self.client.show_message(message_type, message).await;
    }

    /// Ask the client to pull inlay hints again
    async fn refresh_inlay_hints(&self) {
        if let Err(e) = self.client.inlay_hint_refresh().await {
            debug!("Inlay hint refresh not delivered: {}", e);
        }
    }

    /// Parse a stored document and keep its tree
    ///
    /// A document that cannot be parsed loses any tree it had. A tree parsed
    /// from a snapshot that a later change superseded is dropped; the sync of
    /// that change stores its own.
    async fn sync_document(&self, uri: &Url, opened: bool) {
        let Some(document) = self.documents.get_document(uri).await else {
            warn!("Document not found for parse: {}", uri);
            return;
        };

        let result = if opened {
            self.doc_sync.on_document_open(&document).await
        } else {
            self.doc_sync.on_document_change(&document).await
        };
        let metadata = self.doc_sync.create_metadata(&result);

        let stored = match result {
            ParseResult::Success { tree, .. } | ParseResult::Partial { tree, .. } => self
                .documents
                .update_document_tree(uri, document.version(), tree, metadata)
                .await
                .map(|_| ()),
            ParseResult::Failed { .. } => self.documents.clear_document_tree(uri).await,
        };

        if let Err(e) = stored {
            error!("Failed to store parse result: {}", e);
        }
    }

    /// Reparse every open document
    ///
    /// Run after the accepted language ids may have changed.
    async fn resync_all(&self) {
        for uri in self.documents.list_uris().await {
            self.sync_document(&uri, false).await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspBackend {
    /// Initialize the LSP server
    ///
    /// Applies `initializationOptions` and returns server capabilities.
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Initializing LSP server");
        info!("Client info: {:?}", params.client_info);

        if let Some(options) = params.initialization_options.as_ref() {
            if let Err(e) = self.apply_settings(options, false).await {
                warn!("Ignoring initialization options: {}", e);
                self.log_message(&e.to_string(), MessageType::WARNING).await;
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),

                inlay_hint_provider: Some(OneOf::Left(true)),

                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
                    work_done_progress_options: WorkDoneProgressOptions {
                        work_done_progress: Some(false),
                    },
                }),

                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: crate::SERVER_NAME.to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    /// Initialized notification
    async fn initialized(&self, _params: InitializedParams) {
        info!("LSP server initialized successfully");

        self.log_message("SQL insert hints server ready", MessageType::INFO)
            .await;
    }

    /// Shutdown the LSP server
    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down LSP server");
        Ok(())
    }

    /// Document opened notification
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.clone();

        info!(
            "Document opened: uri={}, language={}, version={}",
            uri, doc.language_id, doc.version
        );

        match self
            .documents
            .open_document(uri.clone(), doc.text, doc.version, doc.language_id)
            .await
        {
            Ok(()) => self.sync_document(&uri, true).await,
            Err(e) => {
                error!("Failed to open document: {}", e);
                self.show_message(
                    &format!("Failed to open document: {}", e),
                    MessageType::ERROR,
                )
                .await;
            }
        }
    }

    /// Document changed notification
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let identifier = params.text_document;
        let uri = identifier.uri.clone();
        let changes = params.content_changes;

        debug!(
            "Document changed: uri={}, version={}, changes={}",
            uri,
            identifier.version,
            changes.len()
        );

        match self.documents.update_document(&identifier, &changes).await {
            Ok(()) => self.sync_document(&uri, false).await,
            Err(DocumentError::DocumentNotFound(uri)) => {
                warn!("Document not found for change: {}", uri);
            }
            Err(e) => {
                error!("Failed to update document: {}", e);
                self.show_message(
                    &format!("Failed to update document: {}", e),
                    MessageType::ERROR,
                )
                .await;
            }
        }
    }

    /// Document closed notification
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        info!("Document closed: uri={}", uri);

        if self.documents.close_document(&uri).await {
            self.doc_sync.on_document_close(&uri);
        } else {
            warn!("Document not found for close: {}", uri);
        }
    }

    /// Inlay hint request
    ///
    /// Runs one hint pass over a snapshot of the document.
    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        let uri = params.text_document.uri;

        let Some(document) = self.documents.get_document(&uri).await else {
            debug!("Inlay hints requested for unknown document: {}", uri);
            return Ok(None);
        };

        let config = self.get_config().await;
        Ok(document_inlay_hints(&document, params.range, &config))
    }

    /// Execute command request
    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        info!("Execute command: {}", params.command);

        if params.command != TOGGLE_COMMAND {
            return Err(RpcError::invalid_params(format!(
                "Unknown command: {}",
                params.command
            )));
        }

        match commands::toggle_hints(&self.documents, &self.config, &params.arguments).await {
            Ok(state) => {
                self.refresh_inlay_hints().await;
                Ok(Some(commands::toggle_response(state)))
            }
            Err(rejection) => {
                warn!("Toggle refused: {}", rejection);
                self.show_message(&rejection.to_string(), MessageType::WARNING)
                    .await;
                Ok(None)
            }
        }
    }

    /// Configuration change notification
    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        debug!("Configuration changed: {:?}", params.settings);

        match self.apply_settings(&params.settings, true).await {
            Ok(true) => {
                self.resync_all().await;
                self.refresh_inlay_hints().await;
            }
            Ok(false) => debug!("No insert hint settings in configuration change"),
            Err(e) => {
                let err = LspError::from(e);
                error!("{}", err);
                self.log_message(&err.to_string(), MessageType::ERROR).await;
            }
        }
    }
}

/// LSP backend errors
#[derive(Debug, thiserror::Error)]
pub enum LspError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document error
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}
