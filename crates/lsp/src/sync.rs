// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Synchronization
//!
//! Orchestrates parsing of SQL documents as they open, change and close.
//!
//! ## Architecture
//!
//! ```text
//! DocumentSync
//!     ├─→ ParserManager (from parsing module)
//!     ├─→ HintConfig (accepted language ids)
//!     └─→ Document (content and language id)
//!           ↓
//!        on_document_open()
//!        on_document_change()
//!        on_document_close()
//! ```
//!
//! Every change triggers a full reparse of the current text. The config is
//! read once per call and never held across the parse.

use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;
use tracing::{debug, info, warn};

use crate::config::HintConfig;
use crate::document::{Document, ParseMetadata};
use crate::parsing::{ParseError, ParseResult, ParserManager};

impl ParseMetadata {
    /// Create new parse metadata
    pub fn new(parse_time_ms: u64, has_errors: bool, error_count: usize) -> Self {
        Self {
            parsed_at: SystemTime::now(),
            parse_time_ms,
            has_errors,
            error_count,
        }
    }
}

/// Document synchronization manager
#[derive(Debug, Clone)]
pub struct DocumentSync {
    parsers: Arc<ParserManager>,

    config: Arc<RwLock<HintConfig>>,
}

impl DocumentSync {
    /// Create a new document sync manager
    pub fn new(config: Arc<RwLock<HintConfig>>) -> Self {
        Self {
            parsers: Arc::new(ParserManager::new()),
            config,
        }
    }

    /// Check whether a document is handled as SQL under the current config
    pub async fn is_sql_document(&self, document: &Document) -> bool {
        self.config.read().await.is_sql_language(document.language_id())
    }

    /// Parse document on open (full parse)
    pub async fn on_document_open(&self, document: &Document) -> ParseResult {
        let content = document.get_content();

        info!(
            "Parsing document on open: uri={}, language_id={}, content_length={}",
            document.uri(),
            document.language_id(),
            content.len()
        );

        let result = self.parse(document, &content).await;
        Self::log_result(&result, document.uri(), "parsed");
        result
    }

    /// Reparse document after a change
    pub async fn on_document_change(&self, document: &Document) -> ParseResult {
        let content = document.get_content();

        debug!(
            "Reparsing document: uri={}, version={}, content_length={}",
            document.uri(),
            document.version(),
            content.len()
        );

        let result = self.parse(document, &content).await;
        Self::log_result(&result, document.uri(), "reparsed");
        result
    }

    /// Log a closed document
    ///
    /// Parse data goes away with the document itself.
    pub fn on_document_close(&self, uri: &Url) {
        debug!("Clearing parse data for closed document: uri={}", uri);
    }

    /// Create parse metadata from parse result
    pub fn create_metadata(&self, result: &ParseResult) -> ParseMetadata {
        match result {
            ParseResult::Success { parse_time, .. } => {
                ParseMetadata::new(parse_time.as_millis() as u64, false, 0)
            }
            ParseResult::Partial {
                errors, parse_time, ..
            } => ParseMetadata::new(parse_time.as_millis() as u64, true, errors.len()),
            ParseResult::Failed { .. } => ParseMetadata::new(0, true, 1),
        }
    }

    async fn parse(&self, document: &Document, content: &str) -> ParseResult {
        let languages = self.config.read().await.languages.clone();
        self.parsers
            .parse_text(document.language_id(), &languages, content)
    }

    fn log_result(result: &ParseResult, uri: &Url, verb: &str) {
        match result {
            ParseResult::Success { parse_time, .. } => {
                debug!("Document {} successfully in {:?}: uri={}", verb, parse_time, uri);
            }
            ParseResult::Partial { errors, .. } => {
                debug!("Document {} with {} errors: uri={}", verb, errors.len(), uri);
            }
            ParseResult::Failed {
                error: error @ ParseError::NoGrammar { .. },
            } => {
                debug!("Document not {}: uri={}, {}", verb, uri, error);
            }
            ParseResult::Failed { error } => {
                warn!("Document not {}: uri={}, error={}", verb, uri, error);
            }
        }
    }
}
