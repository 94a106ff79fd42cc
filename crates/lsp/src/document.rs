// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Management
//!
//! This module keeps the text and syntax tree of every open document.
//!
//! ## Overview
//!
//! The document store handles:
//! - Document synchronization (open, change, close)
//! - Text content management using Ropey for efficient edits
//! - The most recent syntax tree and its parse metadata
//!
//! ## Positions
//!
//! Change ranges arrive as LSP positions, whose `character` counts UTF-16
//! code units. They are converted to rope char indices before editing.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sql_insert_hints_lsp::DocumentStore;
//! use tower_lsp::lsp_types::Url;
//!
//! let store = DocumentStore::new();
//! let uri = Url::parse("file:///seed.sql").unwrap();
//!
//! store
//!     .open_document(uri.clone(), "INSERT INTO t (a) VALUES (1);".into(), 1, "sql".into())
//!     .await?;
//!
//! if let Some(doc) = store.get_document(&uri).await {
//!     println!("Content: {}", doc.get_content());
//! }
//! ```

use ropey::Rope;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{
    Position, TextDocumentContentChangeEvent, Url, VersionedTextDocumentIdentifier,
};
use tracing::debug;

/// Parse metadata
///
/// Describes the parse that produced a document's current tree.
#[derive(Debug, Clone)]
pub struct ParseMetadata {
    /// When the document was parsed
    pub parsed_at: std::time::SystemTime,

    /// Time taken to parse (milliseconds)
    pub parse_time_ms: u64,

    /// Whether the parse had errors
    pub has_errors: bool,

    /// Number of parse errors
    pub error_count: usize,
}

/// Document metadata
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Document URI
    pub uri: Url,

    /// Language identifier (e.g., "sql", "mysql", "postgresql")
    pub language_id: String,

    /// Document version
    pub version: i32,

    /// Line count
    pub line_count: usize,
}

impl DocumentMetadata {
    /// Create new document metadata
    pub fn new(uri: Url, language_id: String, version: i32, line_count: usize) -> Self {
        Self {
            uri,
            language_id,
            version,
            line_count,
        }
    }
}

/// A document managed by the server
#[derive(Debug, Clone)]
pub struct Document {
    metadata: DocumentMetadata,

    content: Rope,

    /// Syntax tree of the current content (if parsed)
    tree: Option<tree_sitter::Tree>,

    parse_metadata: Option<Arc<ParseMetadata>>,
}

impl Document {
    /// Create a new document
    pub fn new(uri: Url, content: String, version: i32, language_id: String) -> Self {
        let rope = Rope::from_str(&content);
        let line_count = rope.len_lines();

        let metadata = DocumentMetadata::new(uri, language_id, version, line_count);

        Self {
            metadata,
            content: rope,
            tree: None,
            parse_metadata: None,
        }
    }

    /// Get the document URI
    pub fn uri(&self) -> &Url {
        &self.metadata.uri
    }

    /// Get the document language ID
    pub fn language_id(&self) -> &str {
        &self.metadata.language_id
    }

    /// Get the document version
    pub fn version(&self) -> i32 {
        self.metadata.version
    }

    /// Get the line count
    pub fn line_count(&self) -> usize {
        self.metadata.line_count
    }

    /// Get the full document content as a string
    pub fn get_content(&self) -> String {
        self.content.to_string()
    }

    /// Get a line of text without its line ending
    pub fn get_line(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }

        let line_with_ending = self.content.line(line).to_string();
        Some(line_with_ending.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Convert an LSP position (UTF-16 column) to a rope char index
    ///
    /// Returns `None` when the line does not exist or the column lies past
    /// the end of the line.
    pub fn position_to_char(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        if line >= self.content.len_lines() {
            return None;
        }

        let slice = self.content.line(line);
        let utf16_col = position.character as usize;
        if utf16_col > slice.len_utf16_cu() {
            return None;
        }

        Some(self.content.line_to_char(line) + slice.utf16_cu_to_char(utf16_col))
    }

    /// Apply content changes to the document
    ///
    /// Changes are applied in order. A change with a range replaces that
    /// range; a change without one replaces the whole text.
    pub fn apply_changes(
        &mut self,
        changes: &[TextDocumentContentChangeEvent],
        new_version: i32,
    ) -> Result<(), DocumentError> {
        for change in changes {
            match &change.range {
                Some(range) => {
                    let invalid = || DocumentError::InvalidRange {
                        start: (range.start.line as usize, range.start.character as usize),
                        end: (range.end.line as usize, range.end.character as usize),
                    };

                    let start_char = self.position_to_char(range.start).ok_or_else(invalid)?;
                    let end_char = self.position_to_char(range.end).ok_or_else(invalid)?;

                    if start_char > end_char {
                        return Err(invalid());
                    }

                    self.content.remove(start_char..end_char);
                    self.content.insert(start_char, &change.text);
                }
                None => {
                    self.content = Rope::from_str(&change.text);
                }
            }
        }

        self.metadata.version = new_version;
        self.metadata.line_count = self.content.len_lines();

        Ok(())
    }

    /// Get document metadata
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Get the parsed tree (if available)
    pub fn tree(&self) -> Option<&tree_sitter::Tree> {
        self.tree.as_ref()
    }

    /// Update the parsed tree
    pub fn set_tree(&mut self, tree: tree_sitter::Tree, metadata: ParseMetadata) {
        self.tree = Some(tree);
        self.parse_metadata = Some(Arc::new(metadata));
    }

    /// Clear the parsed tree
    pub fn clear_tree(&mut self) {
        self.tree = None;
        self.parse_metadata = None;
    }

    /// Get parse metadata
    pub fn parse_metadata(&self) -> Option<&ParseMetadata> {
        self.parse_metadata.as_deref()
    }
}

/// Document store for managing multiple documents
///
/// Thread-safe store for all open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Arc<RwLock<HashMap<Url, Document>>>,
}

impl DocumentStore {
    /// Create a new document store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document
    ///
    /// Re-opening a URI replaces the previous document.
    pub async fn open_document(
        &self,
        uri: Url,
        content: String,
        version: i32,
        language_id: String,
    ) -> Result<(), DocumentError> {
        let mut docs = self.documents.write().await;

        let document = Document::new(uri.clone(), content, version, language_id);

        docs.insert(uri, document);

        Ok(())
    }

    /// Close a document
    ///
    /// # Returns
    ///
    /// true if the document was closed, false if it didn't exist
    pub async fn close_document(&self, uri: &Url) -> bool {
        let mut docs = self.documents.write().await;
        docs.remove(uri).is_some()
    }

    /// Update a document
    ///
    /// The stale tree is cleared; the caller reparses afterwards.
    pub async fn update_document(
        &self,
        identifier: &VersionedTextDocumentIdentifier,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<(), DocumentError> {
        let mut docs = self.documents.write().await;

        let document = docs
            .get_mut(&identifier.uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(identifier.uri.clone()))?;

        document.apply_changes(changes, identifier.version)?;
        document.clear_tree();

        Ok(())
    }

    /// Get a document by URI
    pub async fn get_document(&self, uri: &Url) -> Option<Document> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }

    /// Check if a document exists
    pub async fn has_document(&self, uri: &Url) -> bool {
        let docs = self.documents.read().await;
        docs.contains_key(uri)
    }

    /// Get all document URIs
    pub async fn list_uris(&self) -> Vec<Url> {
        let docs = self.documents.read().await;
        docs.keys().cloned().collect()
    }

    /// Get the number of open documents
    pub async fn document_count(&self) -> usize {
        let docs = self.documents.read().await;
        docs.len()
    }

    /// Update document's parsed tree
    ///
    /// `version` is the version of the text the tree was parsed from. A tree
    /// for any other version is dropped, since its byte ranges no longer match
    /// the stored text.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` - The tree was stored
    /// - `Ok(false)` - The document moved on; the tree was dropped
    /// - `Err(DocumentError)` - The document is not open
    pub async fn update_document_tree(
        &self,
        uri: &Url,
        version: i32,
        tree: tree_sitter::Tree,
        metadata: ParseMetadata,
    ) -> Result<bool, DocumentError> {
        let mut docs = self.documents.write().await;
        let doc = docs
            .get_mut(uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(uri.clone()))?;

        if doc.version() != version {
            debug!(
                "Dropping stale tree: uri={}, tree_version={}, document_version={}",
                uri,
                version,
                doc.version()
            );
            return Ok(false);
        }

        doc.set_tree(tree, metadata);
        Ok(true)
    }

    /// Clear document's parsed tree
    pub async fn clear_document_tree(&self, uri: &Url) -> Result<(), DocumentError> {
        let mut docs = self.documents.write().await;
        let doc = docs
            .get_mut(uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(uri.clone()))?;
        doc.clear_tree();
        Ok(())
    }
}

/// Document-related errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(Url),

    /// Invalid range for text operation
    #[error("Invalid range: start={start:?}, end={end:?}")]
    InvalidRange {
        start: (usize, usize),
        end: (usize, usize),
    },
}
