// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Tree-sitter Parsing Integration
//!
//! Low-level Tree-sitter integration for parsing SQL documents.
//!
//! ## Overview
//!
//! The parsing module handles:
//! - Parser creation for documents whose language id is SQL
//! - Full parsing of the document text
//! - Collecting `ERROR` nodes as parse errors
//!
//! A tree with `ERROR` nodes is still returned as [`ParseResult::Partial`];
//! insert hints are computed from whatever the grammar recovered.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sql_insert_hints_lsp::parsing::{ParserManager, ParseResult};
//! use sql_insert_hints_grammar::DEFAULT_LANGUAGE_IDS;
//!
//! let manager = ParserManager::new();
//!
//! match manager.parse_text("sql", DEFAULT_LANGUAGE_IDS, "INSERT INTO t (a) VALUES (1);") {
//!     ParseResult::Success { tree, parse_time } => println!("Parsed in {:?}", parse_time),
//!     ParseResult::Partial { tree, errors } => println!("Parsed with {} errors", errors.len()),
//!     ParseResult::Failed { error } => println!("Parse failed: {}", error),
//! }
//! ```

use std::time::{Duration, Instant};
use tracing::debug;

use sql_insert_hints_grammar::language_for_language_id;

/// Parser manager
///
/// Creates a parser on demand for each parse.
#[derive(Debug, Default)]
pub struct ParserManager;

impl ParserManager {
    /// Create a new parser manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new parser for a document language
    ///
    /// # Returns
    ///
    /// - `Ok(Parser)` - New parser instance
    /// - `Err(ParseError)` - Language is not SQL or the grammar failed to load
    fn create_parser<S: AsRef<str>>(
        &self,
        language_id: &str,
        accepted: &[S],
    ) -> Result<tree_sitter::Parser, ParseError> {
        let language =
            language_for_language_id(language_id, accepted).ok_or_else(|| ParseError::NoGrammar {
                language_id: language_id.to_string(),
            })?;

        let mut parser = tree_sitter::Parser::new();

        parser
            .set_language(language)
            .map_err(|e| ParseError::Generic {
                message: format!("Failed to set language: {}", e),
            })?;

        Ok(parser)
    }

    /// Parse text with full parsing
    ///
    /// # Arguments
    ///
    /// - `language_id`: The document's language identifier
    /// - `accepted`: Language identifiers treated as SQL
    /// - `text`: The text to parse
    ///
    /// # Returns
    ///
    /// - `ParseResult::Success` - Clean parse with no errors
    /// - `ParseResult::Partial` - Parse with syntax errors (tree includes ERROR nodes)
    /// - `ParseResult::Failed` - No tree could be produced
    pub fn parse_text<S: AsRef<str>>(
        &self,
        language_id: &str,
        accepted: &[S],
        text: &str,
    ) -> ParseResult {
        let start = Instant::now();

        debug!("Parsing {} bytes of text as {}", text.len(), language_id);

        let mut parser = match self.create_parser(language_id, accepted) {
            Ok(p) => p,
            Err(e) => {
                return ParseResult::Failed { error: e };
            }
        };

        let tree = match parser.parse(text, None) {
            Some(tree) => tree,
            None => {
                return ParseResult::Failed {
                    error: ParseError::Generic {
                        message: "Parser returned None".to_string(),
                    },
                };
            }
        };

        let parse_time = start.elapsed();

        let errors = self.collect_errors(&tree, text);

        if errors.is_empty() {
            ParseResult::Success { tree, parse_time }
        } else {
            ParseResult::Partial {
                tree,
                errors,
                parse_time,
            }
        }
    }

    /// Collect parse errors from tree
    fn collect_errors(&self, tree: &tree_sitter::Tree, text: &str) -> Vec<ParseError> {
        let mut errors = Vec::new();

        let root = tree.root_node();
        if root.has_error() {
            self.find_error_nodes(&root, &mut errors, text);
        }

        errors
    }

    fn find_error_nodes(&self, node: &tree_sitter::Node, errors: &mut Vec<ParseError>, text: &str) {
        if node.is_error() || node.is_missing() {
            let line = node.start_position().row;
            let column = node.start_position().column;

            let error_text = text
                .get(node.start_byte()..node.end_byte())
                .unwrap_or("<invalid bytes>");

            let message = if node.is_missing() {
                format!("Missing {}", node.kind())
            } else {
                format!("Syntax error: {}", error_text)
            };

            errors.push(ParseError::InvalidInput {
                line,
                column,
                message,
                node_type: Some(node.kind().to_string()),
            });
        }

        for child in node.children(&mut node.walk()) {
            if child.has_error() || child.is_missing() {
                self.find_error_nodes(&child, errors, text);
            }
        }
    }
}

/// Result of a parsing operation
#[derive(Debug, Clone)]
pub enum ParseResult {
    /// Successful parse with no errors
    Success {
        /// Parsed syntax tree
        tree: tree_sitter::Tree,

        /// Time taken to parse
        parse_time: Duration,
    },

    /// Partial parse with syntax errors
    ///
    /// The tree is still usable and contains ERROR nodes marking the problematic areas.
    Partial {
        /// Parsed syntax tree (contains ERROR nodes)
        tree: tree_sitter::Tree,

        /// List of parse errors
        errors: Vec<ParseError>,

        /// Time taken to parse
        parse_time: Duration,
    },

    /// Failed parse
    ///
    /// No tree could be produced.
    Failed {
        /// Parse error details
        error: ParseError,
    },
}

impl ParseResult {
    /// Check if parse was successful (no errors)
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    /// Check if parse was partial (has errors)
    pub fn is_partial(&self) -> bool {
        matches!(self, ParseResult::Partial { .. })
    }

    /// Check if parse failed
    pub fn is_failed(&self) -> bool {
        matches!(self, ParseResult::Failed { .. })
    }

    /// Get the tree if available
    pub fn tree(&self) -> Option<&tree_sitter::Tree> {
        match self {
            ParseResult::Success { tree, .. } => Some(tree),
            ParseResult::Partial { tree, .. } => Some(tree),
            ParseResult::Failed { .. } => None,
        }
    }

    /// Get the parse duration if a tree was produced
    pub fn parse_time(&self) -> Option<Duration> {
        match self {
            ParseResult::Success { parse_time, .. } => Some(*parse_time),
            ParseResult::Partial { parse_time, .. } => Some(*parse_time),
            ParseResult::Failed { .. } => None,
        }
    }

    /// Get parse errors if any
    pub fn errors(&self) -> Option<&[ParseError]> {
        match self {
            ParseResult::Partial { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Take the tree, if one was produced
    pub fn into_tree(self) -> Option<tree_sitter::Tree> {
        match self {
            ParseResult::Success { tree, .. } => Some(tree),
            ParseResult::Partial { tree, .. } => Some(tree),
            ParseResult::Failed { .. } => None,
        }
    }
}

/// Parse error details
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// Language id is not handled as SQL
    #[error("No grammar for language: {language_id}")]
    NoGrammar { language_id: String },

    /// Invalid input at specific location
    #[error("Invalid input at line {line}, column {column}: {message}")]
    InvalidInput {
        line: usize,
        column: usize,
        message: String,
        node_type: Option<String>,
    },

    /// Generic parse error
    #[error("Parse error: {message}")]
    Generic { message: String },
}
