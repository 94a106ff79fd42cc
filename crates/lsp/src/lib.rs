// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL Insert Hints - Language Server Protocol
//!
//! This crate serves insert hints to editors over LSP.
//!
//! ## Overview
//!
//! In an `INSERT ... (a, b) VALUES (1, 2)` statement, every value gets an
//! inline hint naming the column it lands in:
//!
//! ```text
//! INSERT INTO users (id, name) VALUES (1, ;;id;; 'bob' ;;name;; );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Client (VS Code, etc.)          │
//! └──────────────┬──────────────────────────┘
//!                │ LSP Protocol
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │         LSP Backend (tower-lsp)         │
//! ├─────────────────────────────────────────┤
//! │  • did_open / did_change / did_close    │
//! │  • inlayHint / executeCommand           │
//! └──────────────┬──────────────────────────┘
//!                │
//!         ┌──────┴──────┬────────────────┐
//!         ↓             ↓                ↓
//! ┌────────────┐ ┌──────────┐  ┌──────────────────┐
//! │ HintConfig │ │ Document │  │ sql-insert-hints │
//! │  + toggle  │ │   Store  │  │       core       │
//! └────────────┘ └──────────┘  └──────────────────┘
//! ```
//!
//! ## Configuration
//!
//! Read from the `sqlInsertHints` section of `initializationOptions` and of
//! `workspace/didChangeConfiguration` settings. See [`config`].
//!
//! ## Commands
//!
//! - `sqlInsertHints.toggle` with the active document URI as argument
//!
//! ## Error Handling
//!
//! - Invalid settings → keep the previous config, log the error
//! - Non-SQL document → no tree, no hints
//! - Syntax errors → hints from the recovered tree
//! - Toggle outside an SQL document → warning message, nothing changes

pub mod backend;
pub mod commands;
pub mod config;
pub mod document;
pub mod inlay_hints;
pub mod parsing;
pub mod sync;

// Re-exports for convenience
pub use backend::{LspBackend, LspError};
pub use commands::{TOGGLE_COMMAND, ToggleRejection};
pub use config::{ConfigError, HintConfig, HintStyle};
pub use document::{Document, DocumentError, DocumentMetadata, DocumentStore, ParseMetadata};
pub use parsing::{ParseError, ParseResult, ParserManager};
pub use sync::DocumentSync;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const SERVER_NAME: &str = "sql-insert-hints";
