// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sql-insert-hints
//!
//! This crate provides common testing components including:
//! - Mock syntax trees that implement `SyntaxNode`
//! - Insert statement layouts with exact node ranges
//! - SQL fixtures

pub mod fixtures;
pub mod mock_cst;

// Re-exports for convenience
pub use fixtures::SqlFixtures;
pub use mock_cst::{BuiltDocument, MockDocument, MockInsert, MockNode, MockValue};
