// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! SQL Insert Hints Grammar
//!
//! This crate maps editor language identifiers to the tree-sitter SQL grammar
//! used to build syntax trees for insert hints.
//!
//! ## Usage
//!
//! ```rust
//! use sql_insert_hints_grammar::{language_for_language_id, DEFAULT_LANGUAGE_IDS};
//!
//! // Recognised SQL documents get the shared SQL grammar
//! assert!(language_for_language_id("sql", DEFAULT_LANGUAGE_IDS).is_some());
//!
//! // Anything else has no parser
//! assert!(language_for_language_id("rust", DEFAULT_LANGUAGE_IDS).is_none());
//! ```

use std::sync::OnceLock;

use tree_sitter::Language;

/// Language identifiers treated as SQL when the client does not configure any
pub const DEFAULT_LANGUAGE_IDS: &[&str] = &["sql", "mysql", "postgresql", "pgsql", "plsql", "sqlite"];

/// Get the tree-sitter SQL language
pub fn language() -> &'static Language {
    static SQL_LANG: OnceLock<Language> = OnceLock::new();

    SQL_LANG.get_or_init(|| tree_sitter_sequel::LANGUAGE.into())
}

/// Check whether a language identifier is one of the accepted SQL identifiers
///
/// Comparison is case-insensitive, so `SQL` and `sql` are the same language.
pub fn is_sql_language_id<S: AsRef<str>>(language_id: &str, accepted: &[S]) -> bool {
    accepted
        .iter()
        .any(|id| id.as_ref().eq_ignore_ascii_case(language_id))
}

/// Get the tree-sitter language for a document's language identifier
///
/// Returns `None` when no grammar is available for the identifier.
pub fn language_for_language_id<S: AsRef<str>>(
    language_id: &str,
    accepted: &[S],
) -> Option<&'static Language> {
    if is_sql_language_id(language_id, accepted) {
        Some(language())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sql_language_id() {
        assert!(is_sql_language_id("sql", DEFAULT_LANGUAGE_IDS));
        assert!(is_sql_language_id("PostgreSQL", DEFAULT_LANGUAGE_IDS));
        assert!(!is_sql_language_id("python", DEFAULT_LANGUAGE_IDS));
        assert!(!is_sql_language_id("", DEFAULT_LANGUAGE_IDS));
    }

    #[test]
    fn test_custom_language_ids() {
        let accepted = vec!["tsql".to_string()];

        assert!(language_for_language_id("tsql", &accepted).is_some());
        assert!(language_for_language_id("sql", &accepted).is_none());
    }
}
