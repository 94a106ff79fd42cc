// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Hint assembly
//!
//! Pairs declared columns with supplied values by position and produces one
//! labelled hint per pair.

use crate::insert_info::InsertInfo;
use crate::placement::{LineSource, resolve_anchor_in};

/// One emit-ready inline hint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hint {
    /// Row of the anchor (0-based)
    pub row: usize,

    /// Byte column of the anchor
    pub col: usize,

    /// Rendered label, see [`format_label`]
    pub label: String,

    /// Column name the hint stands for
    pub column: String,

    /// Target table, schema-qualified when a schema was given
    pub target: String,
}

/// Render the label for a column name
///
/// The exact format is ` ;;<column>;; `, kept byte-for-byte for clients that
/// match on it.
pub fn format_label(column: &str) -> String {
    format!(" ;;{};; ", column)
}

/// Assemble the hints of one insert statement
///
/// For each row, only the first `min(columns, values)` positions are
/// paired. Surplus columns or values get no hint.
pub fn assemble_hints<N, L>(info: &InsertInfo<N>, lines: &L) -> Vec<Hint>
where
    L: LineSource + ?Sized,
{
    let target = info.qualified_table().unwrap_or_default();
    let mut hints = Vec::new();

    for row in &info.rows {
        for (column, value) in info.columns.iter().zip(row) {
            let anchor = resolve_anchor_in(lines, value.end_row, value.end_col);
            hints.push(Hint {
                row: anchor.row,
                col: anchor.col,
                label: format_label(column),
                column: column.clone(),
                target: target.clone(),
            });
        }
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("id"), " ;;id;; ");
        assert_eq!(format_label("created_at"), " ;;created_at;; ");
    }
}
