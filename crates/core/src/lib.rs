// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL Insert Hints - Core
//!
//! Computes inline hints that name the column each value of a SQL `INSERT`
//! belongs to.
//!
//! ## Pipeline
//!
//! ```text
//! syntax tree ──→ find_insert_statements ──→ InsertInfo::from_node
//!                                                  │
//!             Vec<Hint> ←── assemble_hints ←───────┘
//!                                │
//!                          resolve_anchor (per value)
//! ```
//!
//! A pass is a pure recomputation from the current tree and text. Nothing is
//! cached between passes; the only state is the [`HintState`] toggle, owned
//! by the caller and handed to [`run_pass`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sql_insert_hints_core::{HintState, SourceLines, TsNode, run_pass};
//!
//! # fn parse(_: &str) -> tree_sitter::Tree { unimplemented!() }
//! let text = "INSERT INTO users (id, name) VALUES (1, 'bob');";
//! let tree = parse(text);
//!
//! let hints = run_pass(HintState::Enabled, &TsNode::root(&tree, text), &SourceLines::new(text));
//! for hint in hints {
//!     println!("{}:{} {}", hint.row, hint.col, hint.label);
//! }
//! ```
//!
//! ## Error Handling
//!
//! Malformed or partial inserts are skipped one statement at a time and only
//! logged at debug level. A pass never fails.

pub mod assemble;
pub mod cst;
pub mod extract;
pub mod insert_info;
pub mod placement;

pub use assemble::{Hint, assemble_hints, format_label};
pub use cst::{NodeRange, SyntaxNode, TsNode};
pub use extract::{INSERT_KINDS, find_insert_statements, is_insert_statement};
pub use insert_info::{InsertInfo, InsertRejection, Row, ValueRef};
pub use placement::{Anchor, LineSource, SourceLines, resolve_anchor, resolve_anchor_in};

use tracing::debug;

/// Whether hints are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HintState {
    #[default]
    Enabled,
    Disabled,
}

impl HintState {
    /// Build a state from a flag
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            HintState::Enabled
        } else {
            HintState::Disabled
        }
    }

    /// Check if hints are produced
    pub fn is_enabled(&self) -> bool {
        matches!(self, HintState::Enabled)
    }

    /// Get the opposite state
    pub fn toggled(self) -> Self {
        match self {
            HintState::Enabled => HintState::Disabled,
            HintState::Disabled => HintState::Enabled,
        }
    }
}

/// Collect the hints of every insert statement in a tree
///
/// Inserts that cannot be rendered are skipped without affecting the others.
pub fn collect_hints<N, L>(root: &N, lines: &L) -> Vec<Hint>
where
    N: SyntaxNode,
    L: LineSource + ?Sized,
{
    let mut hints = Vec::new();

    for insert in find_insert_statements(root) {
        match InsertInfo::from_node(&insert) {
            Ok(info) => hints.extend(assemble_hints(&info, lines)),
            Err(rejection) => {
                let range = insert.range();
                debug!(
                    "Skipping insert at {}:{}: {}",
                    range.start_row, range.start_col, rejection
                );
            }
        }
    }

    hints
}

/// Run one full pass
///
/// Returns nothing when hints are disabled.
pub fn run_pass<N, L>(state: HintState, root: &N, lines: &L) -> Vec<Hint>
where
    N: SyntaxNode,
    L: LineSource + ?Sized,
{
    if !state.is_enabled() {
        return Vec::new();
    }

    let hints = collect_hints(root, lines);
    debug!("Insert hint pass produced {} hints", hints.len());
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_state_toggle() {
        assert_eq!(HintState::default(), HintState::Enabled);
        assert_eq!(HintState::Enabled.toggled(), HintState::Disabled);
        assert_eq!(HintState::Disabled.toggled(), HintState::Enabled);
        assert!(HintState::from_enabled(true).is_enabled());
        assert!(!HintState::from_enabled(false).is_enabled());
    }
}
