// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Insert statement extraction
//!
//! Walks a syntax tree and collects every insert statement node in document
//! order.

use crate::cst::SyntaxNode;

/// Node kinds that denote an insert statement
///
/// Grammar releases disagree on the spelling; both are treated the same.
pub const INSERT_KINDS: &[&str] = &["insert", "insert_statement"];

/// Check if a node is an insert statement
pub fn is_insert_statement<N: SyntaxNode>(node: &N) -> bool {
    INSERT_KINDS.contains(&node.kind())
}

/// Find all insert statement nodes below (and including) `root`
///
/// Pre-order, depth-first over named nodes only. Insert statements do not
/// nest, so the result is in source order.
pub fn find_insert_statements<N: SyntaxNode>(root: &N) -> Vec<N> {
    let mut inserts = Vec::new();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if !node.is_named() {
            continue;
        }

        if is_insert_statement(&node) {
            inserts.push(node.clone());
        }

        // Reverse so the leftmost child is visited first
        stack.extend(node.named_children().into_iter().rev());
    }

    inserts
}
