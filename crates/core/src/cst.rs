// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Syntax node abstraction
//!
//! The extractor and parser only need a handful of node capabilities. This
//! module defines them as the [`SyntaxNode`] trait so the pipeline can run on
//! tree-sitter trees ([`TsNode`]) as well as on hand-built mock trees in tests.

use std::fmt;

/// Source range of a node
///
/// Rows and columns are 0-based. Columns are byte offsets into the row, the
/// same unit tree-sitter reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeRange {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl NodeRange {
    /// Create a new range
    pub fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }
}

/// Read-only view of one node in a syntax tree
///
/// Implementors are cheap handles that borrow the tree (a tree-sitter node,
/// or a reference into a mock tree), so they are cloned freely.
pub trait SyntaxNode: Clone + fmt::Debug {
    /// Get the kind of node (e.g., "insert", "object_reference")
    fn kind(&self) -> &str;

    /// Check if this node is named (vs. anonymous nodes like parentheses)
    fn is_named(&self) -> bool;

    /// Get all child nodes, named and anonymous, in source order
    fn children(&self) -> Vec<Self>;

    /// Get the child nodes playing a grammar role (e.g., "schema", "name")
    fn field(&self, name: &str) -> Vec<Self>;

    /// Get the source range of this node
    fn range(&self) -> NodeRange;

    /// Get the verbatim source text spanned by this node
    ///
    /// `None` when the node does not fall on the source, such as a tree
    /// parsed from a different text.
    fn text(&self) -> Option<&str>;

    /// Get only the named children
    fn named_children(&self) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|child| child.is_named())
            .collect()
    }

    /// Get the first child playing a grammar role
    fn first_field(&self, name: &str) -> Option<Self> {
        self.field(name).into_iter().next()
    }
}

/// Tree-sitter node paired with the source it was parsed from
#[derive(Clone, Copy)]
pub struct TsNode<'tree> {
    node: tree_sitter::Node<'tree>,
    source: &'tree str,
}

impl<'tree> TsNode<'tree> {
    /// Wrap a tree-sitter node
    pub fn new(node: tree_sitter::Node<'tree>, source: &'tree str) -> Self {
        Self { node, source }
    }

    /// Wrap the root node of a tree
    pub fn root(tree: &'tree tree_sitter::Tree, source: &'tree str) -> Self {
        Self::new(tree.root_node(), source)
    }

    /// Get the underlying tree-sitter node
    pub fn inner(&self) -> tree_sitter::Node<'tree> {
        self.node
    }
}

impl fmt::Debug for TsNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TsNode")
            .field("kind", &self.node.kind())
            .field("range", &self.range())
            .finish()
    }
}

impl SyntaxNode for TsNode<'_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn is_named(&self) -> bool {
        self.node.is_named()
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|child| TsNode::new(child, self.source))
            .collect()
    }

    fn field(&self, name: &str) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children_by_field_name(name, &mut cursor)
            .map(|child| TsNode::new(child, self.source))
            .collect()
    }

    fn range(&self) -> NodeRange {
        let start = self.node.start_position();
        let end = self.node.end_position();
        NodeRange::new(start.row, start.column, end.row, end.column)
    }

    fn text(&self) -> Option<&str> {
        self.source.get(self.node.byte_range())
    }
}
