// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock syntax trees for testing the insert hint pipeline
//!
//! Provides a fluent API for building syntax trees without requiring
//! tree-sitter, plus [`MockDocument`] which lays out insert statements as
//! text and builds the matching tree with exact ranges.

use std::collections::HashMap;
use sql_insert_hints_core::{NodeRange, SyntaxNode};

/// Mock syntax node
#[derive(Debug, Clone)]
pub struct MockNode {
    pub kind: String,
    pub named: bool,
    pub children: Vec<MockNode>,
    pub field_map: HashMap<String, Vec<usize>>,
    pub range: NodeRange,
    pub text: Option<String>,
}

impl MockNode {
    /// Create a new named node
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            named: true,
            children: Vec::new(),
            field_map: HashMap::new(),
            range: NodeRange::default(),
            text: None,
        }
    }

    /// Create an anonymous node (punctuation such as `(` or `,`)
    pub fn anonymous(kind: impl Into<String>) -> Self {
        Self {
            named: false,
            ..Self::new(kind)
        }
    }

    /// Add a child node without a field name
    pub fn with_child(mut self, child: MockNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add a child node under a field name
    pub fn with_field(mut self, field: &str, child: MockNode) -> Self {
        let idx = self.children.len();
        self.field_map
            .entry(field.to_string())
            .or_default()
            .push(idx);
        self.children.push(child);
        self
    }

    /// Set the range
    pub fn with_range(mut self, range: NodeRange) -> Self {
        self.range = range;
        self
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl<'a> SyntaxNode for &'a MockNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn is_named(&self) -> bool {
        self.named
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a MockNode = *self;
        node.children.iter().collect()
    }

    fn field(&self, name: &str) -> Vec<Self> {
        let node: &'a MockNode = *self;
        node.field_map
            .get(name)
            .map(|indices| indices.iter().map(|&i| &node.children[i]).collect())
            .unwrap_or_default()
    }

    fn range(&self) -> NodeRange {
        self.range
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// One value in a mock value list
#[derive(Debug, Clone)]
pub struct MockValue {
    pub kind: String,
    pub text: String,
}

impl MockValue {
    /// A literal value such as `1` or `'bob'`
    pub fn literal(text: impl Into<String>) -> Self {
        Self::of_kind("literal", text)
    }

    /// A value of an arbitrary node kind
    pub fn of_kind(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }
}

/// Description of one insert statement, laid out on a single line
#[derive(Debug, Clone)]
pub struct MockInsert {
    kind: String,
    schema: Option<String>,
    table: Option<String>,
    columns: Option<Vec<String>>,
    rows: Vec<Vec<MockValue>>,
}

impl MockInsert {
    /// Start an insert into `table`
    pub fn into_table(table: impl Into<String>) -> Self {
        Self {
            kind: "insert".to_string(),
            schema: None,
            table: Some(table.into()),
            columns: None,
            rows: Vec::new(),
        }
    }

    /// Start an insert without a table reference (partial statement)
    pub fn without_table() -> Self {
        Self {
            table: None,
            ..Self::into_table("")
        }
    }

    /// Use a different node kind for the statement (e.g., "insert_statement")
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Qualify the table with a schema
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Declare a column list
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Add a row of literal values
    pub fn row(self, values: &[&str]) -> Self {
        self.row_values(values.iter().map(|v| MockValue::literal(*v)).collect())
    }

    /// Add a row of arbitrary values
    pub fn row_values(mut self, values: Vec<MockValue>) -> Self {
        self.rows.push(values);
        self
    }
}

/// Line writer that tracks the byte column of everything it emits
struct LineWriter<'a> {
    row: usize,
    line: &'a mut String,
}

impl LineWriter<'_> {
    fn col(&self) -> usize {
        self.line.len()
    }

    fn range_from(&self, start: usize) -> NodeRange {
        NodeRange::new(self.row, start, self.row, self.col())
    }

    /// Emit a leaf node
    fn leaf(&mut self, node: MockNode, text: &str) -> MockNode {
        let start = self.col();
        self.line.push_str(text);
        node.with_range(self.range_from(start)).with_text(text)
    }

    fn punct(&mut self, text: &str) -> MockNode {
        self.leaf(MockNode::anonymous(text), text)
    }

    fn space(&mut self) {
        self.line.push(' ');
    }

    fn finish(&self, node: MockNode, start: usize) -> MockNode {
        let text = self.line[start..].to_string();
        node.with_range(self.range_from(start)).with_text(text)
    }
}

/// A document made of one statement per line
///
/// # Example
///
/// ```rust
/// use sql_insert_hints_test_utils::{MockDocument, MockInsert};
///
/// let doc = MockDocument::new()
///     .insert(MockInsert::into_table("users").columns(&["id"]).row(&["1"]))
///     .build();
///
/// assert_eq!(doc.text, "INSERT INTO users (id) VALUES (1);");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockDocument {
    lines: Vec<MockLine>,
}

#[derive(Debug, Clone)]
enum MockLine {
    Insert(MockInsert),
    Raw(String),
}

/// Built mock document
#[derive(Debug, Clone)]
pub struct BuiltDocument {
    /// Document text, lines joined with `\n`
    pub text: String,

    /// Root node ("program")
    pub root: MockNode,
}

impl MockDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an insert statement on its own line
    pub fn insert(mut self, insert: MockInsert) -> Self {
        self.lines.push(MockLine::Insert(insert));
        self
    }

    /// Append a line of text that produces no syntax nodes
    pub fn raw_line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(MockLine::Raw(text.into()));
        self
    }

    /// Lay out the text and build the tree
    pub fn build(self) -> BuiltDocument {
        let mut lines = Vec::new();
        let mut root = MockNode::new("program");

        for (row, line) in self.lines.into_iter().enumerate() {
            let mut text = String::new();
            match line {
                MockLine::Insert(insert) => {
                    let mut writer = LineWriter {
                        row,
                        line: &mut text,
                    };
                    let statement = write_insert(&mut writer, insert);
                    root = root.with_child(statement);
                }
                MockLine::Raw(raw) => text.push_str(&raw),
            }
            lines.push(text);
        }

        let text = lines.join("\n");
        let last_row = lines.len().saturating_sub(1);
        let last_col = lines.last().map_or(0, |l| l.len());
        root = root
            .with_range(NodeRange::new(0, 0, last_row, last_col))
            .with_text(text.clone());

        BuiltDocument { text, root }
    }
}

fn write_insert(w: &mut LineWriter<'_>, insert: MockInsert) -> MockNode {
    let start = w.col();
    let mut node = MockNode::new(insert.kind.clone());

    node = node.with_child(w.leaf(MockNode::new("keyword_insert"), "INSERT"));
    w.space();
    node = node.with_child(w.leaf(MockNode::new("keyword_into"), "INTO"));

    if let Some(table) = &insert.table {
        w.space();
        let ref_start = w.col();
        let mut object_ref = MockNode::new("object_reference");
        if let Some(schema) = &insert.schema {
            object_ref = object_ref.with_field("schema", w.leaf(MockNode::new("identifier"), schema));
            object_ref = object_ref.with_child(w.punct("."));
        }
        object_ref = object_ref.with_field("name", w.leaf(MockNode::new("identifier"), table));
        node = node.with_child(w.finish(object_ref, ref_start));
    }

    if let Some(columns) = &insert.columns {
        w.space();
        let list_start = w.col();
        let mut list = MockNode::new("list").with_child(w.punct("("));
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                list = list.with_child(w.punct(","));
                w.space();
            }
            let column_start = w.col();
            let identifier = w.leaf(MockNode::new("identifier"), column);
            let column_node = MockNode::new("column").with_child(identifier);
            list = list.with_child(w.finish(column_node, column_start));
        }
        list = list.with_child(w.punct(")"));
        node = node.with_child(w.finish(list, list_start));
    }

    w.space();
    node = node.with_child(w.leaf(MockNode::new("keyword_values"), "VALUES"));

    for (r, row) in insert.rows.iter().enumerate() {
        if r > 0 {
            node = node.with_child(w.punct(","));
        }
        w.space();
        let list_start = w.col();
        let mut list = MockNode::new("list").with_child(w.punct("("));
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                list = list.with_child(w.punct(","));
                w.space();
            }
            list = list.with_child(w.leaf(MockNode::new(value.kind.clone()), &value.text));
        }
        list = list.with_child(w.punct(")"));
        node = node.with_child(w.finish(list, list_start));
    }

    let insert_node = w.finish(node, start);
    let semicolon = w.punct(";");
    let statement = MockNode::new("statement").with_child(insert_node);
    w.finish(statement, start).with_child(semicolon)
}
