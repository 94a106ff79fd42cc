// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Insert statement structure
//!
//! Converts one insert statement node into an [`InsertInfo`]: the target
//! table, the declared columns and the position of every supplied value.
//!
//! Only the direct children of the insert node are inspected:
//!
//! ```text
//! insert
//!  ├─ object_reference      schema / name fields  → table identity
//!  ├─ list (column, ...)    first list after the reference → columns
//!  ├─ list (value, ...)     every later list → one row
//!  └─ list (value, ...)
//! ```

use tracing::trace;

use crate::cst::SyntaxNode;

/// Kind of the schema-qualified table reference
pub const OBJECT_REFERENCE: &str = "object_reference";

/// Kind shared by the column-list clause and every value list
pub const LIST: &str = "list";

/// Kind of one entry in the column-list clause
pub const COLUMN: &str = "column";

/// Kind of the identifier nested inside a column entry
pub const IDENTIFIER: &str = "identifier";

/// Kind of a nested statement
pub const STATEMENT: &str = "statement";

/// Kinds that never count as a value inside a value list
const NON_VALUE_KINDS: &[&str] = &[
    LIST,
    OBJECT_REFERENCE,
    COLUMN,
    STATEMENT,
    "comment",
    "marginalia",
];

/// Position of one supplied value
#[derive(Debug, Clone)]
pub struct ValueRef<N> {
    /// The value node, borrowed from the tree for the current pass
    pub node: N,

    /// Row of the value's last character (0-based)
    pub end_row: usize,

    /// Column one past the value's last character
    pub end_col: usize,

    /// Verbatim value text
    pub text: String,
}

/// One parenthesized value list
pub type Row<N> = Vec<ValueRef<N>>;

/// Structure of one insert statement
#[derive(Debug, Clone)]
pub struct InsertInfo<N> {
    /// Qualifier of the target table
    pub schema: Option<String>,

    /// Target table name
    pub table_name: Option<String>,

    /// Declared column names, in declaration order
    pub columns: Vec<String>,

    /// Value lists, in source order
    pub rows: Vec<Row<N>>,
}

impl<N> Default for InsertInfo<N> {
    fn default() -> Self {
        Self {
            schema: None,
            table_name: None,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// Reason an insert statement cannot carry hints
///
/// Rejections are expected for partial or column-less statements and are
/// only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InsertRejection {
    /// No object reference naming the table
    #[error("insert statement has no table name")]
    MissingTable,

    /// No column-list clause, or one without any column names
    #[error("insert statement declares no columns")]
    NoColumns,

    /// No value lists
    #[error("insert statement has no value rows")]
    NoRows,
}

impl<N: SyntaxNode> InsertInfo<N> {
    /// Build the structure of an insert statement node
    ///
    /// # Returns
    ///
    /// - `Ok(InsertInfo)` - A renderable insert
    /// - `Err(InsertRejection)` - Table, columns or rows are missing
    pub fn from_node(insert: &N) -> Result<Self, InsertRejection> {
        let children = insert.children();
        let mut info = InsertInfo::default();

        // Pass 1: table identity, locked on the first reference
        if let Some(object_ref) = children.iter().find(|c| c.kind() == OBJECT_REFERENCE) {
            info.schema = field_text(object_ref, "schema");
            info.table_name = field_text(object_ref, "name");
        }

        // Pass 2: column list, then rows
        let mut seen_object_ref = false;
        let mut columns_captured = false;

        for child in &children {
            match child.kind() {
                OBJECT_REFERENCE => seen_object_ref = true,
                LIST if seen_object_ref && !columns_captured => {
                    let columns = column_names(child);
                    if !columns.is_empty() {
                        info.columns = columns;
                        columns_captured = true;
                    }
                }
                LIST if columns_captured => info.rows.push(row_values(child)),
                _ => {}
            }
        }

        info.validate()?;
        Ok(info)
    }
}

impl<N> InsertInfo<N> {
    /// Check the renderability invariant
    pub fn validate(&self) -> Result<(), InsertRejection> {
        if self.table_name.is_none() {
            return Err(InsertRejection::MissingTable);
        }
        if self.columns.is_empty() {
            return Err(InsertRejection::NoColumns);
        }
        if self.rows.is_empty() {
            return Err(InsertRejection::NoRows);
        }
        Ok(())
    }

    /// Check if hints can be rendered for this insert
    pub fn is_renderable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get the table name qualified with its schema (e.g., "public.users")
    pub fn qualified_table(&self) -> Option<String> {
        let table = self.table_name.as_deref()?;
        Some(match self.schema.as_deref() {
            Some(schema) => format!("{}.{}", schema, table),
            None => table.to_string(),
        })
    }
}

fn field_text<N: SyntaxNode>(node: &N, field: &str) -> Option<String> {
    node.first_field(field)
        .and_then(|n| n.text().map(str::to_string))
        .filter(|text| !text.is_empty())
}

/// Collect column names from a column-list clause
fn column_names<N: SyntaxNode>(list: &N) -> Vec<String> {
    list.children()
        .iter()
        .filter(|child| child.kind() == COLUMN)
        .filter_map(|column| {
            let identifier = column
                .named_children()
                .into_iter()
                .find(|c| c.kind() == IDENTIFIER);

            // Some grammar builds inline the identifier into the column node
            match identifier {
                Some(identifier) => identifier.text().map(str::to_string),
                None => column.text().map(str::to_string),
            }
        })
        .collect()
}

/// Collect the value positions of one value list
fn row_values<N: SyntaxNode>(list: &N) -> Row<N> {
    list.named_children()
        .into_iter()
        .filter(|child| {
            let is_value = !NON_VALUE_KINDS.contains(&child.kind());
            if !is_value {
                trace!("Skipping non-value node in value list: kind={}", child.kind());
            }
            is_value
        })
        .map(|node| {
            let range = node.range();
            let text = node.text().unwrap_or_default().to_string();
            ValueRef {
                node,
                end_row: range.end_row,
                end_col: range.end_col,
                text,
            }
        })
        .collect()
}
