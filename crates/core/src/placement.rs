// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Hint placement
//!
//! A hint for a value followed by a comma is anchored after the comma, so
//! `1,` is never split in two. Any other value keeps its hint right after its
//! last character.

use std::borrow::Cow;

/// Resolved anchor of a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Anchor {
    /// Row (0-based)
    pub row: usize,

    /// Byte column within the row
    pub col: usize,
}

/// Access to the lines of a document
pub trait LineSource {
    /// Get a line without its line ending, or `None` past the end
    fn line(&self, row: usize) -> Option<Cow<'_, str>>;
}

/// Lines of an in-memory document
///
/// Splits on `\n` only (the same line breaks tree-sitter counts) and strips a
/// trailing `\r`.
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceLines<'a> {
    /// Split a document into lines
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Self { lines }
    }

    /// Get the number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line as a plain string slice
    pub fn get(&self, row: usize) -> Option<&'a str> {
        self.lines.get(row).copied()
    }
}

impl LineSource for SourceLines<'_> {
    fn line(&self, row: usize) -> Option<Cow<'_, str>> {
        self.get(row).map(Cow::Borrowed)
    }
}

impl<L: LineSource + ?Sized> LineSource for &L {
    fn line(&self, row: usize) -> Option<Cow<'_, str>> {
        (**self).line(row)
    }
}

/// Resolve where the hint for a value ending at (`end_row`, `end_col`) goes
///
/// Skips spaces and tabs after the value. If the next character is a comma
/// the anchor is placed right after it; otherwise (another character, or the
/// end of the line) the anchor stays at `end_col`.
pub fn resolve_anchor(line: &str, end_row: usize, end_col: usize) -> Anchor {
    let bytes = line.as_bytes();
    let mut idx = end_col;

    while idx < bytes.len() && matches!(bytes[idx], b' ' | b'\t') {
        idx += 1;
    }

    let col = if bytes.get(idx) == Some(&b',') {
        idx + 1
    } else {
        end_col
    };

    Anchor { row: end_row, col }
}

/// Resolve an anchor, fetching the line from a [`LineSource`]
///
/// A missing line is treated as empty.
pub fn resolve_anchor_in<L: LineSource + ?Sized>(lines: &L, end_row: usize, end_col: usize) -> Anchor {
    let line = lines.line(end_row).unwrap_or_default();
    resolve_anchor(&line, end_row, end_col)
}
