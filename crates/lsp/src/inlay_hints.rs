// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Inlay Hints
//!
//! Renders insert hints as LSP inlay hints.
//!
//! Hint anchors come out of the core as tree-sitter byte columns. LSP
//! positions count UTF-16 code units, so each column is re-measured against
//! its line before it is sent.

use sql_insert_hints_core::{Hint, SourceLines, TsNode, run_pass};
use tower_lsp::lsp_types::{InlayHint, InlayHintLabel, InlayHintTooltip, Position, Range};
use tracing::debug;

use crate::config::HintConfig;
use crate::document::Document;

/// Compute the inlay hints of a document
///
/// Returns `None` when the document has no tree. A disabled config yields an
/// empty list, which clears any hints the client still shows.
pub fn document_inlay_hints(
    document: &Document,
    range: Range,
    config: &HintConfig,
) -> Option<Vec<InlayHint>> {
    let tree = document.tree()?;
    let text = document.get_content();

    let hints = compute_inlay_hints(tree, &text, range, config);
    debug!(
        "Computed {} inlay hints: uri={}, version={}",
        hints.len(),
        document.uri(),
        document.version()
    );

    Some(hints)
}

/// Compute inlay hints from a tree and the text it was parsed from
pub fn compute_inlay_hints(
    tree: &tree_sitter::Tree,
    text: &str,
    range: Range,
    config: &HintConfig,
) -> Vec<InlayHint> {
    let lines = SourceLines::new(text);
    let root = TsNode::root(tree, text);

    run_pass(config.state(), &root, &lines)
        .into_iter()
        .filter(|hint| in_range(hint, range))
        .map(|hint| to_inlay_hint(&hint, &lines, config))
        .collect()
}

/// Convert one hint to an LSP inlay hint
pub fn to_inlay_hint(hint: &Hint, lines: &SourceLines<'_>, config: &HintConfig) -> InlayHint {
    let line = lines.get(hint.row).unwrap_or("");

    let tooltip = config
        .tooltip
        .then(|| InlayHintTooltip::String(tooltip_text(hint)));

    InlayHint {
        position: Position::new(hint.row as u32, utf16_column(line, hint.col) as u32),
        label: InlayHintLabel::String(hint.label.clone()),
        kind: config.kind.inlay_hint_kind(),
        text_edits: None,
        tooltip,
        padding_left: None,
        padding_right: None,
        data: None,
    }
}

/// Convert a byte column within a line to UTF-16 code units
///
/// Columns past the end of the line clamp to the line end; columns inside a
/// character round down to its start.
pub fn utf16_column(line: &str, byte_col: usize) -> usize {
    let mut end = byte_col.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }

    line[..end].encode_utf16().count()
}

fn tooltip_text(hint: &Hint) -> String {
    if hint.target.is_empty() {
        hint.column.clone()
    } else {
        format!("{}.{}", hint.target, hint.column)
    }
}

fn in_range(hint: &Hint, range: Range) -> bool {
    let row = hint.row as u32;
    row >= range.start.line && row <= range.end.line
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::InlayHintKind;

    fn parse(text: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(sql_insert_hints_grammar::language()).unwrap();
        parser.parse(text, None).unwrap()
    }

    fn whole(text: &str) -> Range {
        Range::new(Position::new(0, 0), Position::new(text.lines().count() as u32, 0))
    }

    fn tooltip(hint: &InlayHint) -> Option<&str> {
        match &hint.tooltip {
            Some(InlayHintTooltip::String(text)) => Some(text),
            _ => None,
        }
    }

    fn label(hint: &InlayHint) -> &str {
        match &hint.label {
            InlayHintLabel::String(label) => label,
            InlayHintLabel::LabelParts(_) => panic!("expected a plain label"),
        }
    }

    #[test]
    fn test_utf16_column() {
        assert_eq!(utf16_column("abc", 2), 2);
        assert_eq!(utf16_column("abc", 10), 3);
        // "é" is two bytes and one UTF-16 unit
        assert_eq!(utf16_column("é,x", 3), 2);
        // "😀" is four bytes and two UTF-16 units
        assert_eq!(utf16_column("😀,", 5), 3);
        assert_eq!(utf16_column("😀,", 2), 0);
    }

    #[test]
    fn test_compute_inlay_hints_simple() {
        let text = "INSERT INTO users (id, name) VALUES (1, 'bob');";
        let tree = parse(text);

        let hints = compute_inlay_hints(&tree, text, whole(text), &HintConfig::default());

        assert_eq!(hints.len(), 2);
        assert_eq!(label(&hints[0]), " ;;id;; ");
        assert_eq!(hints[0].position, Position::new(0, 39));
        assert_eq!(label(&hints[1]), " ;;name;; ");
        assert_eq!(hints[1].position, Position::new(0, 45));
        assert_eq!(hints[0].kind, Some(InlayHintKind::PARAMETER));
        assert_eq!(tooltip(&hints[1]), Some("users.name"));
        assert!(hints[0].padding_left.is_none());
        assert!(hints[0].padding_right.is_none());
    }

    #[test]
    fn test_compute_inlay_hints_utf16_positions() {
        let text = "INSERT INTO notes (title, id) VALUES ('😀', 7);";
        let tree = parse(text);

        let hints = compute_inlay_hints(&tree, text, whole(text), &HintConfig::default());

        assert_eq!(hints.len(), 2);
        let byte_col = text.find("',").unwrap() + 2;
        let utf16_col = text[..byte_col].encode_utf16().count() as u32;
        assert_eq!(hints[0].position, Position::new(0, utf16_col));
        assert_eq!(utf16_col as usize, byte_col - 2);
    }

    #[test]
    fn test_compute_inlay_hints_range_filter() {
        let text = "INSERT INTO t (a) VALUES (1);\nSELECT 1;\nINSERT INTO t (a) VALUES (2);";
        let tree = parse(text);

        let first_line = Range::new(Position::new(0, 0), Position::new(0, 29));
        let hints = compute_inlay_hints(&tree, text, first_line, &HintConfig::default());

        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].position.line, 0);

        let all = compute_inlay_hints(&tree, text, whole(text), &HintConfig::default());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_compute_inlay_hints_config() {
        let text = "INSERT INTO public.users (id) VALUES (1);";
        let tree = parse(text);

        let config = HintConfig {
            kind: crate::config::HintStyle::Type,
            tooltip: false,
            ..HintConfig::default()
        };
        let hints = compute_inlay_hints(&tree, text, whole(text), &config);

        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].kind, Some(InlayHintKind::TYPE));
        assert!(hints[0].tooltip.is_none());

        let tooltips = compute_inlay_hints(&tree, text, whole(text), &HintConfig::default());
        assert_eq!(tooltip(&tooltips[0]), Some("public.users.id"));
    }

    #[test]
    fn test_compute_inlay_hints_disabled() {
        let text = "INSERT INTO t (a) VALUES (1);";
        let tree = parse(text);

        let config = HintConfig {
            enabled: false,
            ..HintConfig::default()
        };

        assert!(compute_inlay_hints(&tree, text, whole(text), &config).is_empty());
    }
}
