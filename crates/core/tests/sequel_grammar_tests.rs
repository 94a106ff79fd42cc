// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Pipeline tests over real tree-sitter SQL trees

use sql_insert_hints_core::{
    Hint, HintState, InsertInfo, SourceLines, SyntaxNode, TsNode, collect_hints,
    find_insert_statements, run_pass,
};
use sql_insert_hints_grammar::language;
use sql_insert_hints_test_utils::SqlFixtures;
use tree_sitter::{Parser, Tree};

fn parse(source: &str) -> Tree {
    let mut parser = Parser::new();
    parser
        .set_language(language())
        .expect("Failed to set language");
    parser.parse(source, None).expect("Failed to parse")
}

fn hints(source: &str) -> Vec<Hint> {
    let tree = parse(source);
    collect_hints(&TsNode::root(&tree, source), &SourceLines::new(source))
}

fn col_after(line: &str, needle: &str) -> usize {
    line.find(needle).expect("needle not found") + needle.len()
}

#[test]
fn test_simple_insert() {
    let source = SqlFixtures::simple_insert();
    let hints = hints(source);

    assert_eq!(hints.len(), 2);

    assert_eq!(hints[0].label, " ;;id;; ");
    assert_eq!(hints[0].row, 0);
    assert_eq!(hints[0].col, col_after(source, "(1,"));

    assert_eq!(hints[1].label, " ;;name;; ");
    assert_eq!(hints[1].col, col_after(source, "'bob'"));
}

#[test]
fn test_multi_row_insert() {
    let source = SqlFixtures::multi_row_insert();
    let hints = hints(source);

    let placed: Vec<(usize, &str)> = hints.iter().map(|h| (h.col, h.label.as_str())).collect();

    assert_eq!(
        placed,
        vec![
            (col_after(source, "(1,"), " ;;a;; "),
            (col_after(source, "(1,2"), " ;;b;; "),
            (col_after(source, "(3,"), " ;;a;; "),
            (col_after(source, "(3,4"), " ;;b;; "),
        ]
    );
}

#[test]
fn test_insert_without_columns_has_no_hints() {
    assert!(hints(SqlFixtures::insert_without_columns()).is_empty());
}

#[test]
fn test_schema_qualified_insert() {
    let source = SqlFixtures::schema_qualified_insert();
    let tree = parse(source);
    let root = TsNode::root(&tree, source);

    let inserts = find_insert_statements(&root);
    assert_eq!(inserts.len(), 1);

    let info = InsertInfo::from_node(&inserts[0]).expect("insert should be renderable");
    assert_eq!(info.schema.as_deref(), Some("public"));
    assert_eq!(info.table_name.as_deref(), Some("users"));
    assert_eq!(info.columns, vec!["id"]);

    let hints = collect_hints(&root, &SourceLines::new(source));
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].label, " ;;id;; ");
    assert_eq!(hints[0].col, col_after(source, "nextval('seq')"));
    assert_eq!(hints[0].target, "public.users");
}

#[test]
fn test_surplus_columns_and_values() {
    assert_eq!(hints(SqlFixtures::surplus_columns()).len(), 2);

    let surplus_values = hints(SqlFixtures::surplus_values());
    assert_eq!(surplus_values.len(), 1);
    assert_eq!(surplus_values[0].label, " ;;id;; ");
}

#[test]
fn test_multi_line_insert() {
    let source = SqlFixtures::multi_line_insert();
    let hints = hints(source);

    let placed: Vec<(usize, usize, &str)> = hints
        .iter()
        .map(|h| (h.row, h.col, h.label.as_str()))
        .collect();

    assert_eq!(
        placed,
        vec![
            (2, 4, " ;;id;; "),
            (3, 8, " ;;name;; "),
            (4, 6, " ;;active;; "),
        ]
    );
}

#[test]
fn test_whitespace_before_comma() {
    let source = SqlFixtures::spaced_commas();
    let hints = hints(source);

    assert_eq!(hints.len(), 2);
    assert_eq!(hints[0].col, col_after(source, "(1 \t,"));
    assert_eq!(hints[1].col, col_after(source, ", 2"));
}

#[test]
fn test_mixed_script() {
    let source = SqlFixtures::mixed_script();
    let hints = hints(source);

    let rows: Vec<usize> = hints.iter().map(|h| h.row).collect();
    assert_eq!(rows, vec![1, 1, 3, 3]);
}

#[test]
fn test_unicode_columns_are_bytes() {
    let source = SqlFixtures::unicode_insert();
    let hints = hints(source);

    assert_eq!(hints.len(), 2);
    assert_eq!(hints[0].col, col_after(source, "'héllo wörld',"));
    assert_eq!(hints[1].col, col_after(source, "7"));
}

#[test]
fn test_no_inserts() {
    assert!(hints(SqlFixtures::no_inserts()).is_empty());
    assert!(hints("").is_empty());
}

#[test]
fn test_pass_is_idempotent() {
    let source = SqlFixtures::mixed_script();
    let tree = parse(source);
    let root = TsNode::root(&tree, source);
    let lines = SourceLines::new(source);

    let first = run_pass(HintState::Enabled, &root, &lines);
    let second = run_pass(HintState::Enabled, &root, &lines);

    assert_eq!(first, second);
    assert!(run_pass(HintState::Disabled, &root, &lines).is_empty());
}

#[test]
fn test_tree_over_shorter_text_reads_no_text_past_the_end() {
    let parsed = "INSERT INTO users (id, name, email) VALUES (1, 'alice', 'a@example.com');";
    let current = "INSERT INTO t (a) VALUES (1);";
    let tree = parse(parsed);
    let root = TsNode::root(&tree, current);

    let inserts = find_insert_statements(&root);
    assert_eq!(inserts.len(), 1);

    let email = parsed.find("email").unwrap();
    assert!(email >= current.len());
    let out_of_text = inserts[0]
        .named_children()
        .into_iter()
        .find(|node| node.text().is_none());
    assert!(out_of_text.is_some());

    // A pass over mismatched text completes rather than slicing out of bounds
    let _ = collect_hints(&root, &SourceLines::new(current));
}

#[test]
fn test_text_ending_inside_a_character_is_none() {
    let parsed = "INSERT INTO t (a) VALUES ('abc');";
    let current = "INSERT INTO t (a) VALUES ('é😀');";
    let tree = parse(parsed);
    let root = TsNode::root(&tree, current);

    let inserts = find_insert_statements(&root);
    let values = inserts[0]
        .named_children()
        .into_iter()
        .filter(|node| node.kind() == "list")
        .last()
        .expect("value list");
    let value = values.named_children().into_iter().next().expect("value");

    // The value ends at byte 31, inside the four-byte emoji
    assert_eq!(value.range().end_col, 31);
    assert!(!current.is_char_boundary(31));
    assert!(value.text().is_none());

    let _ = collect_hints(&root, &SourceLines::new(current));
}

#[test]
fn test_comments_between_values_take_no_column() {
    let source = "INSERT INTO t (a, b) VALUES (1, /* c */ 2);";
    let hints = hints(source);

    let placed: Vec<(usize, &str)> = hints.iter().map(|h| (h.col, h.label.as_str())).collect();
    assert_eq!(
        placed,
        vec![
            (col_after(source, "(1,"), " ;;a;; "),
            (col_after(source, "*/ 2"), " ;;b;; "),
        ]
    );

    let source = "INSERT INTO t (a, b) VALUES\n  (1, -- first\n   2);";
    let hints = self::hints(source);

    assert_eq!(hints.len(), 2);
    assert_eq!((hints[0].row, hints[0].col), (1, col_after("  (1, -- first", "(1,")));
    assert_eq!((hints[1].row, hints[1].col), (2, col_after("   2);", "2")));
}
