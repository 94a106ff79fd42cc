// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Grammar API integration tests
//!
//! Checks that the SQL grammar loads and produces the node shapes the insert
//! hint pipeline relies on.

use sql_insert_hints_grammar::{DEFAULT_LANGUAGE_IDS, language, language_for_language_id};
use tree_sitter::{Node, Parser};

fn parse(source: &str) -> tree_sitter::Tree {
    let mut parser = Parser::new();
    parser
        .set_language(language())
        .expect("Failed to set language");
    parser.parse(source, None).expect("Failed to parse")
}

fn find_first<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    if node.kind() == kind {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_first(child, kind) {
            return Some(found);
        }
    }

    None
}

#[test]
fn test_language_for_every_default_id() {
    for id in DEFAULT_LANGUAGE_IDS {
        assert!(
            language_for_language_id(id, DEFAULT_LANGUAGE_IDS).is_some(),
            "Expected language for {}",
            id
        );
    }
}

#[test]
fn test_language_for_unknown_id() {
    assert!(language_for_language_id("markdown", DEFAULT_LANGUAGE_IDS).is_none());
}

#[test]
fn test_parse_simple_insert() {
    let tree = parse("INSERT INTO users (id, name) VALUES (1, 'bob');");

    assert!(!tree.root_node().has_error());
    assert!(find_first(tree.root_node(), "insert").is_some());
}

#[test]
fn test_insert_has_object_reference_with_name_field() {
    let source = "INSERT INTO public.users (id) VALUES (1);";
    let tree = parse(source);

    let object_ref =
        find_first(tree.root_node(), "object_reference").expect("object_reference not found");
    let name = object_ref
        .child_by_field_name("name")
        .expect("name field not found");
    let schema = object_ref
        .child_by_field_name("schema")
        .expect("schema field not found");

    assert_eq!(name.utf8_text(source.as_bytes()).unwrap(), "users");
    assert_eq!(schema.utf8_text(source.as_bytes()).unwrap(), "public");
}

#[test]
fn test_parse_multiple_statements() {
    let tree = parse(
        "CREATE TABLE t (a INT);\nINSERT INTO t (a) VALUES (1);\nSELECT a FROM t;",
    );

    assert!(!tree.root_node().has_error());
}
