use serde_json::json;
use yason_tokenizer::tokenize;

use crate::*;

fn parse_str(source: &str) -> Result<Tree, ParseError> {
    let tokens = tokenize(source)?;
    parse(&tokens)
}

fn tree(source: &str) -> Tree {
    let tree = parse_str(source).unwrap_or_else(|e| panic!("{source:?}: {e}"));
    assert_eq!(tree.to_source(), source, "source should round-trip");
    tree
}

fn error(source: &str) -> ParseErrorKind {
    match parse_str(source) {
        Ok(tree) => panic!("{source:?} parsed as {:?}", tree.to_data()),
        Err(e) => e.kind,
    }
}

fn map_ast(ast: &DocumentAst) -> &MapAst {
    match &ast.value {
        NodeAst::Map(map) => map,
        other => panic!("expected a map, got {other:?}"),
    }
}

fn list_ast(node: &NodeAst) -> &ListAst {
    match node {
        NodeAst::List(list) => list,
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn test_scalar_documents() {
    assert_eq!(tree("true").to_data(), json!(true));
    assert_eq!(tree("null\n").to_data(), json!(null));
    assert_eq!(tree("-3.142").to_data(), json!(-3.142));
    assert_eq!(tree("\"Hello World\"").to_data(), json!("Hello World"));
}

#[test]
fn test_scalar_document_whitespace() {
    let tree = tree("# greeting\n\n\"hi\" # trailing\n");
    assert_eq!(tree.to_data(), json!("hi"));
    assert_eq!(tree.whitespace().after, " # trailing\n");
    let ast = tree.to_ast();
    let NodeAst::Value(value) = &ast.value else {
        panic!("expected a value");
    };
    assert_eq!(value.whitespace.before, "# greeting\n\n");
    assert_eq!(value.raw, "\"hi\"");
}

#[test]
fn test_flat_map() {
    let tree = tree("foo: null\nbar: \"Hello World\"\n\"zig zag\" :3.142\nzip: true");
    assert_eq!(
        tree.to_data(),
        json!({ "foo": null, "bar": "Hello World", "zig zag": 3.142, "zip": true })
    );
    assert_eq!(tree.indent(), None);
}

#[test]
fn test_map_whitespace_ownership() {
    let source = "# Before document\nfoo: null\nbar: \"Hello World\" # Inline comment\n\n# Section comment\n\"zig zag\" :3.142 # Final inline comment\n# After document\n";
    let ast = tree(source).to_ast();
    let map = map_ast(&ast);
    assert_eq!(map.whitespace.before, "# Before document\n");
    assert_eq!(map.whitespace.after, "\n# After document\n");
    assert!(ast.whitespace.is_empty());

    let [foo, bar, zig] = &map.items[..] else {
        panic!("expected three items");
    };
    assert_eq!(foo.whitespace.before, "");
    assert_eq!(foo.whitespace.after, "");
    assert_eq!(bar.whitespace.before, "\n");
    assert_eq!(bar.whitespace.after, " # Inline comment");
    assert_eq!(zig.whitespace.before, "\n\n# Section comment\n");
    assert_eq!(zig.whitespace.after, " # Final inline comment");

    assert!(zig.key.whitespace.inner == " " && !zig.key.symbol);
    assert_eq!(zig.key.value, "zig zag");
    let NodeAst::Value(value) = &zig.value else {
        panic!("expected a value");
    };
    assert!(value.whitespace.is_empty());
    let NodeAst::Value(value) = &foo.value else {
        panic!("expected a value");
    };
    assert_eq!(value.whitespace.before, " ");
}

#[test]
fn test_flat_list() {
    let tree = tree("- \"Hello \\\"World\\\"\"\n- 123\n\n- null");
    assert_eq!(tree.to_data(), json!(["Hello \"World\"", 123, null]));

    let ast = tree.to_ast();
    let list = list_ast(&ast.value);
    let befores: Vec<&str> = list
        .items
        .iter()
        .map(|item| item.whitespace.before.as_str())
        .collect();
    assert_eq!(befores, ["", "\n", "\n\n"]);
    assert!(list.items.iter().all(|item| item.whitespace.inner == " "));
}

#[test]
fn test_list_whitespace_ownership() {
    let source = "# Before document\n- -3.142 # Inline comment\n\n# Section comment\n- false\n-  null# Final item comment\n# After document";
    let tree = tree(source);
    assert_eq!(tree.to_data(), json!([-3.142, false, null]));

    let ast = tree.to_ast();
    let list = list_ast(&ast.value);
    assert_eq!(list.whitespace.before, "# Before document\n");
    assert_eq!(list.whitespace.after, "\n# After document");

    let [first, second, third] = &list.items[..] else {
        panic!("expected three items");
    };
    assert_eq!(first.whitespace.after, " # Inline comment");
    assert_eq!(second.whitespace.before, "\n\n# Section comment\n");
    assert_eq!(third.whitespace.before, "\n");
    assert_eq!(third.whitespace.inner, "  ");
    assert_eq!(third.whitespace.after, "# Final item comment");
}

#[test]
fn test_nested_maps() {
    let tree = tree("bar:\n  zim:\n    gir: 123");
    assert_eq!(tree.to_data(), json!({ "bar": { "zim": { "gir": 123 } } }));
    assert_eq!(tree.indent(), Some("  "));
}

#[test]
fn test_tab_indentation() {
    let tree = tree("foo: \"Hello\"\nbar:\n\tzim:\n\t\tgir: 123\n\t\tzig: 1E5\nzip: true");
    assert_eq!(
        tree.to_data(),
        json!({
            "foo": "Hello",
            "bar": { "zim": { "gir": 123, "zig": 100000.0 } },
            "zip": true
        })
    );
    assert_eq!(tree.indent(), Some("\t"));
}

#[test]
fn test_map_in_list() {
    let source = "- \"Hi\"\n-\n  # Map comment\n  foo: 1\n  bar: 2\n- \"Hey\"";
    let tree = tree(source);
    assert_eq!(tree.to_data(), json!(["Hi", { "foo": 1, "bar": 2 }, "Hey"]));

    let ast = tree.to_ast();
    let list = list_ast(&ast.value);
    let NodeAst::Map(map) = &list.items[1].value else {
        panic!("expected a nested map");
    };
    assert_eq!(map.whitespace.before, "\n  # Map comment\n  ");
    assert_eq!(map.items[1].whitespace.before, "\n  ");
    assert!(map.whitespace.after.is_empty());
    assert!(list.items[1].whitespace.inner.is_empty());
}

#[test]
fn test_list_in_map() {
    let source = "hosts: # all of them\n  - \"alpha\"\n  -\n    - 1\n    - 2\nport: 80\n";
    let tree = tree(source);
    assert_eq!(
        tree.to_data(),
        json!({ "hosts": ["alpha", [1, 2]], "port": 80 })
    );

    let ast = tree.to_ast();
    let map = map_ast(&ast);
    assert_eq!(map.items[0].key.whitespace.after, " # all of them");
    assert_eq!(map.whitespace.after, "\n");
}

#[test]
fn test_dedent_closes_several_levels() {
    let tree = tree("a:\n  b:\n    c:\n      - 1\nd: 2");
    let expected = json!({ "a": { "b": { "c": [1] } }, "d": 2 });
    assert_eq!(tree.to_data(), expected);
}

#[test]
fn test_blank_lines_before_nested_value() {
    let source = "a:\n\n  # about b\n\n  b: 1";
    let tree = tree(source);
    assert_eq!(tree.to_data(), json!({ "a": { "b": 1 } }));

    let ast = tree.to_ast();
    let NodeAst::Map(inner) = &map_ast(&ast).items[0].value else {
        panic!("expected a nested map");
    };
    assert_eq!(inner.whitespace.before, "\n\n  # about b\n\n  ");
}

#[test]
fn test_comment_at_end_of_nested_block() {
    let source = "a:\n  b: 1\n  # end of a\nc: 2\n# end\n";
    let tree = tree(source);
    assert_eq!(tree.to_data(), json!({ "a": { "b": 1 }, "c": 2 }));

    let ast = tree.to_ast();
    let map = map_ast(&ast);
    let NodeAst::Map(inner) = &map.items[0].value else {
        panic!("expected a nested map");
    };
    assert_eq!(inner.whitespace.after, "\n  # end of a");
    assert_eq!(map.items[0].whitespace.after, "");
    assert_eq!(map.items[1].whitespace.before, "\n");
    assert_eq!(map.whitespace.after, "\n# end\n");
}

#[test]
fn test_duplicate_keys_keep_first_position() {
    let tree = tree("a: 1\nb: 2\na: 3");
    assert_eq!(
        serde_json::to_string(&tree.to_data()).unwrap(),
        r#"{"a":3,"b":2}"#
    );
    assert_eq!(map_ast(&tree.to_ast()).items.len(), 3);
}

#[test]
fn test_crlf_line_breaks() {
    let tree = tree("a:\r\n  b: 1 # one\r\n  c: 2\r\n");
    assert_eq!(tree.to_data(), json!({ "a": { "b": 1, "c": 2 } }));
}

#[test]
fn test_ast_serialization() {
    let ast = tree("foo: null\n\"zig zag\": \"Hello World\"").to_ast();
    assert_eq!(
        serde_json::to_value(&ast).unwrap(),
        json!({
            "whitespace": {},
            "value": {
                "type": "Map",
                "whitespace": {},
                "items": [
                    {
                        "whitespace": {},
                        "key": { "whitespace": {}, "symbol": true, "value": "foo", "raw": "foo" },
                        "value": { "type": "Value", "whitespace": { "before": " " }, "value": null, "raw": "null" }
                    },
                    {
                        "whitespace": { "before": "\n" },
                        "key": { "whitespace": {}, "symbol": false, "value": "zig zag", "raw": "\"zig zag\"" },
                        "value": { "type": "Value", "whitespace": { "before": " " }, "value": "Hello World", "raw": "\"Hello World\"" }
                    }
                ]
            }
        })
    );
}

#[test]
fn test_nested_arena_nodes() {
    let tree = tree("a:\n  - 1");
    let Slot::Nested(map) = tree.root() else {
        panic!("expected a nested root");
    };
    let Node::Map(map) = tree.node(*map) else {
        panic!("expected a map");
    };
    assert_eq!(map.nesting, 0);
    let Slot::Nested(list) = &map.items[0].value else {
        panic!("expected a nested list");
    };
    assert_eq!(tree.node(*list).kind(), NodeKind::List);
    assert_eq!(tree.node(*list).nesting(), 1);
}

#[test]
fn test_invalid_indent() {
    assert_eq!(
        error("- 1\n   - 2"),
        ParseErrorKind::InvalidIndent {
            found: "   ".into()
        }
    );
    assert_eq!(
        error("a:\n  b: 1\n    c: 2"),
        ParseErrorKind::InvalidIndent {
            found: "    ".into()
        }
    );
    assert_eq!(
        error("a:\n  b: 1\n c: 2"),
        ParseErrorKind::InvalidIndent { found: " ".into() }
    );
}

#[test]
fn test_mixed_indent_characters() {
    assert_eq!(
        error("a:\n \tb: 1"),
        ParseErrorKind::InvalidIndent {
            found: " \t".into()
        }
    );
    assert_eq!(
        error("a:\n\tb: 1\nc:\n  d: 2"),
        ParseErrorKind::InvalidIndent { found: "  ".into() }
    );
}

#[test]
fn test_missing_value() {
    assert_eq!(
        error("foo:"),
        ParseErrorKind::UnexpectedEndOfDocument {
            node: NodeKind::Map,
            state: "beforeValue",
        }
    );
    assert!(matches!(
        error("a:\nb: 1"),
        ParseErrorKind::Syntax {
            node: NodeKind::Map,
            state: "beforeNestedValue",
            ..
        }
    ));
}

#[test]
fn test_empty_documents() {
    for source in ["", "\n", "# only a comment\n"] {
        assert!(
            matches!(
                error(source),
                ParseErrorKind::UnexpectedEndOfDocument {
                    node: NodeKind::Document,
                    ..
                }
            ),
            "{source:?}"
        );
    }
}

#[test]
fn test_trailing_garbage() {
    assert_eq!(
        error("foo: 1 2"),
        ParseErrorKind::Syntax {
            node: NodeKind::Map,
            state: "afterItem",
            found: r#"Padding " ", Number "2", End """#.into(),
        }
    );
    assert!(matches!(
        error("1\n2"),
        ParseErrorKind::Syntax {
            node: NodeKind::Document,
            ..
        }
    ));
}

#[test]
fn test_flow_punctuation_is_rejected() {
    assert!(matches!(error("[1, 2]"), ParseErrorKind::Syntax { .. }));
}

#[test]
fn test_tokenizer_errors_surface() {
    assert_eq!(
        error("foo: undefined"),
        ParseErrorKind::UnexpectedToken {
            near: "undefined".into()
        }
    );
}

#[test]
fn test_invalid_literal_location() {
    let source = "a: 1e999";
    let e = parse_str(source).unwrap_err();
    assert!(matches!(e.kind, ParseErrorKind::InvalidLiteral { .. }));
    assert_eq!(e.span.slice(source), "1e999");
}

#[test]
fn test_nesting_limit() {
    let tokens = tokenize("a:\n  b:\n    c: 1").unwrap();
    let options = ParseOptions { max_nesting: 1 };
    let e = parse_with(&tokens, &options).unwrap_err();
    assert_eq!(e.kind, ParseErrorKind::NestingTooDeep { limit: 1 });

    let options = ParseOptions { max_nesting: 2 };
    assert!(parse_with(&tokens, &options).is_ok());
}

#[test]
fn test_missing_end_token() {
    let tokens = tokenize("a: 1").unwrap();
    let e = parse(&tokens[..tokens.len() - 1]).unwrap_err();
    assert!(matches!(
        e.kind,
        ParseErrorKind::UnexpectedEndOfDocument { .. }
    ));
    assert!(!e.is_internal());
}

#[test]
fn test_syntax_error_display() {
    let e = parse_str("- 1\n-- 2").unwrap_err();
    insta::assert_snapshot!(e.to_string(), @r#"syntax error in list (beforeValue): found Dash "-", Padding " " at offset 5"#);
}
