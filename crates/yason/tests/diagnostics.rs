use yason::{ParseErrorKind, decode, from_str};

fn render(source: &str) -> String {
    let error = decode(source).unwrap_err();
    let rendered = error.render("config.yason", source);
    String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
}

#[test]
fn invalid_indent_report() {
    let rendered = render("servers:\n  - \"a\"\n   - \"b\"\n");
    assert!(rendered.contains("invalid indent"), "{rendered}");
    assert!(rendered.contains("config.yason"), "{rendered}");
    assert!(rendered.contains(r#"- "b""#), "{rendered}");
}

#[test]
fn unexpected_token_report() {
    let rendered = render("name: gateway\n");
    assert!(rendered.contains("unexpected token"), "{rendered}");
    assert!(rendered.contains("double quotes"), "{rendered}");
}

#[test]
fn syntax_error_names_node_and_state() {
    let error = decode("a:\nb: 1").unwrap_err();
    match error.kind {
        ParseErrorKind::Syntax { state, .. } => assert_eq!(state, "beforeNestedValue"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn error_display() {
    let error = decode("a: 1\nb: undefined").unwrap_err();
    insta::assert_snapshot!(error.to_string(), @r#"unexpected token near "undefined" at offset 8"#);
}

#[test]
fn data_error_render() {
    let error = from_str::<Vec<u8>>("a: 1").unwrap_err();
    let rendered = error.render("config.yason", "a: 1");
    assert!(rendered.starts_with("config.yason: "));
}
