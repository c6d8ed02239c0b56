//! Integration tests for template expansion.

use serde_json::json;
use treepath::document::Value;
use treepath::path::parse_path;
use std::collections::HashMap;
use treepath::template::{apply_template, Bindings};
use treepath::tree::get_path;

#[test]
fn test_escaped_bracket_name() {
    let mut calls = Vec::new();
    let output = apply_template("\"$($)$$$))\"", |name| {
        calls.push(name.to_string());
        if name == ")$)" {
            "D".to_string()
        } else {
            String::new()
        }
    });
    assert_eq!(output, "\"D\"");
    assert_eq!(calls, vec![")$)"]);
}

#[test]
fn test_resolve_names_as_paths() {
    let doc = Value::from(json!({"user": {"name": "Ada", "langs": ["rust", "ml"]}}));
    let output = apply_template("$(user.name) likes $(user.langs[0]), not $(user.age)!", |name| {
        parse_path(name)
            .and_then(|path| get_path(&doc, path.as_slice()).map(Value::to_string))
            .unwrap_or_else(|| "?".to_string())
    });
    assert_eq!(output, "Ada likes rust, not ?!");
}

#[test]
fn test_no_calls_without_placeholders() {
    let mut called = false;
    let output = apply_template("price: $$10, $(open", |_| {
        called = true;
        String::new()
    });
    assert_eq!(output, "price: $10, $(open");
    assert!(!called);
}

#[test]
fn test_bindings_prefer_vars_over_document() {
    let doc = Value::from(json!({"name": "doc", "user": {"langs": ["rust"]}, "n": 3}));
    let vars = HashMap::from([("name".to_string(), "var".to_string())]);
    let bindings = Bindings::new(&vars, Some(&doc));

    assert_eq!(bindings.lookup("name").as_deref(), Some("var"));
    assert_eq!(bindings.lookup("user.langs[0]").as_deref(), Some("rust"));
    assert_eq!(bindings.lookup("user.langs").as_deref(), Some(r#"["rust"]"#));
    assert_eq!(bindings.lookup("user.age"), None);
    assert_eq!(bindings.lookup(".bad"), None);
    assert_eq!(
        bindings.expand("$name/$(user.langs[0])/$n/$(missing)!"),
        "var/rust/3/!"
    );
}

#[test]
fn test_bindings_without_document() {
    let vars = HashMap::new();
    let bindings = Bindings::new(&vars, None);
    assert_eq!(bindings.lookup("a"), None);
    assert_eq!(bindings.expand("[$a]"), "[]");
}
