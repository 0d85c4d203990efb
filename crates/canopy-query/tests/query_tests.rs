//! Integration tests for querying rendered trees and extracting text.

use canopy_query::{QueryConfig, Rendered, SyntaxError, render};
use canopy_tree::{Element, RenderTree};

/// The welcome screen:
/// View > [Text, Text, Text, TextInput[value=asdf]]
fn welcome() -> Rendered<RenderTree> {
    render(RenderTree::from_element(
        Element::new("View")
            .child(Element::new("Text").text("Welcome to React Native!"))
            .child(Element::new("Text").text("To get started, edit index.ios.js"))
            .child(
                Element::new("Text")
                    .text("Press Cmd+R to reload,")
                    .text("\n")
                    .text("Cmd+D or shake for dev menu"),
            )
            .child(Element::new("TextInput").prop("value", "asdf")),
    ))
}

fn child(text: &str) -> Element {
    Element::new("Child").child(Element::new("Text").text(format!("Child {text}")))
}

/// Parent > [Text(Parent-4), Text(Parent-5), Child > Text(1), Child > Text(2), Child > Text(3)]
fn parent() -> Rendered<RenderTree> {
    render(RenderTree::from_element(
        Element::new("Parent")
            .child(Element::new("Text").text("Parent-4"))
            .child(Element::new("Text").text("Parent-5"))
            .children([child("1"), child("2"), child("3")]),
    ))
}

fn single(element: Element) -> Rendered<RenderTree> {
    render(RenderTree::from_element(element))
}

// Type names

#[test]
fn test_query_by_type_name() {
    let view = welcome();
    let input = view.query("TextInput").unwrap().unwrap();
    assert_eq!(input.type_name(), Some("TextInput"));
    assert_eq!(input.to_json().type_name(), Some("TextInput"));
}

#[test]
fn test_query_missing_type_is_none() {
    let view = welcome();
    assert!(view.query("Image").unwrap().is_none());
    assert!(view.query_all("Image").unwrap().is_empty());
}

#[test]
fn test_query_includes_root() {
    let view = single(Element::new("Text").prop("testID", "test").text("Yo"));
    let text = view.query("#test").unwrap().unwrap();
    assert_eq!(text, view.root());
}

// Attributes

#[test]
fn test_query_attribute_operators() {
    let view = welcome();
    for selector in [
        "[value]",
        "[value='asdf']",
        "[value|='asdf']",
        "[value^='as']",
        "[value$='df']",
        "[value*='sd']",
        "TextInput[value='asdf']",
    ] {
        let found = view.query(selector).unwrap();
        assert!(found.is_some(), "{selector}");
    }
    assert!(view.query("[value|='as']").unwrap().is_none());
}

#[test]
fn test_query_number_attributes_in_exponent_form() {
    let view = single(
        Element::new("View")
            .prop("big", 1e21)
            .prop("tiny", 1e-7)
            .prop("count", 3),
    );
    assert!(view.query("[big='1e+21']").unwrap().is_some());
    assert!(view.query("[big='1000000000000000000000']").unwrap().is_none());
    assert!(view.query("[tiny='1e-7']").unwrap().is_some());
    assert!(view.query("[count='3']").unwrap().is_some());
}

#[test]
fn test_query_dash_match_with_hyphen() {
    let view = single(Element::new("Text").prop("testID", "asdf-fdsa").text("Yo"));
    assert!(view.query("[testID|='asdf']").unwrap().is_some());
}

#[test]
fn test_query_multiple_attributes() {
    let view = single(Element::new("Text").prop("a", "asdf").prop("b", "fdsa").text("Yo"));
    assert!(view.query("[a$='df'][b*='ds']").unwrap().is_some());
    assert!(view.query("[a$='df'][c*='ds']").unwrap().is_none());
}

// Ids

#[test]
fn test_query_id_ignores_periods() {
    let view = single(Element::new("Text").prop("testID", "a.b").text("Yo"));
    assert!(view.query("#a.b").unwrap().is_some());
    assert!(view.query("#a").unwrap().is_none());
}

#[test]
fn test_query_id_with_configured_attribute() {
    let tree = RenderTree::from_element(Element::new("View").prop("nativeID", "main"));
    let view = Rendered::with_config(tree, QueryConfig::default().with_id_attribute("nativeID"));
    assert!(view.query("#main").unwrap().is_some());
}

// Selector lists

#[test]
fn test_query_all_union() {
    let view = single(
        Element::new("View")
            .child(Element::new("Text").prop("testID", "test").text("Yo"))
            .child(Element::new("TextInput")),
    );
    let found = view.query_all("#test, TextInput").unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].type_name(), Some("Text"));
    assert_eq!(found[1].type_name(), Some("TextInput"));
}

#[test]
fn test_query_all_union_does_not_duplicate() {
    let view = single(Element::new("View").child(Element::new("Text").prop("testID", "t")));
    assert_eq!(view.query_all("#t, Text").unwrap().len(), 1);
}

// Combinators

#[test]
fn test_child_query_returns_first_direct_child() {
    let view = parent();
    let text = view.query("Parent > Text").unwrap().unwrap();
    assert_eq!(text.to_json().type_name(), Some("Text"));
    assert_eq!(text.text(), "Parent-4");
}

#[test]
fn test_child_query_all_returns_direct_children_only() {
    let view = parent();
    let found = view.query_all("Parent > Text").unwrap();
    assert_eq!(found.len(), 2);

    let text: String = found.iter().map(|r| r.text()).collect();
    assert_eq!(text, "Parent-4Parent-5");
}

#[test]
fn test_descendant_query_returns_first_in_document_order() {
    let view = parent();
    let text = view.query("Parent Text").unwrap().unwrap();
    assert_eq!(text.text(), "Parent-4");
}

#[test]
fn test_descendant_query_all_returns_every_descendant() {
    let view = parent();
    let found = view.query_all("Parent Text").unwrap();
    assert_eq!(found.len(), 5);

    let texts: Vec<String> = found.iter().map(|r| r.text()).collect();
    assert_eq!(
        texts,
        vec!["Parent-4", "Parent-5", "Child 1", "Child 2", "Child 3"]
    );
}

#[test]
fn test_query_equals_first_of_query_all() {
    let view = parent();
    for selector in ["Parent Text", "Parent > Text", "Child > Text", "Text", "*"] {
        let first = view.query(selector).unwrap();
        let all = view.query_all(selector).unwrap();
        assert_eq!(first.as_ref(), all.first(), "{selector}");
    }
}

// Nested queries

#[test]
fn test_nested_query_is_scoped_to_subtree() {
    let view = parent();
    let second_child = view.query_all("Child").unwrap().remove(1);

    let texts = second_child.query_all("Text").unwrap();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text(), "Child 2");
}

#[test]
fn test_nested_query_ignores_ancestors_outside_scope() {
    let view = parent();
    let child = view.query("Child").unwrap().unwrap();

    // Parent is above the scope, so it cannot satisfy the combinator
    assert!(child.query("Parent Text").unwrap().is_none());
    assert!(child.query("Child > Text").unwrap().is_some());
}

#[test]
fn test_nested_result_ancestors_start_at_render_root() {
    let view = parent();
    let child = view.query("Child").unwrap().unwrap();
    let text = child.query("Text").unwrap().unwrap();

    assert_eq!(text.ancestors(), &[view.root().node(), child.node()]);
}

// Errors

#[test]
fn test_malformed_selector_is_an_error_not_empty() {
    let view = welcome();
    assert!(matches!(view.query(""), Err(SyntaxError::Empty)));
    assert!(matches!(
        view.query_all("[value"),
        Err(SyntaxError::UnterminatedAttribute { .. })
    ));
    let input = view.query("TextInput").unwrap().unwrap();
    assert!(input.query("A >").is_err());
}

// Text

#[test]
fn test_text_concatenates_across_nesting() {
    let view = single(
        Element::new("View")
            .child(Element::new("Text").text("H"))
            .child(Element::new("Text").text("e"))
            .child(Element::new("Text").text("l"))
            .child(Element::new("Text").text("l"))
            .child(Element::new("View").child(Element::new("Text").text("o"))),
    );
    assert_eq!(view.text(), "Hello");
}

#[test]
fn test_text_of_query_result() {
    let view = welcome();
    let texts = view.query_all("View > Text").unwrap();
    assert_eq!(texts[2].text(), "Press Cmd+R to reload,\nCmd+D or shake for dev menu");
    assert_eq!(view.query("TextInput").unwrap().unwrap().text(), "");
}

// Snapshots

#[test]
fn test_to_json_exposes_type_and_attributes() {
    let view = welcome();
    let input = view.query("TextInput").unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(input.to_json()).unwrap(),
        serde_json::json!({ "type": "TextInput", "props": { "value": "asdf" }, "children": [] })
    );
}
