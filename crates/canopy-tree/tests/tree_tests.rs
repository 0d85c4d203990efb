//! Tests for building render trees, the node adapter view, and snapshots.

use canopy_tree::{
    Element, FixtureError, Handler, NodeAdapter, NodeId, PropValue, RenderTree, Snapshot, snapshot,
};
use serde_json::json;

fn sample_tree() -> RenderTree {
    RenderTree::from_element(
        Element::new("View")
            .prop("testID", "root")
            .child(Element::new("Text").text("Hello"))
            .child(Element::new("TextInput").prop("value", "asdf").prop("maxLength", 8)),
    )
}

#[test]
fn test_from_element_preserves_document_order() {
    let tree = sample_tree();

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.type_name(NodeId::ROOT), Some("View"));

    let children = NodeAdapter::children(&tree, NodeId::ROOT);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.type_name(children[0]), Some("Text"));
    assert_eq!(tree.type_name(children[1]), Some("TextInput"));

    let text = NodeAdapter::children(&tree, children[0])[0];
    assert!(tree.is_text(text));
    assert_eq!(tree.text(text), Some("Hello"));
    assert_eq!(tree.type_name(text), None);
    assert_eq!(tree.parent(text), Some(children[0]));
}

#[test]
fn test_attribute_lookup() {
    let tree = sample_tree();
    let input = NodeAdapter::children(&tree, NodeId::ROOT)[1];

    assert_eq!(tree.attribute(input, "value"), Some(&PropValue::from("asdf")));
    assert_eq!(tree.attribute(input, "maxLength"), Some(&PropValue::Number(8.0)));
    assert_eq!(tree.attribute(input, "missing"), None);
}

#[test]
fn test_snapshot_shape() {
    let tree = sample_tree();
    let snap = snapshot(&tree, NodeId::ROOT);

    assert_eq!(snap.type_name(), Some("View"));
    assert_eq!(
        serde_json::to_value(&snap).unwrap(),
        json!({
            "type": "View",
            "props": { "testID": "root" },
            "children": [
                { "type": "Text", "props": {}, "children": ["Hello"] },
                { "type": "TextInput", "props": { "maxLength": 8, "value": "asdf" }, "children": [] }
            ]
        })
    );
}

#[test]
fn test_snapshot_writes_handler_placeholders() {
    let tree = RenderTree::from_element(
        Element::new("Button").prop("onPress", Handler::named("press", |_| Ok(PropValue::Null))),
    );
    let snap = snapshot(&tree, NodeId::ROOT);

    assert_eq!(snap.prop("onPress"), Some(&json!({ "$handler": "press" })));
}

#[test]
fn test_fixture_round_trips_handlers() {
    let json = r#"{
        "type": "View",
        "children": [
            "plain text",
            { "type": "TextInput", "props": { "onChangeText": { "$handler": "change" }, "editable": true } }
        ]
    }"#;

    let mut labels = Vec::new();
    let tree = RenderTree::from_json(json, |label| {
        labels.push(label.to_string());
        Handler::named(label, |_| Ok(PropValue::Null))
    })
    .unwrap();

    assert_eq!(labels, vec!["change".to_string()]);

    let children = NodeAdapter::children(&tree, NodeId::ROOT);
    assert_eq!(tree.text(children[0]), Some("plain text"));

    let handler = tree
        .attribute(children[1], "onChangeText")
        .and_then(PropValue::as_handler)
        .unwrap();
    assert_eq!(handler.label(), Some("change"));
    assert_eq!(tree.attribute(children[1], "editable"), Some(&PropValue::Bool(true)));
    assert_eq!(tree.parent(children[1]), Some(NodeId::ROOT));
    assert_eq!(tree.parent(NodeId::ROOT), None);
}

#[test]
fn test_fixture_stores_nested_json_as_text() {
    let tree = RenderTree::from_json(
        r#"{ "type": "View", "props": { "style": { "flex": 1 }, "tags": [1, 2] } }"#,
        |label| Handler::named(label, |_| Ok(PropValue::Null)),
    )
    .unwrap();

    assert_eq!(
        tree.attribute(NodeId::ROOT, "style"),
        Some(&PropValue::from(r#"{"flex":1}"#))
    );
    assert_eq!(tree.attribute(NodeId::ROOT, "tags"), Some(&PropValue::from("[1,2]")));
}

#[test]
fn test_fixture_rejects_text_root() {
    let err = RenderTree::from_json(r#""just text""#, |label| {
        Handler::named(label, |_| Ok(PropValue::Null))
    })
    .unwrap_err();
    assert!(matches!(err, FixtureError::TextRoot(text) if text == "just text"));
}

#[test]
fn test_fixture_rejects_malformed_json() {
    let err = RenderTree::from_json("{ \"type\": ", |label| {
        Handler::named(label, |_| Ok(PropValue::Null))
    })
    .unwrap_err();
    assert!(matches!(err, FixtureError::Json(_)));
}

#[test]
fn test_snapshot_deserializes_defaults() {
    let snap: Snapshot = serde_json::from_str(r#"{ "type": "Text" }"#).unwrap();
    assert_eq!(snap.type_name(), Some("Text"));
    assert!(snap.children().is_empty());
}
