//! Integration tests for matching selectors against rendered nodes.

use canopy_selector::{AttributeTest, MatchContext, parse_selector};
use canopy_tree::{Element, Handler, NodeAdapter, NodeId, PropValue, RenderTree};

/// Path from the root down to the node reached by following `indices`.
fn path_to(tree: &RenderTree, indices: &[usize]) -> Vec<NodeId> {
    let mut path = vec![NodeId::ROOT];
    let mut current = NodeId::ROOT;
    for &i in indices {
        current = NodeAdapter::children(tree, current)[i];
        path.push(current);
    }
    path
}

fn matches(selector: &str, tree: &RenderTree, indices: &[usize]) -> bool {
    let parsed = parse_selector(selector).unwrap();
    parsed.matches_path(tree, &path_to(tree, indices), &MatchContext::default())
}

fn single(element: Element) -> RenderTree {
    RenderTree::from_element(element)
}

// Compound steps

#[test]
fn test_match_type_is_case_sensitive() {
    let tree = single(Element::new("TextInput"));
    assert!(matches("TextInput", &tree, &[]));
    assert!(!matches("textinput", &tree, &[]));
    assert!(!matches("Text", &tree, &[]));
    assert!(matches("*", &tree, &[]));
}

#[test]
fn test_match_attribute_operators() {
    let tree = single(Element::new("TextInput").prop("value", "asdf"));

    for selector in [
        "[value]",
        "[value='asdf']",
        "[value^='as']",
        "[value$='df']",
        "[value*='sd']",
        "[value|='asdf']",
    ] {
        assert!(matches(selector, &tree, &[]), "{selector}");
    }

    for selector in ["[value='asd']", "[value|='as']", "[value^='df']", "[value*='x']"] {
        assert!(!matches(selector, &tree, &[]), "{selector}");
    }
}

#[test]
fn test_match_dash_prefix() {
    let tree = single(Element::new("Text").prop("testID", "asdf-fdsa"));
    assert!(matches("[testID|='asdf']", &tree, &[]));
    assert!(!matches("[testID|='asd']", &tree, &[]));
}

#[test]
fn test_match_absent_attribute_never_matches() {
    let tree = single(Element::new("Text"));
    assert!(!matches("[value]", &tree, &[]));
    assert!(!AttributeTest::Exists("value".into()).matches(None));
}

#[test]
fn test_match_coerces_scalars_to_strings() {
    let tree = single(
        Element::new("Slider")
            .prop("value", 3)
            .prop("disabled", false)
            .prop("step", 0.5),
    );
    assert!(matches("[value='3']", &tree, &[]));
    assert!(matches("[disabled='false']", &tree, &[]));
    assert!(matches("[step^='0.']", &tree, &[]));
}

#[test]
fn test_match_handler_attribute() {
    let tree = single(
        Element::new("Button").prop("onPress", Handler::new(|_| Ok(PropValue::Null))),
    );
    assert!(matches("[onPress]", &tree, &[]));
    assert!(!matches("[onPress*='']", &tree, &[]));
}

#[test]
fn test_match_compound_attributes_are_conjunctive() {
    let both = single(Element::new("Text").prop("a", "asdf").prop("b", "fdsa"));
    let only_a = single(Element::new("Text").prop("a", "asdf"));
    let only_b = single(Element::new("Text").prop("b", "fdsa"));

    assert!(matches("[a$='df'][b*='ds']", &both, &[]));
    assert!(!matches("[a$='df'][b*='ds']", &only_a, &[]));
    assert!(!matches("[a$='df'][b*='ds']", &only_b, &[]));
}

#[test]
fn test_match_type_and_attribute() {
    let input = single(Element::new("TextInput").prop("value", "asdf"));
    let text = single(Element::new("Text").prop("value", "asdf"));

    assert!(matches("TextInput[value='asdf']", &input, &[]));
    assert!(!matches("TextInput[value='asdf']", &text, &[]));
    assert!(!matches("TextInput[value='x']", &input, &[]));
}

#[test]
fn test_match_id_literally() {
    let tree = single(Element::new("Text").prop("testID", "a.b"));
    assert!(matches("#a.b", &tree, &[]));
    assert!(matches("Text#a.b", &tree, &[]));
    assert!(!matches("#a", &tree, &[]));
}

#[test]
fn test_match_id_uses_configured_attribute() {
    let tree = single(Element::new("View").prop("nativeID", "main").prop("testID", "other"));
    let parsed = parse_selector("#main").unwrap();
    let path = [NodeId::ROOT];

    assert!(!parsed.matches_path(&tree, &path, &MatchContext::default()));
    assert!(parsed.matches_path(
        &tree,
        &path,
        &MatchContext {
            id_attribute: "nativeID"
        }
    ));
}

#[test]
fn test_text_leaves_never_match() {
    let tree = single(Element::new("Text").text("hello"));
    assert!(!matches("*", &tree, &[0]));
    assert!(!matches("Text *", &tree, &[0]));
}

// Combinators

/// View > [Text, List > [Row > Label, Section > Row]]
fn nested_tree() -> RenderTree {
    RenderTree::from_element(
        Element::new("View").child(Element::new("Text")).child(
            Element::new("List")
                .child(Element::new("Row").child(Element::new("Label")))
                .child(Element::new("Section").child(Element::new("Row"))),
        ),
    )
}

#[test]
fn test_match_child_combinator() {
    let tree = nested_tree();
    assert!(matches("View > Text", &tree, &[0]));
    assert!(matches("List > Row", &tree, &[1, 0]));
    assert!(!matches("List > Row", &tree, &[1, 1, 0]));
    assert!(!matches("View > Row", &tree, &[1, 0]));
}

#[test]
fn test_match_descendant_combinator() {
    let tree = nested_tree();
    assert!(matches("View Row", &tree, &[1, 0]));
    assert!(matches("View Row", &tree, &[1, 1, 0]));
    assert!(matches("List Label", &tree, &[1, 0, 0]));
    assert!(!matches("Section Label", &tree, &[1, 0, 0]));
    // Descendant means strict ancestor
    assert!(!matches("Row Row", &tree, &[1, 0]));
}

#[test]
fn test_match_mixed_combinators_backtrack() {
    // Label's nearest `*` ancestor is Row, whose parent is List, not View;
    // the chain still matches through List, whose parent is View.
    let tree = nested_tree();
    assert!(matches("View > * Label", &tree, &[1, 0, 0]));
    assert!(matches("View > List > Row > Label", &tree, &[1, 0, 0]));
    assert!(!matches("View > Row Label", &tree, &[1, 0, 0]));
}

#[test]
fn test_match_ancestors_outside_path_are_ignored() {
    let tree = nested_tree();
    let parsed = parse_selector("View Row").unwrap();
    let full = path_to(&tree, &[1, 0]);

    assert!(parsed.matches_path(&tree, &full, &MatchContext::default()));
    // Scope starting at List: View is not visible
    assert!(!parsed.matches_path(&tree, &full[1..], &MatchContext::default()));
}

#[test]
fn test_match_selector_list_is_union() {
    let tree = nested_tree();
    assert!(matches("Nope, View > Text", &tree, &[0]));
    assert!(matches("Text, Label", &tree, &[1, 0, 0]));
    assert!(!matches("Text, Label", &tree, &[1]));
}

#[test]
fn test_match_empty_path() {
    let tree = nested_tree();
    let parsed = parse_selector("View").unwrap();
    assert!(!parsed.matches_path(&tree, &[], &MatchContext::default()));
}
