//! JSON snapshots of rendered subtrees, and fixtures built from them.
//!
//! A snapshot is either a text string or an object:
//!
//! ```json
//! { "type": "TextInput", "props": { "value": "asdf", "onChangeText": { "$handler": "onChangeText" } }, "children": [] }
//! ```
//!
//! Handlers cannot be written as JSON, so they appear as `{"$handler": label}`
//! objects. Loading a fixture turns such objects back into handlers through a
//! caller-supplied factory. The shape exists for test assertions and tooling;
//! it is not a versioned format.

use canopy_common::warning::warn_once;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::adapter::NodeAdapter;
use crate::value::{AttributesMap, Handler, PropValue};
use crate::{ComponentData, NodeId, NodeType, RenderTree};

/// Key marking a handler placeholder object.
pub const HANDLER_KEY: &str = "$handler";

/// Serializable view of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    /// A text leaf.
    Text(String),
    /// A component with its attributes and children.
    Component {
        /// The component's type name.
        #[serde(rename = "type")]
        type_name: String,
        /// Attributes, with handlers written as `{"$handler": label}`.
        #[serde(default)]
        props: Map<String, Value>,
        /// Children in document order.
        #[serde(default)]
        children: Vec<Snapshot>,
    },
}

impl Snapshot {
    /// The component's type name, `None` for text.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Component { type_name, .. } => Some(type_name),
            Self::Text(_) => None,
        }
    }

    /// A single attribute of a component snapshot.
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Component { props, .. } => props.get(name),
            Self::Text(_) => None,
        }
    }

    /// Children of a component snapshot; empty for text.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Component { children, .. } => children,
            Self::Text(_) => &[],
        }
    }
}

/// Build the snapshot of `id` and everything below it.
pub fn snapshot<T: NodeAdapter + ?Sized>(tree: &T, id: T::Id) -> Snapshot {
    if let Some(text) = tree.text(id) {
        return Snapshot::Text(text.to_string());
    }

    let props = tree
        .attributes(id)
        .map(|attrs| {
            attrs
                .iter()
                .map(|(name, value)| (name.clone(), prop_to_json(value)))
                .collect()
        })
        .unwrap_or_default();

    Snapshot::Component {
        type_name: tree.type_name(id).unwrap_or_default().to_string(),
        props,
        children: tree
            .children(id)
            .iter()
            .map(|&child| snapshot(tree, child))
            .collect(),
    }
}

fn prop_to_json(value: &PropValue) -> Value {
    match value {
        PropValue::String(s) => Value::String(s.clone()),
        PropValue::Number(n) => number_to_json(*n),
        PropValue::Bool(b) => Value::Bool(*b),
        PropValue::Null => Value::Null,
        PropValue::Handler(handler) => {
            let mut placeholder = Map::new();
            let _ = placeholder.insert(
                HANDLER_KEY.to_string(),
                Value::String(handler.label().unwrap_or("anonymous").to_string()),
            );
            Value::Object(placeholder)
        }
    }
}

/// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[allow(clippy::cast_possible_truncation)]
fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Error loading a fixture tree.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The input is not valid snapshot JSON.
    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The root of a tree must be a component.
    #[error("fixture root must be a component, found text {0:?}")]
    TextRoot(String),
}

impl RenderTree {
    /// Materialise a tree from a snapshot.
    ///
    /// `{"$handler": label}` props become handlers produced by `make_handler`.
    /// Arrays and other objects are stored as their JSON text, with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::TextRoot`] if the snapshot is a bare string.
    pub fn from_snapshot(
        snapshot: Snapshot,
        mut make_handler: impl FnMut(&str) -> Handler,
    ) -> Result<Self, FixtureError> {
        match snapshot {
            Snapshot::Text(text) => Err(FixtureError::TextRoot(text)),
            Snapshot::Component {
                type_name,
                props,
                children,
            } => {
                let data = component_from_json(type_name, props, &mut make_handler);
                let mut tree = Self::new(data);
                tree.append_snapshots(NodeId::ROOT, children, &mut make_handler);
                Ok(tree)
            }
        }
    }

    /// Parse snapshot JSON and materialise it; see [`RenderTree::from_snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Json`] for malformed input and
    /// [`FixtureError::TextRoot`] for a bare string root.
    pub fn from_json(
        json: &str,
        make_handler: impl FnMut(&str) -> Handler,
    ) -> Result<Self, FixtureError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot, make_handler)
    }

    fn append_snapshots(
        &mut self,
        parent: NodeId,
        children: Vec<Snapshot>,
        make_handler: &mut dyn FnMut(&str) -> Handler,
    ) {
        for child in children {
            match child {
                Snapshot::Text(text) => {
                    let id = self.alloc(NodeType::Text(text));
                    self.append_child(parent, id);
                }
                Snapshot::Component {
                    type_name,
                    props,
                    children,
                } => {
                    let data = component_from_json(type_name, props, make_handler);
                    let id = self.alloc(NodeType::Component(data));
                    self.append_child(parent, id);
                    self.append_snapshots(id, children, make_handler);
                }
            }
        }
    }
}

fn component_from_json(
    type_name: String,
    props: Map<String, Value>,
    make_handler: &mut dyn FnMut(&str) -> Handler,
) -> ComponentData {
    let attrs: AttributesMap = props
        .into_iter()
        .map(|(name, value)| {
            let prop = prop_from_json(&name, value, make_handler);
            (name, prop)
        })
        .collect();
    ComponentData { type_name, attrs }
}

fn prop_from_json(
    name: &str,
    value: Value,
    make_handler: &mut dyn FnMut(&str) -> Handler,
) -> PropValue {
    match value {
        Value::String(s) => PropValue::String(s),
        Value::Number(n) => n.as_f64().map_or(PropValue::Null, PropValue::Number),
        Value::Bool(b) => PropValue::Bool(b),
        Value::Null => PropValue::Null,
        Value::Object(map) => {
            let label = handler_label(&map).map(str::to_owned);
            match label {
                Some(label) => PropValue::Handler(make_handler(&label)),
                None => lossy_prop(name, &Value::Object(map)),
            }
        }
        array @ Value::Array(_) => lossy_prop(name, &array),
    }
}

fn handler_label(map: &Map<String, Value>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    map.get(HANDLER_KEY).and_then(Value::as_str)
}

fn lossy_prop(name: &str, value: &Value) -> PropValue {
    let kind = if value.is_array() { "array" } else { "object" };
    let _ = warn_once(
        "Tree",
        &format!("attribute `{name}` holds a JSON {kind}; stored as its JSON text"),
    );
    PropValue::String(value.to_string())
}
