//! Rendered component tree for the Canopy query engine.
//!
//! This crate provides the [`NodeAdapter`] contract the query engine is
//! written against, plus an arena-based [`RenderTree`] that implements it.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Trees are
//! built once (from an [`Element`] description or a JSON [`Snapshot`]) and are
//! never mutated by queries.

/// The node adapter contract.
pub mod adapter;
/// Declarative element builder.
pub mod builder;
/// JSON snapshots and fixture loading.
pub mod snapshot;
/// Attribute values and handlers.
pub mod value;

pub use adapter::NodeAdapter;
pub use builder::{Element, ElementChild};
pub use snapshot::{FixtureError, Snapshot, snapshot};
pub use value::{AttributesMap, CallLog, Handler, HandlerError, PropValue};

/// Attribute used by `#id` selectors unless configured otherwise.
pub const DEFAULT_ID_ATTRIBUTE: &str = "testID";

/// A type-safe index into the render tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the arena, holding its kind and its relationships.
#[derive(Debug, Clone)]
pub struct Node {
    /// Component or text leaf.
    pub node_type: NodeType,
    /// The parent node, `None` for the root and for detached nodes.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// The kind of a node.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// A rendered component, e.g. `View` or `TextInput`.
    Component(ComponentData),
    /// A raw text fragment.
    Text(String),
}

/// Component-specific data.
#[derive(Debug, Clone)]
pub struct ComponentData {
    /// The component's type name. Never empty.
    pub type_name: String,
    /// The component's attributes ("props").
    pub attrs: AttributesMap,
}

impl ComponentData {
    /// Create component data with no attributes.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attrs: AttributesMap::new(),
        }
    }
}

/// Arena-based render tree with O(1) node access.
///
/// All nodes are stored in a contiguous vector, using indices for all
/// relationships. The root component is always at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct RenderTree {
    nodes: Vec<Node>,
}

impl RenderTree {
    /// Create a tree consisting of a single root component.
    #[must_use]
    pub fn new(root: ComponentData) -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Component(root),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Build a tree from a declarative [`Element`] description.
    #[must_use]
    pub fn from_element(element: Element) -> Self {
        let (root, children) = element.into_parts();
        let mut tree = Self::new(root);
        tree.append_children(NodeId::ROOT, children);
        tree
    }

    fn append_children(&mut self, parent: NodeId, children: Vec<ElementChild>) {
        for child in children {
            match child {
                ElementChild::Text(text) => {
                    let id = self.alloc(NodeType::Text(text));
                    self.append_child(parent, id);
                }
                ElementChild::Element(element) => {
                    let (data, grandchildren) = element.into_parts();
                    let id = self.alloc(NodeType::Component(data));
                    self.append_child(parent, id);
                    self.append_children(id, grandchildren);
                }
            }
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it always holds at least the root).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either ID was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get component data if this node is a component.
    #[must_use]
    pub fn as_component(&self, id: NodeId) -> Option<&ComponentData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Component(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text leaf.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Component(_) => None,
        })
    }
}

impl NodeAdapter for RenderTree {
    type Id = NodeId;

    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn type_name(&self, id: NodeId) -> Option<&str> {
        self.as_component(id).map(|c| c.type_name.as_str())
    }

    fn attributes(&self, id: NodeId) -> Option<&AttributesMap> {
        self.as_component(id).map(|c| &c.attrs)
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        Self::children(self, id)
    }

    fn text(&self, id: NodeId) -> Option<&str> {
        self.as_text(id)
    }
}
