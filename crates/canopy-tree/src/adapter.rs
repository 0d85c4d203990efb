//! The node adapter contract.
//!
//! Selector matching, querying, text extraction and event simulation only
//! ever look at a tree through this trait. A renderer that wants to be
//! queried implements it for its own node storage; [`crate::RenderTree`] is
//! the implementation used by tests and fixtures.

use std::fmt;

use crate::value::{AttributesMap, PropValue};

/// A read-only view over an externally built tree of nodes.
///
/// Nodes are either components (with a type name and attributes) or text
/// leaves (with a string and no children). Child order is document order.
pub trait NodeAdapter {
    /// Identity of a node, stable for the lifetime of the borrow.
    type Id: Copy + Eq + fmt::Debug;

    /// The root node of the tree.
    fn root(&self) -> Self::Id;

    /// The node's type name, or `None` for a text leaf.
    fn type_name(&self, id: Self::Id) -> Option<&str>;

    /// The node's attribute mapping, or `None` for a text leaf.
    fn attributes(&self, id: Self::Id) -> Option<&AttributesMap>;

    /// The node's children in document order. Empty for text leaves.
    fn children(&self, id: Self::Id) -> &[Self::Id];

    /// The leaf's text, or `None` for a component.
    fn text(&self, id: Self::Id) -> Option<&str>;

    /// Look up a single attribute.
    fn attribute(&self, id: Self::Id, name: &str) -> Option<&PropValue> {
        self.attributes(id).and_then(|attrs| attrs.get(name))
    }

    /// Whether the node is a text leaf.
    fn is_text(&self, id: Self::Id) -> bool {
        self.text(id).is_some()
    }
}
