//! Queryable wrappers around rendered nodes.

use std::fmt;

use canopy_selector::{ParsedSelector, SyntaxError, parse_selector};
use canopy_tree::{NodeAdapter, PropValue, Snapshot, snapshot};

use crate::config::QueryConfig;
use crate::engine::{Match, find_all, find_first};
use crate::simulate::{SimulateError, simulate};
use crate::text::text_content;
use crate::Error;

/// A rendered tree snapshot together with its query configuration.
///
/// This is what a test "renders": every query starts from [`Rendered::root`].
pub struct Rendered<T> {
    tree: T,
    config: QueryConfig,
}

/// Wrap a tree for querying with the default configuration.
#[must_use]
pub fn render<T: NodeAdapter>(tree: T) -> Rendered<T> {
    Rendered::with_config(tree, QueryConfig::default())
}

impl<T: NodeAdapter> Rendered<T> {
    /// Wrap a tree for querying with an explicit configuration.
    pub const fn with_config(tree: T, config: QueryConfig) -> Self {
        Self { tree, config }
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &T {
        &self.tree
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// The result wrapping the root node.
    #[must_use]
    pub fn root(&self) -> QueryResult<'_, T> {
        QueryResult {
            tree: &self.tree,
            config: &self.config,
            node: self.tree.root(),
            ancestors: Vec::new(),
        }
    }

    /// First node matching `selector` in document order. See [`QueryResult::query`].
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the selector is malformed.
    pub fn query(&self, selector: &str) -> Result<Option<QueryResult<'_, T>>, SyntaxError> {
        self.root().query(selector)
    }

    /// Every node matching `selector` in document order. See [`QueryResult::query_all`].
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the selector is malformed.
    pub fn query_all(&self, selector: &str) -> Result<Vec<QueryResult<'_, T>>, SyntaxError> {
        self.root().query_all(selector)
    }

    /// All text under the root.
    #[must_use]
    pub fn text(&self) -> String {
        self.root().text()
    }

    /// Simulate an event on the root node. See [`QueryResult::simulate`].
    ///
    /// # Errors
    ///
    /// See [`QueryResult::simulate`].
    pub fn simulate(&self, event: &str, args: &[PropValue]) -> Result<PropValue, SimulateError> {
        self.root().simulate(event, args)
    }

    /// Snapshot of the whole tree.
    #[must_use]
    pub fn to_json(&self) -> Snapshot {
        self.root().to_json()
    }
}

/// A matched node.
///
/// Holds only a borrow of the tree, the node's identity and its ancestor
/// path; it never mutates the tree. Nested queries only see the node's own
/// subtree: ancestors above it cannot satisfy a combinator.
pub struct QueryResult<'r, T: NodeAdapter> {
    tree: &'r T,
    config: &'r QueryConfig,
    node: T::Id,
    ancestors: Vec<T::Id>,
}

impl<'r, T: NodeAdapter> QueryResult<'r, T> {
    /// The wrapped node's identity.
    #[must_use]
    pub const fn node(&self) -> T::Id {
        self.node
    }

    /// Ancestors from the rendered root down to (excluding) this node.
    #[must_use]
    pub fn ancestors(&self) -> &[T::Id] {
        &self.ancestors
    }

    /// The node's type name (`None` only for text leaves).
    #[must_use]
    pub fn type_name(&self) -> Option<&'r str> {
        self.tree.type_name(self.node)
    }

    /// Look up one of the node's attributes.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'r PropValue> {
        self.tree.attribute(self.node, name)
    }

    /// First node in this subtree (including this node) matching `selector`.
    ///
    /// Returns `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the selector is malformed; the tree is
    /// not walked in that case.
    pub fn query(&self, selector: &str) -> Result<Option<Self>, SyntaxError> {
        let parsed = parse_selector(selector)?;
        Ok(self.query_parsed(&parsed))
    }

    /// Every node in this subtree (including this node) matching `selector`,
    /// in document order. Possibly empty.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the selector is malformed.
    pub fn query_all(&self, selector: &str) -> Result<Vec<Self>, SyntaxError> {
        let parsed = parse_selector(selector)?;
        Ok(self.query_all_parsed(&parsed))
    }

    /// Like [`QueryResult::query`] with an already parsed selector.
    #[must_use]
    pub fn query_parsed(&self, selector: &ParsedSelector) -> Option<Self> {
        let ctx = self.config.match_context();
        find_first(self.tree, self.node, selector, &ctx).map(|found| self.wrap(found))
    }

    /// Like [`QueryResult::query_all`] with an already parsed selector.
    #[must_use]
    pub fn query_all_parsed(&self, selector: &ParsedSelector) -> Vec<Self> {
        let ctx = self.config.match_context();
        find_all(self.tree, self.node, selector, &ctx)
            .into_iter()
            .map(|found| self.wrap(found))
            .collect()
    }

    /// All text leaves under this node, concatenated in document order.
    #[must_use]
    pub fn text(&self) -> String {
        text_content(self.tree, self.node)
    }

    /// Call this node's handler for `event` with `args`.
    ///
    /// `changeText` calls `onChangeText` (with the default prefix). The
    /// handler's return value is passed back.
    ///
    /// # Errors
    ///
    /// Returns [`SimulateError::UnhandledEvent`] / [`SimulateError::NotAHandler`]
    /// without calling anything if the handler is missing, and
    /// [`SimulateError::Handler`] with the handler's own error if it fails.
    pub fn simulate(&self, event: &str, args: &[PropValue]) -> Result<PropValue, SimulateError> {
        simulate(self.tree, self.node, event, args, &self.config.handler_prefix)
    }

    /// Find the first match for `selector` and simulate `event` on it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] for a malformed selector, [`Error::NotFound`]
    /// if nothing matches, and [`Error::Simulate`] if simulation fails.
    pub fn simulate_on(
        &self,
        selector: &str,
        event: &str,
        args: &[PropValue],
    ) -> Result<PropValue, Error> {
        let target = self.query(selector)?.ok_or_else(|| Error::NotFound {
            selector: selector.to_string(),
        })?;
        Ok(target.simulate(event, args)?)
    }

    /// Snapshot of this node's subtree: type name, attributes and children.
    #[must_use]
    pub fn to_json(&self) -> Snapshot {
        snapshot(self.tree, self.node)
    }

    fn wrap(&self, found: Match<T::Id>) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.extend(found.ancestors);
        Self {
            tree: self.tree,
            config: self.config,
            node: found.node,
            ancestors,
        }
    }
}

impl<T: NodeAdapter> Clone for QueryResult<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            config: self.config,
            node: self.node,
            ancestors: self.ancestors.clone(),
        }
    }
}

/// Two results are equal if they wrap the same node of the same tree.
impl<T: NodeAdapter> PartialEq for QueryResult<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<T: NodeAdapter> fmt::Debug for QueryResult<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResult")
            .field("node", &self.node)
            .field("type_name", &self.type_name())
            .field("depth", &self.ancestors.len())
            .finish()
    }
}
