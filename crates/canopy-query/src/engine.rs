//! Document-order traversal and selector evaluation.
//!
//! Document order is pre-order, children left-to-right. It decides which node
//! `query` returns and the order of `query_all` results, so the walk uses an
//! explicit stack rather than relying on recursion or container iteration
//! order.

use std::ops::ControlFlow;

use canopy_selector::{MatchContext, ParsedSelector};
use canopy_tree::NodeAdapter;

/// Visit `scope` and every node below it in document order.
///
/// `visit` receives the path from `scope` down to the visited node
/// (inclusive). Returning `ControlFlow::Break` stops the walk.
pub fn walk_document_order<T, F>(tree: &T, scope: T::Id, mut visit: F) -> ControlFlow<()>
where
    T: NodeAdapter + ?Sized,
    F: FnMut(&[T::Id]) -> ControlFlow<()>,
{
    let mut path: Vec<T::Id> = Vec::new();
    // (node, depth below scope)
    let mut stack = vec![(scope, 0usize)];

    while let Some((id, depth)) = stack.pop() {
        path.truncate(depth);
        path.push(id);
        visit(&path)?;

        // Reverse so the leftmost child is popped first
        stack.extend(tree.children(id).iter().rev().map(|&child| (child, depth + 1)));
    }

    ControlFlow::Continue(())
}

/// A matched node with its path inside the query scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<Id> {
    /// The matched node.
    pub node: Id,
    /// Ancestors from the scope root down to (excluding) the node.
    pub ancestors: Vec<Id>,
}

/// First node under `scope` (inclusive) matching `selector`.
#[must_use]
pub fn find_first<T: NodeAdapter + ?Sized>(
    tree: &T,
    scope: T::Id,
    selector: &ParsedSelector,
    ctx: &MatchContext<'_>,
) -> Option<Match<T::Id>> {
    let mut found = None;
    let _ = walk_document_order(tree, scope, |path| {
        if selector.matches_path(tree, path, ctx) {
            found = to_match(path);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}

/// Every node under `scope` (inclusive) matching `selector`, in document order.
#[must_use]
pub fn find_all<T: NodeAdapter + ?Sized>(
    tree: &T,
    scope: T::Id,
    selector: &ParsedSelector,
    ctx: &MatchContext<'_>,
) -> Vec<Match<T::Id>> {
    let mut found = Vec::new();
    let _ = walk_document_order(tree, scope, |path| {
        if selector.matches_path(tree, path, ctx) {
            found.extend(to_match(path));
        }
        ControlFlow::Continue(())
    });
    found
}

fn to_match<Id: Copy>(path: &[Id]) -> Option<Match<Id>> {
    path.split_last().map(|(&node, ancestors)| Match {
        node,
        ancestors: ancestors.to_vec(),
    })
}
