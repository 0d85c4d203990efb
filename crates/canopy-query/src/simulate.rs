//! Event simulation.
//!
//! Simulating an event is a direct, synchronous call of the handler stored
//! under the conventional attribute name: `changeText` calls `onChangeText`.
//! There is no bubbling and no default action.

use canopy_common::warning::warn_once;
use canopy_tree::{HandlerError, NodeAdapter, PropValue};
use thiserror::Error;

/// Type name reported for text leaves.
const TEXT_TYPE_NAME: &str = "#text";

/// Failure to simulate an event.
#[derive(Debug, Error)]
pub enum SimulateError {
    /// The node has no attribute under the derived handler name.
    #[error("cannot simulate `{event}` on <{type_name}>: no `{handler}` handler")]
    UnhandledEvent {
        /// The event name as passed to `simulate`.
        event: String,
        /// The derived handler attribute name.
        handler: String,
        /// Type name of the target node.
        type_name: String,
    },

    /// The derived attribute exists but is not invocable.
    #[error("cannot simulate `{event}` on <{type_name}>: `{handler}` is a {kind}, not a handler")]
    NotAHandler {
        /// The event name as passed to `simulate`.
        event: String,
        /// The derived handler attribute name.
        handler: String,
        /// Type name of the target node.
        type_name: String,
        /// Kind of the value found instead.
        kind: &'static str,
    },

    /// The handler ran and failed. The error is the handler's own.
    #[error(transparent)]
    Handler(HandlerError),
}

impl SimulateError {
    /// Whether the node could not handle the event at all (nothing was called).
    #[must_use]
    pub const fn is_unhandled(&self) -> bool {
        matches!(self, Self::UnhandledEvent { .. } | Self::NotAHandler { .. })
    }
}

/// Derive the handler attribute name for an event.
///
/// Capitalizes the first character of `event` and prepends `prefix`:
/// `handler_name("changeText", "on")` is `"onChangeText"`.
#[must_use]
pub fn handler_name(event: &str, prefix: &str) -> String {
    let mut chars = event.chars();
    let mut name = String::with_capacity(prefix.len() + event.len());
    name.push_str(prefix);
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// Invoke the handler for `event` on `id` with `args`, returning its result.
///
/// # Errors
///
/// Returns [`SimulateError::UnhandledEvent`] or [`SimulateError::NotAHandler`]
/// without calling anything if the node cannot handle the event, and
/// [`SimulateError::Handler`] carrying the handler's own error if it fails.
pub fn simulate<T: NodeAdapter + ?Sized>(
    tree: &T,
    id: T::Id,
    event: &str,
    args: &[PropValue],
    prefix: &str,
) -> Result<PropValue, SimulateError> {
    let handler = handler_name(event, prefix);
    let type_name = || tree.type_name(id).unwrap_or(TEXT_TYPE_NAME).to_string();

    match tree.attribute(id, &handler) {
        Some(PropValue::Handler(callback)) => callback.call(args).map_err(SimulateError::Handler),
        Some(other) => {
            let _ = warn_once(
                "Simulate",
                &format!(
                    "`{handler}` on <{}> is a {}; did you mean to pass a function?",
                    type_name(),
                    other.kind()
                ),
            );
            Err(SimulateError::NotAHandler {
                event: event.to_string(),
                handler,
                type_name: type_name(),
                kind: other.kind(),
            })
        }
        None => Err(SimulateError::UnhandledEvent {
            event: event.to_string(),
            handler,
            type_name: type_name(),
        }),
    }
}
