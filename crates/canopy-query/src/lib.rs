//! Querying, text extraction and event simulation for the Canopy engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Query Engine** - `query` / `query_all` over a tree in document order
//! - **Text Extraction** - concatenated text leaves of a subtree
//! - **Event Simulation** - direct, synchronous calls of `on*` handlers
//!
//! Trees come from any [`NodeAdapter`] implementation; the engine never builds
//! or mutates them.
//!
//! ```ignore
//! let view = render(RenderTree::from_element(
//!     Element::new("TextInput").prop("onChangeText", handler),
//! ));
//! let input = view.query("TextInput")?.expect("rendered");
//! input.simulate("changeText", &["asdf".into()])?;
//! ```

pub use canopy_selector as selector;
pub use canopy_tree as tree;

/// Query configuration.
pub mod config;
/// Document-order traversal and selector evaluation.
pub mod engine;
mod result;
/// Event simulation.
pub mod simulate;
/// Text extraction.
pub mod text;

pub use canopy_selector::{ParsedSelector, SyntaxError, parse_selector};
pub use canopy_tree::{NodeAdapter, PropValue};
pub use config::QueryConfig;
pub use result::{QueryResult, Rendered, render};
pub use simulate::{SimulateError, handler_name};
pub use text::text_content;

/// Any failure of a combined query-and-simulate operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The selector is malformed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// No node matched the selector.
    #[error("no node matches `{selector}`")]
    NotFound {
        /// The selector that matched nothing.
        selector: String,
    },

    /// The matched node could not handle the event, or its handler failed.
    #[error(transparent)]
    Simulate(#[from] SimulateError),
}
