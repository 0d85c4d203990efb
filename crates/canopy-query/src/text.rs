//! Text extraction.

use std::ops::ControlFlow;

use canopy_tree::NodeAdapter;

use crate::engine::walk_document_order;

/// Concatenate every text leaf under `id` in document order.
///
/// No separators are inserted, so `<View><Text>H</Text><Text>i</Text></View>`
/// yields `"Hi"`. A subtree without text leaves yields the empty string.
#[must_use]
pub fn text_content<T: NodeAdapter + ?Sized>(tree: &T, id: T::Id) -> String {
    let mut out = String::new();
    let _ = walk_document_order(tree, id, |path| {
        if let Some(text) = path.last().and_then(|&node| tree.text(node)) {
            out.push_str(text);
        }
        ControlFlow::Continue(())
    });
    out
}
