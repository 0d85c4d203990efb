//! Declarative element builder.
//!
//! Stands in for a renderer in tests: describe the rendered output, then turn
//! it into a [`crate::RenderTree`].
//!
//! ```ignore
//! let tree = RenderTree::from_element(
//!     Element::new("View")
//!         .child(Element::new("Text").prop("testID", "title").text("Hello"))
//!         .child(Element::new("TextInput").prop("value", "asdf")),
//! );
//! ```

use crate::ComponentData;
use crate::value::PropValue;

/// A component description with attributes and ordered children.
#[derive(Debug, Clone)]
pub struct Element {
    data: ComponentData,
    children: Vec<ElementChild>,
}

/// A child of an [`Element`].
#[derive(Debug, Clone)]
pub enum ElementChild {
    /// A nested component.
    Element(Element),
    /// A raw text fragment.
    Text(String),
}

impl Element {
    /// Start describing a component of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            data: ComponentData::new(type_name),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value under that name.
    #[must_use]
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        let _ = self.data.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child component.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(ElementChild::Element(child));
        self
    }

    /// Append a text fragment.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ElementChild::Text(text.into()));
        self
    }

    /// Append several children at once.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children
            .extend(children.into_iter().map(ElementChild::Element));
        self
    }

    pub(crate) fn into_parts(self) -> (ComponentData, Vec<ElementChild>) {
        (self.data, self.children)
    }
}
