//! Selector parsing and matching for the Canopy query engine.
//!
//! # Scope
//!
//! This crate implements a small CSS-like selector language:
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `Tag` | match by type name (case-sensitive) |
//! | `*` | any type name |
//! | `#id` | identifier attribute equals `id` literally (`#a.b` is the id `a.b`) |
//! | `[attr]` | attribute present |
//! | `[attr='v']` | exact match |
//! | `[attr\|='v']` | exact or followed by `-` |
//! | `[attr^='v']` | prefix match |
//! | `[attr$='v']` | suffix match |
//! | `[attr*='v']` | substring match |
//! | `A B` | B is a descendant of A |
//! | `A > B` | B is an immediate child of A |
//! | `A, B` | union |
//!
//! # Not Supported
//!
//! - Classes, pseudo-classes and pseudo-elements
//! - Sibling combinators
//! - Case-insensitivity flags and specificity

mod error;
mod matching;
mod parser;

pub use error::SyntaxError;
pub use matching::MatchContext;
pub use parser::parse_selector;

/// One condition on an attribute, as written inside `[...]`.
///
/// The first field is the attribute name, the second the expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeTest {
    /// `[attr]`: the attribute is present, with any value.
    Exists(String),

    /// `[attr=value]`: the value is exactly `value`.
    Equals(String, String),

    /// `[attr|=value]`: the value is exactly `value` or starts with `value-`.
    ///
    /// Example: `[testID|='row']` matches `testID="row"` and `testID="row-3"`
    DashMatch(String, String),

    /// `[attr^=value]`: the value starts with `value`.
    PrefixMatch(String, String),

    /// `[attr$=value]`: the value ends with `value`.
    SuffixMatch(String, String),

    /// `[attr*=value]`: the value contains `value`.
    SubstringMatch(String, String),
}

impl AttributeTest {
    /// The attribute name this test looks up.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exists(name)
            | Self::Equals(name, _)
            | Self::DashMatch(name, _)
            | Self::PrefixMatch(name, _)
            | Self::SuffixMatch(name, _)
            | Self::SubstringMatch(name, _) => name,
        }
    }

    /// The operator as written in a selector.
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        match self {
            Self::Exists(_) => "",
            Self::Equals(..) => "=",
            Self::DashMatch(..) => "|=",
            Self::PrefixMatch(..) => "^=",
            Self::SuffixMatch(..) => "$=",
            Self::SubstringMatch(..) => "*=",
        }
    }
}

/// A compound selector: a type test plus id and attribute tests, all of
/// which must hold for the same node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundStep {
    /// Required type name; `None` matches any component.
    pub type_name: Option<String>,
    /// Required value of the identifier attribute.
    pub id: Option<String>,
    /// Attribute tests in source order.
    pub attributes: Vec<AttributeTest>,
}

/// How two consecutive compound steps of a chain relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: `A B` matches a B with some strict ancestor A.
    Descendant,
    /// `>`: `A > B` matches a B whose parent is A.
    Child,
}

/// A chain of compound steps joined by combinators.
///
/// Example: `View > List Row` is parsed as:
/// ```text
/// subject: Row
/// combinators: [(Descendant, List), (Child, View)]
/// ```
///
/// The order is right-to-left because matching walks up from the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorChain {
    /// The rightmost step, tested against the candidate node.
    pub subject: CompoundStep,
    /// Steps to the left of the subject, nearest first, each with the
    /// combinator that links it to the step on its right.
    pub combinators: Vec<(Combinator, CompoundStep)>,
}

impl SelectorChain {
    /// Check if this chain has no combinators.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        self.combinators.is_empty()
    }
}

/// A parsed selector list: a node matches if any chain matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// The comma-separated alternatives, in source order.
    pub chains: Vec<SelectorChain>,
}
