//! Selector matching against a [`NodeAdapter`].
//!
//! Matching is done from the subject outward: the chain's last step is
//! tested against the candidate, then each combinator walks up the
//! candidate's ancestor path.

use std::borrow::Cow;

use canopy_common::warning::warn_once;
use canopy_tree::{DEFAULT_ID_ATTRIBUTE, NodeAdapter, PropValue};

use crate::{AttributeTest, Combinator, CompoundStep, ParsedSelector, SelectorChain};

/// Settings that affect how a step is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchContext<'a> {
    /// Attribute compared by `#id` tests.
    pub id_attribute: &'a str,
}

impl Default for MatchContext<'_> {
    fn default() -> Self {
        Self {
            id_attribute: DEFAULT_ID_ATTRIBUTE,
        }
    }
}

impl ParsedSelector {
    /// Match the selector list against the last node of `path`.
    ///
    /// `path` runs from the outermost ancestor that may satisfy a combinator
    /// down to the candidate itself. Ancestors left out of `path` are never
    /// considered, which is how nested queries stay inside their scope.
    #[must_use]
    pub fn matches_path<T: NodeAdapter + ?Sized>(
        &self,
        tree: &T,
        path: &[T::Id],
        ctx: &MatchContext<'_>,
    ) -> bool {
        self.chains
            .iter()
            .any(|chain| chain.matches_path(tree, path, ctx))
    }
}

impl SelectorChain {
    /// Match this chain against the last node of `path`.
    #[must_use]
    pub fn matches_path<T: NodeAdapter + ?Sized>(
        &self,
        tree: &T,
        path: &[T::Id],
        ctx: &MatchContext<'_>,
    ) -> bool {
        let Some((&subject, ancestors)) = path.split_last() else {
            return false;
        };
        self.subject.matches(tree, subject, ctx) && self.matches_combinators(tree, ancestors, 0, ctx)
    }

    /// Match combinators `step..` against `ancestors` (outermost first).
    ///
    /// A descendant step tries every matching ancestor, nearest first, so
    /// `A > B C` is satisfied by any `B` that has an `A` parent, not only the
    /// nearest `B`.
    fn matches_combinators<T: NodeAdapter + ?Sized>(
        &self,
        tree: &T,
        ancestors: &[T::Id],
        step: usize,
        ctx: &MatchContext<'_>,
    ) -> bool {
        let Some((combinator, compound)) = self.combinators.get(step) else {
            return true;
        };

        match combinator {
            Combinator::Child => ancestors.split_last().is_some_and(|(&parent, rest)| {
                compound.matches(tree, parent, ctx)
                    && self.matches_combinators(tree, rest, step + 1, ctx)
            }),
            Combinator::Descendant => (0..ancestors.len()).rev().any(|i| {
                compound.matches(tree, ancestors[i], ctx)
                    && self.matches_combinators(tree, &ancestors[..i], step + 1, ctx)
            }),
        }
    }
}

impl CompoundStep {
    /// Check if every test in this step holds for `id`.
    ///
    /// Text leaves never match, not even the wildcard.
    #[must_use]
    pub fn matches<T: NodeAdapter + ?Sized>(
        &self,
        tree: &T,
        id: T::Id,
        ctx: &MatchContext<'_>,
    ) -> bool {
        let Some(type_name) = tree.type_name(id) else {
            return false;
        };

        if self.type_name.as_deref().is_some_and(|expected| expected != type_name) {
            return false;
        }

        if let Some(expected) = &self.id {
            let actual = tree.attribute(id, ctx.id_attribute);
            let id_matches = actual
                .and_then(|value| string_value(ctx.id_attribute, value, "#"))
                .is_some_and(|actual| actual == expected.as_str());
            if !id_matches {
                return false;
            }
        }

        self.attributes
            .iter()
            .all(|test| test.matches(tree.attribute(id, test.name())))
    }
}

impl AttributeTest {
    /// Evaluate the test against an attribute value (`None` if absent).
    ///
    /// An absent attribute never matches, not even `[attr]`.
    #[must_use]
    pub fn matches(&self, value: Option<&PropValue>) -> bool {
        let Some(value) = value else {
            return false;
        };
        let actual = || string_value(self.name(), value, self.operator());

        match self {
            Self::Exists(_) => true,
            Self::Equals(_, expected) => actual().is_some_and(|v| v == expected.as_str()),
            Self::DashMatch(_, expected) => actual().is_some_and(|v| {
                v == expected.as_str()
                    || v.strip_prefix(expected.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }),
            Self::PrefixMatch(_, expected) => {
                actual().is_some_and(|v| v.starts_with(expected.as_str()))
            }
            Self::SuffixMatch(_, expected) => {
                actual().is_some_and(|v| v.ends_with(expected.as_str()))
            }
            Self::SubstringMatch(_, expected) => {
                actual().is_some_and(|v| v.contains(expected.as_str()))
            }
        }
    }
}

/// String form of an attribute for value comparisons.
fn string_value<'v>(name: &str, value: &'v PropValue, operator: &str) -> Option<Cow<'v, str>> {
    let coerced = value.coerce_to_string();
    if coerced.is_none() {
        let _ = warn_once(
            "Selector",
            &format!("attribute `{name}` holds a {}; `{operator}` never matches it", value.kind()),
        );
    }
    coerced
}
