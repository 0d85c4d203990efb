//! Query configuration.

use canopy_selector::MatchContext;
use canopy_tree::DEFAULT_ID_ATTRIBUTE;

/// Prefix turning an event name into a handler attribute name.
pub const DEFAULT_HANDLER_PREFIX: &str = "on";

/// Naming conventions used by queries and event simulation.
///
/// The defaults follow React Native: `#id` compares `testID`, and the
/// `changeText` event is handled by `onChangeText`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Attribute compared by `#id` selectors.
    pub id_attribute: String,
    /// Prefix of handler attribute names.
    pub handler_prefix: String,
}

impl QueryConfig {
    /// Use a different identifier attribute for `#id` selectors.
    #[must_use]
    pub fn with_id_attribute(mut self, name: impl Into<String>) -> Self {
        self.id_attribute = name.into();
        self
    }

    /// Use a different handler prefix for event simulation.
    #[must_use]
    pub fn with_handler_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.handler_prefix = prefix.into();
        self
    }

    /// The matcher settings derived from this configuration.
    #[must_use]
    pub fn match_context(&self) -> MatchContext<'_> {
        MatchContext {
            id_attribute: &self.id_attribute,
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            id_attribute: DEFAULT_ID_ATTRIBUTE.to_string(),
            handler_prefix: DEFAULT_HANDLER_PREFIX.to_string(),
        }
    }
}
