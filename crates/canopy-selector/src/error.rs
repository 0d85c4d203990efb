use thiserror::Error;

/// A malformed selector string.
///
/// Positions are byte offsets into the selector as passed to
/// [`crate::parse_selector`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The selector is empty or only whitespace.
    #[error("empty selector")]
    Empty,

    /// A comma-separated group is empty, as in `A,,B` or `A,`.
    #[error("empty selector group at offset {position}")]
    EmptyGroup {
        /// Where the empty group starts.
        position: usize,
    },

    /// A `>` with no compound selector on one side.
    #[error("combinator at offset {position} is missing a selector on one side")]
    DanglingCombinator {
        /// Where the missing selector was expected.
        position: usize,
    },

    /// A `[` without its closing `]`.
    #[error("unterminated attribute selector starting at offset {position}")]
    UnterminatedAttribute {
        /// Offset of the opening `[`.
        position: usize,
    },

    /// A quoted value without its closing quote.
    #[error("unterminated string starting at offset {position}")]
    UnterminatedString {
        /// Offset of the opening quote.
        position: usize,
    },

    /// An attribute operator outside `=`, `|=`, `^=`, `$=`, `*=`.
    #[error("unknown attribute operator `{operator}` at offset {position}")]
    UnknownOperator {
        /// The operator as written.
        operator: String,
        /// Offset of the operator.
        position: usize,
    },

    /// `[` not followed by an attribute name.
    #[error("missing attribute name at offset {position}")]
    MissingAttributeName {
        /// Where the name was expected.
        position: usize,
    },

    /// An operator not followed by a value, as in `[a=]`.
    #[error("missing attribute value at offset {position}")]
    MissingAttributeValue {
        /// Where the value was expected.
        position: usize,
    },

    /// `#` not followed by an identifier.
    #[error("`#` at offset {position} is not followed by an identifier")]
    EmptyId {
        /// Offset of the `#`.
        position: usize,
    },

    /// A second `#id` in the same compound selector.
    #[error("compound selector already has an id; second `#` at offset {position}")]
    DuplicateId {
        /// Offset of the second `#`.
        position: usize,
    },

    /// A character that cannot appear at this point.
    #[error("unexpected character {character:?} at offset {position}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Its offset.
        position: usize,
    },
}

impl SyntaxError {
    /// Byte offset the error points at, if any.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::EmptyGroup { position }
            | Self::DanglingCombinator { position }
            | Self::UnterminatedAttribute { position }
            | Self::UnterminatedString { position }
            | Self::UnknownOperator { position, .. }
            | Self::MissingAttributeName { position }
            | Self::MissingAttributeValue { position }
            | Self::EmptyId { position }
            | Self::DuplicateId { position }
            | Self::UnexpectedCharacter { position, .. } => Some(*position),
        }
    }
}
