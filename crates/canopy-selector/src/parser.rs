//! Selector string parsing.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::{AttributeTest, Combinator, CompoundStep, ParsedSelector, SelectorChain, SyntaxError};

/// Check if a character can appear in a type or attribute name.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

/// Check if a character can appear in an `#id` value.
///
/// Everything up to whitespace or selector punctuation is part of the id,
/// so `#a.b` is the literal id `a.b`.
fn is_id_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '>' | ',' | '[' | ']' | '#' | '\'' | '"')
}

/// Parse a raw selector string into a [`ParsedSelector`].
///
/// Supports:
/// - Type selectors: `View`, `TextInput`, and the wildcard `*`
/// - Id selectors: `#submit` (compared literally, periods included)
/// - Attribute selectors: `[value]`, `[value='x']`, `|=`, `^=`, `$=`, `*=`
/// - Compound selectors: `TextInput#name[editable='true']`
/// - Combinators: `A B` (descendant) and `A > B` (child)
/// - Selector lists: `A, B`
///
/// # Errors
///
/// Returns a [`SyntaxError`] for empty input, empty groups, dangling `>`,
/// unterminated brackets or quotes, and unknown attribute operators.
pub fn parse_selector(raw: &str) -> Result<ParsedSelector, SyntaxError> {
    if raw.trim().is_empty() {
        return Err(SyntaxError::Empty);
    }

    let mut parser = Parser {
        chars: raw.char_indices().peekable(),
        len: raw.len(),
    };

    let mut chains = Vec::new();
    loop {
        chains.push(parser.parse_chain()?);
        match parser.chars.next() {
            None => break,
            Some((_, ',')) => {}
            Some((position, character)) => {
                return Err(SyntaxError::UnexpectedCharacter {
                    character,
                    position,
                });
            }
        }
    }

    Ok(ParsedSelector { chains })
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
}

impl Parser<'_> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Offset of the next character, or the end of input.
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.len, |&(i, _)| i)
    }

    /// Skip whitespace, returning whether any was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.peek().is_some_and(char::is_whitespace) {
            let _ = self.chars.next();
            skipped = true;
        }
        skipped
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|&c| keep(c)) {
            out.push(c);
            let _ = self.chars.next();
        }
        out
    }

    /// Parse one comma-separated group, stopping before `,` or end of input.
    ///
    /// Steps are collected left-to-right, then reversed so the rightmost
    /// (subject) is easily accessible.
    fn parse_chain(&mut self) -> Result<SelectorChain, SyntaxError> {
        let _ = self.skip_whitespace();

        let mut compounds: Vec<CompoundStep> = Vec::new();
        let mut combinators_between: Vec<Combinator> = Vec::new();

        loop {
            let position = self.offset();
            match self.peek() {
                None | Some(',') if compounds.is_empty() => {
                    return Err(SyntaxError::EmptyGroup { position });
                }
                // Invalid: `> A`, `A >`, `A > > B`
                None | Some(',' | '>') => {
                    return Err(SyntaxError::DanglingCombinator { position });
                }
                Some(_) => {}
            }

            compounds.push(self.parse_compound()?);

            let had_whitespace = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    let _ = self.chars.next();
                    let _ = self.skip_whitespace();
                    combinators_between.push(Combinator::Child);
                }
                Some(_) if had_whitespace => combinators_between.push(Combinator::Descendant),
                Some(character) => {
                    return Err(SyntaxError::UnexpectedCharacter {
                        character,
                        position: self.offset(),
                    });
                }
            }
        }

        // For "A > B C" we have compounds [A, B, C] and combinators [Child, Descendant].
        // After popping the subject (C) we want [(Descendant, B), (Child, A)].
        let Some(subject) = compounds.pop() else {
            return Err(SyntaxError::Empty);
        };
        let combinators = compounds
            .into_iter()
            .zip(combinators_between)
            .rev()
            .map(|(compound, combinator)| (combinator, compound))
            .collect();

        Ok(SelectorChain {
            subject,
            combinators,
        })
    }

    /// Parse a compound selector: `Type`, `*`, `#id` and `[...]` tests with
    /// no whitespace between them.
    fn parse_compound(&mut self) -> Result<CompoundStep, SyntaxError> {
        let mut step = CompoundStep::default();
        let mut consumed = false;

        match self.peek() {
            Some('*') => {
                let _ = self.chars.next();
                consumed = true;
            }
            Some(c) if is_name_char(c) => {
                step.type_name = Some(self.take_while(is_name_char));
                consumed = true;
            }
            _ => {}
        }

        loop {
            let position = self.offset();
            match self.peek() {
                Some('#') => {
                    let _ = self.chars.next();
                    let id = self.take_while(is_id_char);
                    if id.is_empty() {
                        return Err(SyntaxError::EmptyId { position });
                    }
                    if step.id.is_some() {
                        return Err(SyntaxError::DuplicateId { position });
                    }
                    step.id = Some(id);
                }
                Some('[') => step.attributes.push(self.parse_attribute()?),
                _ => break,
            }
            consumed = true;
        }

        if consumed {
            return Ok(step);
        }
        let position = self.offset();
        match self.peek() {
            Some(character) => Err(SyntaxError::UnexpectedCharacter {
                character,
                position,
            }),
            None => Err(SyntaxError::DanglingCombinator { position }),
        }
    }

    /// Parse `[name]` or `[name op value]`, starting at the `[`.
    fn parse_attribute(&mut self) -> Result<AttributeTest, SyntaxError> {
        let open = self.offset();
        let _ = self.chars.next(); // consume '['
        let _ = self.skip_whitespace();

        let name_position = self.offset();
        let name = self.take_while(is_name_char);
        if name.is_empty() {
            return match self.peek() {
                None => Err(SyntaxError::UnterminatedAttribute { position: open }),
                Some(_) => Err(SyntaxError::MissingAttributeName {
                    position: name_position,
                }),
            };
        }

        let _ = self.skip_whitespace();

        let op_position = self.offset();
        let Some(op) = self.chars.next().map(|(_, c)| c) else {
            return Err(SyntaxError::UnterminatedAttribute { position: open });
        };

        let build: fn(String, String) -> AttributeTest = match op {
            ']' => return Ok(AttributeTest::Exists(name)),
            '=' => AttributeTest::Equals,
            '|' | '^' | '$' | '*' | '~' | '!' => {
                if self.peek() != Some('=') {
                    return Err(SyntaxError::UnknownOperator {
                        operator: op.to_string(),
                        position: op_position,
                    });
                }
                let _ = self.chars.next();
                match op {
                    '|' => AttributeTest::DashMatch,
                    '^' => AttributeTest::PrefixMatch,
                    '$' => AttributeTest::SuffixMatch,
                    '*' => AttributeTest::SubstringMatch,
                    _ => {
                        return Err(SyntaxError::UnknownOperator {
                            operator: format!("{op}="),
                            position: op_position,
                        });
                    }
                }
            }
            character if self.peek() == Some('=') && !character.is_alphanumeric() => {
                return Err(SyntaxError::UnknownOperator {
                    operator: format!("{character}="),
                    position: op_position,
                });
            }
            character => {
                return Err(SyntaxError::UnexpectedCharacter {
                    character,
                    position: op_position,
                });
            }
        };

        let value = self.parse_value(open)?;

        let _ = self.skip_whitespace();
        match self.chars.next() {
            Some((_, ']')) => Ok(build(name, value)),
            Some((position, character)) => Err(SyntaxError::UnexpectedCharacter {
                character,
                position,
            }),
            None => Err(SyntaxError::UnterminatedAttribute { position: open }),
        }
    }

    /// Parse an attribute value: a quoted string (quotes stripped, no escape
    /// processing) or a bare token.
    fn parse_value(&mut self, open: usize) -> Result<String, SyntaxError> {
        let _ = self.skip_whitespace();

        let position = self.offset();
        match self.peek() {
            None => Err(SyntaxError::UnterminatedAttribute { position: open }),
            Some(']') => Err(SyntaxError::MissingAttributeValue { position }),
            Some(quote @ ('"' | '\'')) => {
                let _ = self.chars.next(); // consume opening quote
                let mut value = String::new();
                for (_, c) in self.chars.by_ref() {
                    if c == quote {
                        return Ok(value);
                    }
                    value.push(c);
                }
                Err(SyntaxError::UnterminatedString { position })
            }
            Some(_) => Ok(self.take_while(|c| !c.is_whitespace() && c != ']')),
        }
    }
}
