//! Block states and their textual form.
//!
//! A block state is a namespaced identifier plus an ordered list of
//! `key=value` properties, written as
//!
//! ```text
//! minecraft:oak_stairs[facing=north,half=bottom]
//! ```
//!
//! The bracket section is omitted when there are no properties. Identifier
//! parts, keys and values are restricted to word characters (alphanumerics
//! and `_`); there is no escaping, so only states built from that class
//! survive a format/parse round trip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between namespace and path in an identifier.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Errors produced while parsing block-state text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected a namespaced identifier like `minecraft:stone`, found `{0}`")]
    InvalidName(String),

    #[error("unclosed property list in `{0}`")]
    UnclosedProperties(String),

    #[error("malformed property `{segment}` in `{input}`")]
    InvalidProperty { segment: String, input: String },

    #[error("unexpected `{rest}` after block state `{input}`")]
    TrailingInput { rest: String, input: String },
}

/// A block type and its property modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    pub name: String,
    /// Insertion order is kept when formatting. Keys may repeat.
    pub properties: Vec<(String, String)>,
}

impl BlockState {
    /// A state with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Value of the first property named `key`.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn namespace(&self) -> Option<&str> {
        self.name.split_once(NAMESPACE_SEPARATOR).map(|(ns, _)| ns)
    }

    /// Identifier without its namespace. Falls back to the whole name when
    /// there is no separator.
    pub fn path(&self) -> &str {
        self.name
            .split_once(NAMESPACE_SEPARATOR)
            .map_or(self.name.as_str(), |(_, path)| path)
    }

    /// Check that this state formats to text that parses back to itself.
    ///
    /// States built with [`BlockState::new`] are not checked on construction,
    /// so anything assembled in code should pass through here before it is
    /// sent to a server.
    pub fn validate(&self) -> Result<(), ParseError> {
        let name_ok = self
            .name
            .split_once(NAMESPACE_SEPARATOR)
            .is_some_and(|(ns, path)| is_word(ns) && is_word(path));
        if !name_ok {
            return Err(ParseError::InvalidName(self.name.clone()));
        }
        for (key, value) in &self.properties {
            if !is_word(key) || !is_word(value) {
                return Err(ParseError::InvalidProperty {
                    segment: format!("{}={}", key, value),
                    input: self.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse block-state text. All whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let input: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        Parser::new(&input).parse()
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.properties.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("]")
    }
}

impl FromStr for BlockState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Is `c` part of the grammar's word class?
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_word_char)
}

// ── Tokenizer ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Colon,
    Open,
    Close,
    Comma,
    Equals,
    /// Anything outside the grammar.
    Other,
}

/// Split whitespace-free input into `(byte_offset, token)` pairs.
fn tokenize(input: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            ':' => Token::Colon,
            '[' => Token::Open,
            ']' => Token::Close,
            ',' => Token::Comma,
            '=' => Token::Equals,
            c if is_word_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                Token::Word(&input[start..end])
            }
            _ => Token::Other,
        };
        tokens.push((start, token));
    }
    tokens
}

// ── Parser ───────────────────────────────────────────────────────────────

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<(usize, Token<'a>)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: tokenize(input),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).map(|&(_, t)| t)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Byte offset of the current token, or the end of input.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.input.len(), |&(offset, _)| offset)
    }

    fn parse(mut self) -> Result<BlockState, ParseError> {
        let name = self.parse_name()?;
        let mut state = BlockState::new(name);

        match self.advance() {
            None => return Ok(state),
            Some(Token::Open) => {}
            Some(_) => return Err(self.trailing(self.pos - 1)),
        }

        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedProperties(self.input.to_string())),
                Some(Token::Close) => {
                    self.pos += 1;
                    break;
                }
                Some(Token::Comma) => {
                    self.pos += 1;
                }
                Some(_) => {
                    let (key, value) = self.parse_property()?;
                    state.properties.push((key.to_string(), value.to_string()));
                }
            }
        }

        if self.pos < self.tokens.len() {
            return Err(self.trailing(self.pos));
        }
        Ok(state)
    }

    /// `Word ':' Word`, returned as a slice of the input.
    fn parse_name(&mut self) -> Result<&'a str, ParseError> {
        let input = self.input;
        let name_end = input.find('[').unwrap_or(input.len());
        let candidate = &input[..name_end];
        let invalid = || ParseError::InvalidName(candidate.to_string());

        let start = self.offset();
        match (self.advance(), self.advance(), self.advance()) {
            (Some(Token::Word(_)), Some(Token::Colon), Some(Token::Word(_))) => {}
            _ => return Err(invalid()),
        }
        let end = self.offset();
        // The identifier has to be followed by the property list or nothing.
        if !matches!(self.peek(), None | Some(Token::Open)) {
            return Err(invalid());
        }
        Ok(&input[start..end])
    }

    /// `Word '=' Word`, followed by `,` or `]`.
    fn parse_property(&mut self) -> Result<(&'a str, &'a str), ParseError> {
        let start = self.offset();
        let parsed = match (self.advance(), self.advance(), self.advance()) {
            (Some(Token::Word(key)), Some(Token::Equals), Some(Token::Word(value))) => {
                Some((key, value))
            }
            _ => None,
        };
        match (parsed, self.peek()) {
            (Some(pair), Some(Token::Comma | Token::Close)) => Ok(pair),
            (Some(pair), None) => {
                // Let the caller report the missing `]`.
                Ok(pair)
            }
            _ => Err(ParseError::InvalidProperty {
                segment: segment_at(self.input, start).to_string(),
                input: self.input.to_string(),
            }),
        }
    }

    fn trailing(&self, token_index: usize) -> ParseError {
        let offset = self
            .tokens
            .get(token_index)
            .map_or(self.input.len(), |&(offset, _)| offset);
        ParseError::TrailingInput {
            rest: self.input[offset..].to_string(),
            input: self.input.to_string(),
        }
    }
}

/// The property segment starting at `start`, up to the next `,` or `]`.
fn segment_at(input: &str, start: usize) -> &str {
    let rest = &input[start..];
    let end = rest.find([',', ']']).unwrap_or(rest.len());
    &rest[..end]
}
