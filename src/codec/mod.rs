//! Bracket notation codec.
//!
//! Bracket notation writes a node as `value(left,right)`, recursively, where
//! an empty slot means the child is absent and a leaf carries no parenthesis
//! group at all: `5(3(,4),8)`.
//!
//! The tree structure never looks inside node values; converting between a
//! value token and `T` is delegated to a [`ValueCodec`] supplied when the
//! [`BracketCodec`] is built.

use std::error::Error as StdError;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::{BracketError, SourceContext};
use crate::tree::BinaryTree;

pub mod parser;
pub mod serializer;

/// Boxed conversion failure reported by a [`ValueCodec`].
pub type ConversionError = Box<dyn StdError + Send + Sync>;

/// Default nesting limit for [`ParseOptions`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

// ============================================================================
// VALUE CONVERSION
// ============================================================================

/// Two-way conversion between node values and value tokens.
pub trait ValueCodec<T> {
    /// Converts token text (quotes already stripped) into a value.
    fn parse_value(&self, token: &str) -> Result<T, ConversionError>;

    /// Renders a value as token text, before any quoting.
    fn format_value(&self, value: &T) -> String;
}

/// A [`ValueCodec`] built from a pair of closures.
pub struct FnCodec<P, F> {
    parse: P,
    format: F,
}

impl<P, F> FnCodec<P, F> {
    pub fn new(parse: P, format: F) -> Self {
        Self { parse, format }
    }
}

impl<T, E, P, F> ValueCodec<T> for FnCodec<P, F>
where
    P: Fn(&str) -> Result<T, E>,
    E: Into<ConversionError>,
    F: Fn(&T) -> String,
{
    fn parse_value(&self, token: &str) -> Result<T, ConversionError> {
        (self.parse)(token).map_err(Into::into)
    }

    fn format_value(&self, value: &T) -> String {
        (self.format)(value)
    }
}

/// A [`ValueCodec`] for any type with `FromStr` and `Display`.
pub struct DisplayCodec<T>(PhantomData<fn() -> T>);

impl<T> DisplayCodec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for DisplayCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueCodec<T> for DisplayCodec<T>
where
    T: FromStr + Display,
    T::Err: Into<ConversionError>,
{
    fn parse_value(&self, token: &str) -> Result<T, ConversionError> {
        token.parse::<T>().map_err(Into::into)
    }

    fn format_value(&self, value: &T) -> String {
        value.to_string()
    }
}

// ============================================================================
// CODEC
// ============================================================================

/// Tunables for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest node nesting accepted before failing with `DepthExceeded`.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parser and serializer for bracket notation over values of type `T`.
pub struct BracketCodec<T> {
    values: Option<Box<dyn ValueCodec<T>>>,
    options: ParseOptions,
}

impl<T> BracketCodec<T> {
    /// Creates a codec that converts values with `values`.
    pub fn new(values: impl ValueCodec<T> + 'static) -> Self {
        Self {
            values: Some(Box::new(values)),
            options: ParseOptions::default(),
        }
    }

    /// Creates a codec from a parse closure and a format closure.
    pub fn from_fns<E>(
        parse: impl Fn(&str) -> Result<T, E> + 'static,
        format: impl Fn(&T) -> String + 'static,
    ) -> Self
    where
        E: Into<ConversionError> + 'static,
        T: 'static,
    {
        Self::new(FnCodec::new(parse, format))
    }

    /// Creates a codec from a parse closure, formatting values with `Display`.
    pub fn parsing_with<E>(parse: impl Fn(&str) -> Result<T, E> + 'static) -> Self
    where
        E: Into<ConversionError> + 'static,
        T: Display + 'static,
    {
        Self::from_fns(parse, |value: &T| value.to_string())
    }

    /// Creates a codec without a value converter. Parsing any value fails
    /// with `MissingConverter`.
    pub fn unconfigured() -> Self {
        Self {
            values: None,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub(crate) fn value_codec(&self) -> Option<&dyn ValueCodec<T>> {
        self.values.as_deref()
    }

    /// Parses bracket notation into a new tree.
    pub fn parse(&self, text: &str) -> Result<BinaryTree<T>, BracketError> {
        parser::parse(self, &SourceContext::inline(text))
    }

    /// Parses bracket notation, naming the source in diagnostics.
    pub fn parse_named(&self, name: &str, text: &str) -> Result<BinaryTree<T>, BracketError> {
        parser::parse(self, &SourceContext::from_file(name, text))
    }

    /// Parses `text` and replaces `tree` with the result. On failure `tree`
    /// is left untouched.
    pub fn parse_into(&self, tree: &mut BinaryTree<T>, text: &str) -> Result<(), BracketError> {
        let parsed = self.parse(text)?;
        tree.replace(parsed);
        Ok(())
    }

    /// Writes a tree in bracket notation.
    pub fn serialize(&self, tree: &BinaryTree<T>) -> Result<String, BracketError> {
        serializer::serialize(self, tree)
    }
}

impl<T> BracketCodec<T>
where
    T: FromStr + Display + 'static,
    T::Err: Into<ConversionError>,
{
    /// Codec using `FromStr` to parse values and `Display` to write them.
    pub fn display() -> Self {
        Self::new(DisplayCodec::<T>::new())
    }
}

impl BracketCodec<String> {
    /// Codec whose values are the token text itself.
    pub fn text() -> Self {
        Self::display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_codec_round_trips_integers() {
        let codec = DisplayCodec::<i64>::new();
        let value = codec.parse_value("-42").unwrap();
        assert_eq!(value, -42);
        assert_eq!(codec.format_value(&value), "-42");
        assert!(codec.parse_value("4x").is_err());
    }

    #[test]
    fn test_fn_codec_uses_closures() {
        let codec = FnCodec::new(
            |token: &str| token.parse::<u8>().map(|v| v * 2),
            |value: &u8| format!("{}", value / 2),
        );
        let parsed: u8 = ValueCodec::<u8>::parse_value(&codec, "21").unwrap();
        assert_eq!(parsed, 42);
        assert_eq!(ValueCodec::<u8>::format_value(&codec, &42), "21");
    }

    #[test]
    fn test_parse_options_deserialize_with_defaults() {
        let options: ParseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);

        let options: ParseOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(options.max_depth, 8);
    }
}
