//! Bracket notation parser.
//!
//! A single left-to-right pass with an explicit [`Cursor`]; there is no
//! backtracking. Grammar:
//!
//! ```text
//! tree        := ws* [ node ] ws*
//! node        := value ws* [ '(' ws* [ node ] ws* [ ',' ws* [ node ] ws* ] ')' ]
//! value       := quoted | bare
//! quoted      := '"' any-char-except-'"'* '"'
//! bare        := (char except whitespace, '(', ')', ',')*
//! ```
//!
//! An empty slot is an absent child. `5(3)` is read as a node with only a
//! left child.

use miette::SourceSpan;
use tracing::{debug, trace};

use crate::codec::BracketCodec;
use crate::errors::{point, BracketError, ErrorKind, ErrorReporting, SourceContext};
use crate::tree::{BinaryTree, Node};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses the content of `source` into a tree.
///
/// Whitespace-only input yields an empty tree. Any error aborts the whole
/// parse; no partial tree is ever returned.
pub fn parse<T>(codec: &BracketCodec<T>, source: &SourceContext) -> Result<BinaryTree<T>, BracketError> {
    debug!(name = %source.name, len = source.content.len(), "parsing bracket notation");

    let mut parser = Parser {
        codec,
        source,
        cursor: Cursor::new(&source.content),
    };

    parser.cursor.skip_whitespace();
    if parser.cursor.at_end() {
        return Ok(BinaryTree::new());
    }

    let root = parser.parse_node(0)?;
    parser.cursor.skip_whitespace();
    if let Some(found) = parser.cursor.peek() {
        return Err(source.trailing_content(&describe(Some(found)), parser.cursor.offset()));
    }

    let tree = BinaryTree::from_root(root);
    debug!(nodes = tree.len(), "parsed bracket notation");
    Ok(tree)
}

// ============================================================================
// CURSOR
// ============================================================================

/// Read position over the input, as a byte offset.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    /// Consumes `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.offset += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.bump_while(char::is_whitespace);
    }

    /// Consumes characters while `predicate` holds and returns them.
    pub fn bump_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let start = self.offset;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.offset += ch.len_utf8();
        }
        &self.text[start..self.offset]
    }
}

/// Characters that end a bare value token.
pub fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | ',')
}

// ============================================================================
// PARSER
// ============================================================================

struct Parser<'a, T> {
    codec: &'a BracketCodec<T>,
    source: &'a SourceContext,
    cursor: Cursor<'a>,
}

impl<'a, T> Parser<'a, T> {
    fn parse_node(&mut self, depth: usize) -> Result<Node<T>, BracketError> {
        let limit = self.codec.options().max_depth;
        if depth >= limit {
            return Err(self
                .source
                .report(ErrorKind::DepthExceeded { limit }, point(self.cursor.offset())));
        }

        let value = self.read_value()?;
        self.cursor.skip_whitespace();
        if !self.cursor.eat('(') {
            return Ok(Node::leaf(value));
        }
        self.cursor.skip_whitespace();

        let left = match self.cursor.peek() {
            Some(',') | Some(')') => None,
            None => return Err(self.unbalanced()),
            Some(_) => {
                let node = self.parse_node(depth + 1)?;
                self.cursor.skip_whitespace();
                Some(node)
            }
        };

        let right = if self.cursor.eat(',') {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(')') => None,
                None => return Err(self.unbalanced()),
                Some(_) => {
                    let node = self.parse_node(depth + 1)?;
                    self.cursor.skip_whitespace();
                    Some(node)
                }
            }
        } else {
            match self.cursor.peek() {
                Some(')') | None => None,
                found => {
                    return Err(self.source.unexpected_token(
                        "',' or ')'",
                        &describe(found),
                        self.cursor.offset(),
                    ))
                }
            }
        };

        if !self.cursor.eat(')') {
            return Err(self.unbalanced());
        }

        trace!(depth, left = left.is_some(), right = right.is_some(), "parsed node");
        Ok(Node::with_children(value, left, right))
    }

    /// Reads one value token, strips its quotes and converts it.
    fn read_value(&mut self) -> Result<T, BracketError> {
        let start = self.cursor.offset();
        let token = if self.cursor.eat('"') {
            let inner = self.cursor.bump_while(|ch| ch != '"');
            if !self.cursor.eat('"') {
                return Err(self
                    .source
                    .report(ErrorKind::UnterminatedQuote, SourceSpan::from(start..start + 1)));
            }
            inner
        } else {
            self.cursor.bump_while(|ch| !is_delimiter(ch))
        };
        let span = SourceSpan::from(start..self.cursor.offset());

        let Some(values) = self.codec.value_codec() else {
            return Err(self.source.report(ErrorKind::MissingConverter, span));
        };
        values.parse_value(token).map_err(|reason| {
            self.source.report(
                ErrorKind::InvalidValue {
                    token: token.to_string(),
                    reason: reason.to_string(),
                },
                span,
            )
        })
    }

    fn unbalanced(&self) -> BracketError {
        self.source
            .unbalanced(&describe(self.cursor.peek()), self.cursor.offset())
    }
}

fn describe(found: Option<char>) -> String {
    match found {
        Some(ch) => format!("'{}'", ch),
        None => "end of input".to_string(),
    }
}
