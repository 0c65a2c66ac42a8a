//! Bracket notation writer.
//!
//! Output always parses back into an equal tree. Tokens are quoted when they
//! are empty or contain whitespace, `(`, `)` or `,`, or start with `"`.
//! The notation has no escape for `"` inside a quoted token, so a value that
//! needs quoting and contains `"` is rejected with `UnrepresentableValue`.

use crate::codec::{parser::is_delimiter, BracketCodec};
use crate::errors::{BracketError, ErrorKind};
use crate::tree::{BinaryTree, Node};

enum Step<'a, T> {
    Node(&'a Node<T>),
    Text(&'static str),
}

/// Writes `tree` in bracket notation. The empty tree is the empty string.
pub fn serialize<T>(codec: &BracketCodec<T>, tree: &BinaryTree<T>) -> Result<String, BracketError> {
    let values = codec
        .value_codec()
        .ok_or_else(|| BracketError::unlocated(ErrorKind::MissingConverter))?;

    let mut out = String::new();
    let mut steps: Vec<Step<'_, T>> = tree.root().map(Step::Node).into_iter().collect();

    while let Some(step) = steps.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Node(node) => {
                write_token(&mut out, &values.format_value(node.value()))?;
                if node.is_leaf() {
                    continue;
                }
                // Pushed in reverse: '(' left ',' right ')'
                steps.push(Step::Text(")"));
                steps.extend(node.right().map(Step::Node));
                steps.push(Step::Text(","));
                steps.extend(node.left().map(Step::Node));
                steps.push(Step::Text("("));
            }
        }
    }

    Ok(out)
}

/// Appends `token`, quoting it when it would otherwise not read back as-is.
pub fn write_token(out: &mut String, token: &str) -> Result<(), BracketError> {
    if !needs_quotes(token) {
        out.push_str(token);
        return Ok(());
    }
    if token.contains('"') {
        return Err(BracketError::unlocated(ErrorKind::UnrepresentableValue {
            value: token.to_string(),
        }));
    }
    out.push('"');
    out.push_str(token);
    out.push('"');
    Ok(())
}

fn needs_quotes(token: &str) -> bool {
    token.is_empty() || token.starts_with('"') || token.chars().any(is_delimiter)
}
