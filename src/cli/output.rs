//! Handles all user-facing output for the CLI.
//!
//! The tree drawing only reads nodes through `value`, `left` and `right`.

use std::fmt::Display;
use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{BinaryTree, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
        }
    }
}

struct Pending<'a, T> {
    side: Side,
    node: &'a Node<T>,
    prefix: String,
    last: bool,
}

/// Prints a tree drawing to stdout.
pub fn print_tree<T: Display>(tree: &BinaryTree<T>) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_tree(&mut stdout, tree)
}

/// Draws `tree` one node per line, children indented under their parent.
pub fn write_tree<T: Display, W: WriteColor>(out: &mut W, tree: &BinaryTree<T>) -> io::Result<()> {
    let Some(root) = tree.root() else {
        writeln!(out, "(empty tree)")?;
        return Ok(());
    };

    write_value(out, root.value())?;
    let mut stack = Vec::new();
    push_children(&mut stack, root, "");

    while let Some(item) = stack.pop() {
        let branch = if item.last { "└─ " } else { "├─ " };
        write!(out, "{}{}", item.prefix, branch)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{} ", item.side.label())?;
        out.reset()?;
        write_value(out, item.node.value())?;

        let indent = if item.last { "   " } else { "│  " };
        push_children(&mut stack, item.node, &format!("{}{}", item.prefix, indent));
    }
    Ok(())
}

fn write_value<T: Display, W: WriteColor>(out: &mut W, value: &T) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "{}", value)?;
    out.reset()?;
    writeln!(out)
}

fn push_children<'a, T>(stack: &mut Vec<Pending<'a, T>>, node: &'a Node<T>, prefix: &str) {
    let children: Vec<(Side, &'a Node<T>)> = [(Side::Left, node.left()), (Side::Right, node.right())]
        .into_iter()
        .filter_map(|(side, child)| child.map(|child| (side, child)))
        .collect();
    let count = children.len();
    // Reversed so the left child is popped first.
    for (index, (side, child)) in children.into_iter().enumerate().rev() {
        stack.push(Pending {
            side,
            node: child,
            prefix: prefix.to_string(),
            last: index + 1 == count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    fn draw<T: Display>(tree: &BinaryTree<T>) -> String {
        let mut out = NoColor::new(Vec::new());
        write_tree(&mut out, tree).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_draws_nested_tree() {
        let tree = BinaryTree::from_root(Node::with_children(
            5,
            Some(Node::with_children(3, None, Some(Node::leaf(4)))),
            Some(Node::leaf(8)),
        ));
        let expected = "5\n├─ L 3\n│  └─ R 4\n└─ R 8\n";
        assert_eq!(draw(&tree), expected);
    }

    #[test]
    fn test_draws_empty_tree() {
        let tree: BinaryTree<i32> = BinaryTree::new();
        assert_eq!(draw(&tree), "(empty tree)\n");
    }
}
