//! Binary trees in bracket notation.
//!
//! ```
//! use bracket_tree::BracketCodec;
//!
//! let codec = BracketCodec::<i32>::display();
//! let tree = codec.parse("5(3(,4),8)").unwrap();
//! let root = tree.root().unwrap();
//! assert_eq!(*root.value(), 5);
//! assert!(root.left().unwrap().left().is_none());
//! assert_eq!(codec.serialize(&tree).unwrap(), "5(3(,4),8)");
//! ```

pub use crate::codec::{BracketCodec, DisplayCodec, FnCodec, ParseOptions, ValueCodec};
pub use crate::errors::{BracketError, ErrorCategory, ErrorKind};
pub use crate::generator::{GeneratorLimits, RandomTreeGenerator};
pub use crate::tree::{BinaryTree, Node};

pub mod cli;
pub mod codec;
pub mod errors;
pub mod generator;
pub mod tree;
