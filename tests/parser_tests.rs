// tests/parser_tests.rs

use bracket_tree::{BinaryTree, BracketCodec, ErrorCategory, ErrorKind, Node};

fn ints() -> BracketCodec<i32> {
    BracketCodec::display()
}

// A helper to build the expected tree for `5(3(,4),8)`.
fn nested_sample() -> BinaryTree<i32> {
    BinaryTree::from_root(Node::with_children(
        5,
        Some(Node::with_children(3, None, Some(Node::leaf(4)))),
        Some(Node::leaf(8)),
    ))
}

// ---
// Well-formed input
// ---

#[test]
fn test_parse_single_value() {
    let tree = ints().parse("5").unwrap();
    let root = tree.root().unwrap();
    assert_eq!(*root.value(), 5);
    assert!(root.is_leaf());
}

#[test]
fn test_parse_two_children() {
    let tree = ints().parse("5(3,8)").unwrap();
    let root = tree.root().unwrap();
    assert_eq!(*root.value(), 5);
    assert_eq!(*root.left().unwrap().value(), 3);
    assert_eq!(*root.right().unwrap().value(), 8);
    assert!(root.left().unwrap().is_leaf());
    assert!(root.right().unwrap().is_leaf());
}

#[test]
fn test_parse_absent_left_child() {
    let tree = ints().parse("5(,8)").unwrap();
    let root = tree.root().unwrap();
    assert!(root.left().is_none());
    assert_eq!(*root.right().unwrap().value(), 8);
}

#[test]
fn test_parse_nested() {
    assert_eq!(ints().parse("5(3(,4),8)").unwrap(), nested_sample());
}

#[test]
fn test_parse_left_only_forms() {
    let expected = BinaryTree::from_root(Node::with_children(1, Some(Node::leaf(2)), None));
    assert_eq!(ints().parse("1(2)").unwrap(), expected);
    assert_eq!(ints().parse("1(2,)").unwrap(), expected);
}

#[test]
fn test_parse_empty_group_is_leaf() {
    assert_eq!(ints().parse("7(,)").unwrap(), BinaryTree::from_root(Node::leaf(7)));
}

#[test]
fn test_whitespace_is_insignificant() {
    let spaced = ints().parse("5 ( 3 , 8 )").unwrap();
    assert_eq!(spaced, ints().parse("5(3,8)").unwrap());

    let padded = ints().parse("\n\t 5(3(, 4) ,8)  \n").unwrap();
    assert_eq!(padded, nested_sample());
}

#[test]
fn test_blank_input_is_empty_tree() {
    assert!(ints().parse("").unwrap().is_empty());
    assert!(ints().parse("   \n").unwrap().is_empty());
}

#[test]
fn test_negative_values() {
    let tree = ints().parse("-1(-2,-3)").unwrap();
    assert_eq!(tree.values(), vec![&-1, &-2, &-3]);
}

#[test]
fn test_quoted_values_with_text_codec() {
    let tree = BracketCodec::<String>::text()
        .parse(r#""a b"("c","d")"#)
        .unwrap();
    let root = tree.root().unwrap();
    assert_eq!(root.value(), "a b");
    assert_eq!(root.left().unwrap().value(), "c");
    assert_eq!(root.right().unwrap().value(), "d");
}

#[test]
fn test_quoted_values_may_hold_delimiters() {
    let tree = BracketCodec::<String>::text()
        .parse(r#""x,(y)"(,"")"#)
        .unwrap();
    let root = tree.root().unwrap();
    assert_eq!(root.value(), "x,(y)");
    assert_eq!(root.right().unwrap().value(), "");
}

#[test]
fn test_duplicate_values_are_allowed() {
    let tree = ints().parse("1(1,1(1,1))").unwrap();
    assert_eq!(tree.len(), 5);
}

#[test]
fn test_custom_closure_codec() {
    let codec = BracketCodec::from_fns(
        |token: &str| token.parse::<u32>().map(|n| n * 10),
        |value: &u32| (value / 10).to_string(),
    );
    let tree = codec.parse("1(2,3)").unwrap();
    assert_eq!(tree.values(), vec![&10, &20, &30]);
    assert_eq!(codec.serialize(&tree).unwrap(), "1(2,3)");
}

#[test]
fn test_parse_into_replaces_only_on_success() {
    let codec = ints();
    let mut tree = codec.parse("1").unwrap();

    codec.parse_into(&mut tree, "5(3(,4),8)").unwrap();
    assert_eq!(tree, nested_sample());

    assert!(codec.parse_into(&mut tree, "9(1,2").is_err());
    assert_eq!(tree, nested_sample());
}

// ---
// Malformed input
// ---

#[test]
fn test_missing_closing_paren() {
    let input = "5(3,8";
    let error = ints().parse(input).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnbalancedParentheses { .. }));
    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert_eq!(error.offset(), Some(input.len()));
}

#[test]
fn test_unclosed_after_open() {
    let error = ints().parse("5(").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnbalancedParentheses { .. }));
    assert_eq!(error.offset(), Some(2));

    let error = ints().parse("5(3,").unwrap_err();
    assert_eq!(error.offset(), Some(4));
}

#[test]
fn test_trailing_content() {
    let error = ints().parse("5(3,8)x").unwrap_err();
    assert_eq!(
        error.kind,
        ErrorKind::TrailingContent {
            found: "'x'".into()
        }
    );
    assert_eq!(error.offset(), Some(6));
}

#[test]
fn test_second_root_is_trailing_content() {
    let error = ints().parse("1 2").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::TrailingContent { .. }));
    assert_eq!(error.offset(), Some(2));
}

#[test]
fn test_stray_closing_paren() {
    let error = ints().parse("5(3,8))").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::TrailingContent { .. }));
    assert_eq!(error.offset(), Some(6));
}

#[test]
fn test_invalid_value_token() {
    let error = ints().parse("5(x,8)").unwrap_err();
    match &error.kind {
        ErrorKind::InvalidValue { token, .. } => assert_eq!(token, "x"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
    assert_eq!(error.category(), ErrorCategory::Conversion);
    assert_eq!(error.offset(), Some(2));
}

#[test]
fn test_empty_value_token_goes_through_converter() {
    // An empty token before '(' still names a node, so integers reject it.
    let error = ints().parse("(1,2)").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::InvalidValue { .. }));

    let tree = BracketCodec::<String>::text().parse("(1,2)").unwrap();
    assert_eq!(tree.root().unwrap().value(), "");
}

#[test]
fn test_missing_converter() {
    let codec = BracketCodec::<i32>::unconfigured();
    let error = codec.parse("5(3,8)").unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingConverter);
    assert_eq!(error.category(), ErrorCategory::Configuration);
}

#[test]
fn test_named_source_in_diagnostic() {
    use miette::Diagnostic;

    let error = ints().parse_named("tree.txt", "5(3,8").unwrap_err();
    assert!(error.source_code().is_some());
    let code = error.code().unwrap().to_string();
    assert_eq!(code, "bracket_tree::syntax::unbalanced_parentheses");
}
