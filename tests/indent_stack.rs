//! Indent-level stack as a grammar walker drives it

use reindent::layout::{IndentStack, TokenClass};

#[test]
fn test_real_and_virtual_levels_cancel() {
    let mut stack = IndentStack::new();
    stack.push(TokenClass::ReservedWord);
    let before = stack.curr_level();

    stack.push(TokenClass::ReservedWord);
    stack.push(TokenClass::VirtualRoundBracket);
    assert_eq!(stack.curr_level(), before + 1);

    assert_eq!(stack.pop(), Some(TokenClass::VirtualRoundBracket));
    assert_eq!(stack.pop(), Some(TokenClass::ReservedWord));
    assert_eq!(stack.curr_level(), before);
}

#[test]
fn test_running_level_matches_weights() {
    let kinds = [
        TokenClass::ReservedWord,
        TokenClass::VirtualRoundBracket,
        TokenClass::Identifier,
        TokenClass::VirtualRoundBracket,
        TokenClass::ReservedWord,
    ];
    let mut stack = IndentStack::new();
    for kind in kinds {
        stack.indent(kind);
    }
    assert_eq!(stack.curr_level(), 3);
    assert_eq!(stack.depth(), 5);

    while stack.unindent().is_some() {}
    assert_eq!(stack.curr_level(), 0);
    assert!(stack.is_empty());
}

#[test]
fn test_closing_line_aligns_to_level_before_nesting() {
    let mut stack = IndentStack::new();
    stack.indent(TokenClass::ReservedWord);
    stack.indent(TokenClass::ReservedWord);

    // `end else begin`: close, then reopen on the same line
    stack.begin_line();
    stack.unindent();
    stack.indent(TokenClass::ReservedWord);
    assert_eq!(stack.min_level(), 1);
    assert_eq!(stack.curr_level(), 2);

    // body of a single-statement branch closes after its own line
    stack.begin_line();
    stack.unindent_next();
    assert_eq!(stack.min_level(), 2);
    stack.begin_line();
    assert_eq!(stack.min_level(), 1);
}
