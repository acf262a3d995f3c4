//! Tests for the TokenStream consumption API

use lexstream::{StreamError, Token, TokenStream};

use crate::common::{Kind, stream, tokens};

// =============================================================================
// Construction and order
// =============================================================================

#[test]
fn test_all_round_trips_source_order() {
    let input = tokens(&["a", "b", "c"]);
    let stream = TokenStream::from_tokens(input.clone());

    assert_eq!(stream.all(), input);
    assert_eq!(stream.len(), 3);
}

#[test]
fn test_all_does_not_consume() {
    let stream = stream(&["a", "b"]);
    let _ = stream.all();
    assert_eq!(stream.len(), 2);
}

#[test]
fn test_next_token_yields_source_order_then_underflows() {
    let mut stream = stream(&["a", "b", "c"]);

    assert_eq!(stream.next_token().unwrap().content(), "a");
    assert_eq!(stream.next_token().unwrap().content(), "b");
    assert_eq!(stream.next_token().unwrap().content(), "c");
    assert_eq!(stream.len(), 0);
    assert!(matches!(stream.next_token(), Err(StreamError::Underflow)));
}

#[test]
fn test_empty_stream() {
    let stream: TokenStream<Kind> = TokenStream::new();
    assert!(stream.is_empty());
    assert_eq!(stream.len(), 0);
}

#[test]
fn test_from_iterator() {
    let stream: TokenStream<Kind> = tokens(&["x", "y"]).into_iter().collect();
    assert_eq!(stream.len(), 2);
}

// =============================================================================
// Clone independence
// =============================================================================

#[test]
fn test_clone_is_independent() {
    let mut original = stream(&["a", "b"]);
    let mut copy = original.clone();

    original.next().unwrap();
    assert_eq!(original.len(), 1);
    assert_eq!(copy.len(), 2);

    copy.next().unwrap();
    copy.next().unwrap();
    assert_eq!(original.len(), 1);
}

// =============================================================================
// Prepend
// =============================================================================

#[test]
fn test_prepend_becomes_next() {
    let mut stream = stream(&["b"]);
    stream.prepend(Token::new("a", Kind::Punct));

    assert_eq!(stream.next().unwrap(), "a");
    assert_eq!(stream.next().unwrap(), "b");
}

// =============================================================================
// Lookahead: has / has_kind / has_any / get
// =============================================================================

#[test]
fn test_has_by_content() {
    let stream = stream(&["a", "b"]);

    assert!(stream.has("a"));
    assert!(!stream.has("b"));
    assert!(stream.has_at("b", 1));
}

#[test]
fn test_has_out_of_range_is_false() {
    let stream = stream(&["a"]);
    assert!(!stream.has_at("a", 1));
    assert!(!stream.has_at("a", 100));
}

#[test]
fn test_has_kind() {
    let mut stream = TokenStream::from_tokens(vec![
        Token::new("1", Kind::Number),
        Token::new("x", Kind::Ident),
    ]);

    assert!(stream.has_kind(&Kind::Number));
    assert!(!stream.has_kind(&Kind::Ident));
    assert!(stream.has_kind_at(&Kind::Ident, 1));
    assert!(!stream.has_kind_at(&Kind::Ident, 2));

    stream.next().unwrap();
    assert!(stream.has_kind(&Kind::Ident));
}

#[test]
fn test_has_any_short_circuits_on_first_match() {
    let stream = stream(&["+", "1"]);

    assert!(stream.has_any(&["-", "+", "*"]));
    assert!(!stream.has_any(&["*", "/"]));
    assert!(stream.has_any_at(&["1"], 1));
}

#[test]
fn test_has_and_get_agree() {
    let stream = stream(&["a", "b"]);

    assert!(stream.has_at("b", 1));
    assert_eq!(stream.get(1).unwrap(), "b");
}

#[test]
fn test_get_out_of_bounds() {
    let stream = stream(&["a"]);

    match stream.get(3) {
        Err(StreamError::OutOfBounds { index, length }) => {
            assert_eq!(index, 3);
            assert_eq!(length, 1);
        },
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
}

#[test]
fn test_get_does_not_consume() {
    let stream = stream(&["a"]);
    assert_eq!(stream.get(0).unwrap(), "a");
    assert_eq!(stream.len(), 1);
}

// =============================================================================
// Skipping and removal
// =============================================================================

#[test]
fn test_skip_discards_n_tokens() {
    let mut stream = stream(&["a", "b", "c"]);
    stream.skip(2).unwrap();

    assert_eq!(stream.next().unwrap(), "c");
}

#[test]
fn test_skip_beyond_length_underflows() {
    let mut stream = stream(&["a"]);
    assert!(matches!(stream.skip(2), Err(StreamError::Underflow)));
    // Underflow leaves the stream untouched
    assert_eq!(stream.len(), 1);
}

#[test]
fn test_skip_all_consumes_exactly_the_leading_run() {
    let mut stream = stream(&[";", ";", ";", "x", ";"]);
    stream.skip_all(";");

    assert_eq!(stream.len(), 2);
    assert_eq!(stream.next().unwrap(), "x");
    assert_eq!(stream.next().unwrap(), ";");
}

#[test]
fn test_remove_content_removes_all_matches() {
    let mut stream = stream(&["a", ";", "b", ";", "c"]);
    stream.remove_content(";");

    assert_eq!(stream.next().unwrap(), "a");
    assert_eq!(stream.next().unwrap(), "b");
    assert_eq!(stream.next().unwrap(), "c");
    assert!(stream.is_empty());
}

#[test]
fn test_remove_kind_preserves_survivor_order() {
    let mut stream = TokenStream::from_tokens(vec![
        Token::new("1", Kind::Number),
        Token::new("x", Kind::Ident),
        Token::new("2", Kind::Number),
        Token::new("y", Kind::Ident),
    ]);
    stream.remove_kind(&Kind::Number);

    assert_eq!(stream.next().unwrap(), "x");
    assert_eq!(stream.next().unwrap(), "y");
    assert!(stream.is_empty());
}

// =============================================================================
// Expectations
// =============================================================================

#[test]
fn test_expect_matching_content() {
    let mut stream = stream(&["(", "x"]);
    assert_eq!(stream.expect("(").unwrap(), "(");
    assert_eq!(stream.len(), 1);
}

#[test]
fn test_expect_mismatch_reports_both_tokens() {
    let mut stream = stream(&[")"]);

    match stream.expect("(") {
        Err(StreamError::UnexpectedToken { message, .. }) => {
            assert_eq!(message, "Unexpected token ')', expected '('");
        },
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn test_expect_on_empty_stream_underflows() {
    let mut stream: TokenStream<Kind> = TokenStream::new();
    assert!(matches!(stream.expect("("), Err(StreamError::Underflow)));
}

#[test]
fn test_expect_kind_mismatch_names_the_kind() {
    let mut stream = TokenStream::from_tokens(vec![Token::new("x", Kind::Ident)]);

    match stream.expect_kind(&Kind::Number) {
        Err(StreamError::UnexpectedToken { message, .. }) => {
            assert_eq!(message, "Unexpected token 'x', expected token of type 'number'");
        },
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn test_optional_consumes_only_on_match() {
    let mut stream = stream(&[";", "x"]);

    assert!(stream.optional(";"));
    assert!(!stream.optional(";"));
    assert_eq!(stream.next().unwrap(), "x");
}

// =============================================================================
// until
// =============================================================================

#[test]
fn test_until_stops_before_the_delimiter() {
    let mut stream = stream(&["a", "b", "END", "c"]);
    let mut before = stream.until("END");

    assert_eq!(before.next().unwrap(), "a");
    assert_eq!(before.next().unwrap(), "b");
    assert!(before.is_empty());

    // The delimiter is left in place
    assert!(stream.has("END"));
    assert_eq!(stream.len(), 2);
}

#[test]
fn test_until_missing_delimiter_consumes_everything() {
    let mut stream = stream(&["a", "b", "c"]);
    let all = stream.until("END");

    assert_eq!(all.len(), 3);
    assert!(stream.is_empty());
}

// =============================================================================
// end_of
// =============================================================================

#[test]
fn test_end_of_extracts_nested_region() {
    let mut stream = stream(&["(", "a", "(", "b", ")", "c", ")", "d"]);
    let inner = stream.end_of("(", ")").unwrap();

    let contents: Vec<&str> = inner.iter().map(Token::content).collect();
    assert_eq!(contents, vec!["a", "(", "b", ")", "c"]);

    // The balancing close was consumed; the trailing token remains
    assert_eq!(stream.next().unwrap(), "d");
    assert!(stream.is_empty());
}

#[test]
fn test_end_of_skips_tokens_before_open() {
    let mut stream = stream(&["f", "(", "x", ")", "y"]);
    let inner = stream.end_of("(", ")").unwrap();

    assert_eq!(inner.len(), 1);
    assert_eq!(stream.next().unwrap(), "y");
}

#[test]
fn test_end_of_missing_open_is_malformed() {
    let mut stream = stream(&["a", "b"]);

    match stream.end_of("(", ")") {
        Err(StreamError::MalformedStructure { open, close, .. }) => {
            assert_eq!(open, "(");
            assert_eq!(close, ")");
        },
        other => panic!("expected MalformedStructure, got {other:?}"),
    }
}

#[test]
fn test_end_of_unbalanced_is_malformed() {
    let mut stream = stream(&["(", "a", "(", "b", ")"]);
    assert!(matches!(stream.end_of("(", ")"), Err(StreamError::MalformedStructure { .. })));
}

#[test]
fn test_end_of_multi_character_markers() {
    let mut stream = stream(&["begin", "a", "end", "rest"]);
    let inner = stream.end_of("begin", "end").unwrap();

    assert_eq!(inner.len(), 1);
    assert_eq!(stream.next().unwrap(), "rest");
}

// =============================================================================
// delimited_list
// =============================================================================

#[test]
fn test_delimited_list_stops_at_interrupt() {
    let mut stream = stream(&["x", ",", "y", ",", "z", ")"]);

    let items: Vec<String> =
        stream.delimited_list(TokenStream::next, ",", Some(")")).unwrap();

    assert_eq!(items, vec!["x", "y", "z"]);
    // The interrupt token is left unconsumed
    assert!(stream.has(")"));
}

#[test]
fn test_delimited_list_without_interrupt_consumes_all() {
    let mut stream = stream(&["x", ",", "y"]);

    let items: Vec<String> = stream.delimited_list(TokenStream::next, ",", None).unwrap();

    assert_eq!(items, vec!["x", "y"]);
    assert!(stream.is_empty());
}

#[test]
fn test_delimited_list_wrong_delimiter_fails() {
    let mut stream = stream(&["x", ";", "y"]);

    let result: Result<Vec<String>, StreamError> =
        stream.delimited_list(TokenStream::next, ",", None);

    assert!(matches!(result, Err(StreamError::UnexpectedToken { .. })));
}

#[test]
fn test_delimited_list_on_empty_stream_is_empty() {
    let mut stream: TokenStream<Kind> = TokenStream::new();

    let items: Vec<String> = stream.delimited_list(TokenStream::next, ",", None).unwrap();
    assert!(items.is_empty());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn test_display_joins_tokens_with_spaces() {
    colored::control::set_override(false);
    let stream = stream(&["a", "b"]);
    assert_eq!(stream.to_string(), "(punctuation: a) (punctuation: b)");
}
