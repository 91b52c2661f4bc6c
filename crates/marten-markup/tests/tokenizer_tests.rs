//! Integration tests for the markup tokenizer.

use marten_markup::{Diagnostic, DiagnosticKind, Token, TokenKind, TokenizerState, tokenize};

/// Helper to tokenize a string and return tokens plus diagnostics.
fn lex(input: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    tokenize(input)
}

/// Helper to tokenize a string expected to be well-formed.
fn lex_clean(input: &str) -> Vec<Token> {
    let (tokens, diagnostics) = tokenize(input);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {diagnostics:?}"
    );
    tokens
}

#[test]
fn test_empty_input() {
    let (tokens, diagnostics) = lex("");
    assert!(tokens.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_whitespace_only_input() {
    let (tokens, diagnostics) = lex("  \n\t ");
    assert!(tokens.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_plain_content() {
    let tokens = lex_clean("Hello");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Content);
    assert_eq!(tokens[0].text, "Hello");
    assert_eq!(tokens[0].tag_name, None);
    assert_eq!(tokens[0].attributes, None);
}

#[test]
fn test_content_is_trimmed() {
    let tokens = lex_clean("  hi  ");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Content);
    assert_eq!(tokens[0].text, "hi");
    // Position points at the first non-whitespace character.
    assert_eq!(tokens[0].position, 2);
}

#[test]
fn test_open_tag() {
    let tokens = lex_clean("<div>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::OpenTag);
    assert_eq!(tokens[0].tag_name.as_deref(), Some("div"));
    assert_eq!(tokens[0].text, "<div>");
    assert_eq!(tokens[0].position, 0);
    // A tag without attributes carries no attribute list at all.
    assert_eq!(tokens[0].attributes, None);
}

#[test]
fn test_closing_tag() {
    let tokens = lex_clean("</div>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::ClosingTag);
    assert_eq!(tokens[0].tag_name.as_deref(), Some("div"));
    assert_eq!(tokens[0].text, "</div>");
}

#[test]
fn test_tag_sequence() {
    let tokens = lex_clean("<div>hi</div>");
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::OpenTag, TokenKind::Content, TokenKind::ClosingTag]
    );
    assert_eq!(tokens[1].text, "hi");
}

#[test]
fn test_void_element_is_reclassified() {
    let tokens = lex_clean(r#"<img src="a.png">"#);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::AutoClosingTag);
    assert_eq!(tokens[0].tag_name.as_deref(), Some("img"));
}

#[test]
fn test_self_closing_equivalence() {
    let plain = lex_clean("<br>");
    let explicit = lex_clean("<br/>");
    assert_eq!(plain.len(), 1);
    assert_eq!(explicit.len(), 1);
    assert_eq!(plain[0].kind, TokenKind::AutoClosingTag);
    assert_eq!(explicit[0].kind, TokenKind::AutoClosingTag);
    assert_eq!(plain[0].tag_name, explicit[0].tag_name);
}

#[test]
fn test_self_closing_with_space() {
    let tokens = lex_clean("<br />");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::AutoClosingTag);
    assert_eq!(tokens[0].text, "<br />");
}

#[test]
fn test_explicit_self_closing_non_void() {
    let tokens = lex_clean("<widget/>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::AutoClosingTag);
    assert_eq!(tokens[0].tag_name.as_deref(), Some("widget"));
}

#[test]
fn test_double_quoted_attribute() {
    let tokens = lex_clean(r#"<div id="main">"#);
    let attributes = tokens[0].attributes.as_ref().unwrap();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.get("id").unwrap().value, "main");
}

#[test]
fn test_single_quoted_attribute() {
    let tokens = lex_clean("<div id='main'>");
    let attributes = tokens[0].attributes.as_ref().unwrap();
    assert_eq!(attributes.get("id").unwrap().value, "main");
}

#[test]
fn test_unquoted_attribute() {
    let tokens = lex_clean("<a href=/index>");
    let attributes = tokens[0].attributes.as_ref().unwrap();
    assert_eq!(attributes.get("href").unwrap().value, "/index");
}

#[test]
fn test_boolean_attribute_has_empty_value() {
    let tokens = lex_clean("<input disabled>");
    assert_eq!(tokens[0].kind, TokenKind::AutoClosingTag);
    let attributes = tokens[0].attributes.as_ref().unwrap();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.get("disabled").unwrap().value, "");
}

#[test]
fn test_boolean_attribute_with_trailing_space() {
    // The re-examined `>` must not commit a second, nameless attribute.
    let tokens = lex_clean("<input disabled >");
    let attributes = tokens[0].attributes.as_ref().unwrap();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.get("disabled").unwrap().value, "");
}

#[test]
fn test_multiple_attributes_preserve_order() {
    let tokens = lex_clean(r#"<input type="text" id="name" disabled>"#);
    let attributes = tokens[0].attributes.as_ref().unwrap();
    let keys: Vec<&str> = attributes.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, vec!["type", "id", "disabled"]);
}

#[test]
fn test_class_attribute_is_split() {
    let tokens = lex_clean(r#"<div class="a b c">"#);
    let attributes = tokens[0].attributes.as_ref().unwrap();
    assert_eq!(attributes.len(), 3);
    let classes = attributes.get_all("class");
    let values: Vec<&str> = classes.iter().map(|a| a.value.as_str()).collect();
    assert_eq!(values, vec!["a", "b", "c"]);
    // First-match lookup returns the first class token.
    assert_eq!(attributes.get("class").unwrap().value, "a");
}

#[test]
fn test_empty_class_attribute_yields_no_entries() {
    let tokens = lex_clean(r#"<div class="">"#);
    assert_eq!(tokens[0].attributes, None);
}

#[test]
fn test_doctype() {
    let tokens = lex_clean("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Doctype);
    assert_eq!(tokens[0].tag_name, None);
    assert_eq!(tokens[0].text, "<!DOCTYPE html>");
}

#[test]
fn test_doctype_is_case_insensitive() {
    let tokens = lex_clean("<!doctype html>");
    assert_eq!(tokens[0].kind, TokenKind::Doctype);
}

#[test]
fn test_malformed_doctype_yields_diagnostic_and_no_token() {
    let (tokens, diagnostics) = lex("<!DOCTYP html>");
    assert!(tokens.iter().all(|token| token.kind != TokenKind::Doctype));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnexpectedCharacter);
    assert_eq!(diagnostics[0].state, TokenizerState::Doctype);
}

#[test]
fn test_comment() {
    let tokens = lex_clean("<!-- hello -->");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].text, "<!-- hello -->");
}

#[test]
fn test_comment_with_inner_dash() {
    // A lone `-` not followed by `>` returns to plain comment scanning.
    let tokens = lex_clean("<!--a-b-->");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].text, "<!--a-b-->");
}

#[test]
fn test_bogus_comment() {
    let tokens = lex_clean("<!foo bar>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::BogusComment);
    assert_eq!(tokens[0].text, "<!foo bar>");
}

#[test]
fn test_stray_less_than_stays_in_content() {
    let tokens = lex_clean("a < b");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Content);
    assert_eq!(tokens[0].text, "a < b");
}

#[test]
fn test_content_boundary_before_opening_tag() {
    let tokens = lex_clean("hi<p>there</p>");
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Content,
            TokenKind::OpenTag,
            TokenKind::Content,
            TokenKind::ClosingTag,
        ]
    );
    assert_eq!(tokens[0].text, "hi");
}

#[test]
fn test_round_trip_spans() {
    let markup = "<!DOCTYPE html>\n<div class=\"a b\">hi<br/></div><!-- done -->";
    let chars: Vec<char> = markup.chars().collect();
    let tokens = lex_clean(markup);
    assert_eq!(tokens.len(), 6);
    for token in &tokens {
        if token.kind == TokenKind::Content {
            continue;
        }
        let span: String = chars[token.position..token.position + token.text.chars().count()]
            .iter()
            .collect();
        assert_eq!(span, token.text, "span mismatch for {:?}", token.kind);
    }
}

#[test]
fn test_token_positions_advance() {
    let tokens = lex_clean("<a><b>");
    assert_eq!(tokens[0].position, 0);
    assert_eq!(tokens[1].position, 3);
}

#[test]
fn test_unrecognized_tag_start_yields_diagnostic() {
    let (tokens, diagnostics) = lex("<@>");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnexpectedCharacter);
    assert_eq!(diagnostics[0].state, TokenizerState::BeforeTag);
    assert!(diagnostics[0].excerpt.contains('@'));
    // No tag token is produced for the broken construct.
    assert!(tokens.iter().all(|token| token.kind != TokenKind::OpenTag));
}

#[test]
fn test_empty_closing_tag_yields_diagnostic() {
    let (tokens, diagnostics) = lex("</>");
    assert!(tokens.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].state, TokenizerState::BeforeClosingTag);
}

#[test]
fn test_unterminated_quoted_value() {
    let (tokens, diagnostics) = lex("<div class=\"a");
    assert!(tokens.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnexpectedEndOfInput);
    assert_eq!(
        diagnostics[0].state,
        TokenizerState::DoubleQuotedAttrValue
    );
}

#[test]
fn test_unterminated_comment() {
    let (tokens, diagnostics) = lex("<!-- never closed");
    assert!(tokens.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnexpectedEndOfInput);
}

#[test]
fn test_unterminated_tag() {
    let (tokens, diagnostics) = lex("<div class");
    assert!(tokens.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnexpectedEndOfInput);
}

#[test]
fn test_diagnostic_window_is_clipped_at_boundaries() {
    let (_, diagnostics) = lex("<@");
    assert_eq!(diagnostics.len(), 1);
    // Window of 10 chars each side, clipped to the 2-char input.
    assert_eq!(diagnostics[0].excerpt, "<@");
}

#[test]
fn test_scanning_continues_after_error() {
    let (tokens, diagnostics) = lex("<@> <div>ok</div>");
    assert_eq!(diagnostics.len(), 1);
    assert!(
        tokens
            .iter()
            .any(|token| token.tag_name.as_deref() == Some("div"))
    );
}

#[test]
fn test_content_at_end_of_input() {
    let tokens = lex_clean("<p>trailing");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::Content);
    assert_eq!(tokens[1].text, "trailing");
}

#[test]
fn test_tag_name_with_dash_and_digits() {
    let tokens = lex_clean("<my-widget2>");
    assert_eq!(tokens[0].tag_name.as_deref(), Some("my-widget2"));
}

#[test]
fn test_attribute_name_with_punctuation() {
    let tokens = lex_clean(r#"<div data-x="1" xml:lang="en" under_score="y">"#);
    let attributes = tokens[0].attributes.as_ref().unwrap();
    let keys: Vec<&str> = attributes.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, vec!["data-x", "xml:lang", "under_score"]);
}

#[test]
fn test_whitespace_between_tags_produces_no_content() {
    let tokens = lex_clean("<div>  \n  <p>");
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(kinds, vec![TokenKind::OpenTag, TokenKind::OpenTag]);
}
