//! Helper methods for the tokenizer state machine.
//!
//! This module contains the machinery shared by every state handler:
//! - cursor access (current character, one-character lookahead)
//! - state transitions (switch, reconsume)
//! - token and attribute commits
//! - diagnostic reporting

use core::mem;

use super::core::{Tokenizer, TokenizerState};
use super::diagnostics::{Diagnostic, DiagnosticKind, ERROR_WINDOW};
use super::token::{Attribute, AttributeList, Token, TokenKind, VOID_ELEMENTS};

// =============================================================================
// Cursor Helpers
// =============================================================================

impl Tokenizer {
    /// The character under the cursor, or `None` past the end of input.
    pub(super) fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// The character one past the cursor, without consuming it.
    pub(super) fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Advance the cursor by one character.
    pub(super) const fn step_forward(&mut self) {
        self.position += 1;
    }

    /// Whether the characters from the cursor onward match `literal`,
    /// ASCII case-insensitively. Never reads past the end of input.
    pub(super) fn lookahead_matches_ignore_case(&self, literal: &str) -> bool {
        let mut index = self.position;
        for expected in literal.chars() {
            match self.input.get(index) {
                Some(c) if c.eq_ignore_ascii_case(&expected) => index += 1,
                _ => return false,
            }
        }
        true
    }
}

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer {
    /// Move to `state`; the next driver iteration consumes a new character.
    pub(super) const fn switch_to(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// Move to `state` without consuming the current character, so the new
    /// state re-examines it. This is the fixed one-character lookback used
    /// when a terminating character both ends one state and must be
    /// classified by the next.
    pub(super) const fn reconsume_in(&mut self, state: TokenizerState) {
        self.reconsume = true;
        self.state = state;
    }

    /// Clear all buffers that accumulate pieces of an opening tag, so a tag
    /// abandoned halfway through cannot leak its name or attributes into the
    /// next committed tag.
    pub(super) fn reset_tag_state(&mut self) {
        self.tag_name.clear();
        self.attribute_name.clear();
        self.attribute_value.clear();
        self.attributes = AttributeList::new();
    }
}

// =============================================================================
// Commit Helpers
// =============================================================================

impl Tokenizer {
    /// Materialize the lexeme scanned since `start` as a token.
    ///
    /// Tag, comment, and doctype lexemes span up to and including the
    /// character under the cursor (the terminating `>`); content spans up to
    /// but excluding it (the `<` that ended the text run). Both ends are
    /// clamped so a commit at end of input can never index out of bounds.
    ///
    /// An `OpenTag` whose name is in [`VOID_ELEMENTS`] is reclassified to
    /// `AutoClosingTag` here, after the name is known and before the token is
    /// materialized.
    pub(super) fn commit_token(&mut self, kind: TokenKind) {
        let end = match kind {
            TokenKind::Content => self.position.min(self.input.len()),
            _ => (self.position + 1).min(self.input.len()),
        };
        let text: String = self.input[self.start..end].iter().collect();

        let token = match kind {
            TokenKind::Doctype => Token::new(kind, None, None, text, self.start),
            TokenKind::OpenTag | TokenKind::AutoClosingTag => {
                let name = mem::take(&mut self.tag_name);
                let kind = if kind == TokenKind::OpenTag && VOID_ELEMENTS.contains(&name.as_str())
                {
                    TokenKind::AutoClosingTag
                } else {
                    kind
                };
                let attributes = mem::take(&mut self.attributes);
                Token::new(kind, Some(name), Some(attributes), text, self.start)
            }
            TokenKind::ClosingTag => {
                let name = mem::take(&mut self.closing_tag_name);
                Token::new(kind, Some(name), None, text, self.start)
            }
            TokenKind::Content => {
                Token::new(kind, None, None, text.trim().to_string(), self.start)
            }
            TokenKind::Comment | TokenKind::BogusComment => {
                Token::new(kind, None, None, text, self.start)
            }
        };
        self.tokens.push(token);
    }

    /// Move the accumulated name/value buffers into the pending attribute
    /// list. The buffers are cleared regardless of outcome.
    ///
    /// A `class` value is split on whitespace into one attribute per
    /// non-empty fragment, all keyed `class`; every other name yields exactly
    /// one attribute with the literal value (empty for valueless attributes).
    /// An empty name buffer commits nothing: the states that re-examine an
    /// attribute terminator may ask for a commit when no name was scanned.
    pub(super) fn commit_attribute(&mut self) {
        let name = mem::take(&mut self.attribute_name);
        let value = mem::take(&mut self.attribute_value);

        if name.is_empty() {
            return;
        }

        if name == "class" {
            for fragment in value.split_whitespace() {
                self.attributes
                    .push(Attribute::new(name.clone(), fragment.to_string()));
            }
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl Tokenizer {
    /// The source text surrounding the cursor, [`ERROR_WINDOW`] characters on
    /// each side, clipped at the input boundaries.
    pub(super) fn source_window(&self) -> String {
        let lo = self.position.saturating_sub(ERROR_WINDOW);
        let hi = (self.position + ERROR_WINDOW).min(self.input.len());
        self.input[lo..hi].iter().collect()
    }

    /// Record a diagnostic for a character the current state has no rule
    /// for, abandon the construct, and resume scanning at the next character.
    pub(super) fn fail_state(&mut self) {
        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnexpectedCharacter,
            self.state,
            self.position,
            self.source_window(),
        ));
        self.switch_to(TokenizerState::Data);
    }

    /// Record a diagnostic for input that ended inside a construct and stop
    /// the scanner. No token is emitted for the unterminated construct.
    pub(super) fn fail_at_end_of_input(&mut self) {
        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnexpectedEndOfInput,
            self.state,
            self.position,
            self.source_window(),
        ));
        self.at_eof = true;
    }
}
