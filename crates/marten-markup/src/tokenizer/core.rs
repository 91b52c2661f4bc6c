use serde::Serialize;
use strum_macros::Display;

use super::diagnostics::Diagnostic;
use super::token::{AttributeList, Token, TokenKind};

/// The lexical states of the tokenizer.
///
/// Each state classifies exactly the characters it is responsible for and
/// hands the cursor on to the next state. The set is deliberately small:
/// this is a lenient scanner, not a conforming HTML5 tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum TokenizerState {
    /// Between constructs: skips whitespace, dispatches on `<` or text.
    Data,
    /// Accumulating text until a real tag boundary or end of input.
    Content,
    /// Just after `<`: decides between declaration, closing tag, and tag name.
    BeforeTag,
    /// Just after `<!`: decides between comment, doctype, and bogus comment.
    ExclamationMark,
    /// Matching the literal `DOCTYPE` (case-insensitive).
    Doctype,
    /// Inside `<!DOCTYPE ...`, scanning to the terminating `>`.
    DoctypeValue,
    /// Just after `<!--`, before the first comment character.
    BeforeComment,
    /// Inside a comment body.
    Comment,
    /// Saw a `-` inside a comment; watching for the `-->` terminator.
    AfterComment,
    /// Inside a `<! ... >` construct that is neither comment nor doctype.
    BogusComment,
    /// Accumulating an opening tag's name.
    TagName,
    /// After a tag name, between attributes.
    AfterTagName,
    /// Accumulating an attribute name.
    AttrName,
    /// After a completed attribute name, before `=`, `>`, or the next name.
    AfterAttrName,
    /// Just after `=`, deciding how the attribute value is delimited.
    BeforeAttrValue,
    /// Accumulating an unquoted attribute value.
    UnquotedAttrValue,
    /// Accumulating a single-quoted attribute value.
    SingleQuotedAttrValue,
    /// Accumulating a double-quoted attribute value.
    DoubleQuotedAttrValue,
    /// Saw `/` in a tag; expecting the closing `>`.
    AfterSelfClosingTag,
    /// Just after `</`, before the closing tag's name.
    BeforeClosingTag,
    /// Accumulating a closing tag's name.
    ClosingTagName,
}

/// The markup tokenizer: a character-at-a-time state machine over a single
/// forward cursor.
///
/// The scanner is lenient by design. Malformed constructs are reported
/// through the diagnostics list and skipped; the token stream always covers
/// whatever could be made sense of. One tokenizer instance handles one input
/// string; no state survives across instances.
///
/// The original implementation expressed every state as a function that
/// recursed into the next state, which overflows the call stack on long
/// unbroken runs such as a large comment. Here the states share one driver
/// loop and a `reconsume` flag, so the depth is constant regardless of input.
pub struct Tokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: Vec<char>,
    /// Char index of the character currently under the cursor.
    pub(super) position: usize,
    /// Char index where the lexeme currently being scanned starts.
    pub(super) start: usize,
    // When true, the next iteration of the driver loop re-examines the
    // current character instead of advancing. Models the original's fixed
    // one-character step-back after scanning an attribute name.
    pub(super) reconsume: bool,
    pub(super) at_eof: bool,
    pub(super) tag_name: String,
    pub(super) closing_tag_name: String,
    pub(super) attribute_name: String,
    pub(super) attribute_value: String,
    pub(super) attributes: AttributeList,
    pub(super) tokens: Vec<Token>,
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl Tokenizer {
    /// Create a tokenizer over the given markup.
    #[must_use]
    pub fn new(markup: &str) -> Self {
        Self {
            state: TokenizerState::Data,
            input: markup.chars().collect(),
            position: 0,
            start: 0,
            // The first loop iteration must examine the first character
            // without advancing past it.
            reconsume: true,
            at_eof: false,
            tag_name: String::new(),
            closing_tag_name: String::new(),
            attribute_name: String::new(),
            attribute_value: String::new(),
            attributes: AttributeList::new(),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokens scanned so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the tokenizer and return the token stream together with the
    /// diagnostics list.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Token>, Vec<Diagnostic>) {
        (self.tokens, self.diagnostics)
    }

    /// Run the state machine until the end of input.
    ///
    /// Every state treats end of input as an ordinary (terminal) character
    /// value: the cursor accessors return `None` past the end, and each state
    /// has an explicit arm for it, so no input can make the scanner read out
    /// of bounds or fail to terminate.
    pub fn run(&mut self) {
        while !self.at_eof {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.step_forward();
            }
            match self.state {
                TokenizerState::Data => self.handle_data(),
                TokenizerState::Content => self.handle_content(),
                TokenizerState::BeforeTag => self.handle_before_tag(),
                TokenizerState::ExclamationMark => self.handle_exclamation_mark(),
                TokenizerState::Doctype => self.handle_doctype(),
                TokenizerState::DoctypeValue => self.handle_doctype_value(),
                TokenizerState::BeforeComment => self.handle_before_comment(),
                TokenizerState::Comment => self.handle_comment(),
                TokenizerState::AfterComment => self.handle_after_comment(),
                TokenizerState::BogusComment => self.handle_bogus_comment(),
                TokenizerState::TagName => self.handle_tag_name(),
                TokenizerState::AfterTagName => self.handle_after_tag_name(),
                TokenizerState::AttrName => self.handle_attr_name(),
                TokenizerState::AfterAttrName => self.handle_after_attr_name(),
                TokenizerState::BeforeAttrValue => self.handle_before_attr_value(),
                TokenizerState::UnquotedAttrValue => self.handle_unquoted_attr_value(),
                TokenizerState::SingleQuotedAttrValue => {
                    self.handle_quoted_attr_value('\'');
                }
                TokenizerState::DoubleQuotedAttrValue => {
                    self.handle_quoted_attr_value('"');
                }
                TokenizerState::AfterSelfClosingTag => self.handle_after_self_closing_tag(),
                TokenizerState::BeforeClosingTag => self.handle_before_closing_tag(),
                TokenizerState::ClosingTagName => self.handle_closing_tag_name(),
            }
        }
    }

    fn handle_data(&mut self) {
        match self.current() {
            None => self.at_eof = true,
            Some(c) if c.is_whitespace() => {}
            Some('<') => {
                self.start = self.position;
                self.switch_to(TokenizerState::BeforeTag);
            }
            Some(_) => {
                self.start = self.position;
                self.switch_to(TokenizerState::Content);
            }
        }
    }

    /// Text runs until `<` is followed by `/` or a letter. A stray `<` that
    /// opens no tag stays part of the content.
    fn handle_content(&mut self) {
        match self.current() {
            None => {
                self.commit_token(TokenKind::Content);
                self.at_eof = true;
            }
            Some('<')
                if self.peek() == Some('/') || self.peek().is_some_and(char::is_alphabetic) =>
            {
                self.commit_token(TokenKind::Content);
                self.start = self.position;
                if self.peek().is_some_and(char::is_alphabetic) {
                    self.switch_to(TokenizerState::BeforeTag);
                } else {
                    // Consume the `/` here so the closing-tag state starts on
                    // the first name character.
                    self.step_forward();
                    self.switch_to(TokenizerState::BeforeClosingTag);
                }
            }
            Some(_) => {}
        }
    }

    fn handle_before_tag(&mut self) {
        match self.current() {
            Some('!') => self.switch_to(TokenizerState::ExclamationMark),
            Some('/') => self.switch_to(TokenizerState::BeforeClosingTag),
            Some(c) if c.is_alphabetic() => {
                self.reset_tag_state();
                self.tag_name.push(c);
                self.switch_to(TokenizerState::TagName);
            }
            None => self.fail_at_end_of_input(),
            Some(_) => self.fail_state(),
        }
    }

    fn handle_exclamation_mark(&mut self) {
        match self.current() {
            Some('-') => {
                if self.peek() == Some('-') {
                    self.step_forward();
                    self.switch_to(TokenizerState::BeforeComment);
                } else {
                    self.switch_to(TokenizerState::BogusComment);
                }
            }
            Some('d' | 'D') => self.reconsume_in(TokenizerState::Doctype),
            None => self.fail_at_end_of_input(),
            Some(_) => self.switch_to(TokenizerState::BogusComment),
        }
    }

    /// Case-insensitively matches the literal `DOCTYPE` under the cursor. A
    /// mismatch, or a match not followed by whitespace, abandons the
    /// construct: malformed doctypes yield a diagnostic and no token.
    fn handle_doctype(&mut self) {
        const DOCTYPE: &str = "DOCTYPE";
        if self.lookahead_matches_ignore_case(DOCTYPE) {
            // Land the cursor on the final literal character.
            self.position += DOCTYPE.len() - 1;
            match self.peek() {
                Some(c) if c.is_whitespace() => self.switch_to(TokenizerState::DoctypeValue),
                None => self.fail_at_end_of_input(),
                Some(_) => self.fail_state(),
            }
        } else {
            self.fail_state();
        }
    }

    fn handle_doctype_value(&mut self) {
        match self.current() {
            Some('>') => {
                self.commit_token(TokenKind::Doctype);
                self.switch_to(TokenizerState::Data);
            }
            None => self.fail_at_end_of_input(),
            Some(_) => {}
        }
    }

    fn handle_before_comment(&mut self) {
        match self.current() {
            Some(c) if c.is_whitespace() => {}
            Some('-') => self.switch_to(TokenizerState::AfterComment),
            None => self.fail_at_end_of_input(),
            Some(_) => self.switch_to(TokenizerState::Comment),
        }
    }

    fn handle_comment(&mut self) {
        match self.current() {
            Some('-') => self.switch_to(TokenizerState::AfterComment),
            None => self.fail_at_end_of_input(),
            Some(_) => {}
        }
    }

    /// A lone `-` not followed by `>` returns to plain comment scanning.
    fn handle_after_comment(&mut self) {
        match self.current() {
            Some('-') => {}
            Some('>') => {
                self.commit_token(TokenKind::Comment);
                self.switch_to(TokenizerState::Data);
            }
            None => self.fail_at_end_of_input(),
            Some(_) => self.switch_to(TokenizerState::Comment),
        }
    }

    fn handle_bogus_comment(&mut self) {
        match self.current() {
            Some('>') => {
                self.commit_token(TokenKind::BogusComment);
                self.switch_to(TokenizerState::Data);
            }
            None => self.fail_at_end_of_input(),
            Some(_) => {}
        }
    }

    fn handle_tag_name(&mut self) {
        match self.current() {
            Some(c) if c.is_alphanumeric() || c == '-' => self.tag_name.push(c),
            Some('>') => {
                self.commit_token(TokenKind::OpenTag);
                self.switch_to(TokenizerState::Data);
            }
            Some(c) if c.is_whitespace() => self.switch_to(TokenizerState::AfterTagName),
            Some('/') => self.switch_to(TokenizerState::AfterSelfClosingTag),
            None => self.fail_at_end_of_input(),
            Some(_) => self.fail_state(),
        }
    }

    fn handle_after_tag_name(&mut self) {
        match self.current() {
            Some(c) if c.is_whitespace() => {}
            Some('>') => {
                self.commit_token(TokenKind::OpenTag);
                self.switch_to(TokenizerState::Data);
            }
            Some(c) if c.is_alphabetic() => {
                self.attribute_name.push(c);
                self.switch_to(TokenizerState::AttrName);
            }
            Some('/') => self.switch_to(TokenizerState::AfterSelfClosingTag),
            None => self.fail_at_end_of_input(),
            Some(_) => self.fail_state(),
        }
    }

    fn handle_attr_name(&mut self) {
        match self.current() {
            Some(c) if c.is_alphanumeric() || matches!(c, '-' | '_' | ':') => {
                self.attribute_name.push(c);
            }
            Some('>') => {
                self.commit_attribute();
                self.commit_token(TokenKind::OpenTag);
                self.switch_to(TokenizerState::Data);
            }
            // The name is complete; re-examine the terminating character in
            // the follow-up state.
            Some(c) if c.is_whitespace() || c == '/' => {
                self.reconsume_in(TokenizerState::AfterAttrName);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttrValue),
            None => self.fail_at_end_of_input(),
            Some(_) => self.fail_state(),
        }
    }

    /// The pending name has no `=`-delimited value, so it commits with
    /// whatever the value buffer holds (empty if none was ever opened).
    fn handle_after_attr_name(&mut self) {
        match self.current() {
            Some(c) if c.is_whitespace() => {}
            Some('/') => {
                self.commit_attribute();
                self.switch_to(TokenizerState::AfterSelfClosingTag);
            }
            Some(c) if c.is_alphabetic() || c == '>' => {
                self.commit_attribute();
                self.reconsume_in(TokenizerState::AttrName);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttrValue),
            None => self.fail_at_end_of_input(),
            Some(_) => self.fail_state(),
        }
    }

    fn handle_before_attr_value(&mut self) {
        match self.current() {
            Some(c) if c.is_whitespace() => {}
            Some('"') => self.switch_to(TokenizerState::DoubleQuotedAttrValue),
            Some('\'') => self.switch_to(TokenizerState::SingleQuotedAttrValue),
            Some(c) if c.is_alphanumeric() || c == '#' || c == '/' => {
                self.attribute_value.push(c);
                self.switch_to(TokenizerState::UnquotedAttrValue);
            }
            None => self.fail_at_end_of_input(),
            Some(_) => self.fail_state(),
        }
    }

    fn handle_unquoted_attr_value(&mut self) {
        match self.current() {
            Some(c) if c.is_whitespace() => {
                self.commit_attribute();
                self.switch_to(TokenizerState::AfterTagName);
            }
            Some('>') => {
                self.commit_attribute();
                self.commit_token(TokenKind::OpenTag);
                self.switch_to(TokenizerState::Data);
            }
            None => self.fail_at_end_of_input(),
            Some(c) => self.attribute_value.push(c),
        }
    }

    /// Single- and double-quoted values only differ in their terminator.
    fn handle_quoted_attr_value(&mut self, quote: char) {
        match self.current() {
            Some(c) if c == quote => {
                self.commit_attribute();
                self.switch_to(TokenizerState::AfterTagName);
            }
            None => self.fail_at_end_of_input(),
            Some(c) => self.attribute_value.push(c),
        }
    }

    fn handle_after_self_closing_tag(&mut self) {
        match self.current() {
            Some(c) if c.is_whitespace() => {}
            Some('>') => {
                self.commit_token(TokenKind::AutoClosingTag);
                self.switch_to(TokenizerState::Data);
            }
            None => self.fail_at_end_of_input(),
            Some(_) => self.fail_state(),
        }
    }

    fn handle_before_closing_tag(&mut self) {
        match self.current() {
            Some(c) if c.is_whitespace() => {}
            Some(c) if c.is_alphanumeric() => {
                self.closing_tag_name.clear();
                self.closing_tag_name.push(c);
                self.switch_to(TokenizerState::ClosingTagName);
            }
            // `</>` carries no name to close anything with.
            Some('>') => self.fail_state(),
            None => self.fail_at_end_of_input(),
            // Not a closing tag after all; rescan from the next character.
            Some(_) => self.switch_to(TokenizerState::Data),
        }
    }

    fn handle_closing_tag_name(&mut self) {
        match self.current() {
            Some(c) if c.is_alphanumeric() => self.closing_tag_name.push(c),
            Some('>') => {
                self.commit_token(TokenKind::ClosingTag);
                self.switch_to(TokenizerState::Data);
            }
            None => self.fail_at_end_of_input(),
            // The construct went off the rails; drop it and rescan.
            Some(_) => self.switch_to(TokenizerState::Data),
        }
    }
}
