//! Non-fatal diagnostics reported while scanning malformed markup.
//!
//! The tokenizer never aborts on bad input. A construct it cannot make sense
//! of produces one [`Diagnostic`] and scanning resumes at the next character,
//! so the caller always receives a (possibly partial) token stream together
//! with the ordered list of everything that went wrong along the way.

use core::fmt;

use serde::Serialize;
use strum_macros::Display;

use super::core::TokenizerState;

/// How many characters of surrounding source to capture on each side of the
/// cursor when a diagnostic is recorded.
pub const ERROR_WINDOW: usize = 10;

/// The category of a tokenizer diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum DiagnosticKind {
    /// The current state had no rule for the character under the cursor.
    UnexpectedCharacter,
    /// The input ended in the middle of a construct.
    UnexpectedEndOfInput,
}

/// A single malformed-markup report.
///
/// Carries enough context to locate the problem without re-scanning: the
/// state that gave up, the cursor position, and a window of surrounding
/// source text ([`ERROR_WINDOW`] chars on each side, clipped at the input
/// boundaries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The category of the problem.
    pub kind: DiagnosticKind,
    /// The state the tokenizer was in when it gave up on the construct.
    pub state: TokenizerState,
    /// Char index of the cursor at the time of the report.
    pub position: usize,
    /// Surrounding source text, clipped at the input boundaries.
    pub excerpt: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    #[must_use]
    pub const fn new(
        kind: DiagnosticKind,
        state: TokenizerState,
        position: usize,
        excerpt: String,
    ) -> Self {
        Self {
            kind,
            state,
            position,
            excerpt,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} state at position {}: '{}'",
            self.kind, self.state, self.position, self.excerpt
        )
    }
}
