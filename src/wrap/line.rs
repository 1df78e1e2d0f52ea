//! A laid-out line.

use crate::{
    merge::merge_adjacent_text,
    tokens::{Token, plaintext, total_width},
};

/// Tokens forming one visual row.
///
/// Lines are never edited after the breaker produces them; passes such as
/// [`Line::merged`] return new lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    tokens: Vec<Token>,
}

impl Line {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        total_width(&self.tokens)
    }

    #[must_use]
    pub fn plaintext(&self) -> String {
        plaintext(&self.tokens)
    }

    /// This line with adjacent text runs joined.
    #[must_use]
    pub fn merged(&self) -> Self {
        Self::new(merge_adjacent_text(&self.tokens))
    }
}
