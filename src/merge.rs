//! Joining adjacent text runs after line breaking.
//!
//! Word-per-token output fragments the HTML projection into one text node
//! per word and space, which browser translation tools handle badly. Once
//! lines are fixed the breaks are no longer needed, so neighbouring runs are
//! folded back into one. Never run this before breaking: it removes the
//! whitespace tokens the breaker splits on.

use crate::tokens::{Token, TextRun};

/// Fold adjacent [`Token::Text`]/[`Token::Whitespace`] runs into single text
/// tokens, recursing into containers.
///
/// The result keeps the font of the first run in each group and the summed
/// width. Idempotent.
#[must_use]
pub fn merge_adjacent_text(tokens: &[Token]) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = match token {
            Token::Container(container) => {
                Token::Container(container.with_children(merge_adjacent_text(container.children())))
            }
            other => other.clone(),
        };
        if let Token::Text(run) | Token::Whitespace(run) = &token
            && let Some(prev) = out.last_mut()
            && prev.is_text_like()
        {
            let joined = join(prev, run);
            *prev = Token::Text(joined);
            continue;
        }
        out.push(token);
    }
    out
}

fn join(prev: &Token, next: &TextRun) -> TextRun {
    match prev {
        Token::Text(run) | Token::Whitespace(run) => run.concat(next.text(), next.width()),
        // Callers only join onto text-like tokens.
        Token::LineBreak | Token::Superscript(_) | Token::Container(_) => next.clone(),
    }
}
