//! Breakpoint search and splitting at a chosen breakpoint.

use super::WIDTH_TOLERANCE;
use crate::tokens::{Breakpoint, Token};

/// Whether the content before `breakpoint` fits in `max_width`.
///
/// The epsilon nudge only orders breaks; it does not count against the
/// budget.
fn fits(breakpoint: &Breakpoint, max_width: f64, epsilon: f64) -> bool {
    breakpoint.break_offset <= max_width + epsilon + WIDTH_TOLERANCE
}

/// Find where to end a line of `tokens` bounded by `max_width`.
///
/// Scans left to right and keeps the last breakpoint that fits, stopping
/// at the first one that does not. When even the first breakpoint is past
/// the budget it is returned anyway.
pub(crate) fn find_breakpoint(tokens: &[Token], max_width: f64, epsilon: f64) -> Option<Breakpoint> {
    let mut token_start_offset = 0.0;
    let mut found: Option<Breakpoint> = None;
    for (token_index, token) in tokens.iter().enumerate() {
        if let Some(inner) = token.breakpoint(epsilon) {
            let candidate = Breakpoint {
                token_index,
                token_start_offset,
                break_offset: token_start_offset + inner.break_offset,
            };
            if found.is_some() && !fits(&candidate, max_width, epsilon) {
                break;
            }
            found = Some(candidate);
        }
        token_start_offset += token.width();
    }
    found
}

/// Split `tokens` into the finished part and the remainder at `breakpoint`.
///
/// A whitespace token at the break is consumed. A container at the break
/// is split recursively against the budget left after the tokens before
/// it; empty halves are dropped.
pub(crate) fn split_at_breakpoint(
    tokens: &[Token],
    breakpoint: Breakpoint,
    max_width: f64,
    epsilon: f64,
) -> (Vec<Token>, Vec<Token>) {
    let index = breakpoint.token_index;
    let Some(token) = tokens.get(index) else {
        return (tokens.to_vec(), Vec::new());
    };

    let mut before = tokens[..index].to_vec();
    let mut after = Vec::with_capacity(tokens.len() - index);
    match token {
        Token::Whitespace(_) => {}
        Token::Container(container) => {
            let (head, tail) =
                container.split_before(max_width - breakpoint.token_start_offset, epsilon);
            before.extend(head.map(Token::Container));
            after.extend(tail.map(Token::Container));
        }
        Token::Text(_) | Token::LineBreak | Token::Superscript(_) => after.push(token.clone()),
    }
    after.extend_from_slice(&tokens[index + 1..]);
    (before, after)
}
