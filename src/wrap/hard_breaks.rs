//! Splitting on hard line breaks.

use crate::tokens::Token;

/// Split `tokens` at every [`Token::LineBreak`], including breaks nested in
/// containers.
///
/// Always returns at least one (possibly empty) line; `n` breaks give
/// `n + 1` lines. The result holds no line breaks.
pub(crate) fn split_on_line_breaks(tokens: &[Token]) -> Vec<Vec<Token>> {
    let mut lines: Vec<Vec<Token>> = vec![Vec::new()];
    for token in tokens {
        match token {
            Token::LineBreak => lines.push(Vec::new()),
            Token::Container(container) => {
                for (i, part) in container.split_on_line_breaks().into_iter().enumerate() {
                    if i > 0 {
                        lines.push(Vec::new());
                    }
                    if let Some(part) = part
                        && let Some(line) = lines.last_mut()
                    {
                        line.push(Token::Container(part));
                    }
                }
            }
            Token::Text(_) | Token::Whitespace(_) | Token::Superscript(_) => {
                if let Some(line) = lines.last_mut() {
                    line.push(token.clone());
                }
            }
        }
    }
    lines
}
