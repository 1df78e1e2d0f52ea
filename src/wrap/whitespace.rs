//! Leading whitespace removal for wrapped lines.

use crate::tokens::Token;

/// Drop whitespace at the start of a line.
///
/// Descends into a leading container so `**  bold**` at a line start loses
/// its spaces too; a container left empty is dropped and trimming carries
/// on with the next token.
pub(crate) fn trim_leading_whitespace(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut leading = true;
    for token in tokens {
        if !leading {
            out.push(token);
            continue;
        }
        match token {
            Token::Whitespace(_) => {}
            Token::Container(container) => {
                if let Some(trimmed) = container.trim_start() {
                    out.push(Token::Container(trimmed));
                    leading = false;
                }
            }
            Token::Text(_) | Token::LineBreak | Token::Superscript(_) => {
                out.push(token);
                leading = false;
            }
        }
    }
    out
}
