//! Layout tokens.
//!
//! A [`Token`] is the atomic unit the line breaker works with. Every token
//! knows its measured width, where (if anywhere) a line may break inside it,
//! and how to project itself as HTML, SVG or plain text. Tokens are
//! immutable; passes that change a token sequence build new tokens.

mod container;
mod text;

pub use container::{Container, ContainerKind};
pub use text::{Superscript, TextRun};

use crate::{
    markup::{Element, Markup, px},
    measure::{FontParams, TextMeasurer},
};

/// Candidate location to end a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    /// Index of the token the break falls in.
    pub token_index: usize,
    /// Summed width of the tokens before `token_index`.
    pub token_start_offset: f64,
    /// Offset from the start of the sequence at which the break falls.
    pub break_offset: f64,
}

/// Atomic layout unit.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Text(TextRun),
    /// A single space; the only token offering a break of its own.
    Whitespace(TextRun),
    /// Forced line boundary; zero width and never a break candidate.
    LineBreak,
    Superscript(Superscript),
    Container(Container),
}

impl Token {
    #[must_use]
    pub fn text(text: impl Into<String>, font: FontParams, measurer: &dyn TextMeasurer) -> Self {
        Token::Text(TextRun::new(text, font, measurer))
    }

    #[must_use]
    pub fn whitespace(font: FontParams, measurer: &dyn TextMeasurer) -> Self {
        Token::Whitespace(TextRun::new(" ", font, measurer))
    }

    #[must_use]
    pub fn superscript(
        text: impl Into<String>,
        font: FontParams,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        Token::Superscript(Superscript::new(text, font, measurer))
    }

    #[must_use]
    pub fn container(kind: ContainerKind, font: FontParams, children: Vec<Token>) -> Self {
        Token::Container(Container::new(kind, font, children))
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        match self {
            Token::Text(run) | Token::Whitespace(run) => run.width(),
            Token::LineBreak => 0.0,
            Token::Superscript(sup) => sup.width(),
            Token::Container(container) => container.width(),
        }
    }

    /// First position inside this token where a line may end.
    ///
    /// Whitespace reports a break `epsilon` past its own start so a break on
    /// a token boundary is never confused with "no offset".
    #[must_use]
    pub fn breakpoint(&self, epsilon: f64) -> Option<Breakpoint> {
        match self {
            Token::Whitespace(_) => Some(Breakpoint {
                token_index: 0,
                token_start_offset: 0.0,
                break_offset: epsilon,
            }),
            Token::Container(container) => container.breakpoint(epsilon),
            Token::Text(_) | Token::LineBreak | Token::Superscript(_) => None,
        }
    }

    /// Text and whitespace runs, the tokens the merge pass may join.
    #[must_use]
    pub fn is_text_like(&self) -> bool {
        matches!(self, Token::Text(_) | Token::Whitespace(_))
    }

    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }

    #[must_use]
    pub fn to_plaintext(&self) -> String {
        let mut out = String::new();
        self.push_plaintext(&mut out);
        out
    }

    pub(crate) fn push_plaintext(&self, out: &mut String) {
        match self {
            Token::Text(run) | Token::Whitespace(run) => out.push_str(run.text()),
            Token::LineBreak => out.push('\n'),
            Token::Superscript(sup) => out.push_str(sup.text()),
            Token::Container(container) => {
                for child in container.children() {
                    child.push_plaintext(out);
                }
            }
        }
    }

    #[must_use]
    pub fn to_html(&self) -> Markup {
        match self {
            Token::Text(run) | Token::Whitespace(run) => Markup::text(run.text()),
            Token::LineBreak => Element::new("br").into(),
            Token::Superscript(sup) => Element::new("sup")
                .child(Markup::text(sup.text()))
                .into(),
            Token::Container(container) => container.to_html(),
        }
    }

    #[must_use]
    pub fn to_svg(&self) -> Markup {
        match self {
            Token::Text(run) | Token::Whitespace(run) => Markup::text(run.text()),
            Token::LineBreak => Markup::empty(),
            Token::Superscript(sup) => Element::new("tspan")
                .attr("font-size", px(sup.rendered_size()))
                .attr("baseline-shift", "super")
                .child(Markup::text(sup.text()))
                .into(),
            Token::Container(container) => container.to_svg(),
        }
    }
}

/// Summed width of a token sequence.
#[must_use]
pub fn total_width(tokens: &[Token]) -> f64 {
    tokens.iter().map(Token::width).sum()
}

/// Plain text of a token sequence.
#[must_use]
pub fn plaintext(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.push_plaintext(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{BOLD_WEIGHT, MonospaceMeasurer};

    fn font() -> FontParams {
        FontParams::sized(1.0)
    }

    #[test]
    fn widths_come_from_the_measurer() {
        let m = MonospaceMeasurer::with_advance(1.0);
        assert_eq!(Token::text("hello", font(), &m).width(), 5.0);
        assert_eq!(Token::whitespace(font(), &m).width(), 1.0);
        assert_eq!(Token::LineBreak.width(), 0.0);
    }

    #[test]
    fn only_whitespace_breaks_on_its_own() {
        let m = MonospaceMeasurer::with_advance(1.0);
        assert!(Token::text("a", font(), &m).breakpoint(0.5).is_none());
        assert!(Token::LineBreak.breakpoint(0.5).is_none());
        assert!(Token::superscript("1", font(), &m).breakpoint(0.5).is_none());
        assert_eq!(
            Token::whitespace(font(), &m).breakpoint(0.5),
            Some(Breakpoint {
                token_index: 0,
                token_start_offset: 0.0,
                break_offset: 0.5,
            })
        );
    }

    #[test]
    fn projections_of_leaves() {
        let m = MonospaceMeasurer::with_advance(1.0);
        let sup = Token::superscript("3", FontParams::sized(12.0), &m);
        assert_eq!(sup.to_html().to_string(), "<sup>3</sup>");
        assert_eq!(
            sup.to_svg().to_string(),
            r#"<tspan font-size="6" baseline-shift="super">3</tspan>"#
        );
        assert_eq!(Token::LineBreak.to_html().to_string(), "<br/>");
        assert_eq!(Token::LineBreak.to_svg().to_string(), "");
        assert_eq!(Token::LineBreak.to_plaintext(), "\n");
    }

    #[test]
    fn plaintext_flattens_containers() {
        let m = MonospaceMeasurer::with_advance(1.0);
        let bold = font().with_weight(BOLD_WEIGHT);
        let tokens = vec![
            Token::text("a", font(), &m),
            Token::whitespace(font(), &m),
            Token::container(
                ContainerKind::Bold,
                bold.clone(),
                vec![Token::text("b", bold.clone(), &m), Token::whitespace(bold, &m)],
            ),
        ];
        assert_eq!(plaintext(&tokens), "a b ");
        assert_eq!(total_width(&tokens), 4.0);
    }
}
