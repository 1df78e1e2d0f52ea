//! Tokens wrapping a child sequence: bold, italic, links and detail terms.

use super::{Breakpoint, Token, total_width};
use crate::{
    markup::{Element, Markup},
    measure::FontParams,
    wrap,
};

/// Inline construct a [`Container`] stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Bold,
    Italic,
    /// Plain grouping with no font override.
    Span,
    Link { href: String },
    /// Glossary annotation referencing a term id.
    DetailOnDemand { term: String },
}

/// A token owning an ordered child sequence.
///
/// `font` is the resolved font of the descendants, i.e. the parent font
/// with this container's override applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    kind: ContainerKind,
    font: FontParams,
    children: Vec<Token>,
    width: f64,
}

impl Container {
    #[must_use]
    pub fn new(kind: ContainerKind, font: FontParams, children: Vec<Token>) -> Self {
        let width = total_width(&children);
        Self {
            kind,
            font,
            children,
            width,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    #[must_use]
    pub fn font(&self) -> &FontParams {
        &self.font
    }

    #[must_use]
    pub fn children(&self) -> &[Token] {
        &self.children
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Same kind and font holding `children` instead.
    #[must_use]
    pub fn with_children(&self, children: Vec<Token>) -> Self {
        Self::new(self.kind.clone(), self.font.clone(), children)
    }

    fn non_empty(&self, children: Vec<Token>) -> Option<Self> {
        (!children.is_empty()).then(|| self.with_children(children))
    }

    /// First break offered by any child, offset by the widths before it.
    #[must_use]
    pub fn breakpoint(&self, epsilon: f64) -> Option<Breakpoint> {
        let mut token_start_offset = 0.0;
        for (token_index, child) in self.children.iter().enumerate() {
            if let Some(inner) = child.breakpoint(epsilon) {
                return Some(Breakpoint {
                    token_index,
                    token_start_offset,
                    break_offset: token_start_offset + inner.break_offset,
                });
            }
            token_start_offset += child.width();
        }
        None
    }

    /// Split into the part that fits in `max_width` and the remainder.
    ///
    /// Either side is `None` when it would hold no children. Without any
    /// breakpoint the whole container is the remainder.
    #[must_use]
    pub fn split_before(&self, max_width: f64, epsilon: f64) -> (Option<Self>, Option<Self>) {
        let Some(breakpoint) = wrap::find_breakpoint(&self.children, max_width, epsilon) else {
            return (None, Some(self.clone()));
        };
        let (before, after) = wrap::split_at_breakpoint(&self.children, breakpoint, max_width, epsilon);
        (self.non_empty(before), self.non_empty(after))
    }

    /// One sibling per line the children span once hard breaks are applied.
    ///
    /// A container without an embedded break comes back unchanged as the
    /// only element. Segments with no children are `None`.
    #[must_use]
    pub fn split_on_line_breaks(&self) -> Vec<Option<Self>> {
        if !self.contains_line_break() {
            return vec![Some(self.clone())];
        }
        wrap::split_on_line_breaks(&self.children)
            .into_iter()
            .map(|segment| self.non_empty(segment))
            .collect()
    }

    fn contains_line_break(&self) -> bool {
        self.children.iter().any(|child| match child {
            Token::LineBreak => true,
            Token::Container(inner) => inner.contains_line_break(),
            Token::Text(_) | Token::Whitespace(_) | Token::Superscript(_) => false,
        })
    }

    /// Drop a leading whitespace run, descending into a leading container.
    #[must_use]
    pub(crate) fn trim_start(&self) -> Option<Self> {
        self.non_empty(wrap::trim_leading_whitespace(self.children.clone()))
    }

    #[must_use]
    pub fn to_html(&self) -> Markup {
        let element = match &self.kind {
            ContainerKind::Bold => Element::new("span")
                .attr("style", format!("font-weight: {}", self.font.weight)),
            ContainerKind::Italic => Element::new("span").attr("style", "font-style: italic"),
            ContainerKind::Span => Element::new("span"),
            ContainerKind::Link { href } => Element::new("a")
                .attr("href", href.as_str())
                .attr("target", "_blank")
                .attr("rel", "noopener"),
            ContainerKind::DetailOnDemand { term } => Element::new("span")
                .attr("class", "dod-span")
                .attr("data-id", term.as_str())
                .attr("tabindex", "0"),
        };
        element
            .children(self.children.iter().map(Token::to_html))
            .into()
    }

    #[must_use]
    pub fn to_svg(&self) -> Markup {
        let element = match &self.kind {
            ContainerKind::Bold => {
                Element::new("tspan").attr("font-weight", self.font.weight.to_string())
            }
            ContainerKind::Italic => Element::new("tspan").attr("font-style", "italic"),
            ContainerKind::Span => Element::new("tspan"),
            ContainerKind::Link { href } => Element::new("a")
                .attr("href", href.as_str())
                .attr("target", "_blank")
                .attr("rel", "noopener"),
            ContainerKind::DetailOnDemand { term } => Element::new("tspan")
                .attr("class", "dod-span")
                .attr("data-id", term.as_str()),
        };
        element
            .children(self.children.iter().map(Token::to_svg))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{BOLD_WEIGHT, MonospaceMeasurer, TextMeasurer};

    const EPS: f64 = 0.0001;

    fn words(text: &str, font: &FontParams, m: &dyn TextMeasurer) -> Vec<Token> {
        let mut out = Vec::new();
        for (i, word) in text.split(' ').enumerate() {
            if i > 0 {
                out.push(Token::whitespace(font.clone(), m));
            }
            out.push(Token::text(word, font.clone(), m));
        }
        out
    }

    fn bold(text: &str) -> Container {
        let m = MonospaceMeasurer::with_advance(1.0);
        let font = FontParams::sized(1.0).with_weight(BOLD_WEIGHT);
        let children = words(text, &font, &m);
        Container::new(ContainerKind::Bold, font, children)
    }

    #[test]
    fn width_is_sum_of_children() {
        assert_eq!(bold("ab cd").width(), 5.0);
    }

    #[test]
    fn breakpoint_delegates_to_first_whitespace() {
        let bp = bold("ab cd ef").breakpoint(EPS).expect("has a breakpoint");
        assert_eq!(bp.token_index, 1);
        assert_eq!(bp.token_start_offset, 2.0);
        assert_eq!(bp.break_offset, 2.0 + EPS);
        assert!(bold("abcd").breakpoint(EPS).is_none());
    }

    #[test]
    fn split_before_uses_last_fitting_break() {
        let (before, after) = bold("ab cd ef").split_before(5.0, EPS);
        let before = before.expect("before part");
        let after = after.expect("after part");
        assert_eq!(crate::tokens::plaintext(before.children()), "ab cd");
        assert_eq!(crate::tokens::plaintext(after.children()), "ef");
        assert_eq!(before.kind(), &ContainerKind::Bold);
    }

    #[test]
    fn split_before_without_break_keeps_everything_after() {
        let word = bold("abcdef");
        let (before, after) = word.split_before(2.0, EPS);
        assert!(before.is_none());
        assert_eq!(after, Some(word));
    }

    #[test]
    fn splits_on_embedded_line_breaks() {
        let m = MonospaceMeasurer::with_advance(1.0);
        let font = FontParams::sized(1.0);
        let italic = Container::new(
            ContainerKind::Italic,
            font.with_italic(),
            vec![
                Token::text("a", font.clone(), &m),
                Token::LineBreak,
                Token::text("b", font.clone(), &m),
                Token::LineBreak,
            ],
        );
        let parts = italic.split_on_line_breaks();
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[0].as_ref().map(|c| crate::tokens::plaintext(c.children())),
            Some("a".to_string())
        );
        assert_eq!(
            parts[1].as_ref().map(|c| crate::tokens::plaintext(c.children())),
            Some("b".to_string())
        );
        assert!(parts[2].is_none());
    }

    #[test]
    fn renders_detail_terms() {
        let m = MonospaceMeasurer::with_advance(1.0);
        let font = FontParams::sized(1.0);
        let dod = Container::new(
            ContainerKind::DetailOnDemand { term: "gdp".into() },
            font.clone(),
            vec![Token::text("GDP", font, &m)],
        );
        assert_eq!(
            dod.to_html().to_string(),
            r#"<span class="dod-span" data-id="gdp" tabindex="0">GDP</span>"#
        );
        assert_eq!(
            dod.to_svg().to_string(),
            r#"<tspan class="dod-span" data-id="gdp">GDP</tspan>"#
        );
    }

    #[test]
    fn renders_bold_with_resolved_weight() {
        assert_eq!(
            bold("a b").to_svg().to_string(),
            r#"<tspan font-weight="700">a b</tspan>"#
        );
        assert_eq!(
            bold("a").to_html().to_string(),
            r#"<span style="font-weight: 700">a</span>"#
        );
    }
}
