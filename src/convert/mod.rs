//! Content tree to token conversion.
//!
//! Inline constructs become containers carrying their font override; block
//! structure (paragraphs, lists, tables, quotes) is flattened into one
//! inline stream. Separating blocks visually is left to the caller.

mod scanning;

use scanning::{Segment, segment_words};

use crate::{
    markdown::Node,
    measure::{BOLD_WEIGHT, FontParams, TextMeasurer},
    tokens::{ContainerKind, Token},
};

/// Converts [`Node`] trees into token sequences measured by one measurer.
#[derive(Clone, Copy)]
pub struct TokenConverter<'a> {
    measurer: &'a dyn TextMeasurer,
}

impl<'a> TokenConverter<'a> {
    #[must_use]
    pub fn new(measurer: &'a dyn TextMeasurer) -> Self {
        Self { measurer }
    }

    /// Tokens for `node` and its descendants, in document order.
    #[must_use]
    pub fn convert(&self, node: &Node, font: &FontParams) -> Vec<Token> {
        let mut out = Vec::new();
        self.push_node(node, font, &mut out);
        out
    }

    fn push_children(&self, children: &[Node], font: &FontParams, out: &mut Vec<Token>) {
        for child in children {
            self.push_node(child, font, out);
        }
    }

    /// Container over the converted `children`; `None` when they yield no
    /// tokens, e.g. a link with empty text.
    fn container(
        &self,
        kind: ContainerKind,
        font: FontParams,
        children: &[Node],
    ) -> Option<Token> {
        let tokens = self.convert_all(children, &font);
        (!tokens.is_empty()).then(|| Token::container(kind, font, tokens))
    }

    fn convert_all(&self, children: &[Node], font: &FontParams) -> Vec<Token> {
        let mut out = Vec::new();
        self.push_children(children, font, &mut out);
        out
    }

    fn push_words(&self, text: &str, font: &FontParams, out: &mut Vec<Token>) {
        for segment in segment_words(text) {
            out.push(match segment {
                Segment::Word(word) => Token::text(word, font.clone(), self.measurer),
                Segment::Space => Token::whitespace(font.clone(), self.measurer),
            });
        }
    }

    fn push_literal(&self, text: &str, font: &FontParams, out: &mut Vec<Token>) {
        if !text.is_empty() {
            out.push(Token::text(text, font.clone(), self.measurer));
        }
    }

    fn push_node(&self, node: &Node, font: &FontParams, out: &mut Vec<Token>) {
        match node {
            Node::Text(value) => self.push_words(value, font, out),
            Node::InlineCode(value) | Node::Html(value) | Node::Yaml(value) => {
                self.push_literal(value, font, out);
            }
            Node::Code(value) => {
                for (i, line) in value.split('\n').enumerate() {
                    if i > 0 {
                        out.push(Token::LineBreak);
                    }
                    self.push_literal(line, font, out);
                }
            }
            Node::Image { alt, .. } => self.push_literal(alt, font, out),
            Node::FootnoteReference { identifier, label } => {
                self.push_literal(&format!("{identifier}: {label}"), font, out);
            }
            Node::Break => out.push(Token::LineBreak),
            Node::ThematicBreak => {}
            Node::Emphasis(children) => {
                out.extend(self.container(ContainerKind::Italic, font.with_italic(), children));
            }
            Node::Strong(children) => out.extend(self.container(
                ContainerKind::Bold,
                font.with_weight(BOLD_WEIGHT),
                children,
            )),
            Node::Link { url, children } => out.extend(self.container(
                ContainerKind::Link { href: url.clone() },
                font.clone(),
                children,
            )),
            Node::DetailOnDemand { term, children } => out.extend(self.container(
                ContainerKind::DetailOnDemand { term: term.clone() },
                font.clone(),
                children,
            )),
            Node::Root(children)
            | Node::Paragraph(children)
            | Node::Heading { children, .. }
            | Node::Blockquote(children)
            | Node::List { children, .. }
            | Node::ListItem(children)
            | Node::Table(children)
            | Node::TableRow(children)
            | Node::TableCell(children)
            | Node::Delete(children)
            | Node::FootnoteDefinition { children, .. } => self.push_children(children, font, out),
        }
    }
}

/// Convert `node` with a one-off [`TokenConverter`].
#[must_use]
pub fn convert(node: &Node, font: &FontParams, measurer: &dyn TextMeasurer) -> Vec<Token> {
    TokenConverter::new(measurer).convert(node, font)
}
