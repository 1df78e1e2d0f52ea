//! Markdown to content-tree parsing.
//!
//! Grammar is delegated to `pulldown-cmark`; this module only folds its flat
//! event stream into the closed [`Node`] tree the token converter walks, and
//! recognises the detail-on-demand annotation `[label](#dod:term-id)`.

use std::sync::LazyLock;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use regex::Regex;

use crate::error::Error;

/// Link destination prefix marking a detail-on-demand annotation.
pub const DETAIL_ON_DEMAND_PREFIX: &str = "#dod:";

static DETAIL_TERM_RE: LazyLock<Regex> = lazy_regex!(
    r"^#dod:(?P<term>[A-Za-z0-9_-]+)$",
    "detail term pattern should compile",
);

/// Node of the parsed content tree.
///
/// The set of kinds is closed; consumers match on it exhaustively so a new
/// kind cannot be dropped silently.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Root(Vec<Node>),
    Paragraph(Vec<Node>),
    Heading { depth: u8, children: Vec<Node> },
    Blockquote(Vec<Node>),
    List { ordered: bool, children: Vec<Node> },
    ListItem(Vec<Node>),
    Table(Vec<Node>),
    TableRow(Vec<Node>),
    TableCell(Vec<Node>),
    Delete(Vec<Node>),
    FootnoteDefinition { identifier: String, children: Vec<Node> },
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    Link { url: String, children: Vec<Node> },
    DetailOnDemand { term: String, children: Vec<Node> },
    Image { url: String, alt: String },
    Text(String),
    InlineCode(String),
    Code(String),
    Html(String),
    Yaml(String),
    FootnoteReference { identifier: String, label: String },
    Break,
    ThematicBreak,
}

impl Node {
    /// Literal text of this node and its descendants, markup removed.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text_content(&mut out);
        out
    }

    fn push_text_content(&self, out: &mut String) {
        match self {
            Node::Text(value)
            | Node::InlineCode(value)
            | Node::Code(value)
            | Node::Html(value)
            | Node::Yaml(value) => out.push_str(value),
            Node::Image { alt, .. } => out.push_str(alt),
            Node::FootnoteReference { label, .. } => out.push_str(label),
            Node::Break => out.push('\n'),
            Node::ThematicBreak => {}
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
            | Node::FootnoteDefinition { children, .. }
            | Node::Emphasis(children)
            | Node::Strong(children)
            | Node::Link { children, .. }
            | Node::DetailOnDemand { children, .. } => {
                for child in children {
                    child.push_text_content(out);
                }
            }
        }
    }
}

/// Container kind awaiting its closing event.
enum Pending {
    Root,
    Paragraph,
    Heading(u8),
    Blockquote,
    List { ordered: bool },
    ListItem,
    Table,
    TableRow,
    TableCell,
    Delete,
    FootnoteDefinition(String),
    Emphasis,
    Strong,
    Link(String),
    DetailOnDemand(String),
    Image(String),
    Code,
    Yaml,
    /// Constructs without a node of their own; children splice into the parent.
    Transparent,
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Classify a link destination, rejecting malformed detail terms.
fn link_kind(dest: &str) -> Result<Pending, Error> {
    if !dest.starts_with(DETAIL_ON_DEMAND_PREFIX) {
        return Ok(Pending::Link(dest.to_string()));
    }
    DETAIL_TERM_RE
        .captures(dest)
        .map(|caps| Pending::DetailOnDemand(caps["term"].to_string()))
        .ok_or_else(|| Error::InvalidDetailTerm {
            href: dest.to_string(),
        })
}

impl Pending {
    fn from_tag(tag: Tag<'_>) -> Result<Self, Error> {
        Ok(match tag {
            Tag::Paragraph => Pending::Paragraph,
            Tag::Heading { level, .. } => Pending::Heading(heading_depth(level)),
            Tag::BlockQuote(..) => Pending::Blockquote,
            Tag::CodeBlock(..) => Pending::Code,
            Tag::List(start) => Pending::List {
                ordered: start.is_some(),
            },
            Tag::Item => Pending::ListItem,
            Tag::FootnoteDefinition(label) => Pending::FootnoteDefinition(label.to_string()),
            Tag::Table(..) => Pending::Table,
            Tag::TableHead | Tag::TableRow => Pending::TableRow,
            Tag::TableCell => Pending::TableCell,
            Tag::Emphasis => Pending::Emphasis,
            Tag::Strong => Pending::Strong,
            Tag::Strikethrough => Pending::Delete,
            Tag::Link { dest_url, .. } => link_kind(&dest_url)?,
            Tag::Image { dest_url, .. } => Pending::Image(dest_url.to_string()),
            Tag::MetadataBlock(..) => Pending::Yaml,
            _ => Pending::Transparent,
        })
    }

    fn close(self, children: Vec<Node>, parent: &mut Vec<Node>) {
        let node = match self {
            Pending::Root => Node::Root(children),
            Pending::Paragraph => Node::Paragraph(children),
            Pending::Heading(depth) => Node::Heading { depth, children },
            Pending::Blockquote => Node::Blockquote(children),
            Pending::List { ordered } => Node::List { ordered, children },
            Pending::ListItem => Node::ListItem(children),
            Pending::Table => Node::Table(children),
            Pending::TableRow => Node::TableRow(children),
            Pending::TableCell => Node::TableCell(children),
            Pending::Delete => Node::Delete(children),
            Pending::FootnoteDefinition(label) => Node::FootnoteDefinition {
                identifier: label.to_lowercase(),
                children,
            },
            Pending::Emphasis => Node::Emphasis(children),
            Pending::Strong => Node::Strong(children),
            Pending::Link(url) => Node::Link { url, children },
            Pending::DetailOnDemand(term) => Node::DetailOnDemand { term, children },
            Pending::Image(url) => Node::Image {
                url,
                alt: joined_text(&children),
            },
            Pending::Code => Node::Code(joined_text(&children).trim_end_matches('\n').to_string()),
            Pending::Yaml => Node::Yaml(joined_text(&children).trim_end_matches('\n').to_string()),
            Pending::Transparent => {
                for child in children {
                    push_node(parent, child);
                }
                return;
            }
        };
        push_node(parent, node);
    }
}

fn joined_text(nodes: &[Node]) -> String {
    nodes.iter().map(Node::text_content).collect()
}

/// Append `node`, coalescing adjacent text so words split by the event
/// stream stay whole.
fn push_node(out: &mut Vec<Node>, node: Node) {
    if let Node::Text(next) = &node
        && let Some(Node::Text(prev)) = out.last_mut()
    {
        prev.push_str(next);
        return;
    }
    out.push(node);
}

struct Frame {
    kind: Pending,
    children: Vec<Node>,
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse `source` into a [`Node::Root`] tree.
///
/// Soft line breaks are kept as [`Node::Break`]: a newline typed into a
/// label is meant to start a new line.
///
/// # Errors
/// Returns [`Error::InvalidDetailTerm`] when a `#dod:` link names no valid
/// term id.
///
/// # Examples
///
/// ```
/// use mdtextwrap::markdown::{Node, parse};
///
/// let root = parse("Hello **world**").unwrap();
/// assert_eq!(
///     root,
///     Node::Root(vec![Node::Paragraph(vec![
///         Node::Text("Hello ".into()),
///         Node::Strong(vec![Node::Text("world".into())]),
///     ])])
/// );
/// ```
pub fn parse(source: &str) -> Result<Node, Error> {
    let mut stack = vec![Frame {
        kind: Pending::Root,
        children: Vec::new(),
    }];

    for event in Parser::new_ext(source, parser_options()) {
        let leaf = match event {
            Event::Start(tag) => {
                stack.push(Frame {
                    kind: Pending::from_tag(tag)?,
                    children: Vec::new(),
                });
                continue;
            }
            Event::End(_) => {
                if stack.len() > 1
                    && let Some(frame) = stack.pop()
                    && let Some(parent) = stack.last_mut()
                {
                    frame.kind.close(frame.children, &mut parent.children);
                }
                continue;
            }
            Event::Text(text) => Node::Text(text.into_string()),
            Event::Code(code) => Node::InlineCode(code.into_string()),
            Event::Html(html) | Event::InlineHtml(html) => Node::Html(html.into_string()),
            Event::FootnoteReference(label) => Node::FootnoteReference {
                identifier: label.to_lowercase(),
                label: label.into_string(),
            },
            Event::SoftBreak | Event::HardBreak => Node::Break,
            Event::Rule => Node::ThematicBreak,
            _ => continue,
        };
        if let Some(frame) = stack.last_mut() {
            push_node(&mut frame.children, leaf);
        }
    }

    // Unbalanced streams cannot come out of pulldown-cmark, but fold any
    // leftovers rather than lose content.
    while stack.len() > 1 {
        if let Some(frame) = stack.pop()
            && let Some(parent) = stack.last_mut()
        {
            frame.kind.close(frame.children, &mut parent.children);
        }
    }
    let children = stack.pop().map(|frame| frame.children).unwrap_or_default();
    Ok(Node::Root(children))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn paragraph(source: &str) -> Vec<Node> {
        match parse(source).expect("parse should succeed") {
            Node::Root(mut blocks) => match blocks.remove(0) {
                Node::Paragraph(children) => children,
                other => panic!("expected paragraph, got {other:?}"),
            },
            other => panic!("expected root, got {other:?}"),
        }
    }

    #[test]
    fn soft_break_becomes_break_node() {
        assert_eq!(
            paragraph("line1\nline2"),
            vec![
                Node::Text("line1".into()),
                Node::Break,
                Node::Text("line2".into()),
            ]
        );
    }

    #[test]
    fn emphasis_and_code() {
        assert_eq!(
            paragraph("*a* `b`"),
            vec![
                Node::Emphasis(vec![Node::Text("a".into())]),
                Node::Text(" ".into()),
                Node::InlineCode("b".into()),
            ]
        );
    }

    #[test]
    fn detail_link_becomes_detail_node() {
        assert_eq!(
            paragraph("[GDP](#dod:gdp-per-capita)"),
            vec![Node::DetailOnDemand {
                term: "gdp-per-capita".into(),
                children: vec![Node::Text("GDP".into())],
            }]
        );
    }

    #[test]
    fn plain_link_keeps_url() {
        assert_eq!(
            paragraph("[site](https://example.org)"),
            vec![Node::Link {
                url: "https://example.org".into(),
                children: vec![Node::Text("site".into())],
            }]
        );
    }

    #[rstest]
    #[case::empty("[x](#dod:)", "#dod:")]
    #[case::punctuation("[x](#dod:a.b)", "#dod:a.b")]
    fn malformed_detail_link_is_an_error(#[case] source: &str, #[case] href: &str) {
        assert_eq!(
            parse(source),
            Err(Error::InvalidDetailTerm { href: href.into() })
        );
    }

    #[test]
    fn adjacent_text_events_are_coalesced() {
        assert_eq!(paragraph(r"a \* b"), vec![Node::Text("a * b".into())]);
    }

    #[test]
    fn footnote_reference_keeps_label() {
        let children = paragraph("see[^Note]\n\n[^Note]: body");
        assert_eq!(
            children[1],
            Node::FootnoteReference {
                identifier: "note".into(),
                label: "Note".into(),
            }
        );
    }

    #[test]
    fn table_head_is_a_row() {
        let root = parse("| a | b |\n|---|---|\n| 1 | 2 |").expect("parse should succeed");
        let Node::Root(blocks) = root else {
            panic!("expected root");
        };
        let Node::Table(rows) = &blocks[0] else {
            panic!("expected table, got {:?}", blocks[0]);
        };
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| matches!(row, Node::TableRow(_))));
    }

    #[test]
    fn text_content_strips_markup() {
        let root = parse("**bold** and [link](u)").expect("parse should succeed");
        assert_eq!(root.text_content(), "bold and link");
    }
}
