//! Typed output tree for the HTML and SVG projections.
//!
//! Tokens render into [`Markup`] rather than strings so both projections
//! share one escaping routine and tests can inspect structure. `Display`
//! serialises the tree.

use std::fmt::{self, Write};

/// Elements serialised as `<tag/>` with no closing tag.
const VOID_TAGS: &[&str] = &["br"];

/// A node in a rendered HTML or SVG fragment.
#[derive(Clone, Debug, PartialEq)]
pub enum Markup {
    Element(Element),
    Text(String),
    /// Sequence of siblings with no wrapper; empty for tokens that render
    /// nothing.
    Fragment(Vec<Markup>),
}

/// An element with ordered attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Markup>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        Markup::Element(element)
    }
}

impl Markup {
    /// Markup that renders nothing.
    #[must_use]
    pub fn empty() -> Self {
        Markup::Fragment(Vec::new())
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text(text.into())
    }

    /// Concatenated text nodes, ignoring tags.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Markup::Text(text) => text.clone(),
            Markup::Element(Element { children, .. }) | Markup::Fragment(children) => {
                children.iter().map(Markup::text_content).collect()
            }
        }
    }
}

fn escape_into(out: &mut fmt::Formatter<'_>, text: &str, in_attr: bool) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' if in_attr => out.write_str("&quot;")?,
            _ => out.write_char(ch)?,
        }
    }
    Ok(())
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Markup::Text(text) => escape_into(f, text, false),
            Markup::Fragment(children) => children
                .iter()
                .try_for_each(|child| fmt::Display::fmt(child, f)),
            Markup::Element(element) => {
                write!(f, "<{}", element.tag)?;
                for (name, value) in &element.attrs {
                    write!(f, " {name}=\"")?;
                    escape_into(f, value, true)?;
                    f.write_char('"')?;
                }
                if element.children.is_empty() && VOID_TAGS.contains(&element.tag.as_str()) {
                    return f.write_str("/>");
                }
                f.write_char('>')?;
                for child in &element.children {
                    fmt::Display::fmt(child, f)?;
                }
                write!(f, "</{}>", element.tag)
            }
        }
    }
}

/// Format a pixel value with at most two decimals and no trailing zeros.
#[must_use]
pub fn px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Avoid printing `-0`.
        return "0".to_string();
    }
    rounded.to_string()
}
