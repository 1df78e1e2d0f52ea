//! Laid-out Markdown text with HTML, SVG and plain-text projections.
//!
//! [`MarkdownTextWrap`] owns one snippet of Markdown and its layout
//! options. Parsing happens up front so authoring mistakes surface at
//! construction; tokens and lines are derived lazily and cached on the
//! instance. Changing the width drops only the line caches, so re-layout
//! reuses the measured tokens.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{
    convert::TokenConverter,
    error::Error,
    markdown::{Node, parse},
    markup::{Element, Markup, px},
    measure::{FontParams, NORMAL_WEIGHT, TextMeasurer},
    references::append_reference_numbers,
    tokens::Token,
    wrap::{DEFAULT_BREAK_EPSILON, Line, LineBreaker},
};

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_LINE_HEIGHT: f64 = 1.1;

/// Fraction of the font size from the top of an HTML line box's content
/// area to the SVG text baseline.
pub const DEFAULT_SVG_BASELINE_CORRECTION: f64 = 0.74;

/// Empirically tuned constants; adjust against the target font stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub break_epsilon: f64,
    pub svg_baseline_correction: f64,
    /// Also shift SVG baselines down by half the leading, `fs·(lh − 1)/2`,
    /// to centre text in a CSS line box taller than the font. Off by
    /// default.
    pub svg_half_leading: bool,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            break_epsilon: DEFAULT_BREAK_EPSILON,
            svg_baseline_correction: DEFAULT_SVG_BASELINE_CORRECTION,
            svg_half_leading: false,
        }
    }
}

/// Layout configuration for a [`MarkdownTextWrap`].
#[derive(Clone, Debug, PartialEq)]
pub struct WrapOptions {
    pub font_size: f64,
    pub font_family: Option<String>,
    pub font_weight: Option<u16>,
    /// Multiple of the font size.
    pub line_height: f64,
    pub max_width: f64,
    /// Extra CSS declarations for the HTML root, in order.
    pub style: Vec<(String, String)>,
    /// Ordered detail-term ids numbered in the SVG projection.
    pub detail_references: Option<Vec<String>>,
    pub calibration: Calibration,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_family: None,
            font_weight: None,
            line_height: DEFAULT_LINE_HEIGHT,
            max_width: f64::INFINITY,
            style: Vec::new(),
            detail_references: None,
            calibration: Calibration::default(),
        }
    }
}

impl WrapOptions {
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    #[must_use]
    pub fn with_font_weight(mut self, weight: u16) -> Self {
        self.font_weight = Some(weight);
        self
    }

    #[must_use]
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = max_width;
        self
    }

    #[must_use]
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_detail_references(mut self, references: Vec<String>) -> Self {
        self.detail_references = Some(references);
        self
    }

    #[must_use]
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Base font the converter starts from.
    #[must_use]
    pub fn font(&self) -> FontParams {
        FontParams {
            family: self.font_family.clone(),
            size: self.font_size,
            weight: self.font_weight.unwrap_or(NORMAL_WEIGHT),
            italic: false,
        }
    }

    fn breaker(&self) -> LineBreaker {
        LineBreaker::new(self.max_width).with_break_epsilon(self.calibration.break_epsilon)
    }
}

/// A Markdown snippet laid out into lines.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use mdtextwrap::{MarkdownTextWrap, MonospaceMeasurer, WrapOptions};
///
/// let wrap = MarkdownTextWrap::new(
///     "Hello **world**",
///     WrapOptions::default().with_font_size(10.0),
///     Arc::new(MonospaceMeasurer::with_advance(1.0)),
/// )
/// .unwrap();
/// assert_eq!(wrap.lines().len(), 1);
/// assert_eq!(wrap.width(), 110.0);
/// assert_eq!(wrap.plaintext(), "Hello world");
/// ```
#[derive(Clone)]
pub struct MarkdownTextWrap {
    text: String,
    options: WrapOptions,
    measurer: Arc<dyn TextMeasurer>,
    ast: Node,
    tokens: OnceCell<Vec<Token>>,
    svg_tokens: OnceCell<Vec<Token>>,
    lines: OnceCell<Vec<Line>>,
    svg_lines: OnceCell<Vec<Line>>,
}

impl MarkdownTextWrap {
    /// Parse `text` and prepare it for layout.
    ///
    /// # Errors
    /// Returns the parser's error unchanged, e.g.
    /// [`Error::InvalidDetailTerm`] for a malformed `#dod:` link.
    pub fn new(
        text: impl Into<String>,
        options: WrapOptions,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Result<Self, Error> {
        let text = text.into();
        let ast = parse(&text)?;
        Ok(Self {
            text,
            options,
            measurer,
            ast,
            tokens: OnceCell::new(),
            svg_tokens: OnceCell::new(),
            lines: OnceCell::new(),
            svg_lines: OnceCell::new(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &WrapOptions {
        &self.options
    }

    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.options.font_size
    }

    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.options.line_height
    }

    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.options.max_width
    }

    /// Replace the source text; every cache is dropped.
    ///
    /// # Errors
    /// Returns the parser's error and leaves `self` unchanged.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), Error> {
        let text = text.into();
        if text == self.text {
            return Ok(());
        }
        self.ast = parse(&text)?;
        self.text = text;
        self.clear_tokens();
        Ok(())
    }

    /// Change the width bound; measured tokens are kept.
    pub fn set_max_width(&mut self, max_width: f64) {
        if max_width.total_cmp(&self.options.max_width).is_eq() {
            return;
        }
        self.options.max_width = max_width;
        self.clear_lines();
    }

    pub fn set_detail_references(&mut self, references: Option<Vec<String>>) {
        if references == self.options.detail_references {
            return;
        }
        self.options.detail_references = references;
        self.clear_svg_tokens();
    }

    /// Replace every option, dropping only the caches the change affects.
    ///
    /// Font changes re-measure every token. Reference list changes redo the
    /// SVG tokens. Width and break epsilon changes re-break lines. Line
    /// height, style and baseline settings only affect rendering.
    pub fn set_options(&mut self, options: WrapOptions) {
        if options == self.options {
            return;
        }
        let font_changed = options.font() != self.options.font();
        let references_changed = options.detail_references != self.options.detail_references;
        let breaking_changed = options.breaker() != self.options.breaker();
        self.options = options;
        if font_changed {
            self.clear_tokens();
        } else if references_changed {
            self.clear_svg_tokens();
        } else if breaking_changed {
            self.clear_lines();
        }
    }

    fn clear_svg_tokens(&mut self) {
        self.svg_tokens = OnceCell::new();
        self.svg_lines = OnceCell::new();
    }

    fn clear_tokens(&mut self) {
        self.tokens = OnceCell::new();
        self.svg_tokens = OnceCell::new();
        self.clear_lines();
    }

    fn clear_lines(&mut self) {
        self.lines = OnceCell::new();
        self.svg_lines = OnceCell::new();
    }

    /// Unbroken token sequence for the whole snippet.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        self.tokens.get_or_init(|| {
            TokenConverter::new(self.measurer.as_ref()).convert(&self.ast, &self.options.font())
        })
    }

    /// Tokens for the SVG projection, with detail terms numbered.
    #[must_use]
    pub fn svg_tokens(&self) -> &[Token] {
        self.svg_tokens.get_or_init(|| match &self.options.detail_references {
            Some(references) => append_reference_numbers(
                self.tokens().to_vec(),
                references,
                self.measurer.as_ref(),
            ),
            None => self.tokens().to_vec(),
        })
    }

    /// Lines of the HTML projection, text runs merged.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        self.lines.get_or_init(|| {
            self.options
                .breaker()
                .split_into_lines(self.tokens())
                .iter()
                .map(Line::merged)
                .collect()
        })
    }

    /// Lines of the SVG projection, token by token.
    #[must_use]
    pub fn svg_lines(&self) -> &[Line] {
        self.svg_lines
            .get_or_init(|| self.options.breaker().split_into_lines(self.svg_tokens()))
    }

    #[must_use]
    pub fn line_widths(&self) -> Vec<f64> {
        self.lines().iter().map(Line::width).collect()
    }

    /// Widest HTML line.
    #[must_use]
    pub fn width(&self) -> f64 {
        widest(self.lines())
    }

    /// Widest SVG line, reference numbers included.
    #[must_use]
    pub fn svg_width(&self) -> f64 {
        widest(self.svg_lines())
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height_of(self.lines().len())
    }

    #[must_use]
    pub fn svg_height(&self) -> f64 {
        self.height_of(self.svg_lines().len())
    }

    fn height_of(&self, line_count: usize) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "line counts are far below 2^52"
        )]
        let count = line_count as f64;
        count * self.options.line_height * self.options.font_size
    }

    /// Readable text, one line per laid-out line.
    #[must_use]
    pub fn plaintext(&self) -> String {
        self.lines()
            .iter()
            .map(Line::plaintext)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn root_style(&self) -> String {
        let mut declarations = vec![
            format!("font-size: {}px", px(self.options.font_size)),
            format!("line-height: {}", self.options.line_height),
        ];
        if let Some(family) = &self.options.font_family {
            declarations.push(format!("font-family: {family}"));
        }
        if let Some(weight) = self.options.font_weight {
            declarations.push(format!("font-weight: {weight}"));
        }
        declarations.extend(
            self.options
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value}")),
        );
        declarations.join("; ")
    }

    /// HTML projection: one block span per line, `<br/>` for empty lines.
    #[must_use]
    pub fn render_html(&self) -> Markup {
        let lines = self.lines().iter().map(|line| {
            if line.is_empty() {
                return Element::new("br").into();
            }
            Element::new("span")
                .attr("class", "markdown-text-wrap__line")
                .attr("style", "display: block")
                .children(line.tokens().iter().map(Token::to_html))
                .into()
        });
        Element::new("span")
            .attr("class", "markdown-text-wrap")
            .attr("style", self.root_style())
            .children(lines)
            .into()
    }

    /// Distance from a line box's top to its SVG baseline.
    fn baseline_offset(&self) -> f64 {
        let WrapOptions {
            font_size,
            line_height,
            calibration,
            ..
        } = &self.options;
        let half_leading = if calibration.svg_half_leading {
            (line_height - 1.0) / 2.0
        } else {
            0.0
        };
        font_size * (calibration.svg_baseline_correction + half_leading)
    }

    /// SVG projection anchored with the first line box's top-left at
    /// (`x`, `y`), so it overlays [`MarkdownTextWrap::render_html`] placed at
    /// the same point.
    ///
    /// `attrs` are copied onto the `<text>` element after the font
    /// attributes.
    #[must_use]
    pub fn render_svg(&self, x: f64, y: f64, attrs: &[(&str, &str)]) -> Markup {
        let mut text = Element::new("text").attr("font-size", px(self.options.font_size));
        if let Some(family) = &self.options.font_family {
            text = text.attr("font-family", family.as_str());
        }
        if let Some(weight) = self.options.font_weight {
            text = text.attr("font-weight", weight.to_string());
        }
        for (name, value) in attrs {
            text = text.attr(name, *value);
        }

        let line_step = self.options.line_height * self.options.font_size;
        let baseline = y + self.baseline_offset();
        let mut offset = 0.0;
        for line in self.svg_lines() {
            text = text.child(
                Element::new("tspan")
                    .attr("x", px(x))
                    .attr("y", px(baseline + offset))
                    .children(line.tokens().iter().map(Token::to_svg))
                    .into(),
            );
            offset += line_step;
        }
        text.into()
    }
}

fn widest(lines: &[Line]) -> f64 {
    lines.iter().map(Line::width).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasurer;

    fn wrap(text: &str, options: WrapOptions) -> MarkdownTextWrap {
        MarkdownTextWrap::new(text, options, Arc::new(MonospaceMeasurer::with_advance(1.0)))
            .expect("valid markdown")
    }

    fn unit() -> WrapOptions {
        WrapOptions::default().with_font_size(1.0)
    }

    #[test]
    fn width_change_reuses_tokens() {
        let mut w = wrap("alpha beta gamma", unit());
        let before = w.tokens().as_ptr();
        assert_eq!(w.lines().len(), 1);
        w.set_max_width(6.0);
        assert_eq!(w.tokens().as_ptr(), before);
        assert_eq!(w.lines().len(), 3);
    }

    #[test]
    fn set_text_rejects_bad_input_and_keeps_state() {
        let mut w = wrap("ok", unit());
        assert!(w.set_text("[x](#dod:)").is_err());
        assert_eq!(w.text(), "ok");
        assert_eq!(w.plaintext(), "ok");
        w.set_text("new text").expect("valid markdown");
        assert_eq!(w.plaintext(), "new text");
    }

    #[test]
    fn empty_text_has_no_lines() {
        let w = wrap("", unit());
        assert!(w.lines().is_empty());
        assert_eq!(w.height(), 0.0);
        assert_eq!(w.width(), 0.0);
    }

    #[test]
    fn height_counts_lines() {
        let w = wrap("a\nb\nc", WrapOptions::default().with_font_size(10.0).with_line_height(1.5));
        assert_eq!(w.height(), 45.0);
    }

    #[test]
    fn references_change_only_the_svg_projection() {
        let mut w = wrap("[GDP](#dod:gdp)", unit());
        assert_eq!(w.svg_width(), 3.0);
        w.set_detail_references(Some(vec!["pop".into(), "gdp".into()]));
        assert_eq!(w.svg_width(), 3.5);
        assert_eq!(w.width(), 3.0);
    }

    #[test]
    fn font_options_flow_into_tokens() {
        let w = wrap(
            "x",
            WrapOptions::default()
                .with_font_size(12.0)
                .with_font_family("Lato")
                .with_font_weight(300),
        );
        let Token::Text(run) = &w.tokens()[0] else {
            panic!("expected text token");
        };
        assert_eq!(run.font().family.as_deref(), Some("Lato"));
        assert_eq!(run.font().weight, 300);
        assert_eq!(run.font().size, 12.0);
    }

    #[test]
    fn render_only_option_changes_keep_lines() {
        let mut w = wrap("alpha beta gamma", unit().with_max_width(10.0));
        let tokens = w.tokens().as_ptr();
        let lines = w.lines().as_ptr();
        w.set_options(w.options().clone().with_line_height(2.0).with_style("color", "red"));
        assert_eq!(w.tokens().as_ptr(), tokens);
        assert_eq!(w.lines().as_ptr(), lines);
        assert_eq!(w.height(), 4.0);
    }

    #[test]
    fn width_change_through_set_options_reuses_tokens() {
        let mut w = wrap("alpha beta gamma", unit());
        let tokens = w.tokens().as_ptr();
        assert_eq!(w.lines().len(), 1);
        w.set_options(w.options().clone().with_max_width(6.0));
        assert_eq!(w.tokens().as_ptr(), tokens);
        assert_eq!(w.lines().len(), 3);
    }

    #[test]
    fn font_change_through_set_options_remeasures() {
        let mut w = wrap("alpha beta", unit());
        assert_eq!(w.width(), 10.0);
        w.set_options(w.options().clone().with_font_size(2.0));
        assert_eq!(w.width(), 20.0);
    }

    #[test]
    fn references_through_set_options_renumber_svg() {
        let mut w = wrap("[GDP](#dod:gdp)", unit());
        assert_eq!(w.svg_width(), 3.0);
        w.set_options(w.options().clone().with_detail_references(vec!["gdp".into()]));
        assert_eq!(w.svg_width(), 3.5);
    }

    fn first_baseline(w: &MarkdownTextWrap) -> Option<String> {
        let Markup::Element(text) = w.render_svg(0.0, 0.0, &[]) else {
            return None;
        };
        match text.children.first() {
            Some(Markup::Element(tspan)) => tspan.get_attr("y").map(str::to_string),
            _ => None,
        }
    }

    #[test]
    fn svg_baseline_uses_correction_only_by_default() {
        let w = wrap("x", WrapOptions::default().with_font_size(10.0).with_line_height(2.0));
        assert_eq!(first_baseline(&w).as_deref(), Some("7.4"));
    }

    #[test]
    fn svg_half_leading_is_opt_in() {
        let calibration = Calibration {
            svg_half_leading: true,
            ..Calibration::default()
        };
        let w = wrap(
            "x",
            WrapOptions::default()
                .with_font_size(10.0)
                .with_line_height(2.0)
                .with_calibration(calibration),
        );
        assert_eq!(first_baseline(&w).as_deref(), Some("12.4"));
    }
}
