//! Leaf tokens: measured text runs and superscripts.

use crate::measure::{FontParams, TextMeasurer};

/// A measured run of text. Also backs [`super::Token::Whitespace`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    text: String,
    font: FontParams,
    width: f64,
}

impl TextRun {
    /// Measure `text` under `font`.
    pub fn new(text: impl Into<String>, font: FontParams, measurer: &dyn TextMeasurer) -> Self {
        let text = text.into();
        let width = measurer.width(&text, &font).max(0.0);
        Self { text, font, width }
    }

    /// Join two already-measured runs without re-measuring.
    ///
    /// The font of `self` is kept; widths add.
    #[must_use]
    pub(crate) fn concat(&self, other: &str, other_width: f64) -> Self {
        let mut text = String::with_capacity(self.text.len() + other.len());
        text.push_str(&self.text);
        text.push_str(other);
        Self {
            text,
            font: self.font.clone(),
            width: self.width + other_width,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn font(&self) -> &FontParams {
        &self.font
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }
}

/// Reference number drawn at half the surrounding font size.
///
/// Only the SVG projection carries these; the line height is unaffected.
#[derive(Clone, Debug, PartialEq)]
pub struct Superscript {
    text: String,
    font: FontParams,
    width: f64,
}

impl Superscript {
    /// `font` is the surrounding font; the run is measured at half its size.
    pub fn new(text: impl Into<String>, font: FontParams, measurer: &dyn TextMeasurer) -> Self {
        let text = text.into();
        let width = measurer.width(&text, &font.with_size(font.size / 2.0)).max(0.0);
        Self { text, font, width }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn font(&self) -> &FontParams {
        &self.font
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Font size the digits are drawn at.
    #[must_use]
    pub fn rendered_size(&self) -> f64 {
        self.font.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasurer;

    #[test]
    fn superscript_measures_at_half_size() {
        let m = MonospaceMeasurer::with_advance(1.0);
        let sup = Superscript::new("12", FontParams::sized(10.0), &m);
        assert_eq!(sup.width(), 10.0);
        assert_eq!(sup.rendered_size(), 5.0);
        assert_eq!(sup.font().size, 10.0);
    }

    #[test]
    fn concat_adds_widths_and_keeps_font() {
        let m = MonospaceMeasurer::with_advance(1.0);
        let run = TextRun::new("cat", FontParams::sized(1.0).with_italic(), &m);
        let joined = run.concat(" ", 1.0);
        assert_eq!(joined.text(), "cat ");
        assert_eq!(joined.width(), 4.0);
        assert!(joined.font().italic);
    }
}
