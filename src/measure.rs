//! Text measurement boundary.
//!
//! Layout never measures glyphs itself. Every width comes from a
//! [`TextMeasurer`] supplied by the host: a canvas shim in a browser, a font
//! metrics table offline, or the bundled [`MonospaceMeasurer`] which counts
//! terminal cells with `unicode-width`.

use unicode_width::UnicodeWidthStr;

/// Weight used for `**strong**` runs.
pub const BOLD_WEIGHT: u16 = 700;

/// Weight used when the caller does not specify one.
pub const NORMAL_WEIGHT: u16 = 400;

/// Font parameters a run of text is measured and rendered with.
#[derive(Clone, Debug, PartialEq)]
pub struct FontParams {
    pub family: Option<String>,
    pub size: f64,
    pub weight: u16,
    pub italic: bool,
}

impl Default for FontParams {
    fn default() -> Self {
        Self {
            family: None,
            size: 16.0,
            weight: NORMAL_WEIGHT,
            italic: false,
        }
    }
}

impl FontParams {
    /// Font parameters of the given size with every other field defaulted.
    #[must_use]
    pub fn sized(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_weight(&self, weight: u16) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_italic(&self) -> Self {
        Self {
            italic: true,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

/// Rendered extent of a string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBounds {
    pub width: f64,
    pub height: f64,
}

/// Host capability measuring rendered text.
///
/// Implementations must be pure: the same text and font must always produce
/// the same bounds, otherwise re-layout at a new width could disagree with
/// the first pass.
pub trait TextMeasurer: Send + Sync {
    /// Measure `text` rendered with `font`.
    fn measure(&self, text: &str, font: &FontParams) -> TextBounds;

    /// Width of `text`; defaults to [`TextMeasurer::measure`].
    fn width(&self, text: &str, font: &FontParams) -> f64 {
        self.measure(text, font).width
    }
}

/// Offline measurer treating every terminal cell as a fixed advance.
///
/// Width is `cells * advance * font size`, where `cells` is the
/// `unicode-width` display width, so CJK characters count double. Bold text
/// is widened by `bold_factor`. Height is always the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance: f64,
    pub bold_factor: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            bold_factor: 1.0,
        }
    }
}

impl MonospaceMeasurer {
    /// Measurer with the given advance (in ems) and no bold widening.
    #[must_use]
    pub fn with_advance(advance: f64) -> Self {
        Self {
            advance,
            ..Self::default()
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &FontParams) -> TextBounds {
        #[expect(
            clippy::cast_precision_loss,
            reason = "label-length strings never approach 2^52 cells"
        )]
        let cells = UnicodeWidthStr::width(text) as f64;
        let weight_factor = if font.weight >= BOLD_WEIGHT {
            self.bold_factor
        } else {
            1.0
        };
        TextBounds {
            width: cells * self.advance * font.size * weight_factor,
            height: font.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::ascii("abc", 3.0)]
    #[case::space(" ", 1.0)]
    #[case::wide("前后", 4.0)]
    #[case::empty("", 0.0)]
    fn monospace_counts_cells(#[case] text: &str, #[case] expected: f64) {
        let m = MonospaceMeasurer::with_advance(1.0);
        assert_eq!(m.width(text, &FontParams::sized(1.0)), expected);
    }

    #[test]
    fn monospace_scales_with_size_and_weight() {
        let m = MonospaceMeasurer {
            advance: 0.5,
            bold_factor: 1.5,
        };
        let font = FontParams::sized(10.0);
        assert_eq!(m.width("ab", &font), 10.0);
        assert_eq!(m.width("ab", &font.with_weight(BOLD_WEIGHT)), 15.0);
        assert_eq!(m.measure("ab", &font).height, 10.0);
    }

    #[test]
    fn overrides_keep_other_fields() {
        let font = FontParams {
            family: Some("Lato".into()),
            ..FontParams::sized(12.0)
        };
        let italic = font.with_italic().with_weight(BOLD_WEIGHT);
        assert_eq!(italic.family.as_deref(), Some("Lato"));
        assert_eq!(italic.size, 12.0);
        assert!(italic.italic);
        assert_eq!(italic.weight, BOLD_WEIGHT);
    }
}
