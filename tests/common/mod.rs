//! Utility helpers shared across integration tests.

use std::sync::Arc;

use mdtextwrap::{MarkdownTextWrap, MonospaceMeasurer, WrapOptions};

/// Build a `Vec<String>` from a list of string slices.
///
/// Used to spell out expected lines without repeating `.to_string()`.
macro_rules! lines_vec {
    ($($line:expr),* $(,)?) => {
        vec![$($line.to_string()),*]
    };
}

/// Lay out `source` with one-unit characters at size 1, bounded by `width`.
pub fn unit_wrap(source: &str, width: f64) -> MarkdownTextWrap {
    MarkdownTextWrap::new(
        source,
        WrapOptions::default()
            .with_font_size(1.0)
            .with_max_width(width),
        Arc::new(MonospaceMeasurer::with_advance(1.0)),
    )
    .expect("source should parse")
}

/// Lay out `source` with `options` and one-em-wide characters.
pub fn wrap_with(source: &str, options: WrapOptions) -> MarkdownTextWrap {
    MarkdownTextWrap::new(source, options, Arc::new(MonospaceMeasurer::with_advance(1.0)))
        .expect("source should parse")
}

/// Plain text of every HTML line of `wrap`.
pub fn line_texts(wrap: &MarkdownTextWrap) -> Vec<String> {
    wrap.lines().iter().map(mdtextwrap::Line::plaintext).collect()
}
