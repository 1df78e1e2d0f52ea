//! Markdown text layout for chart labels, titles and annotations.
//!
//! A short Markdown snippet is parsed, converted into measured tokens,
//! greedily broken into lines bounded by a maximum width, and rendered as
//! HTML or SVG. Both projections come from the same lines, so text wrapped
//! in an HTML overlay and in an exported SVG breaks at the same words.
//!
//! Text widths come from a caller-supplied [`TextMeasurer`]; the bundled
//! [`MonospaceMeasurer`] counts terminal cells for offline use.

#[macro_use]
mod macros;

pub mod convert;
pub mod error;
pub mod io;
pub mod markdown;
pub mod markup;
pub mod measure;
pub mod merge;
pub mod references;
pub mod text_wrap;
pub mod tokens;
pub mod wrap;

pub use error::Error;
pub use markup::Markup;
pub use measure::{FontParams, MonospaceMeasurer, TextBounds, TextMeasurer};
pub use merge::merge_adjacent_text;
pub use references::append_reference_numbers;
pub use text_wrap::{Calibration, MarkdownTextWrap, WrapOptions};
pub use tokens::{Container, ContainerKind, Token};
pub use wrap::{Line, LineBreaker, split_into_lines};
