//! Greedy line breaking over token sequences.
//!
//! Lines are produced in two passes. Hard line breaks split the sequence
//! first, descending into containers so a break inside `**bold**` closes the
//! bold run on one line and reopens it on the next. Each resulting raw line
//! is then packed greedily: the last breakpoint that still fits wins, and
//! when none fits the first one past the budget is taken so content
//! overflows instead of disappearing.

mod breakpoint;
mod hard_breaks;
mod line;
mod whitespace;

pub(crate) use breakpoint::{find_breakpoint, split_at_breakpoint};
pub(crate) use hard_breaks::split_on_line_breaks;
pub use line::Line;
pub(crate) use whitespace::trim_leading_whitespace;

use log::{debug, trace};

use crate::tokens::{Token, total_width};

/// Offset past a whitespace token's start at which its break falls.
pub const DEFAULT_BREAK_EPSILON: f64 = 0.0001;

/// Slack absorbing float noise when widths are summed in different orders.
pub(crate) const WIDTH_TOLERANCE: f64 = 1e-9;

/// Greedy breaker bounded by `max_width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineBreaker {
    pub max_width: f64,
    pub break_epsilon: f64,
}

impl Default for LineBreaker {
    fn default() -> Self {
        Self::new(f64::INFINITY)
    }
}

impl LineBreaker {
    #[must_use]
    pub fn new(max_width: f64) -> Self {
        Self {
            max_width,
            break_epsilon: DEFAULT_BREAK_EPSILON,
        }
    }

    #[must_use]
    pub fn with_break_epsilon(self, break_epsilon: f64) -> Self {
        Self {
            break_epsilon,
            ..self
        }
    }

    /// Split `tokens` into lines no wider than `max_width` where possible.
    ///
    /// Never fails: a run with no breakpoint is emitted as an overflowing
    /// line. An empty sequence yields no lines; an empty raw line between
    /// two hard breaks yields an empty [`Line`].
    #[must_use]
    pub fn split_into_lines(&self, tokens: &[Token]) -> Vec<Line> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let raw_lines = split_on_line_breaks(tokens);
        debug!(
            "{} raw line(s) after hard breaks, max width {}",
            raw_lines.len(),
            self.max_width
        );

        let mut lines = Vec::new();
        for raw in raw_lines {
            let mut queue = trim_leading_whitespace(raw);
            if queue.is_empty() {
                lines.push(Line::default());
                continue;
            }
            while !queue.is_empty() {
                if total_width(&queue) <= self.max_width + WIDTH_TOLERANCE {
                    lines.push(Line::new(queue));
                    break;
                }
                let Some(breakpoint) = find_breakpoint(&queue, self.max_width, self.break_epsilon)
                else {
                    debug!(
                        "no breakpoint in {:?}; accepting overflow",
                        crate::tokens::plaintext(&queue)
                    );
                    lines.push(Line::new(queue));
                    break;
                };
                trace!("breaking at {breakpoint:?}");
                let (before, after) =
                    split_at_breakpoint(&queue, breakpoint, self.max_width, self.break_epsilon);
                if !before.is_empty() {
                    lines.push(Line::new(before));
                }
                queue = trim_leading_whitespace(after);
            }
        }
        lines
    }
}

/// Split `tokens` at `max_width` with the default break epsilon.
///
/// # Examples
///
/// ```
/// use mdtextwrap::{
///     measure::{FontParams, MonospaceMeasurer},
///     tokens::Token,
///     wrap::split_into_lines,
/// };
///
/// let m = MonospaceMeasurer::with_advance(1.0);
/// let font = FontParams::sized(1.0);
/// let tokens = vec![
///     Token::text("one", font.clone(), &m),
///     Token::whitespace(font.clone(), &m),
///     Token::text("two", font, &m),
/// ];
/// let lines = split_into_lines(&tokens, 4.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1].plaintext(), "two");
/// ```
#[must_use]
pub fn split_into_lines(tokens: &[Token], max_width: f64) -> Vec<Line> {
    LineBreaker::new(max_width).split_into_lines(tokens)
}
