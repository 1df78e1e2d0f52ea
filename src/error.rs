//! Error type shared by the parser and the layout wrapper.

use std::fmt;

/// Failure surfaced while turning Markdown into tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A `#dod:` link whose term id is empty or malformed.
    InvalidDetailTerm { href: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDetailTerm { href } => {
                write!(f, "invalid detail-on-demand reference `{href}`")
            }
        }
    }
}

impl std::error::Error for Error {}
