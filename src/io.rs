//! File helpers for laying out Markdown documents.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    sync::Arc,
};

use crate::{
    measure::TextMeasurer,
    text_wrap::{MarkdownTextWrap, WrapOptions},
};

fn from_source(
    source: String,
    options: WrapOptions,
    measurer: Arc<dyn TextMeasurer>,
) -> io::Result<MarkdownTextWrap> {
    MarkdownTextWrap::new(source, options, measurer)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Read and parse a Markdown file.
///
/// # Errors
/// Returns an error if the file cannot be read, or an
/// [`io::ErrorKind::InvalidData`] error wrapping the parser's error.
pub fn wrap_file(
    path: &Path,
    options: WrapOptions,
    measurer: Arc<dyn TextMeasurer>,
) -> io::Result<MarkdownTextWrap> {
    let source = fs::read_to_string(path)?;
    from_source(source, options, measurer)
}

/// Read and parse Markdown from standard input.
///
/// # Errors
/// Returns an error if stdin cannot be read or the input fails to parse.
pub fn wrap_stdin(
    options: WrapOptions,
    measurer: Arc<dyn TextMeasurer>,
) -> io::Result<MarkdownTextWrap> {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source)?;
    from_source(source, options, measurer)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::measure::MonospaceMeasurer;

    fn measurer() -> Arc<dyn TextMeasurer> {
        Arc::new(MonospaceMeasurer::with_advance(1.0))
    }

    #[test]
    fn wrap_file_roundtrip() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("label.md");
        fs::write(&file, "Life *expectancy* at birth\n").unwrap();
        let wrap = wrap_file(
            &file,
            WrapOptions::default().with_font_size(1.0).with_max_width(10.0),
            measurer(),
        )
        .unwrap();
        assert_eq!(wrap.plaintext(), "Life\nexpectancy\nat birth");
    }

    #[test]
    fn wrap_file_reports_parse_errors_as_invalid_data() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.md");
        fs::write(&file, "[term](#dod:)").unwrap();
        let err = wrap_file(&file, WrapOptions::default(), measurer())
            .err()
            .expect("parse should fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("#dod:"));
    }

    #[test]
    fn wrap_file_missing_path() {
        let dir = tempdir().unwrap();
        let err = wrap_file(&dir.path().join("nope.md"), WrapOptions::default(), measurer())
            .err()
            .expect("read should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
