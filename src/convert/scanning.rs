//! Character scanning helpers used to split text into words.

/// Advance `start` while the predicate evaluates to `true`.
///
/// Returns the byte index of the first character for which `cond` fails.
///
/// # Examples
///
/// ```rust,ignore
/// let text = "abc123";
/// let end = scan_while(text, 0, char::is_alphabetic);
/// assert_eq!(end, 3);
/// ```
pub(super) fn scan_while<F>(text: &str, start: usize, mut cond: F) -> usize
where
    F: FnMut(char) -> bool,
{
    let mut idx = start;
    for ch in text[start..].chars() {
        if !cond(ch) {
            break;
        }
        idx += ch.len_utf8();
    }
    idx
}

/// Piece of a text node: a word or a collapsed whitespace run.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Segment<'a> {
    Word(&'a str),
    Space,
}

/// Split `text` into words and single [`Segment::Space`] separators.
///
/// Any run of whitespace, whatever its length or kind, becomes one space.
pub(super) fn segment_words(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut i = 0;
    while i < text.len() {
        let Some(ch) = text[i..].chars().next() else {
            break;
        };
        if ch.is_whitespace() {
            i = scan_while(text, i, char::is_whitespace);
            segments.push(Segment::Space);
        } else {
            let start = i;
            i = scan_while(text, i, |c| !c.is_whitespace());
            segments.push(Segment::Word(&text[start..i]));
        }
    }
    segments
}
