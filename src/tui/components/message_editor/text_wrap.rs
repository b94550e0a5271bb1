//! Pure text wrapping utilities and dimensional constants for the entry boxes.
//!
//! Stateless helpers with no dependency on the editor or its cursor.

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines per entry before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 4;
/// Offset from the left area edge to content (border + padding)
pub(super) const LEFT_OFFSET: u16 = 2;
/// Offset from the top area edge to content (border)
pub(super) const TOP_OFFSET: u16 = 1;

/// A wrapped display line, as a byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct LineSpan {
    pub start: usize,
    pub len: usize,
}

/// Build textwrap options configured for an entry's inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Locate every wrapped line of `text` in the source.
///
/// textwrap drops the separators it breaks on (spaces, newlines), so each
/// line is found by searching forward from the end of the previous one.
/// Always returns at least one span.
pub(super) fn line_spans(text: &str, width: u16) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    if width == 0 || text.is_empty() {
        spans.push(LineSpan { start: 0, len: 0 });
        return spans;
    }

    let mut from = 0;
    for line in textwrap::wrap(text, wrap_options(width)) {
        let start = if line.is_empty() {
            from
        } else {
            text[from..]
                .find(line.as_ref())
                .map(|i| from + i)
                .unwrap_or(from)
        };
        spans.push(LineSpan {
            start,
            len: line.len(),
        });
        from = start + line.len();
        if text[from..].starts_with('\n') {
            from += 1;
        }
    }

    // textwrap doesn't always produce an empty trailing line for a trailing newline
    if text.ends_with('\n') && spans.last().is_none_or(|s| s.start != text.len()) {
        spans.push(LineSpan {
            start: text.len(),
            len: 0,
        });
    }
    if spans.is_empty() {
        spans.push(LineSpan { start: 0, len: 0 });
    }

    spans
}

/// Count wrapped lines for the given text (at least 1).
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    line_spans(text, width).len() as u16
}

/// Index of the wrapped line containing byte offset `pos`.
pub(super) fn line_index(spans: &[LineSpan], pos: usize) -> usize {
    spans
        .iter()
        .rposition(|span| span.start <= pos)
        .unwrap_or(0)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Largest char boundary that is `<= pos`, clamped to the text length.
pub(super) fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
