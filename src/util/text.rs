use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Display width of a string in terminal columns.
///
/// CJK characters and most emoji take two columns, combining marks none.
///
/// ```
/// use shopfront::util::display_width;
///
/// assert_eq!(display_width("Salmon"), 6);
/// assert_eq!(display_width("鮭"), 2);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` so it fits in `max_width` columns, ending in `…` when shortened.
///
/// Returns the input borrowed when it already fits.
///
/// ```
/// use shopfront::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Ribeye", 10), "Ribeye");
/// assert_eq!(truncate_to_width("Wild Salmon Fillet", 8), "Wild Sa…");
/// assert_eq!(truncate_to_width("鮭鮭鮭", 4), "鮭…");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Pad `s` with spaces on the right to exactly `width` columns, truncating
/// first if it is wider.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width);
    let fill = width.saturating_sub(display_width(&cut));
    let mut out = String::with_capacity(cut.len() + fill);
    out.push_str(&cut);
    out.extend(std::iter::repeat(' ').take(fill));
    out
}

/// Collapse line breaks and runs of whitespace into single spaces.
pub fn single_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r', '\t']) && !s.contains("  ") {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.split_whitespace().collect::<Vec<_>>().join(" "))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    Start,
    Csi,
    Osc,
    OscEsc,
}

fn is_stripped_control(c: char) -> bool {
    (c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r')) || ('\u{80}'..='\u{9f}').contains(&c)
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Product names and descriptions come from the server and are drawn
/// straight into the terminal. Tab, newline and carriage return survive;
/// CSI (`ESC [ … final`) and OSC (`ESC ] … BEL|ESC \`) sequences are
/// dropped whole, as are bare ESC and C0/C1 controls.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut state = Escape::None;
    for c in s.chars() {
        state = match (state, c) {
            (Escape::None, '\u{1b}') => Escape::Start,
            (Escape::None, c) if is_stripped_control(c) => Escape::None,
            (Escape::None, c) => {
                out.push(c);
                Escape::None
            }
            (Escape::Start, '[') => Escape::Csi,
            (Escape::Start, ']') => Escape::Osc,
            (Escape::Start, '\u{1b}') => Escape::Start,
            // Bare ESC: drop it, keep what follows unless it is itself a control
            (Escape::Start, c) => {
                if !is_stripped_control(c) {
                    out.push(c);
                }
                Escape::None
            }
            (Escape::Csi, '\u{40}'..='\u{7e}') => Escape::None,
            (Escape::Csi, _) => Escape::Csi,
            (Escape::Osc, '\u{07}') => Escape::None,
            (Escape::Osc, '\u{1b}') => Escape::OscEsc,
            (Escape::Osc, _) => Escape::Osc,
            (Escape::OscEsc, '\\') => Escape::None,
            (Escape::OscEsc, _) => Escape::Osc,
        };
    }
    Cow::Owned(out)
}
