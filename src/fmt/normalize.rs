//! Canonicalizes line endings and strips codepoints that can smuggle escape
//! sequences or bidi reordering into a terminal or an HTML document.
//!
//! Every function here is total: any input string maps to an output string.

/// Bidirectional control codepoints (ALM, LRM/RLM, embeds, overrides, isolates).
///
/// Left in log output these can visually reorder surrounding text in a browser,
/// so the HTML normalizer replaces them with U+FFFD.
const BIDI_CONTROLS: [char; 12] = [
    '\u{061C}', '\u{200E}', '\u{200F}', '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}',
    '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}',
];

const REPLACEMENT: char = '\u{FFFD}';

/// Converts `\r\n` and bare `\r` to `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits a message into lines after newline normalization.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    normalize_newlines(text).split('\n').map(str::to_string).collect()
}

/// Collapses any whitespace run containing a newline into a single space.
///
/// Used by the plain-file facility, whose format is strictly one line per record.
#[must_use]
pub fn flatten_message(text: &str) -> String {
    let normalized = normalize_newlines(text);
    let mut out = String::with_capacity(normalized.len());
    let mut run = String::new();
    let mut run_has_newline = false;
    for ch in normalized.chars() {
        if ch.is_whitespace() {
            run.push(ch);
            run_has_newline |= ch == '\n';
        } else {
            if !run.is_empty() {
                if run_has_newline {
                    out.push(' ');
                } else {
                    out.push_str(&run);
                }
                run.clear();
                run_has_newline = false;
            }
            out.push(ch);
        }
    }
    // A trailing whitespace run is dropped either way; leading runs were never flushed.
    out.trim().to_string()
}

const fn is_c0_or_c1(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}

/// Replaces C0/C1 control codepoints (except `\n` and `\t`) with U+FFFD.
///
/// Neutralizes terminal escape-sequence injection, ESC included.
#[must_use]
pub fn normalize_for_terminal(text: &str) -> String {
    normalize_newlines(text)
        .chars()
        .map(|ch| {
            if ch == '\n' || ch == '\t' {
                ch
            } else if is_c0_or_c1(ch) {
                REPLACEMENT
            } else {
                ch
            }
        })
        .collect()
}

/// Terminal rules plus bidi control replacement.
#[must_use]
pub fn normalize_for_html(text: &str) -> String {
    normalize_newlines(text)
        .chars()
        .map(|ch| {
            if ch == '\n' || ch == '\t' {
                ch
            } else if is_c0_or_c1(ch) || BIDI_CONTROLS.contains(&ch) {
                REPLACEMENT
            } else {
                ch
            }
        })
        .collect()
}

/// Entity-escapes `& < > " '` after HTML normalization.
///
/// Everything interpolated into a rendered row goes through here, so raw markup
/// from a log message can never reach the document.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let normalized = normalize_for_html(text);
    let mut out = String::with_capacity(normalized.len());
    for ch in normalized.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
