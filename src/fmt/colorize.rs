//! Bounded-time per-character tokenizer for one log line.
//!
//! Three deadline-checked scans classify every character of a line into a
//! semantic token class. A hostile or degenerate line (megabytes of nested
//! quotes) cannot stall a write: every scan step checks the caller's
//! wall-clock deadline and bails out, and the caller falls back to a single
//! uncolored rendering of the full line.

use std::collections::HashSet;
use std::time::Instant;

/// Signal that the colorization budget ran out mid-scan.
///
/// Never crosses the facility boundary — callers render the line unformatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineExceeded;

/// Semantic class for one character of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Base,
    QuoteMark,
    QuoteContent,
    Number,
    Punct,
    Lhs,
}

impl TokenClass {
    /// CSS class name used by the HTML facility; must stay inside the
    /// row validator's allow-list.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Base => "syn-base",
            Self::QuoteMark => "syn-quote-mark",
            Self::QuoteContent => "syn-quote-content",
            Self::Number => "syn-number",
            Self::Punct => "syn-punct",
            Self::Lhs => "syn-lhs",
        }
    }
}

const PUNCTUATION: &[char] = &['.', ',', '+', '-', '=', '<', '>', ':', ';', '[', ']', '{', '}'];

fn check_deadline(deadline: Instant) -> Result<(), DeadlineExceeded> {
    if Instant::now() >= deadline {
        return Err(DeadlineExceeded);
    }
    Ok(())
}

/// Content spans between matching quotes, exclusive of the marks themselves.
///
/// A quote closes at the next matching, non-backslash-escaped quote;
/// an unterminated quote produces no span.
pub fn quoted_content_spans(
    chars: &[char],
    deadline: Instant,
) -> Result<Vec<(usize, usize)>, DeadlineExceeded> {
    let mut spans = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        check_deadline(deadline)?;
        let quote = chars[idx];
        if quote != '"' && quote != '\'' {
            idx += 1;
            continue;
        }
        let start = idx + 1;
        let mut cursor = start;
        let mut closed = false;
        while cursor < chars.len() {
            check_deadline(deadline)?;
            if chars[cursor] == quote && (cursor == start || chars[cursor - 1] != '\\') {
                spans.push((start, cursor));
                idx = cursor + 1;
                closed = true;
                break;
            }
            cursor += 1;
        }
        if !closed {
            idx += 1;
        }
    }
    Ok(spans)
}

/// Indices of the opening and closing marks of terminated quotes.
pub fn quote_mark_positions(
    chars: &[char],
    deadline: Instant,
) -> Result<HashSet<usize>, DeadlineExceeded> {
    let mut positions = HashSet::new();
    let mut idx = 0;
    while idx < chars.len() {
        check_deadline(deadline)?;
        let quote = chars[idx];
        if quote != '"' && quote != '\'' {
            idx += 1;
            continue;
        }
        let start = idx;
        let mut cursor = idx + 1;
        let mut closed = false;
        while cursor < chars.len() {
            check_deadline(deadline)?;
            if chars[cursor] == quote && chars[cursor - 1] != '\\' {
                positions.insert(start);
                positions.insert(cursor);
                idx = cursor + 1;
                closed = true;
                break;
            }
            cursor += 1;
        }
        if !closed {
            idx += 1;
        }
    }
    Ok(positions)
}

/// Maximal identifier runs immediately followed, after optional whitespace, by `=`.
pub fn lhs_spans(
    chars: &[char],
    deadline: Instant,
) -> Result<Vec<(usize, usize)>, DeadlineExceeded> {
    let mut spans = Vec::new();
    let length = chars.len();
    let mut idx = 0;
    while idx < length {
        check_deadline(deadline)?;
        let ch = chars[idx];
        if !(ch.is_alphabetic() || ch == '_') {
            idx += 1;
            continue;
        }
        let start = idx;
        idx += 1;
        while idx < length && (chars[idx].is_alphanumeric() || chars[idx] == '_') {
            check_deadline(deadline)?;
            idx += 1;
        }
        let end = idx;
        let mut lookahead = idx;
        while lookahead < length && chars[lookahead].is_whitespace() {
            lookahead += 1;
        }
        if lookahead < length && chars[lookahead] == '=' {
            spans.push((start, end));
        }
    }
    Ok(spans)
}

fn index_in_spans(index: usize, spans: &[(usize, usize)]) -> bool {
    spans.iter().any(|&(start, end)| start <= index && index < end)
}

/// The three scans of one line, bundled so both facilities classify characters
/// against identical state.
#[derive(Debug)]
pub struct LineScan {
    quote_spans: Vec<(usize, usize)>,
    quote_marks: HashSet<usize>,
    lhs: Vec<(usize, usize)>,
}

impl LineScan {
    /// Runs all three scans under one deadline.
    pub fn scan(chars: &[char], deadline: Instant) -> Result<Self, DeadlineExceeded> {
        Ok(Self {
            quote_spans: quoted_content_spans(chars, deadline)?,
            quote_marks: quote_mark_positions(chars, deadline)?,
            lhs: lhs_spans(chars, deadline)?,
        })
    }

    /// Per-character class, highest priority first: quote mark, quoted
    /// content, LHS identifier, digit, punctuation, base.
    #[must_use]
    pub fn classify(&self, index: usize, ch: char) -> TokenClass {
        if self.quote_marks.contains(&index) {
            TokenClass::QuoteMark
        } else if index_in_spans(index, &self.quote_spans) {
            TokenClass::QuoteContent
        } else if index_in_spans(index, &self.lhs) {
            TokenClass::Lhs
        } else if ch.is_ascii_digit() {
            TokenClass::Number
        } else if PUNCTUATION.contains(&ch) {
            TokenClass::Punct
        } else {
            TokenClass::Base
        }
    }
}
