//! Strict allow-list validation of rendered HTML rows.
//!
//! The HTML facility only ever appends rows it generated itself, but the
//! document's schema guarantee does not rest on the renderer being correct:
//! every row is re-parsed here before a single byte is committed. Anything
//! that is not exactly the expected shape — an unexpected tag, a stray
//! attribute, an unknown CSS class, a comment, an unbalanced stack — rejects
//! the whole write.

use crate::error::Error;

const ALLOWED_TAGS: &[&str] = &["div", "pre", "span"];

const ALLOWED_CLASSES: &[&str] = &[
    "log-row",
    "log-line-no",
    "log-time",
    "log-date",
    "log-clock",
    "badge-info",
    "badge-debug",
    "badge-warning",
    "badge-error",
    "syn-base",
    "syn-quote-mark",
    "syn-quote-content",
    "syn-number",
    "syn-punct",
    "syn-lhs",
];

/// Streaming strict parser over one rendered row.
///
/// Tracks open tags so balance is enforced exactly; text content is free-form
/// because everything interpolated into it was entity-escaped upstream.
struct RowValidator {
    stack: Vec<String>,
    saw_root: bool,
}

impl RowValidator {
    const fn new() -> Self {
        Self {
            stack: Vec::new(),
            saw_root: false,
        }
    }

    fn start_tag(&mut self, tag: &str) -> Result<(), Error> {
        if !ALLOWED_TAGS.contains(&tag) {
            return Err(Error::Sanitization(format!("disallowed HTML tag: '{tag}'")));
        }
        if !self.saw_root {
            if tag != "div" {
                return Err(Error::Sanitization(
                    "HTML row must start with a <div> root".to_string(),
                ));
            }
            self.saw_root = true;
        }
        self.stack.push(tag.to_string());
        Ok(())
    }

    fn end_tag(&mut self, tag: &str) -> Result<(), Error> {
        if !ALLOWED_TAGS.contains(&tag) {
            return Err(Error::Sanitization(format!(
                "disallowed closing HTML tag: '{tag}'"
            )));
        }
        let Some(expected) = self.stack.pop() else {
            return Err(Error::Sanitization(
                "unexpected closing tag in HTML fragment".to_string(),
            ));
        };
        if expected != tag {
            return Err(Error::Sanitization(format!(
                "unbalanced HTML tags: expected '</{expected}>' but got '</{tag}>'"
            )));
        }
        Ok(())
    }

    fn attribute(tag: &str, name: &str, value: Option<&str>) -> Result<(), Error> {
        let lowered = name.to_lowercase();
        if lowered.starts_with("on") {
            return Err(Error::Sanitization(format!(
                "event handler attribute '{name}' is not allowed"
            )));
        }
        if lowered != "class" {
            return Err(Error::Sanitization(format!(
                "attribute '{name}' is not allowed on '<{tag}>'"
            )));
        }
        let Some(value) = value else {
            return Err(Error::Sanitization(
                "empty class attribute is not allowed".to_string(),
            ));
        };
        let classes: Vec<&str> = value.split_whitespace().collect();
        if classes.is_empty() {
            return Err(Error::Sanitization(
                "class attribute must not be empty".to_string(),
            ));
        }
        for class in classes {
            if !ALLOWED_CLASSES.contains(&class) {
                return Err(Error::Sanitization(format!(
                    "disallowed CSS class in HTML fragment: '{class}'"
                )));
            }
        }
        Ok(())
    }

    fn finish(&self) -> Result<(), Error> {
        if !self.saw_root {
            return Err(Error::Sanitization(
                "HTML row validator did not find root tag".to_string(),
            ));
        }
        if !self.stack.is_empty() {
            return Err(Error::Sanitization("HTML row has unclosed tags".to_string()));
        }
        Ok(())
    }
}

/// Validates one rendered row, or rejects it with [`Error::Sanitization`].
///
/// # Errors
/// Any deviation from the fixed row schema: disallowed or malformed tags,
/// attributes other than an allow-listed `class`, event handler attributes,
/// self-closing tags, comments or markup declarations, unbalanced nesting.
pub fn validate_row(row: &str) -> Result<(), Error> {
    let chars: Vec<char> = row.chars().collect();
    let mut validator = RowValidator::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '<' {
            i = parse_tag(&chars, i, &mut validator)?;
        } else {
            i += 1;
        }
    }
    validator.finish()
}

/// Parses one tag starting at the `<` at `start`; returns the index just past `>`.
fn parse_tag(chars: &[char], start: usize, validator: &mut RowValidator) -> Result<usize, Error> {
    let mut i = start + 1;

    if chars.get(i) == Some(&'!') || chars.get(i) == Some(&'?') {
        if starts_with(chars, i, "!--") {
            return Err(Error::Sanitization(
                "HTML comments are not allowed in log rows".to_string(),
            ));
        }
        return Err(Error::Sanitization(
            "markup declarations are not allowed in log rows".to_string(),
        ));
    }

    let closing = chars.get(i) == Some(&'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    while i < chars.len() && chars[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == name_start {
        return Err(Error::Sanitization(
            "malformed tag in HTML fragment".to_string(),
        ));
    }
    let tag: String = chars[name_start..i].iter().collect::<String>().to_lowercase();

    if closing {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if chars.get(i) != Some(&'>') {
            return Err(Error::Sanitization(
                "malformed closing tag in HTML fragment".to_string(),
            ));
        }
        validator.end_tag(&tag)?;
        return Ok(i + 1);
    }

    // Attributes are validated as they stream by; the start tag is only
    // registered once its closing '>' is found intact.
    let mut attrs: Vec<(String, Option<String>)> = Vec::new();
    loop {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        match chars.get(i) {
            None => {
                return Err(Error::Sanitization(
                    "unterminated tag in HTML fragment".to_string(),
                ));
            }
            Some('>') => {
                i += 1;
                break;
            }
            Some('/') => {
                return Err(Error::Sanitization(format!(
                    "self-closing HTML tag '<{tag}/>' is not allowed in log rows"
                )));
            }
            Some(_) => {
                let (next, name, value) = parse_attribute(chars, i)?;
                i = next;
                attrs.push((name, value));
            }
        }
    }

    validator.start_tag(&tag)?;
    for (name, value) in &attrs {
        RowValidator::attribute(&tag, name, value.as_deref())?;
    }
    Ok(i)
}

type ParsedAttribute = (usize, String, Option<String>);

fn parse_attribute(chars: &[char], start: usize) -> Result<ParsedAttribute, Error> {
    let mut i = start;
    let name_start = i;
    while i < chars.len() && !chars[i].is_whitespace() && !matches!(chars[i], '=' | '>' | '/') {
        i += 1;
    }
    let name: String = chars[name_start..i].iter().collect();

    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) != Some(&'=') {
        return Ok((i, name, None));
    }
    i += 1;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }

    match chars.get(i) {
        Some(&quote @ ('"' | '\'')) => {
            i += 1;
            let value_start = i;
            while i < chars.len() && chars[i] != quote {
                i += 1;
            }
            if i >= chars.len() {
                return Err(Error::Sanitization(
                    "unterminated attribute value in HTML fragment".to_string(),
                ));
            }
            let value: String = chars[value_start..i].iter().collect();
            Ok((i + 1, name, Some(value)))
        }
        Some(_) => {
            let value_start = i;
            while i < chars.len() && !chars[i].is_whitespace() && chars[i] != '>' {
                i += 1;
            }
            let value: String = chars[value_start..i].iter().collect();
            Ok((i, name, Some(value)))
        }
        None => Err(Error::Sanitization(
            "unterminated tag in HTML fragment".to_string(),
        )),
    }
}

fn starts_with(chars: &[char], at: usize, pattern: &str) -> bool {
    pattern
        .chars()
        .enumerate()
        .all(|(offset, ch)| chars.get(at + offset) == Some(&ch))
}
