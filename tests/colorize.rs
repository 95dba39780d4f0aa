use logfence::fmt::colorize::{
    LineScan, TokenClass, lhs_spans, quote_mark_positions, quoted_content_spans,
};
use std::time::{Duration, Instant};

fn far_deadline() -> Instant {
    Instant::now() + Duration::from_secs(60)
}

fn chars_of(text: &str) -> Vec<char> {
    text.chars().collect()
}

#[test]
fn quoted_content_span_covers_text_between_marks() {
    let chars = chars_of("key='value'");
    let spans = quoted_content_spans(&chars, far_deadline()).unwrap();
    assert_eq!(spans, vec![(5, 10)]);
}

#[test]
fn unterminated_quote_produces_no_span() {
    let chars = chars_of("broken='value");
    assert!(quoted_content_spans(&chars, far_deadline()).unwrap().is_empty());
    assert!(quote_mark_positions(&chars, far_deadline()).unwrap().is_empty());
}

#[test]
fn escaped_quote_does_not_close_span() {
    let chars = chars_of(r#"say "hi \" there" end"#);
    let spans = quoted_content_spans(&chars, far_deadline()).unwrap();
    assert_eq!(spans, vec![(5, 16)]);
}

#[test]
fn empty_quotes_close_immediately() {
    let chars = chars_of("x=''");
    let spans = quoted_content_spans(&chars, far_deadline()).unwrap();
    assert_eq!(spans, vec![(3, 3)]);
}

#[test]
fn mixed_quote_kinds_do_not_terminate_each_other() {
    let chars = chars_of(r#"a="it's" b"#);
    let spans = quoted_content_spans(&chars, far_deadline()).unwrap();
    assert_eq!(spans, vec![(3, 7)]);
}

#[test]
fn quote_marks_report_opening_and_closing_indices() {
    let chars = chars_of("k='v'");
    let marks = quote_mark_positions(&chars, far_deadline()).unwrap();
    assert!(marks.contains(&2));
    assert!(marks.contains(&4));
    assert_eq!(marks.len(), 2);
}

#[test]
fn lhs_span_requires_equals_after_identifier() {
    let chars = chars_of("status=201 plain word rate = 3");
    let spans = lhs_spans(&chars, far_deadline()).unwrap();
    assert_eq!(spans, vec![(0, 6), (22, 26)]);
}

#[test]
fn lhs_identifier_may_start_with_underscore() {
    let chars = chars_of("_id=7");
    let spans = lhs_spans(&chars, far_deadline()).unwrap();
    assert_eq!(spans, vec![(0, 3)]);
}

#[test]
fn classification_priority_is_stable() {
    let chars = chars_of("count='12'+3");
    let scan = LineScan::scan(&chars, far_deadline()).unwrap();

    // c-o-u-n-t is an LHS identifier.
    assert_eq!(scan.classify(0, chars[0]), TokenClass::Lhs);
    // '=' is punctuation, outside any span.
    assert_eq!(scan.classify(5, chars[5]), TokenClass::Punct);
    // The quote marks win over everything.
    assert_eq!(scan.classify(6, chars[6]), TokenClass::QuoteMark);
    assert_eq!(scan.classify(9, chars[9]), TokenClass::QuoteMark);
    // Digits inside quotes are quote content, not numbers.
    assert_eq!(scan.classify(7, chars[7]), TokenClass::QuoteContent);
    // Digits outside quotes are numbers.
    assert_eq!(scan.classify(11, chars[11]), TokenClass::Number);
    // '+' outside spans is punctuation.
    assert_eq!(scan.classify(10, chars[10]), TokenClass::Punct);
}

#[test]
fn base_class_for_plain_text() {
    let chars = chars_of("hello");
    let scan = LineScan::scan(&chars, far_deadline()).unwrap();
    for (idx, &ch) in chars.iter().enumerate() {
        assert_eq!(scan.classify(idx, ch), TokenClass::Base);
    }
}

#[test]
fn expired_deadline_aborts_every_scan() {
    let chars = chars_of("key='value' other=42");
    let past = Instant::now() - Duration::from_millis(1);
    assert!(quoted_content_spans(&chars, past).is_err());
    assert!(quote_mark_positions(&chars, past).is_err());
    assert!(lhs_spans(&chars, past).is_err());
    assert!(LineScan::scan(&chars, past).is_err());
}

#[test]
fn empty_line_scans_instantly() {
    let chars = chars_of("");
    let scan = LineScan::scan(&chars, far_deadline());
    assert!(scan.is_ok());
}

#[test]
fn css_classes_match_the_validator_allow_list() {
    assert_eq!(TokenClass::Base.css_class(), "syn-base");
    assert_eq!(TokenClass::QuoteMark.css_class(), "syn-quote-mark");
    assert_eq!(TokenClass::QuoteContent.css_class(), "syn-quote-content");
    assert_eq!(TokenClass::Number.css_class(), "syn-number");
    assert_eq!(TokenClass::Punct.css_class(), "syn-punct");
    assert_eq!(TokenClass::Lhs.css_class(), "syn-lhs");
}
