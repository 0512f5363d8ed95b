//! Inline message markup: `**bold**`, `*italic*` and bare `http(s)://` links.
//!
//! Formatting is flat. A span carries exactly one classification and the
//! contents of bold, italic and link spans are never scanned again, so
//! `**a *b* c**` is a single bold span with the asterisks kept verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bold is lazy, but a closing `**` that sits inside a longer run of
/// asterisks is pushed to the end of that run: `**bo*ld***` is bold `bo*ld*`.
/// Neither bold nor italic spans a line break (`\n` or `\r`).
static BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^\r\n]*?\**)\*\*").expect("bold regex pattern is valid")
});

static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^\r\n]*?)\*").expect("italic regex pattern is valid"));

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("URL regex pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    /// The span text doubles as the link target.
    Link,
}

/// A contiguous run of message text with one formatting classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Plain, text)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Bold, text)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Italic, text)
    }

    pub fn link(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Link, text)
    }
}

/// Split `text` on every match of `re`. The first capture group (or the whole
/// match when the pattern has none) becomes a span of `kind`; the text around
/// matches is handed to `between`.
fn split_matches(
    text: &str,
    re: &Regex,
    kind: SpanKind,
    spans: &mut Vec<Span>,
    between: &mut dyn FnMut(&str, &mut Vec<Span>),
) {
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            between(&text[last..whole.start()], spans);
        }
        let inner = caps.get(1).unwrap_or(whole);
        spans.push(Span::new(kind, inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        between(&text[last..], spans);
    }
}

fn push_plain(text: &str, spans: &mut Vec<Span>) {
    split_matches(text, &URL_RE, SpanKind::Link, spans, &mut |rest: &str, spans: &mut Vec<Span>| {
        spans.push(Span::plain(rest))
    });
}

fn push_unbolded(text: &str, spans: &mut Vec<Span>) {
    split_matches(text, &ITALIC_RE, SpanKind::Italic, spans, &mut push_plain);
}

/// Parse message markup into spans in document order.
///
/// Bold is found first, italic only in the text outside bold, and links only
/// in what is left as plain text. Unmatched delimiters stay literal. The
/// function is total: any string formats, the empty string to no spans.
pub fn format_message(content: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    split_matches(content, &BOLD_RE, SpanKind::Bold, &mut spans, &mut push_unbolded);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_empty_and_plain() {
        assert!(format_message("").is_empty());
        assert_eq!(format_message("hello"), vec![Span::plain("hello")]);
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(format_message("**bold**"), vec![Span::bold("bold")]);
        assert_eq!(format_message("*italic*"), vec![Span::italic("italic")]);
        assert_eq!(
            format_message("**a** and *b*"),
            vec![Span::bold("a"), Span::plain(" and "), Span::italic("b")]
        );
    }

    #[test]
    fn test_lazy_matches_do_not_merge() {
        assert_eq!(
            format_message("**a** **b**"),
            vec![Span::bold("a"), Span::plain(" "), Span::bold("b")]
        );
        assert_eq!(
            format_message("*x* *y*"),
            vec![Span::italic("x"), Span::plain(" "), Span::italic("y")]
        );
    }

    #[test]
    fn test_bold_content_is_not_rescanned() {
        assert_eq!(format_message("**bo*ld***"), vec![Span::bold("bo*ld*")]);
        assert_eq!(
            format_message("**see https://example.com**"),
            vec![Span::bold("see https://example.com")]
        );
    }

    #[test]
    fn test_italic_between_bold_segments() {
        assert_eq!(
            format_message("*one* **two** *three*"),
            vec![
                Span::italic("one"),
                Span::plain(" "),
                Span::bold("two"),
                Span::plain(" "),
                Span::italic("three"),
            ]
        );
    }

    #[test]
    fn test_unmatched_delimiters_stay_plain() {
        assert_eq!(format_message("**oops"), vec![Span::plain("**oops")]);
        assert_eq!(format_message("2 * 3"), vec![Span::plain("2 * 3")]);
        assert_eq!(
            format_message("**bold** then *"),
            vec![Span::bold("bold"), Span::plain(" then *")]
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            format_message("visit https://example.com now"),
            vec![
                Span::plain("visit "),
                Span::link("https://example.com"),
                Span::plain(" now"),
            ]
        );
        assert_eq!(
            format_message("http://a.b/c?d=1"),
            vec![Span::link("http://a.b/c?d=1")]
        );
        assert_eq!(format_message("ftp://nope"), vec![Span::plain("ftp://nope")]);
        assert_eq!(format_message("https://"), vec![Span::plain("https://")]);
    }

    #[test]
    fn test_link_keeps_trailing_punctuation() {
        assert_eq!(
            format_message("see https://example.com."),
            vec![Span::plain("see "), Span::link("https://example.com.")]
        );
    }

    #[test]
    fn test_link_inside_italic_is_not_a_link() {
        assert_eq!(
            format_message("*https://example.com*"),
            vec![Span::italic("https://example.com")]
        );
    }

    #[test]
    fn test_markup_does_not_cross_lines() {
        let spans = format_message("**a\nb**");
        assert!(spans.iter().all(|s| s.kind != SpanKind::Bold));
        assert_eq!(visible_text(&spans), "a\nb");

        let spans = format_message("**a\rb**");
        assert!(spans.iter().all(|s| s.kind != SpanKind::Bold));
        assert_eq!(visible_text(&spans), "a\rb");

        let spans = format_message("*a\r\nb*");
        assert!(spans.iter().all(|s| s.kind != SpanKind::Italic));
        assert_eq!(spans, vec![Span::plain("*a\r\nb*")]);
    }

    #[test]
    fn test_bold_closer_takes_whole_asterisk_run() {
        // The run after the inner text belongs to the bold span, so an
        // italic opener glued to it is left without a partner.
        assert_eq!(
            format_message("**x***y*"),
            vec![Span::bold("x*"), Span::plain("y*")]
        );
        assert_eq!(
            format_message("**a***b**"),
            vec![Span::bold("a*"), Span::plain("b"), Span::italic("")]
        );
        assert_eq!(
            format_message("**x** *y*"),
            vec![Span::bold("x"), Span::plain(" "), Span::italic("y")]
        );
    }

    #[test]
    fn test_reconstruction_preserves_order() {
        let cases = [
            ("plain words", "plain words"),
            ("**a** and *b*", "a and b"),
            ("**bo*ld***", "bo*ld*"),
            ("x **y** *z* https://q.r/s t", "x y z https://q.r/s t"),
            ("***", "*"),
            ("**", ""),
            ("日本 **語** *テ*スト", "日本 語 テスト"),
        ];
        for (input, expected) in cases {
            assert_eq!(visible_text(&format_message(input)), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_no_empty_plain_spans() {
        for input in ["**a****b**", "*a**b*", "https://a https://b", "**x**"] {
            assert!(
                format_message(input)
                    .iter()
                    .all(|s| s.kind != SpanKind::Plain || !s.text.is_empty()),
                "input: {input:?}"
            );
        }
    }
}
