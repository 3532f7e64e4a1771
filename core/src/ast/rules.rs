use pest_derive::Parser;

use crate::location;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct RulesParser;

pub type Pair<'a> = pest::iterators::Pair<'a, Rule>;
pub type Pairs<'a> = pest::iterators::Pairs<'a, Rule>;

pub(crate) fn fetch_next_pair<'a>(
    pairs: &mut Pairs<'a>,
    location: &Option<location::Location>,
    span: &Option<location::Span>,
) -> Result<Pair<'a>, Box<dyn crate::TypeifyErrorExt>> {
    match pairs.next() {
        Some(pair) => Ok(pair),
        None => Err(super::err::unexpected(
            "Expected more inner pairs but found none.",
            "typeify.ast.rules.fetch_next_pair",
            location.clone(),
            span.clone(),
        )),
    }
}

pub(crate) fn get_data_from_rule<'a>(
    rule: &Pair<'a>,
    script: &crate::script::Script,
) -> (
    Pairs<'a>,
    Option<location::Location>,
    Option<location::Span>,
) {
    let inner_rules = rule.clone().into_inner();
    let span = get_span_from_pair(rule, script);
    let location = get_location_from_pair(rule, script);
    (inner_rules, location, span)
}

pub(crate) fn location_at(offset: usize, script: &crate::script::Script) -> location::Location {
    let (line, column) = pest::Position::new(&script.content, offset)
        .map(|pos| pos.line_col())
        .unwrap_or((1, 1));
    location::Location {
        file: script.name.clone(),
        line,
        column,
        offset,
    }
}

pub fn get_location_from_pair(
    rule: &Pair,
    script: &crate::script::Script,
) -> Option<location::Location> {
    Some(location_at(rule.as_span().start(), script))
}

/// Span of a pair with trailing trivia trimmed: a pair that ends on an
/// omitted optional part has already consumed the whitespace and comments
/// after it.
pub fn get_span_from_pair(
    rule: &Pair,
    script: &crate::script::Script,
) -> Option<location::Span> {
    let span = rule.as_span();
    let start = span.start();
    let end = start + trim_trailing_trivia(span.as_str()).len();
    Some(location::Span {
        start: location_at(start, script),
        end: location_at(end, script),
    })
}

/// Strip whitespace and comments from the end of `text`. String and
/// template contents are skipped so a `//` inside them is kept.
fn trim_trailing_trivia(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut code_end = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = match text[i + 2..].find("*/") {
                    Some(close) => i + 2 + close + 2,
                    None => bytes.len(),
                };
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
                code_end = i.min(bytes.len());
            }
            b'\\' => {
                i += 2;
                while i < bytes.len() && !text.is_char_boundary(i) {
                    i += 1;
                }
                code_end = i.min(bytes.len());
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                i += 1;
                code_end = i;
            }
        }
    }
    // Multi-byte characters end on a boundary once their last byte is seen.
    &text[..code_end]
}

/// Offset of the first bracket that opens a level deeper than `limit`.
/// Brackets inside comments, strings, templates and regular expressions do
/// not count.
pub(crate) fn find_excess_nesting(text: &str, limit: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    // Last significant byte; a `/` after one of these starts a regex.
    let mut prev = b';';
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = match text[i + 2..].find("*/") {
                    Some(close) => i + 2 + close + 2,
                    None => bytes.len(),
                };
                continue;
            }
            b'/' if b"(,=:[!&|?{};+-*%<>~^".contains(&prev) => {
                i = skip_regex(bytes, i);
                prev = b'/';
                continue;
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
                prev = quote;
                continue;
            }
            b'(' | b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return Some(i);
                }
            }
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            prev = b;
        }
        i += 1;
    }
    None
}

/// Index just past the regex literal starting at `start`, or past the end of
/// its line when it never closes.
fn skip_regex(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => return i + 1,
            b'\n' => return i,
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Span from the start of `first` to the end of `last`.
pub fn join_spans(
    first: Option<&location::Span>,
    last: Option<&location::Span>,
) -> Option<location::Span> {
    match (first, last) {
        (Some(first), Some(last)) => Some(location::Span {
            start: first.start.clone(),
            end: last.end.clone(),
        }),
        _ => None,
    }
}
