//! Runtime values of literal nodes.
//!
//! Patterns compare literals by the value a JavaScript engine would produce,
//! not by their spelling: `0x10`, `16` and `1_6` are the same number and
//! `"A"` equals `'A'`.

use std::fmt;

use crate::kind::NodeKind;

/// The runtime value of a literal node.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A numeric literal, including a leading unary minus.
    Number(f64),
    /// A string literal or a template string without substitutions.
    String(String),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`.
    Null,
}

impl LiteralValue {
    /// Returns the string value if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the numeric value if this is a number literal.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Evaluates a literal node to its runtime value.
///
/// Parentheses are looked through. Returns `None` for anything that is not a
/// static literal, including BigInt literals and template strings with
/// substitutions.
#[must_use]
pub fn literal_value(node: tree_sitter::Node<'_>, source: &str) -> Option<LiteralValue> {
    match NodeKind::of(node) {
        NodeKind::Number => parse_number(node_text(node, source)?).map(LiteralValue::Number),
        NodeKind::String | NodeKind::TemplateString => {
            string_value(node, source).map(LiteralValue::String)
        }
        NodeKind::True => Some(LiteralValue::Boolean(true)),
        NodeKind::False => Some(LiteralValue::Boolean(false)),
        NodeKind::Null => Some(LiteralValue::Null),
        NodeKind::UnaryExpression => signed_number(node, source),
        NodeKind::ParenthesizedExpression => {
            let inner = first_named_child(node)?;
            literal_value(inner, source)
        }
        _ => None,
    }
}

/// Decodes a string literal or substitution-free template string.
#[must_use]
pub fn string_value(node: tree_sitter::Node<'_>, source: &str) -> Option<String> {
    let kind = NodeKind::of(node);
    if !matches!(kind, NodeKind::String | NodeKind::TemplateString) {
        return None;
    }

    let mut decoder = StringDecoder::default();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let text = node_text(child, source)?;
        match child.kind() {
            "string_fragment" => decoder.push_str(text),
            "escape_sequence" => decoder.push_escape(text),
            "html_character_reference" => decoder.push_str(&decode_html_reference(text)),
            "template_substitution" => return None,
            // Comments cannot occur inside literals; anything else is a
            // grammar shape we do not understand.
            _ => return None,
        }
    }
    Some(decoder.finish())
}

/// Returns the static name of an object key or JSX attribute name.
///
/// Identifiers and string keys yield their text or decoded value, numeric keys
/// their canonical number spelling. Computed keys yield `None`.
#[must_use]
pub fn static_key(node: tree_sitter::Node<'_>, source: &str) -> Option<String> {
    match NodeKind::of(node) {
        NodeKind::PropertyIdentifier
        | NodeKind::Identifier
        | NodeKind::ShorthandPropertyIdentifier
        | NodeKind::PrivatePropertyIdentifier
        | NodeKind::JsxNamespaceName => node_text(node, source).map(str::to_owned),
        NodeKind::String => string_value(node, source),
        NodeKind::Number => {
            parse_number(node_text(node, source)?).map(|value| LiteralValue::Number(value).to_string())
        }
        _ => None,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "a unary minus on a numeric literal is part of its runtime value"
)]
fn signed_number(node: tree_sitter::Node<'_>, source: &str) -> Option<LiteralValue> {
    let operator = node.child_by_field_name("operator")?;
    let argument = node.child_by_field_name("argument")?;
    let LiteralValue::Number(value) = literal_value(argument, source)? else {
        return None;
    };
    match operator.kind() {
        "-" => Some(LiteralValue::Number(-value)),
        "+" => Some(LiteralValue::Number(value)),
        _ => None,
    }
}

fn node_text<'s>(node: tree_sitter::Node<'_>, source: &'s str) -> Option<&'s str> {
    source.get(node.byte_range())
}

fn first_named_child(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|candidate| !candidate.is_extra())
}

/// Parses the text of a numeric literal.
///
/// Returns `None` for BigInt literals.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    if text.ends_with('n') {
        return None;
    }
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    let radix_digits = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| lower.strip_prefix(prefix).map(|digits| (digits, radix)));
    if let Some((digits, radix)) = radix_digits {
        return parse_radix(digits, radix);
    }

    // Legacy octal: a leading zero followed only by octal digits.
    if let Some(digits) = lower.strip_prefix('0')
        && !digits.is_empty()
        && digits.bytes().all(|b| (b'0'..=b'7').contains(&b))
    {
        return parse_radix(digits, 8);
    }

    lower.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc.mul_add(f64::from(radix), f64::from(digit)))
    })
}

/// Accumulates decoded string content, pairing UTF-16 surrogate escapes.
#[derive(Default)]
struct StringDecoder {
    out: String,
    pending_high: Option<u16>,
}

impl StringDecoder {
    fn push_str(&mut self, text: &str) {
        self.flush_pending();
        self.out.push_str(text);
    }

    fn push_char(&mut self, c: char) {
        self.flush_pending();
        self.out.push(c);
    }

    fn push_code_unit(&mut self, unit: u16) {
        if let Some(high) = self.pending_high.take() {
            if (0xDC00..=0xDFFF).contains(&unit) {
                let combined = 0x10000
                    + ((u32::from(high) - 0xD800) << 10)
                    + (u32::from(unit) - 0xDC00);
                self.out
                    .push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                return;
            }
            self.out.push(char::REPLACEMENT_CHARACTER);
        }
        if (0xD800..=0xDBFF).contains(&unit) {
            self.pending_high = Some(unit);
        } else {
            self.out.push(
                char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER),
            );
        }
    }

    fn push_code_point(&mut self, code_point: u32) {
        match u16::try_from(code_point) {
            Ok(unit) => self.push_code_unit(unit),
            Err(_) => self.push_char(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
    }

    fn push_escape(&mut self, escape: &str) {
        let Some(body) = escape.strip_prefix('\\') else {
            self.push_str(escape);
            return;
        };
        let mut chars = body.chars();
        let Some(first) = chars.next() else {
            return;
        };
        let rest = chars.as_str();
        match first {
            'n' => self.push_char('\n'),
            'r' => self.push_char('\r'),
            't' => self.push_char('\t'),
            'b' => self.push_char('\u{8}'),
            'f' => self.push_char('\u{c}'),
            'v' => self.push_char('\u{b}'),
            'x' => match u32::from_str_radix(rest, 16) {
                Ok(code) => self.push_code_point(code),
                Err(_) => self.push_str(body),
            },
            'u' => {
                let hex = rest
                    .strip_prefix('{')
                    .and_then(|r| r.strip_suffix('}'))
                    .unwrap_or(rest);
                match u32::from_str_radix(hex, 16) {
                    Ok(code) => self.push_code_point(code),
                    Err(_) => self.push_str(body),
                }
            }
            // Line continuation.
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => self.flush_pending(),
            '0'..='7' => {
                let (code, tail) = split_octal_escape(body);
                self.push_code_point(code);
                if !tail.is_empty() {
                    self.push_str(tail);
                }
            }
            other => {
                self.push_char(other);
                if !rest.is_empty() {
                    self.push_str(rest);
                }
            }
        }
    }

    fn flush_pending(&mut self) {
        if self.pending_high.take().is_some() {
            self.out.push(char::REPLACEMENT_CHARACTER);
        }
    }

    fn finish(mut self) -> String {
        self.flush_pending();
        self.out
    }
}

/// Splits a legacy octal escape body into its code point and the text
/// after it. At most three digits are read and the value stays below 256,
/// so `\08` is NUL followed by `8` and `\400` is a space followed by `0`.
fn split_octal_escape(body: &str) -> (u32, &str) {
    let octal_len = body
        .bytes()
        .take(3)
        .take_while(|b| (b'0'..=b'7').contains(b))
        .count();
    let max_len = if body.starts_with(['0', '1', '2', '3']) { 3 } else { 2 };
    let (digits, tail) = body
        .split_at_checked(octal_len.min(max_len))
        .unwrap_or((body, ""));
    let code = digits
        .chars()
        .filter_map(|c| c.to_digit(8))
        .fold(0, |acc, digit| acc * 8 + digit);
    (code, tail)
}

fn decode_html_reference(reference: &str) -> String {
    let Some(name) = reference
        .strip_prefix('&')
        .and_then(|r| r.strip_suffix(';'))
    else {
        return reference.to_owned();
    };
    let numeric = name.strip_prefix('#').and_then(|num| {
        num.strip_prefix(['x', 'X']).map_or_else(
            || num.parse::<u32>().ok(),
            |hex| u32::from_str_radix(hex, 16).ok(),
        )
    });
    if let Some(c) = numeric.and_then(char::from_u32) {
        return c.to_string();
    }
    let named = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        _ => return reference.to_owned(),
    };
    named.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("16", 16.0)]
    #[case("0x10", 16.0)]
    #[case("0X1f", 31.0)]
    #[case("0o20", 16.0)]
    #[case("0b1_0000", 16.0)]
    #[case("1_000", 1000.0)]
    #[case("1e3", 1000.0)]
    #[case(".5", 0.5)]
    #[case("020", 16.0)]
    #[case("0", 0.0)]
    fn parse_number_uses_runtime_value(#[case] text: &str, #[case] expected: f64) {
        assert_eq!(parse_number(text), Some(expected));
    }

    #[rstest]
    #[case("10n")]
    #[case("0x")]
    #[case("0b102")]
    fn parse_number_rejects_non_numbers(#[case] text: &str) {
        assert_eq!(parse_number(text), None);
    }

    #[rstest]
    #[case("&amp;", "&")]
    #[case("&#65;", "A")]
    #[case("&#x41;", "A")]
    #[case("&unknown;", "&unknown;")]
    fn html_references_decode(#[case] reference: &str, #[case] expected: &str) {
        assert_eq!(decode_html_reference(reference), expected);
    }

    #[rstest]
    #[case(&["\\n"], "\n")]
    #[case(&["\\x41"], "A")]
    #[case(&["\\u0041"], "A")]
    #[case(&["\\u{1F600}"], "\u{1F600}")]
    #[case(&["\\uD83D", "\\uDE00"], "\u{1F600}")]
    #[case(&["\\uD83D"], "\u{FFFD}")]
    #[case(&["\\'"], "'")]
    #[case(&["\\0"], "\0")]
    #[case(&["\\101"], "A")]
    #[case(&["\\08"], "\u{0}8")]
    #[case(&["\\400"], " 0")]
    fn escapes_decode(#[case] escapes: &[&str], #[case] expected: &str) {
        let mut decoder = StringDecoder::default();
        for escape in escapes {
            decoder.push_escape(escape);
        }
        assert_eq!(decoder.finish(), expected);
    }
}
