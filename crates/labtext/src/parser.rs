//! Translator for dictated lab-result lines, built on nom.
//!
//! A line reads `- <date> <analyte> <value-or-rate> [<unit-or-range>] [<range>], ...`.
//! The grammar is informal and the classification of tokens is heuristic:
//! anything that parses as a number is a value, anything else is a rating code.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_while, take_while1},
    character::complete::char,
    combinator::{all_consuming, map, opt, rest},
    sequence::{preceded, separated_pair, terminated},
    IResult,
};

use crate::error::{TranslateError, TranslateResult};
use crate::record::{AnalysisFieldSet, TranslationResult};

/// Optional marker in front of a dictated line.
pub const HEADER_MARKER: &str = "- ";

/// Separator between analyte segments.
pub const SEGMENT_SEPARATOR: char = ',';

/// Positional tokens considered after the analyte name.
const MAX_CONTENT_TOKENS: usize = 3;

/// Translate one dictated line into its date token and analyte records.
///
/// Fails on the first malformed segment; no partial result is returned.
///
/// # Examples
///
/// ```rust
/// use labtext::translate;
///
/// let result = translate("- 01/01/2019 FT4 1.2 mmol/L (0.7-1.9), TSH n").unwrap();
/// assert_eq!(result.date_token, "01/01/2019");
///
/// let ft4 = &result.analyses[0];
/// assert_eq!(ft4.value, Some(1.2));
/// assert_eq!(ft4.unit.as_deref(), Some("mmol/l"));
/// assert_eq!((ft4.lower_limit, ft4.upper_limit), (Some(0.7), Some(1.9)));
///
/// assert_eq!(result.analyses[1].rate.as_deref(), Some("n"));
/// ```
pub fn translate(line: &str) -> TranslateResult<TranslationResult> {
    let text = normalize(line);
    let (date_token, body) = split_header(&text)?;

    let analyses = segment(body)
        .iter()
        .map(|s| classify(s))
        .collect::<TranslateResult<Vec<_>>>()?;

    Ok(TranslationResult {
        date_token: date_token.to_string(),
        analyses,
    })
}

// ============================================================================
// Normalizer and segmenter
// ============================================================================

/// Trim surrounding whitespace and trailing dots, then lower-case.
pub fn normalize(text: &str) -> String {
    text.trim_start()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_lowercase()
}

/// Split the analyte list on commas and normalize every piece.
///
/// Empty pieces are kept; [`classify`] rejects them.
pub fn segment(body: &str) -> Vec<String> {
    body.split(SEGMENT_SEPARATOR).map(normalize).collect()
}

// ============================================================================
// Date header
// ============================================================================

/// Split a line into its leading date token and the analyte list.
///
/// A leading [`HEADER_MARKER`] and any whitespace after it are dropped first.
pub fn split_header(text: &str) -> TranslateResult<(&str, &str)> {
    let stripped = text.strip_prefix(HEADER_MARKER).unwrap_or(text).trim_start();
    match header(text) {
        Ok((body, date_token)) => Ok((date_token, body)),
        Err(_) => Err(TranslateError::malformed(
            truncate(stripped, 40),
            "expected a date followed by the analyte list",
        )),
    }
}

fn header(input: &str) -> IResult<&str, &str> {
    preceded(
        opt(tag(HEADER_MARKER)),
        preceded(take_while(char::is_whitespace), word),
    )(input)
}

/// A run of non-whitespace followed by at least one whitespace character.
fn word(input: &str) -> IResult<&str, &str> {
    terminated(take_till1(char::is_whitespace), take_while1(char::is_whitespace))(input)
}

// ============================================================================
// Field classifier
// ============================================================================

/// Classify one normalized segment such as `ft4 1.2 mmol/l (0.7-1.9)`.
///
/// The first token is a value when it parses as a number and a rating code
/// otherwise. The second token is a range when parenthesised and a unit
/// otherwise. A parenthesised third token replaces any range from the second.
pub fn classify(segment: &str) -> TranslateResult<AnalysisFieldSet> {
    let (content, analyte) = word(segment).map_err(|_| {
        TranslateError::malformed(truncate(segment, 40), "missing content after analyte name")
    })?;

    let mut tokens = content.split_whitespace().take(MAX_CONTENT_TOKENS);
    let mut fields = AnalysisFieldSet::new(analyte);

    match tokens.next() {
        Some(first) => match first.parse::<f64>() {
            Ok(value) => fields.value = Some(value),
            Err(_) => fields.rate = Some(first.to_string()),
        },
        None => {
            return Err(TranslateError::malformed(
                truncate(segment, 40),
                "missing content after analyte name",
            ))
        }
    }

    if let Some(second) = tokens.next() {
        if is_range(second) {
            fields.set_range(parse_range(second)?);
        } else {
            fields.unit = Some(second.to_string());
        }
    }

    if let Some(third) = tokens.next() {
        if is_range(third) {
            fields.set_range(parse_range(third)?);
        }
    }

    Ok(fields)
}

/// Returns true for parenthesis-delimited tokens.
pub fn is_range(token: &str) -> bool {
    token.starts_with('(') && token.ends_with(')')
}

// ============================================================================
// Range parser
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bounds<'a> {
    Below(&'a str),
    Above(&'a str),
    Between(&'a str, &'a str),
}

/// Parse a reference interval: `(a-b)`, `(<b)` or `(>a)`.
///
/// The bounded form splits on `-`, so negative bounds cannot be written.
///
/// ```rust
/// use labtext::parse_range;
///
/// assert_eq!(parse_range("(0.7-1.9)").unwrap(), (Some(0.7), Some(1.9)));
/// assert_eq!(parse_range("(<22)").unwrap(), (None, Some(22.0)));
/// assert_eq!(parse_range("(>10)").unwrap(), (Some(10.0), None));
/// ```
pub fn parse_range(token: &str) -> TranslateResult<(Option<f64>, Option<f64>)> {
    let inner = token.trim_matches(|c| c == '(' || c == ')');

    let (_, parsed) = bounds(inner).map_err(|_| {
        TranslateError::malformed(token, "range needs exactly two bounds separated by '-'")
    })?;

    match parsed {
        Bounds::Below(high) => Ok((None, Some(number(high.trim_matches('<'))?))),
        Bounds::Above(low) => Ok((Some(number(low.trim_matches('>'))?), None)),
        Bounds::Between(low, high) => Ok((Some(number(low)?), Some(number(high)?))),
    }
}

fn bounds(input: &str) -> IResult<&str, Bounds<'_>> {
    alt((
        map(preceded(char('<'), rest), Bounds::Below),
        map(preceded(char('>'), rest), Bounds::Above),
        map(
            all_consuming(separated_pair(bound_text, char('-'), bound_text)),
            |(low, high)| Bounds::Between(low, high),
        ),
    ))(input)
}

fn bound_text(input: &str) -> IResult<&str, &str> {
    take_till1(|c| c == '-')(input)
}

fn number(token: &str) -> TranslateResult<f64> {
    token
        .parse::<f64>()
        .map_err(|_| TranslateError::not_a_number(token))
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Tests
// ============================================================================
