//! Alpha Vantage sends most numbers and dates as JSON strings and marks missing
//! values with the literal string `"None"` instead of `null`.
//!
//! [`OptionalNumber`] and [`OptionalDate`] decode that convention and encode back
//! to canonical JSON: an absent value always becomes a bare `null`, even though
//! the wire format delivered it as `"None"`. Consumers of dumped records should
//! expect `null`, never the sentinel.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use thiserror::Error;

/// Token the provider uses in place of `null`.
pub const NONE_SENTINEL: &str = "None";

/// Wire format of a present date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Date,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number => write!(f, "number"),
            TokenKind::Date => write!(f, "date"),
        }
    }
}

/// A token that is neither a parseable value nor the `None` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid optional {kind} token {token:?}")]
pub struct TokenError {
    pub kind: TokenKind,
    pub token: String,
}

impl TokenError {
    fn new(kind: TokenKind, token: &str) -> Self {
        Self {
            kind,
            token: token.to_string(),
        }
    }
}

/// Strips surrounding quotes and recognises the sentinel.
///
/// Returns `Ok(None)` for the sentinel and `Ok(Some(token))` for anything else.
/// An empty token is passed through so the caller's parser rejects it.
fn strip_token(raw: &[u8], kind: TokenKind) -> Result<Option<&str>, TokenError> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| TokenError::new(kind, &String::from_utf8_lossy(raw)))?;
    let token = text.trim_matches('"');
    if token == NONE_SENTINEL {
        Ok(None)
    } else {
        Ok(Some(token))
    }
}

fn parse_number(token: &str) -> Result<f64, TokenError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TokenError::new(TokenKind::Number, token)),
    }
}

fn parse_date(token: &str) -> Result<NaiveDate, TokenError> {
    // chrono accepts unpadded and signed fields, the wire format is fixed-width
    let bytes = token.as_bytes();
    let fixed_width = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !fixed_width {
        return Err(TokenError::new(TokenKind::Date, token));
    }
    NaiveDate::parse_from_str(token, DATE_FORMAT)
        .map_err(|_| TokenError::new(TokenKind::Date, token))
}

// ============================================================================
// OptionalNumber
// ============================================================================

/// A float that may be absent. Absent is never conflated with zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OptionalNumber {
    #[default]
    Absent,
    Present(f64),
}

impl OptionalNumber {
    /// Decodes a raw wire token such as `"12.5"`, `12.5`, `"None"` or `None`.
    pub fn decode(raw: &[u8]) -> Result<Self, TokenError> {
        match strip_token(raw, TokenKind::Number)? {
            None => Ok(OptionalNumber::Absent),
            Some(token) => parse_number(token).map(OptionalNumber::Present),
        }
    }

    /// Canonical wire encoding: `null`, or the value rounded to two decimals.
    ///
    /// The rounding is lossy: `0.1234` encodes as `0.12`.
    pub fn encode(&self) -> String {
        match self {
            OptionalNumber::Absent => "null".to_string(),
            OptionalNumber::Present(value) => format!("{:.2}", value),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            OptionalNumber::Absent => None,
            OptionalNumber::Present(value) => Some(*value),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, OptionalNumber::Absent)
    }
}

impl From<Option<f64>> for OptionalNumber {
    fn from(value: Option<f64>) -> Self {
        value.map_or(OptionalNumber::Absent, OptionalNumber::Present)
    }
}

impl From<OptionalNumber> for Option<f64> {
    fn from(value: OptionalNumber) -> Self {
        value.value()
    }
}

impl fmt::Display for OptionalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionalNumber::Absent => f.write_str(NONE_SENTINEL),
            OptionalNumber::Present(value) => write!(f, "{:.2}", value),
        }
    }
}

impl Serialize for OptionalNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionalNumber::Absent => serializer.serialize_none(),
            OptionalNumber::Present(value) if !value.is_finite() => Err(ser::Error::custom(
                format!("non-finite number {} has no JSON form", value),
            )),
            OptionalNumber::Present(_) => {
                let raw = RawValue::from_string(self.encode()).map_err(ser::Error::custom)?;
                raw.serialize(serializer)
            }
        }
    }
}

struct OptionalNumberVisitor;

impl<'de> Visitor<'de> for OptionalNumberVisitor {
    type Value = OptionalNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a numeric string, a number, \"None\" or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        OptionalNumber::decode(v.as_bytes()).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(OptionalNumber::Present(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(OptionalNumber::Present(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(OptionalNumber::Present(v as f64))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OptionalNumber::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OptionalNumber::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for OptionalNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OptionalNumberVisitor)
    }
}

// ============================================================================
// OptionalDate
// ============================================================================

/// A calendar date (no time component) that may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum OptionalDate {
    #[default]
    Absent,
    Present(NaiveDate),
}

impl OptionalDate {
    /// Decodes a raw wire token such as `"2024-03-31"` or `"None"`.
    pub fn decode(raw: &[u8]) -> Result<Self, TokenError> {
        match strip_token(raw, TokenKind::Date)? {
            None => Ok(OptionalDate::Absent),
            Some(token) => parse_date(token).map(OptionalDate::Present),
        }
    }

    /// Canonical wire encoding: `null`, or the quoted `YYYY-MM-DD` date.
    pub fn encode(&self) -> String {
        match self {
            OptionalDate::Absent => "null".to_string(),
            OptionalDate::Present(date) => format!("\"{}\"", date.format(DATE_FORMAT)),
        }
    }

    pub fn value(&self) -> Option<NaiveDate> {
        match self {
            OptionalDate::Absent => None,
            OptionalDate::Present(date) => Some(*date),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, OptionalDate::Absent)
    }
}

impl From<Option<NaiveDate>> for OptionalDate {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(OptionalDate::Absent, OptionalDate::Present)
    }
}

impl From<OptionalDate> for Option<NaiveDate> {
    fn from(value: OptionalDate) -> Self {
        value.value()
    }
}

impl fmt::Display for OptionalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionalDate::Absent => f.write_str(NONE_SENTINEL),
            OptionalDate::Present(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

impl Serialize for OptionalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionalDate::Absent => serializer.serialize_none(),
            OptionalDate::Present(date) => date.serialize(serializer),
        }
    }
}

struct OptionalDateVisitor;

impl<'de> Visitor<'de> for OptionalDateVisitor {
    type Value = OptionalDate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YYYY-MM-DD string, \"None\" or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        OptionalDate::decode(v.as_bytes()).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OptionalDate::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OptionalDate::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for OptionalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OptionalDateVisitor)
    }
}
