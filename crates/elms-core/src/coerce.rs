//! Coerce-or-default readers, one per field kind.
//!
//! Each reader takes whatever is stored at a path and returns the value a
//! control of that kind should display. A stored value whose variant does not
//! match falls back to the kind's safe default and is flagged as mismatched so
//! callers can log it.

use crate::value::Value;

/// A value read for display plus whether the stored variant had to be
/// discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced<T> {
    pub value: T,
    pub mismatched: bool,
}

impl<T> Coerced<T> {
    const fn exact(value: T) -> Self {
        Self {
            value,
            mismatched: false,
        }
    }

    fn fallback(value: T, stored: Option<&Value>) -> Self {
        Self {
            value,
            mismatched: stored.is_some_and(|stored| !stored.is_null()),
        }
    }
}

/// String kinds (free text, URL, date, enum selection). Default: `""`.
#[must_use]
pub fn text(stored: Option<&Value>) -> Coerced<&str> {
    match stored {
        Some(Value::Text(text)) => Coerced::exact(text.as_str()),
        other => Coerced::fallback("", other),
    }
}

/// Integer kind. Default: no value, which displays as an empty input.
/// Fractional numbers are truncated toward zero.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn integer(stored: Option<&Value>) -> Coerced<Option<i64>> {
    match stored {
        Some(Value::Integer(number)) => Coerced::exact(Some(*number)),
        Some(Value::Float(number)) if number.is_finite() => {
            Coerced::exact(Some(number.trunc() as i64))
        }
        other => Coerced::fallback(None, other),
    }
}

/// Boolean kind. Default: `false`.
#[must_use]
pub fn flag(stored: Option<&Value>) -> Coerced<bool> {
    match stored {
        Some(Value::Bool(flag)) => Coerced::exact(*flag),
        other => Coerced::fallback(false, other),
    }
}

/// Array kind. Default: no elements.
#[must_use]
pub fn items(stored: Option<&Value>) -> Coerced<&[Value]> {
    match stored {
        Some(Value::List(items)) => Coerced::exact(items.as_slice()),
        other => Coerced::fallback(&[], other),
    }
}

/// Parse integer input text the lenient way a browser number field is read:
/// optional surrounding whitespace, an optional sign, then leading digits.
/// Anything without leading digits becomes `0`, as does overflow.
#[must_use]
pub fn parse_integer_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    let magnitude = digits.parse::<i64>().unwrap_or(0);
    if negative { -magnitude } else { magnitude }
}
