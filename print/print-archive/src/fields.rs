//! Typed parsing of raw metadata values.
//!
//! Every function names the field it parses so failures point at the
//! offending key. Nothing here falls back to a default on bad input.

use crate::error::{ParseError, ParseResult};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parse a finite number, ignoring surrounding whitespace and quotes.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if the value is not a finite number.
pub fn parse_number(field: &str, value: &str) -> ParseResult<f64> {
    unquote(value)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::invalid_number(field, value))
}

/// Parse a percentage such as `15%` or `15`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if the number part is invalid.
pub fn parse_percent(field: &str, value: &str) -> ParseResult<f64> {
    let text = unquote(value);
    let text = text.strip_suffix('%').unwrap_or(text);
    parse_number(field, text).map_err(|_| ParseError::invalid_number(field, value))
}

/// Parse a list of numbers separated by `separator`. Empty items are skipped.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] for the first invalid item.
pub fn parse_number_list(field: &str, value: &str, separator: char) -> ParseResult<Vec<f64>> {
    split_list(value, separator)
        .into_iter()
        .filter(|item| !item.is_empty())
        .map(|item| parse_number(field, &item))
        .collect()
}

/// Parse a list of lengths in metres such as `1.25m, 0.5m`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] for the first invalid item.
pub fn parse_metres_list(field: &str, value: &str) -> ParseResult<Vec<f64>> {
    split_list(value, ',')
        .into_iter()
        .filter(|item| !item.is_empty())
        .map(|item| {
            let number = item.strip_suffix('m').unwrap_or(item.as_str());
            parse_number(field, number)
                .map_err(|_| ParseError::invalid_number(field, item.as_str()))
        })
        .collect()
}

/// Parse a duration into seconds.
///
/// Accepts plain seconds (`5342`) or unit groups (`1d 2h 3m 4s`, `2h5m`).
///
/// # Errors
///
/// Returns [`ParseError::InvalidDuration`] for anything else, including
/// negative values and an empty string.
///
/// # Example
///
/// ```
/// use print_archive::fields::parse_duration;
///
/// assert_eq!(parse_duration("time", "1h 2m 3s").unwrap(), 3723.0);
/// assert_eq!(parse_duration("time", "5342").unwrap(), 5342.0);
/// assert!(parse_duration("time", "soon").is_err());
/// ```
pub fn parse_duration(field: &str, value: &str) -> ParseResult<f64> {
    let invalid = || ParseError::invalid_duration(field, value);
    let text = unquote(value);

    if let Ok(seconds) = text.parse::<f64>() {
        return if seconds.is_finite() && seconds >= 0.0 {
            Ok(seconds)
        } else {
            Err(invalid())
        };
    }

    let mut total = 0.0;
    let mut number = String::new();
    let mut groups = 0;

    for ch in text.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            number.push(ch);
            continue;
        }
        if ch.is_whitespace() {
            continue;
        }
        let unit = match ch.to_ascii_lowercase() {
            'd' => SECONDS_PER_DAY,
            'h' => SECONDS_PER_HOUR,
            'm' => SECONDS_PER_MINUTE,
            's' => 1.0,
            _ => return Err(invalid()),
        };
        let amount: f64 = number.parse().map_err(|_| invalid())?;
        total += amount * unit;
        number.clear();
        groups += 1;
    }

    if groups == 0 || !number.is_empty() || !f64::is_finite(total) {
        return Err(invalid());
    }
    Ok(total)
}

/// Split a list value, trimming whitespace and quotes from every item.
///
/// Empty items are kept so positions line up across parallel lists.
pub fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(|item| unquote(item).to_string())
        .collect()
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"').trim()
}
