use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::{ChartError, ChartResult};

const DEFAULT_PRECISION: usize = 6;
const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    Fixed,
    Integer,
    Exponent,
    Percent,
    Shortest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberFormat {
    grouping: bool,
    precision: Option<usize>,
    kind: NumberKind,
}

/// Compiled axis tick label format.
///
/// Accepts the `[,][.precision][f|d|e|%]` subset of d3 number specifiers.
/// Anything else containing `%` is treated as a strftime pattern and tick
/// values are read as unix seconds in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickFormat {
    inner: Inner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Inner {
    Number(NumberFormat),
    Time(String),
}

impl TickFormat {
    pub fn parse(specifier: &str) -> ChartResult<Self> {
        if let Some(number) = parse_number_specifier(specifier) {
            return Ok(Self {
                inner: Inner::Number(number),
            });
        }
        if specifier.contains('%')
            && !StrftimeItems::new(specifier).any(|item| matches!(item, Item::Error))
        {
            return Ok(Self {
                inner: Inner::Time(specifier.to_owned()),
            });
        }
        Err(ChartError::InvalidSettings(format!(
            "unsupported tick format `{specifier}`"
        )))
    }

    #[must_use]
    pub fn is_time(&self) -> bool {
        matches!(self.inner, Inner::Time(_))
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match &self.inner {
            Inner::Number(number) => format_number(*number, value),
            Inner::Time(pattern) => format_time(pattern, value),
        }
    }
}

fn parse_number_specifier(specifier: &str) -> Option<NumberFormat> {
    let mut rest = specifier;
    let grouping = match rest.strip_prefix(',') {
        Some(tail) => {
            rest = tail;
            true
        }
        None => false,
    };

    let mut precision = None;
    if let Some(tail) = rest.strip_prefix('.') {
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let value: usize = tail[..digits].parse().ok()?;
        precision = Some(value.min(MAX_PRECISION));
        rest = &tail[digits..];
    }

    let kind = match rest {
        "" => NumberKind::Shortest,
        "f" => NumberKind::Fixed,
        "d" => NumberKind::Integer,
        "e" => NumberKind::Exponent,
        "%" => NumberKind::Percent,
        _ => return None,
    };
    Some(NumberFormat {
        grouping,
        precision,
        kind,
    })
}

fn format_number(format: NumberFormat, value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let precision = format.precision.unwrap_or(DEFAULT_PRECISION);
    let body = match format.kind {
        NumberKind::Fixed => format!("{value:.precision$}"),
        NumberKind::Integer => format!("{:.0}", value.round()),
        NumberKind::Percent => format!("{:.precision$}%", value * 100.0),
        NumberKind::Exponent => exponent(value, precision),
        NumberKind::Shortest => match format.precision {
            Some(significant) => significant_digits(value, significant.max(1)),
            None => format!("{value}"),
        },
    };
    let body = strip_negative_zero(body);
    if format.grouping && format.kind != NumberKind::Exponent {
        group_thousands(&body)
    } else {
        body
    }
}

fn exponent(value: f64, precision: usize) -> String {
    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => raw,
    }
}

fn significant_digits(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs().log10().floor() as i64;
    let decimals = (digits as i64 - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}

fn strip_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| matches!(b, b'0' | b'.' | b'%')) => rest.to_owned(),
        _ => text,
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let (integer, tail) = unsigned.split_at(digits);

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{tail}")
}

fn format_time(pattern: &str, seconds: f64) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    match DateTime::<Utc>::from_timestamp(whole as i64, nanos) {
        Some(time) => time.format(pattern).to_string(),
        None => String::new(),
    }
}
