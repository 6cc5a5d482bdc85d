//! Classification of raw amount input.
//!
//! The validator never trusts upstream filtering: whatever text arrives is
//! re-parsed here and checked against the fixed amount policy.

use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Smallest principal accepted.
pub const MIN_AMOUNT: Decimal = dec!(100);
/// Largest principal accepted.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000);

/// Why an input was rejected.
///
/// The variants are stable reason codes; `Display` gives the message shown to
/// the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidAmount {
    #[error("يرجى إدخال المبلغ المطلوب")]
    Empty,
    #[error("يرجى إدخال مبلغ صحيح")]
    NotANumber,
    #[error("المبلغ الأدنى هو 100 ريال سعودي")]
    BelowMinimum,
    #[error("المبلغ الأقصى هو 1,000,000 ريال سعودي")]
    AboveMaximum,
}

impl InvalidAmount {
    /// Machine-readable identifier, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            InvalidAmount::Empty => "empty",
            InvalidAmount::NotANumber => "not_a_number",
            InvalidAmount::BelowMinimum => "below_minimum",
            InvalidAmount::AboveMaximum => "above_maximum",
        }
    }
}

/// Outcome of validating one raw input.
pub type ValidationResult = Result<Decimal, InvalidAmount>;

enum Parsed {
    Value(Decimal),
    /// A well-formed unsigned literal that does not fit in a `Decimal`.
    Overflow,
    Invalid,
}

/// Validates a raw amount string.
///
/// Rules apply in order and the first match wins: blank input, then anything
/// that is not a positive number, then the lower bound, then the upper bound.
pub fn validate(raw: &str) -> ValidationResult {
    let result = classify(raw);
    debug!("validate {:?} -> {:?}", raw, result);
    result
}

fn classify(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidAmount::Empty);
    }

    let amount = match parse_literal(trimmed) {
        Parsed::Value(amount) => amount,
        Parsed::Overflow => return Err(InvalidAmount::AboveMaximum),
        Parsed::Invalid => return Err(InvalidAmount::NotANumber),
    };

    if amount <= Decimal::ZERO {
        return Err(InvalidAmount::NotANumber);
    }
    if amount < MIN_AMOUNT {
        return Err(InvalidAmount::BelowMinimum);
    }
    if amount > MAX_AMOUNT {
        return Err(InvalidAmount::AboveMaximum);
    }

    Ok(amount)
}

/// Whether `raw` holds a number at all, regardless of the amount policy.
///
/// Used to decide if an input is worth remembering.
pub fn is_numeric(raw: &str) -> bool {
    matches!(parse_literal(raw.trim()), Parsed::Value(_))
}

/// Drops every character that is not an ASCII digit.
///
/// Mirrors the typing filter of an amount field: `"10,000 SAR"` becomes `"10000"`.
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

// Accepts `[+-]? digits [. digits]` where either side of the point may be
// empty but not both.
fn parse_literal(s: &str) -> Parsed {
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
        return Parsed::Invalid;
    }

    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        significant => significant,
    };
    let canonical = match (negative, frac_part.is_empty()) {
        (false, true) => int_part.to_string(),
        (false, false) => format!("{int_part}.{frac_part}"),
        (true, true) => format!("-{int_part}"),
        (true, false) => format!("-{int_part}.{frac_part}"),
    };

    let tiny = || {
        let smallest = Decimal::new(1, 28);
        Parsed::Value(if negative { -smallest } else { smallest })
    };

    match Decimal::from_str(&canonical) {
        // past 28 fractional digits a non-zero literal can parse to zero
        Ok(value) if value.is_zero() && has_nonzero_digit(int_part, frac_part) => tiny(),
        Ok(value) => Parsed::Value(value),
        Err(_) if !has_nonzero_digit(int_part, "") => {
            if has_nonzero_digit("", frac_part) { tiny() } else { Parsed::Value(Decimal::ZERO) }
        }
        Err(_) if negative => Parsed::Invalid,
        Err(_) => Parsed::Overflow,
    }
}

fn has_nonzero_digit(int_part: &str, frac_part: &str) -> bool {
    int_part.bytes().chain(frac_part.bytes()).any(|b| b != b'0')
}
