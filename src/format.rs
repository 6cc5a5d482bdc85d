use rust_decimal::Decimal;

use crate::amount::round_currency;

/// Suffix appended to every formatted amount (Saudi riyal).
pub const CURRENCY_SUFFIX: &str = " ر.س";

const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
const GROUP_SEPARATOR: char = '٬';
const ARABIC_LETTER_MARK: char = '\u{061C}';

/// Formats an amount as whole riyals in Arabic-Indic digits, grouped in
/// thousands: `11950` becomes `"١١٬٩٥٠ ر.س"`.
pub fn format_currency(amount: Decimal) -> String {
    format!("{}{}", format_number(amount), CURRENCY_SUFFIX)
}

/// Same as [`format_currency`] without the currency suffix.
pub fn format_number(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut out = String::with_capacity(digits.len() * 3);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push(ARABIC_LETTER_MARK);
        out.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        match ch.to_digit(10) {
            Some(d) => out.push(ARABIC_DIGITS[d as usize]),
            None => out.push(ch),
        }
    }

    out
}
