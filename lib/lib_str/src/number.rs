use crate::StrError;

/// Appends the decimal digits of `value` to `dest` and returns how many were
/// written. Negative values write nothing and return 0.
pub fn write_int(dest: &mut String, value: i32) -> usize {
    if value < 0 {
        return 0;
    }

    let digits = value.to_string();
    dest.push_str(&digits);

    digits.len()
}

/// Decimal form of a non-negative `value`; empty for negative input.
pub fn int_to_string(value: i32) -> String {
    let mut result = String::new();
    write_int(&mut result, value);

    result
}

pub fn string_to_int(s: &str) -> Result<i32, StrError> {
    if s.is_empty() {
        return Err(StrError::Empty);
    }

    let mut result: i32 = 0;
    for (index, ch) in s.char_indices() {
        let Some(digit) = ch.to_digit(10) else {
            return Err(StrError::InvalidDigit { ch, index });
        };

        result = result
            .checked_mul(10)
            .and_then(|result| result.checked_add(digit as i32))
            .ok_or(StrError::Overflow)?;
    }

    Ok(result)
}

/// Parses hex digits with an optional `0x`/`0X` prefix. Digits may be either
/// case.
pub fn hex_to_u32(s: &str) -> Result<u32, StrError> {
    let (offset, digits) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => (2, digits),
        None => (0, s),
    };

    if digits.is_empty() {
        return Err(StrError::Empty);
    }

    let mut result: u32 = 0;
    for (index, ch) in digits.char_indices() {
        let Some(digit) = hex_digit_value(ch) else {
            return Err(StrError::InvalidHexDigit {
                ch,
                index: offset + index,
            });
        };

        result = result
            .checked_mul(16)
            .and_then(|result| result.checked_add(digit))
            .ok_or(StrError::Overflow)?;
    }

    Ok(result)
}

pub fn hex_digit_value(ch: char) -> Option<u32> {
    ch.to_digit(16)
}

/// Lowercase hex digit for `value`.
///
/// # Panics
///
/// Panics if `value >= 16`.
pub fn hex_digit_char(value: u8) -> char {
    assert!(value < 16, "{value} is not a single hex digit");

    match value {
        0..=9 => (b'0' + value) as char,
        _ => (b'a' + value - 10) as char,
    }
}
