//! Base-62 encoding of non-negative integers.
//!
//! Digits are taken from [`ALPHABET`] (`0-9`, `a-z`, `A-Z`), most significant
//! digit first. Zero encodes to a single `'0'`.

/// The 62-character digit alphabet, ordered by digit value.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// Longest possible encoding of a `u64` (`u64::MAX` needs 11 digits).
const MAX_DIGITS: usize = 11;

/// Errors returned by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("input is empty")]
    Empty,

    #[error("invalid base62 character {0:?}")]
    InvalidCharacter(char),

    #[error("value does not fit in 64 bits")]
    Overflow,
}

/// Encodes `n` as a base-62 string.
///
/// # Examples
///
/// ```
/// use tinyurl::utils::base62::encode;
///
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(61), "Z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = [0u8; MAX_DIGITS];
    let mut pos = MAX_DIGITS;

    while n > 0 {
        pos -= 1;
        digits[pos] = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }

    digits[pos..].iter().map(|&b| b as char).collect()
}

/// Decodes a base-62 string produced by [`encode`].
///
/// # Errors
///
/// Returns [`DecodeError`] for empty input, characters outside [`ALPHABET`],
/// or values larger than `u64::MAX`.
pub fn decode(input: &str) -> Result<u64, DecodeError> {
    if input.is_empty() {
        return Err(DecodeError::Empty);
    }

    input.chars().try_fold(0u64, |acc, c| {
        let digit = digit_value(c).ok_or(DecodeError::InvalidCharacter(c))?;
        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(DecodeError::Overflow)
    })
}

/// Returns true if every character of `s` is a base-62 digit.
pub fn is_base62(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn digit_value(c: char) -> Option<u64> {
    let v = match c {
        '0'..='9' => c as u64 - '0' as u64,
        'a'..='z' => c as u64 - 'a' as u64 + 10,
        'A'..='Z' => c as u64 - 'A' as u64 + 36,
        _ => return None,
    };
    Some(v)
}
