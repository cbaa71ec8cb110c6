//! Validation of user-supplied values for the command-line and web front ends.
//!
//! The sort itself accepts anything; callers run their tokens through
//! [`parse_values`] first.

use thiserror::Error;

/// Largest accepted value, the maximum of a signed 32-bit integer.
pub const MAX_VALUE: u32 = 0x7fff_ffff;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no values to sort")]
    Empty,
    #[error("invalid token '{0}': expected a positive integer")]
    NotANumber(String),
    #[error("invalid token '{0}': zero is not a positive integer")]
    Zero(String),
    #[error("invalid token '{0}': larger than {max}", max = MAX_VALUE)]
    OutOfRange(String),
}

/// Parses one token made only of ASCII digits into a value in
/// `1..=MAX_VALUE`.
///
/// # Errors
///
/// Returns an [`InputError`] naming the token if it has a sign, any other
/// non-digit, or a value outside the accepted range.
pub fn parse_value(token: &str) -> Result<u32, InputError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotANumber(token.to_owned()));
    }
    // All digits, so the only possible failure is overflow.
    let value: u64 = token
        .parse()
        .map_err(|_| InputError::OutOfRange(token.to_owned()))?;
    if value == 0 {
        return Err(InputError::Zero(token.to_owned()));
    }
    u32::try_from(value)
        .ok()
        .filter(|&v| v <= MAX_VALUE)
        .ok_or_else(|| InputError::OutOfRange(token.to_owned()))
}

/// Parses every whitespace-separated value in `tokens`.
///
/// # Errors
///
/// Fails on the first invalid value, or with [`InputError::Empty`] when no
/// values are present at all.
pub fn parse_values<I, S>(tokens: I) -> Result<Vec<u32>, InputError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = Vec::new();
    for token in tokens {
        for word in token.as_ref().split_whitespace() {
            values.push(parse_value(word)?);
        }
    }
    if values.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(values)
}
