//! Random digit and string generation.
//!
//! The plain functions draw from the thread-local generator; the
//! `*_with_rng` variants take any generator so callers can seed it.

use rand::Rng;

const LOWERCASE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGIT_ALPHABET: &str = "1234567890";

/// `length` decimal digits, each uniform in `0..=9`.
pub fn random_digits(length: usize) -> String {
    random_digits_with_rng(length, &mut rand::rng())
}

pub fn random_digits_with_rng<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Alphabet used by `generate_random_string` for the given flags.
pub fn alphabet(upper: bool, include_digits: bool) -> Vec<char> {
    let mut chars: Vec<char> = if upper {
        LOWERCASE_ALPHABET.to_uppercase().chars().collect()
    } else {
        LOWERCASE_ALPHABET.chars().collect()
    };
    if include_digits {
        chars.extend(DIGIT_ALPHABET.chars());
    }
    chars
}

/// `length` independent uniform picks from `alphabet(upper, include_digits)`.
pub fn generate_random_string(length: usize, upper: bool, include_digits: bool) -> String {
    generate_random_string_with_rng(length, upper, include_digits, &mut rand::rng())
}

pub fn generate_random_string_with_rng<R: Rng + ?Sized>(
    length: usize,
    upper: bool,
    include_digits: bool,
    rng: &mut R,
) -> String {
    let chars = alphabet(upper, include_digits);
    (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}
