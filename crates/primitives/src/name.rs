//! Maps 32-bit hashes to short letters-only tokens.
//!
//! CSS class names may not start with a digit, so the alphabet is `a-z`
//! followed by `A-Z` (base 52, most significant letter first).

use crate::ids::GeneratedName;

const ALPHABET_LEN: u64 = 52;

fn letter(code: u64) -> char {
	let code = code as u8;
	if code < 26 {
		char::from(b'a' + code)
	} else {
		char::from(b'A' + (code - 26))
	}
}

/// Returns the letters-only token for `code`.
///
/// Distinct codes always map to distinct tokens. Distinct inputs hashing to
/// the same code are not detected.
pub fn generate_alphabetic_name(code: u32) -> GeneratedName {
	let mut x = u64::from(code);
	let mut letters = Vec::with_capacity(6);
	while x >= ALPHABET_LEN {
		letters.push(letter(x % ALPHABET_LEN));
		x /= ALPHABET_LEN;
	}
	letters.push(letter(x));
	GeneratedName::new(letters.into_iter().rev().collect::<String>())
}
