//! djb2-style content hashing over UTF-16 code units.
//!
//! # Invariants
//!
//! - [`hash`] is [`combine`] applied to [`SEED`], so a running hash can be
//!   started from either.
//! - Code units are folded from last to first. Class names produced from
//!   these hashes therefore line up with names produced by other
//!   implementations of the same scheme for identical input.

/// Starting value for every content hash.
pub const SEED: u32 = 5381;

/// Folds `text` into an existing hash.
///
/// The fold is order-sensitive: `combine(combine(h, a), b)` and
/// `combine(combine(h, b), a)` differ for almost every `a != b`.
#[inline]
pub fn combine(mut h: u32, text: &str) -> u32 {
	let units: Vec<u16> = text.encode_utf16().collect();
	for &unit in units.iter().rev() {
		h = h.wrapping_mul(33) ^ u32::from(unit);
	}
	h
}

/// Hashes `text` from [`SEED`].
#[inline]
pub fn hash(text: &str) -> u32 {
	combine(SEED, text)
}
