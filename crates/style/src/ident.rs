//! Component identifier generation.

use rustc_hash::FxHashMap;
use tincture_primitives::{ComponentId, generate_alphabetic_name, hash};

/// Display name used when a definition has none.
pub const DEFAULT_DISPLAY_NAME: &str = "tc";

/// Characters replaced by `-` when a display name becomes part of an
/// identifier.
const SELECTOR_SPECIALS: &str = "[].#*$><+~=|^:(),\"'`-";

/// Produces `{prefix-}{display-name}-{hash}` identifiers, unique per
/// generator even when display names repeat.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
	prefix: String,
	counts: FxHashMap<String, usize>,
}

impl IdGenerator {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			counts: FxHashMap::default(),
		}
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Next identifier for `display_name`, nested under `parent` when given.
	pub fn generate(&mut self, display_name: Option<&str>, parent: Option<&ComponentId>) -> ComponentId {
		let escaped = display_name.map(escape).filter(|s| !s.is_empty());
		let escaped = escaped.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME);

		let count = self.counts.entry(escaped.to_string()).or_default();
		let seed = format!("{escaped}{count}");
		*count += 1;

		let mut id = format!("{escaped}-{}", generate_alphabetic_name(hash(&seed)));
		if !self.prefix.is_empty() {
			id = format!("{}-{id}", self.prefix);
		}
		if let Some(parent) = parent {
			id = format!("{parent}-{id}");
		}
		tracing::trace!(%id, "generated component id");
		ComponentId::new(id)
	}
}

/// Replaces runs of selector-special characters and whitespace with a
/// single `-`, dropping leading and trailing dashes.
pub fn escape(display_name: &str) -> String {
	let mut out = String::with_capacity(display_name.len());
	let mut pending_dash = false;
	for ch in display_name.chars() {
		if ch.is_whitespace() || SELECTOR_SPECIALS.contains(ch) {
			pending_dash = true;
			continue;
		}
		if pending_dash && !out.is_empty() {
			out.push('-');
		}
		pending_dash = false;
		out.push(ch);
	}
	out
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("Button", "Button")]
	#[case("styled.div", "styled-div")]
	#[case("Styled(Link)", "Styled-Link")]
	#[case("  a  b  ", "a-b")]
	#[case("--x--", "x")]
	#[case("::", "")]
	fn test_escape(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(escape(input), expected);
	}

	#[test]
	fn test_repeated_display_names_get_distinct_ids() {
		let mut ids = IdGenerator::default();
		let first = ids.generate(Some("Button"), None);
		let second = ids.generate(Some("Button"), None);
		assert_ne!(first, second);
		assert!(first.as_str().starts_with("Button-"));
		assert!(second.as_str().starts_with("Button-"));
	}

	#[test]
	fn test_ids_are_deterministic_per_generator() {
		let a = IdGenerator::default().generate(Some("Card"), None);
		let b = IdGenerator::default().generate(Some("Card"), None);
		assert_eq!(a, b);
		assert_eq!(
			a.as_str(),
			format!("Card-{}", generate_alphabetic_name(hash("Card0")))
		);
	}

	#[test]
	fn test_prefix_and_parent() {
		let mut ids = IdGenerator::new("app");
		let parent = ComponentId::new("Outer-abc");
		let id = ids.generate(Some("Inner"), Some(&parent));
		assert!(id.as_str().starts_with("Outer-abc-app-Inner-"), "{id}");
	}

	#[test]
	fn test_missing_or_empty_display_name_falls_back() {
		let mut ids = IdGenerator::default();
		assert!(ids.generate(None, None).as_str().starts_with("tc-"));
		assert!(ids.generate(Some("::"), None).as_str().starts_with("tc-"));
	}
}
