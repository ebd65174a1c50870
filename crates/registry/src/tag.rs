//! Insertion targets.
//!
//! A [`Tag`] stands in for one host style element. Direct tags hold a list
//! of rules addressed by index; text tags hold one segment per group, each
//! opened with a boundary comment naming the group.

use tincture_primitives::ComponentId;

use crate::options::{SPLITTER, Strategy, TagMarker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
	id: ComponentId,
	text: String,
	rules: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TagBody {
	Rules(Vec<String>),
	Text(Vec<Segment>),
}

/// One host location receiving rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
	marker: TagMarker,
	groups: usize,
	body: TagBody,
}

impl Tag {
	pub(crate) fn new(marker: TagMarker, strategy: Strategy) -> Self {
		let body = match strategy {
			Strategy::Direct => TagBody::Rules(Vec::new()),
			Strategy::Text => TagBody::Text(Vec::new()),
		};
		Self {
			marker,
			groups: 0,
			body,
		}
	}

	pub fn marker(&self) -> &TagMarker {
		&self.marker
	}

	pub fn strategy(&self) -> Strategy {
		match self.body {
			TagBody::Rules(_) => Strategy::Direct,
			TagBody::Text(_) => Strategy::Text,
		}
	}

	/// Number of groups placed in this tag.
	pub fn group_count(&self) -> usize {
		self.groups
	}

	/// Number of rules physically held.
	pub fn rule_count(&self) -> usize {
		match &self.body {
			TagBody::Rules(rules) => rules.len(),
			TagBody::Text(segments) => segments.iter().map(|s| s.rules).sum(),
		}
	}

	/// Rules of a direct tag, in document order. Empty for text tags.
	pub fn rules(&self) -> &[String] {
		match &self.body {
			TagBody::Rules(rules) => rules,
			TagBody::Text(_) => &[],
		}
	}

	/// Reserves the next slot for a group and returns its position.
	///
	/// Text tags open the group's segment here, so segment order is
	/// registration order even if the group's text arrives later.
	pub(crate) fn open_slot(&mut self, id: &ComponentId) -> usize {
		let slot = self.groups;
		self.groups += 1;
		if let TagBody::Text(segments) = &mut self.body {
			segments.push(Segment {
				id: id.clone(),
				text: String::new(),
				rules: 0,
			});
		}
		slot
	}

	/// Inserts one rule at `index` (direct tags).
	///
	/// Returns `false` without inserting when the text is not exactly one
	/// rule, when the index is past the end, or when this is a text tag.
	pub(crate) fn insert_rule(&mut self, index: usize, rule: &str) -> bool {
		let TagBody::Rules(rules) = &mut self.body else {
			return false;
		};
		if index > rules.len() || !is_single_rule(rule) {
			return false;
		}
		rules.insert(index, rule.to_string());
		true
	}

	/// Appends one rule's text to the segment at `slot` (text tags).
	pub(crate) fn append_text(&mut self, slot: usize, rule: &str) -> bool {
		let TagBody::Text(segments) = &mut self.body else {
			return false;
		};
		let Some(segment) = segments.get_mut(slot) else {
			return false;
		};
		segment.text.push_str(rule);
		segment.text.push_str(SPLITTER);
		segment.rules += 1;
		true
	}

	/// Materialized contents of the tag.
	pub fn css_text(&self) -> String {
		let mut out = String::new();
		match &self.body {
			TagBody::Rules(rules) => {
				for rule in rules {
					out.push_str(rule);
					out.push('\n');
				}
			}
			TagBody::Text(segments) => {
				for segment in segments {
					out.push_str(&format!("/* tc-component-id: {} */\n", segment.id));
					out.push_str(&segment.text);
				}
			}
		}
		out
	}
}

/// Accepts `@statement ...;` or a single balanced `prelude { ... }` block.
fn is_single_rule(rule: &str) -> bool {
	let rule = rule.trim();
	if rule.is_empty() {
		return false;
	}
	if rule.starts_with('@') && rule.ends_with(';') && !rule.contains('{') {
		return true;
	}
	if !rule.ends_with('}') {
		return false;
	}
	let mut depth = 0usize;
	let mut opened = false;
	let mut quote: Option<char> = None;
	let mut escaped = false;
	for (i, c) in rule.char_indices() {
		if let Some(q) = quote {
			if escaped {
				escaped = false;
			} else if c == '\\' {
				escaped = true;
			} else if c == q {
				quote = None;
			}
			continue;
		}
		match c {
			'"' | '\'' => quote = Some(c),
			'{' => {
				depth += 1;
				opened = true;
			}
			'}' => {
				if depth == 0 {
					return false;
				}
				depth -= 1;
				if depth == 0 && i + 1 != rule.len() {
					return false;
				}
			}
			_ => {}
		}
	}
	opened && depth == 0
}
