use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tincture_primitives::GeneratedName;

/// Everything a registry holds for one identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
	pub(crate) tag: usize,
	pub(crate) slot: usize,
	/// Rules physically inserted into the tag so far (direct strategy).
	pub(crate) cursor: usize,
	/// Rules taken over from previously delivered output.
	pub(crate) rehydrated: Vec<String>,
	pub(crate) entries: IndexMap<GeneratedName, Vec<String>, FxBuildHasher>,
}

impl Group {
	pub(crate) fn new(tag: usize, slot: usize) -> Self {
		Self {
			tag,
			slot,
			..Self::default()
		}
	}

	/// Index of the tag this group lives in.
	pub fn tag(&self) -> usize {
		self.tag
	}

	/// Rules inserted into the group's tag so far.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn has_name(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Recorded names, in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &GeneratedName> {
		self.entries.keys()
	}

	/// Rules stored for `name`.
	pub fn rules_for(&self, name: &str) -> Option<&[String]> {
		self.entries.get(name).map(Vec::as_slice)
	}

	/// All rules of the group in output order.
	pub fn rules(&self) -> impl Iterator<Item = &str> {
		self.rehydrated
			.iter()
			.chain(self.entries.values().flatten())
			.map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty() && self.rehydrated.is_empty()
	}
}
