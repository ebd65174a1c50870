//! The registry value and its insertion paths.
//!
//! # Invariants
//!
//! - Group order is first-registration order and never changes.
//! - Groups are assigned to tags in registration order, so every group of
//!   tag `n` precedes every group of tag `n + 1`.
//! - Within a direct tag, a group's rules occupy the index range starting at
//!   the sum of the cursors of the earlier groups in that tag.
//! - A (identifier, name) pair is inserted at most once.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tincture_primitives::{ComponentId, GeneratedName};

use crate::group::Group;
use crate::options::{RegistryOptions, Strategy, TagMarker};
use crate::tag::Tag;

/// Ordered, deduplicating store of generated CSS.
///
/// Every mutation takes `&mut self`; independent generation passes use
/// independent registries, obtained through [`Clone`] or [`Self::new`].
#[derive(Debug, Clone)]
pub struct StyleRegistry {
	pub(crate) options: RegistryOptions,
	pub(crate) groups: IndexMap<ComponentId, Group, FxBuildHasher>,
	pub(crate) tags: Vec<Tag>,
}

impl Default for StyleRegistry {
	fn default() -> Self {
		Self::new(RegistryOptions::default())
	}
}

impl StyleRegistry {
	/// Creates an empty registry.
	pub fn new(options: RegistryOptions) -> Self {
		Self {
			options,
			groups: IndexMap::default(),
			tags: Vec::new(),
		}
	}

	pub fn options(&self) -> &RegistryOptions {
		&self.options
	}

	pub fn strategy(&self) -> Strategy {
		self.options.strategy
	}

	/// Drops every group and tag, keeping the options.
	///
	/// Identifiers registered before the reset get a new position the next
	/// time they are registered or inserted into.
	pub fn reset(&mut self) {
		tracing::debug!(groups = self.groups.len(), "style registry reset");
		self.groups.clear();
		self.tags.clear();
	}

	/// Registers `id`, fixing its cascade position on first sight.
	///
	/// Returns `true` if the identifier was new.
	pub fn register_id(&mut self, id: &ComponentId) -> bool {
		if self.groups.contains_key(id) {
			return false;
		}
		let tag = self.tag_for_new_group();
		let slot = self.tags[tag].open_slot(id);
		self.groups.insert(id.clone(), Group::new(tag, slot));
		tracing::debug!(id = %id, position = self.groups.len() - 1, tag, "style group registered");
		true
	}

	pub fn has_id(&self, id: &str) -> bool {
		self.groups.contains_key(id)
	}

	/// Whether `name` was recorded for `id`.
	pub fn has_name(&self, id: &str, name: &str) -> bool {
		self.groups.get(id).is_some_and(|group| group.has_name(name))
	}

	/// Records `name` for `id` and physically inserts `rules`.
	///
	/// Unregistered identifiers are registered first. Returns `false`, and
	/// does nothing, when the pair is already present.
	pub fn insert(&mut self, id: &ComponentId, name: &GeneratedName, rules: Vec<String>) -> bool {
		if self.has_name(id.as_str(), name.as_str()) {
			tracing::trace!(id = %id, name = %name, "style already inserted");
			return false;
		}
		self.register_id(id);
		self.place(id, &rules);
		if let Some(group) = self.groups.get_mut(id) {
			group.entries.insert(name.clone(), rules);
		}
		tracing::trace!(id = %id, name = %name, "style inserted");
		true
	}

	/// Writes `rules` into the group's tag using the active strategy.
	///
	/// Returns how many rules the tag accepted.
	pub(crate) fn place(&mut self, id: &ComponentId, rules: &[String]) -> usize {
		let Some(position) = self.groups.get_index_of(id) else {
			return 0;
		};
		let offset = self.offset_of(position);
		let Self { groups, tags, .. } = self;
		let Some((_, group)) = groups.get_index_mut(position) else {
			return 0;
		};
		let Some(tag) = tags.get_mut(group.tag) else {
			return 0;
		};

		let mut accepted = 0;
		for rule in rules {
			let ok = match tag.strategy() {
				Strategy::Direct => tag.insert_rule(offset + group.cursor, rule),
				Strategy::Text => tag.append_text(group.slot, rule),
			};
			if ok {
				group.cursor += 1;
				accepted += 1;
			} else {
				tracing::debug!(id = %id, rule = %rule, "tag rejected rule");
			}
		}
		accepted
	}

	/// Index in the group's tag where the group's rules start.
	fn offset_of(&self, position: usize) -> usize {
		let Some((_, group)) = self.groups.get_index(position) else {
			return 0;
		};
		self.groups
			.values()
			.take(position)
			.filter(|other| other.tag == group.tag)
			.map(|other| other.cursor)
			.sum()
	}

	fn tag_for_new_group(&mut self) -> usize {
		let full = self.tags.last().is_none_or(|tag| {
			tag.group_count() >= self.options.max_groups_per_tag
				|| tag.rule_count() >= self.options.max_rules_per_tag
		});
		if full {
			let marker = TagMarker {
				attribute: self.options.attribute.clone(),
				version_attribute: self.options.version_attribute.clone(),
				version: self.options.version.clone(),
				index: self.tags.len(),
			};
			tracing::debug!(index = marker.index, strategy = ?self.options.strategy, "style tag created");
			self.tags.push(Tag::new(marker, self.options.strategy));
		}
		self.tags.len() - 1
	}

	/// Number of registered groups.
	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	pub fn group(&self, id: &str) -> Option<&Group> {
		self.groups.get(id)
	}

	/// Groups in cascade order.
	pub fn groups(&self) -> impl Iterator<Item = (&ComponentId, &Group)> {
		self.groups.iter()
	}

	/// Registered identifiers in cascade order.
	pub fn ids(&self) -> impl Iterator<Item = &ComponentId> {
		self.groups.keys()
	}

	/// Names recorded for `id`, in insertion order.
	pub fn names(&self, id: &str) -> impl Iterator<Item = &GeneratedName> {
		self.groups.get(id).into_iter().flat_map(Group::names)
	}

	pub fn tags(&self) -> &[Tag] {
		&self.tags
	}

	/// Materialized stylesheet across every tag, in tag order.
	pub fn to_css(&self) -> String {
		self.tags.iter().map(Tag::css_text).collect()
	}
}
