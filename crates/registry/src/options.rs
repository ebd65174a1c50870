//! Registry configuration and tag markers.

use serde::{Deserialize, Serialize};

/// Separator written after every rule in text output.
pub const SPLITTER: &str = "/*!tc*/\n";

/// Default attribute marking host style elements owned by a registry.
pub const DEFAULT_ATTRIBUTE: &str = "data-tincture";

/// Default attribute carrying the producing version.
pub const DEFAULT_VERSION_ATTRIBUTE: &str = "data-tincture-version";

/// Version stamped on tags and manifests produced by this build.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How rules are physically inserted into tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
	/// One parsed rule at a tracked index.
	#[default]
	Direct,
	/// Raw text appended to a per-group segment.
	Text,
}

/// Options accepted by [`crate::StyleRegistry::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
	pub strategy: Strategy,
	/// Attribute naming the registry's host style elements.
	pub attribute: String,
	/// Attribute carrying [`Self::version`] on host style elements.
	pub version_attribute: String,
	/// Version written to tags; host styles with another version are stale.
	pub version: String,
	/// New groups open a new tag once the last tag holds this many groups.
	pub max_groups_per_tag: usize,
	/// New groups open a new tag once the last tag holds this many rules.
	pub max_rules_per_tag: usize,
}

impl Default for RegistryOptions {
	fn default() -> Self {
		Self {
			strategy: Strategy::default(),
			attribute: DEFAULT_ATTRIBUTE.to_string(),
			version_attribute: DEFAULT_VERSION_ATTRIBUTE.to_string(),
			version: VERSION.to_string(),
			max_groups_per_tag: 1000,
			max_rules_per_tag: 4095,
		}
	}
}

impl RegistryOptions {
	/// Returns these options with `strategy` swapped in.
	pub fn with_strategy(mut self, strategy: Strategy) -> Self {
		self.strategy = strategy;
		self
	}
}

/// Identifies a tag: which registry attribute owns it, which version wrote
/// it, and its position in the tag chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagMarker {
	pub attribute: String,
	pub version_attribute: String,
	pub version: String,
	pub index: usize,
}

impl TagMarker {
	/// Opening `<style>` element for this tag's host style.
	pub fn open_tag(&self) -> String {
		format!(
			"<style {}=\"active\" {}=\"{}\">",
			self.attribute, self.version_attribute, self.version
		)
	}
}
