//! Named `@keyframes` blocks.

use std::sync::Arc;

use tincture_primitives::{ComponentId, GeneratedName, generate_alphabetic_name, hash};
use tincture_registry::StyleRegistry;
use tincture_transform::{Result, Transformer};

use crate::flatten::{flatten_all, join};
use crate::rule::Rule;

/// Prefix of the registry identifier keyframes are injected under.
pub const KEYFRAMES_ID_PREFIX: &str = "tc-keyframes-";

/// A `@keyframes` block named after its own content.
///
/// Cheap to clone; clones share the compiled rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyframes(Arc<Inner>);

#[derive(Debug, PartialEq, Eq)]
struct Inner {
	id: ComponentId,
	name: GeneratedName,
	rules: Vec<String>,
}

impl Keyframes {
	/// Compiles `rules` (`from { ... } to { ... }`) under a generated name.
	///
	/// Rules are flattened without a context, so lazy rules contribute
	/// nothing.
	pub fn new(rules: &[Rule], transformer: &Transformer) -> Result<Self> {
		let body = join(&flatten_all(rules, None, None));
		let stripped: String = body.chars().filter(|c| !c.is_whitespace()).collect();
		let name = generate_alphabetic_name(hash(&stripped));
		let rules = transformer.transform(&body, Some(name.as_str()), Some("@keyframes"), None)?;
		let id = ComponentId::new(format!("{KEYFRAMES_ID_PREFIX}{name}"));
		tracing::trace!(%name, "compiled keyframes");
		Ok(Self(Arc::new(Inner { id, name, rules })))
	}

	/// Name to use in `animation-name`.
	pub fn name(&self) -> &GeneratedName {
		&self.0.name
	}

	/// Registry identifier, `tc-keyframes-{name}`.
	pub fn id(&self) -> &ComponentId {
		&self.0.id
	}

	pub fn rules(&self) -> &[String] {
		&self.0.rules
	}

	/// Inserts the block into `registry` unless already present.
	pub fn inject(&self, registry: &mut StyleRegistry) -> bool {
		if registry.has_name(self.0.id.as_str(), self.0.name.as_str()) {
			return false;
		}
		registry.insert(&self.0.id, &self.0.name, self.0.rules.clone())
	}
}

impl std::fmt::Display for Keyframes {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.0.name.as_str())
	}
}
