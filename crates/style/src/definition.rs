//! Style definitions and class-name generation.
//!
//! # Mental Model
//!
//! A [`StyleDefinition`] pairs a component identifier with a rule set.
//! Each render flattens the rules against an [`ExecutionContext`], hashes
//! the fragments into a name and inserts the compiled CSS under that name
//! once. Identical output always yields the same name, so repeated renders
//! only pay for the flatten and the hash.
//!
//! Definitions without lazy rules are static: their name is computed on the
//! first render and reused while the registry still holds it and the
//! transformer configuration is unchanged.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashSet;
use tincture_primitives::{ComponentId, GeneratedName, combine, generate_alphabetic_name, hash};
use tincture_registry::StyleRegistry;
use tincture_transform::{Result, Transformer};

use crate::context::{Attr, ExecutionContext};
use crate::flatten::{flatten_all, is_static};
use crate::rule::{ComponentRef, Rule, RuleSet};

/// Distinct names a definition may generate before a warning is logged.
pub const CLASS_WARNING_THRESHOLD: usize = 200;

/// Rule set bound to a component identifier.
#[derive(Debug)]
pub struct StyleDefinition {
	id: ComponentId,
	seed: u32,
	rules: RuleSet,
	attrs: Vec<Attr>,
	folded_ids: Vec<ComponentId>,
	is_static: bool,
	/// Static name with the transformer configuration it was computed under.
	static_name: RwLock<Option<(Option<u32>, GeneratedName)>>,
	seen: Mutex<FxHashSet<GeneratedName>>,
	warned: AtomicBool,
}

impl StyleDefinition {
	/// Creates a definition and registers `id`, fixing its cascade position.
	pub fn new(rules: RuleSet, id: ComponentId, registry: &mut StyleRegistry) -> Self {
		Self::with_attrs(rules, Vec::new(), id, registry)
	}

	pub fn with_attrs(
		rules: RuleSet,
		attrs: Vec<Attr>,
		id: ComponentId,
		registry: &mut StyleRegistry,
	) -> Self {
		Self::build(rules, attrs, Vec::new(), id, registry)
	}

	fn build(
		rules: RuleSet,
		attrs: Vec<Attr>,
		folded_ids: Vec<ComponentId>,
		id: ComponentId,
		registry: &mut StyleRegistry,
	) -> Self {
		registry.register_id(&id);
		let is_static = is_static(&rules);
		tracing::debug!(%id, is_static, rules = rules.len(), "defined style");
		Self {
			seed: hash(id.as_str()),
			id,
			rules,
			attrs,
			folded_ids,
			is_static,
			static_name: RwLock::new(None),
			seen: Mutex::new(FxHashSet::default()),
			warned: AtomicBool::new(false),
		}
	}

	/// Composes a new definition on top of `self`.
	///
	/// The result's rules are this definition's rules followed by `rules`;
	/// attributes concatenate the same way. The base identifier is kept in
	/// the class list of the result.
	pub fn extend(
		&self,
		rules: RuleSet,
		attrs: Vec<Attr>,
		id: ComponentId,
		registry: &mut StyleRegistry,
	) -> Self {
		let mut all_rules = self.rules.clone();
		all_rules.extend(rules);
		let mut all_attrs = self.attrs.clone();
		all_attrs.extend(attrs);
		let mut folded = self.folded_ids.clone();
		folded.push(self.id.clone());
		Self::build(all_rules, all_attrs, folded, id, registry)
	}

	pub fn id(&self) -> &ComponentId {
		&self.id
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn attrs(&self) -> &[Attr] {
		&self.attrs
	}

	/// Identifiers of the definitions this one was extended from, outermost
	/// base first.
	pub fn folded_ids(&self) -> &[ComponentId] {
		&self.folded_ids
	}

	pub fn is_static(&self) -> bool {
		self.is_static
	}

	/// Reference usable as a selector in other definitions.
	pub fn component_ref(&self) -> ComponentRef {
		ComponentRef::new(self.id.clone())
	}

	/// Computes the class name for `ctx` and makes sure its CSS is in
	/// `registry`.
	///
	/// Only the transformer can fail; flattening and hashing cannot.
	pub fn generate_and_inject(
		&self,
		ctx: &ExecutionContext,
		registry: &mut StyleRegistry,
		transformer: &Transformer,
	) -> Result<GeneratedName> {
		if self.is_static
			&& let Some(name) = self.cached_name_for(transformer)
			&& registry.has_name(self.id.as_str(), name.as_str())
		{
			tracing::trace!(id = %self.id, %name, "static name cache hit");
			return Ok(name);
		}

		let chunks = flatten_all(&self.rules, Some(ctx), Some(&mut *registry));

		let mut h = self.seed;
		if let Some(config_hash) = transformer.config_hash() {
			h = combine(h, &config_hash.to_string());
		}
		let mut css = String::new();
		for (index, chunk) in chunks.iter().enumerate() {
			let fragment = chunk.as_css();
			h = combine(h, &format!("{fragment}{index}"));
			css.push_str(fragment);
		}
		let name = generate_alphabetic_name(h);

		if !registry.has_name(self.id.as_str(), name.as_str()) {
			let rules = transformer.transform(&css, Some(&name.selector()), None, Some(self.id.as_str()))?;
			registry.insert(&self.id, &name, rules);
		}

		if self.is_static {
			*self.static_name.write() = Some((transformer.config_hash(), name.clone()));
		} else {
			self.track(&name);
		}
		Ok(name)
	}

	/// Cached name of a static definition, from its latest generation.
	pub fn cached_name(&self) -> Option<GeneratedName> {
		self.static_name.read().as_ref().map(|(_, name)| name.clone())
	}

	fn cached_name_for(&self, transformer: &Transformer) -> Option<GeneratedName> {
		match &*self.static_name.read() {
			Some((config, name)) if *config == transformer.config_hash() => Some(name.clone()),
			_ => None,
		}
	}

	/// Space-separated classes for an element rendered with `name`: folded
	/// base identifiers, own identifier, generated name.
	pub fn class_list(&self, name: &GeneratedName) -> String {
		let mut classes: Vec<&str> = self.folded_ids.iter().map(ComponentId::as_str).collect();
		classes.push(self.id.as_str());
		classes.push(name.as_str());
		classes.join(" ")
	}

	fn track(&self, name: &GeneratedName) {
		if self.warned.load(Ordering::Relaxed) {
			return;
		}
		let mut seen = self.seen.lock();
		if !seen.insert(name.clone()) || seen.len() <= CLASS_WARNING_THRESHOLD {
			return;
		}
		if !self.warned.swap(true, Ordering::Relaxed) {
			tracing::warn!(
				id = %self.id,
				count = seen.len(),
				"over {CLASS_WARNING_THRESHOLD} classes were generated for one component; \
				 consider inline style attributes for frequently changing values"
			);
		}
		seen.clear();
	}
}
