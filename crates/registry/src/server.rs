//! Server output and rehydration.
//!
//! A registry that rendered styles outside a live document serializes them
//! as text in which every rule is followed by [`SPLITTER`] and every group
//! ends with a marker rule carrying its identifier and generated names:
//!
//! ```text
//! .abc{color:red;}/*!tc*/
//! data-tincture.g0[id="Button-xyz"]{content:"abc,"}/*!tc*/
//! ```
//!
//! A fresh registry reading that text back registers the groups in the same
//! order and records their names, so the same styles are not generated and
//! emitted a second time.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tincture_primitives::{ComponentId, GeneratedName};

use crate::error::Result;
use crate::group::Group;
use crate::options::{RegistryOptions, SPLITTER};
use crate::registry::StyleRegistry;

/// Serializable record of everything a registry inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
	/// Version of the producing registry.
	pub version: String,
	/// Output sheet text, see [`StyleRegistry::output_sheet`].
	pub css: String,
	/// Generated names per identifier, in cascade order.
	pub names: IndexMap<ComponentId, Vec<GeneratedName>>,
}

impl Manifest {
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}

	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Contents of one host style element found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostStyle {
	/// Value of the version attribute, if present.
	pub version: Option<String>,
	pub css: String,
}

impl HostStyle {
	/// Reads a `<style>` element from its attributes and text.
	///
	/// Returns `None` unless the element carries `options.attribute`. The
	/// version comes from `options.version_attribute`.
	pub fn from_element<'a>(
		options: &RegistryOptions,
		attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
		css: impl Into<String>,
	) -> Option<Self> {
		let mut owned = false;
		let mut version = None;
		for (key, value) in attributes {
			if key == options.attribute {
				owned = true;
			} else if key == options.version_attribute {
				version = Some(value.to_string());
			}
		}
		owned.then(|| Self {
			version,
			css: css.into(),
		})
	}
}

impl StyleRegistry {
	/// All groups with content, serialized with group markers.
	pub fn output_sheet(&self) -> String {
		let mut out = String::new();
		for (position, (id, group)) in self.groups.iter().enumerate() {
			self.write_group(&mut out, position, id, group);
		}
		out
	}

	/// One host style per tag, carrying the groups placed in that tag.
	pub fn host_styles(&self) -> Vec<HostStyle> {
		(0..self.tags.len())
			.map(|tag| {
				let mut css = String::new();
				for (position, (id, group)) in self.groups.iter().enumerate() {
					if group.tag == tag {
						self.write_group(&mut css, position, id, group);
					}
				}
				HostStyle {
					version: Some(self.options.version.clone()),
					css,
				}
			})
			.collect()
	}

	/// Host styles rendered as `<style>` elements, one per tag, marked with
	/// the registry and version attributes.
	pub fn style_tags(&self) -> String {
		self.tags
			.iter()
			.zip(self.host_styles())
			.map(|(tag, style)| format!("{}{}</style>", tag.marker().open_tag(), style.css))
			.collect()
	}

	fn write_group(&self, out: &mut String, position: usize, id: &ComponentId, group: &Group) {
		if group.is_empty() {
			return;
		}
		for rule in group.rules() {
			out.push_str(rule);
			out.push_str(SPLITTER);
		}
		let names: String = group.names().map(|name| format!("{name},")).collect();
		out.push_str(&format!(
			"{}.g{position}[id=\"{id}\"]{{content:\"{names}\"}}{SPLITTER}",
			self.options.attribute
		));
	}

	/// Snapshot of the inserted CSS and generated names.
	pub fn manifest(&self) -> Manifest {
		let names = self
			.groups
			.iter()
			.filter(|(_, group)| group.names().next().is_some())
			.map(|(id, group)| (id.clone(), group.names().cloned().collect()))
			.collect();
		Manifest {
			version: self.options.version.clone(),
			css: self.output_sheet(),
			names,
		}
	}

	/// Builds a registry already holding everything in `manifest`.
	pub fn from_manifest(options: RegistryOptions, manifest: &Manifest) -> Self {
		let mut registry = Self::new(options);
		registry.rehydrate_manifest(manifest);
		registry
	}

	/// Takes over the contents of a manifest. See [`Self::rehydrate`].
	pub fn rehydrate_manifest(&mut self, manifest: &Manifest) -> usize {
		self.rehydrate(&[HostStyle {
			version: Some(manifest.version.clone()),
			css: manifest.css.clone(),
		}])
	}

	/// Takes over groups, names and rules from previously produced output.
	///
	/// Styles whose version differs from this registry's are stale and
	/// skipped. Returns the number of groups restored.
	pub fn rehydrate(&mut self, styles: &[HostStyle]) -> usize {
		let pattern = format!(
			r#"^{}\.g(\d+)\[id="([^"]+)"\]\{{content:"([^"]*)"\}}$"#,
			regex::escape(&self.options.attribute)
		);
		let Ok(marker) = Regex::new(&pattern) else {
			return 0;
		};

		let mut restored = 0;
		for style in styles {
			if style.version.as_deref() != Some(self.options.version.as_str()) {
				tracing::debug!(
					found = style.version.as_deref().unwrap_or("<none>"),
					expected = %self.options.version,
					"skipping stale host style"
				);
				continue;
			}

			let mut pending: Vec<String> = Vec::new();
			for chunk in style.css.split(SPLITTER.trim_end()) {
				let chunk = chunk.trim();
				if chunk.is_empty() {
					continue;
				}
				let Some(caps) = marker.captures(chunk) else {
					pending.push(chunk.to_string());
					continue;
				};
				let id = ComponentId::new(&caps[2]);
				let names: Vec<GeneratedName> = caps[3]
					.split(',')
					.filter(|name| !name.is_empty())
					.map(GeneratedName::from)
					.collect();
				let rules = std::mem::take(&mut pending);
				if self.restore_group(&id, names, rules) {
					restored += 1;
				}
			}
			if !pending.is_empty() {
				tracing::debug!(rules = pending.len(), "dropping rules without group marker");
			}
		}
		restored
	}

	/// Restores one group from rehydrated output.
	///
	/// Rule text cannot be attributed to individual names, so a group that
	/// already holds any content is left untouched; names it lacks are
	/// generated and inserted again instead of duplicating rules it has.
	fn restore_group(&mut self, id: &ComponentId, names: Vec<GeneratedName>, rules: Vec<String>) -> bool {
		self.register_id(id);
		if self.groups.get(id).is_some_and(|group| !group.is_empty()) {
			tracing::debug!(id = %id, "group already holds styles, skipping rehydration");
			return false;
		}
		if names.is_empty() {
			return false;
		}
		self.place(id, &rules);
		let Some(group) = self.groups.get_mut(id) else {
			return false;
		};
		group.rehydrated.extend(rules);
		for name in names {
			group.entries.entry(name).or_default();
		}
		true
	}
}
