//! Configuration for tincture.
//!
//! Configuration is written in TOML. Every field is optional; missing
//! sections fall back to the defaults of the consuming crates.
//!
//! ```toml
//! [sheet]
//! strategy = "text"                    # "direct" (default) or "text"
//! attribute = "data-tincture"
//! version_attribute = "data-tincture-version"
//! max_groups_per_tag = 1000
//! max_rules_per_tag = 4095
//!
//! [naming]
//! class_prefix = "app"
//!
//! [transform]
//! stages = ["prefixer", "minify"]
//! ```
//!
//! The parsed [`Config`] is turned into collaborator values with
//! [`Config::registry_options`] and [`Config::transformer`]. Stage names are
//! resolved when the transformer is built, so a misspelled stage fails at
//! setup rather than while styles are generated.

pub mod error;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tincture_registry::{RegistryOptions, Strategy};
use tincture_transform::{Stage, Transformer, builtin_stage};

pub use error::{ConfigError, Result};

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub sheet: SheetConfig,
	pub naming: NamingConfig,
	pub transform: TransformConfig,
}

/// `[sheet]`: registry and tag options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
	pub strategy: Strategy,
	pub attribute: String,
	pub version_attribute: String,
	pub max_groups_per_tag: usize,
	pub max_rules_per_tag: usize,
}

impl Default for SheetConfig {
	fn default() -> Self {
		let options = RegistryOptions::default();
		Self {
			strategy: options.strategy,
			attribute: options.attribute,
			version_attribute: options.version_attribute,
			max_groups_per_tag: options.max_groups_per_tag,
			max_rules_per_tag: options.max_rules_per_tag,
		}
	}
}

/// `[naming]`: component identifier generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
	/// Prepended (with a `-`) to every generated component identifier.
	pub class_prefix: String,
}

/// `[transform]`: the stage pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
	/// Stage names, run in order.
	pub stages: Vec<String>,
}

impl Config {
	/// Parse a TOML string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let config: Config = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	fn validate(&self) -> Result<()> {
		if self.sheet.max_groups_per_tag == 0 {
			return Err(ConfigError::InvalidValue {
				field: "sheet.max_groups_per_tag",
				reason: "must be at least 1",
			});
		}
		if self.sheet.max_rules_per_tag == 0 {
			return Err(ConfigError::InvalidValue {
				field: "sheet.max_rules_per_tag",
				reason: "must be at least 1",
			});
		}
		if self.sheet.attribute.trim().is_empty() {
			return Err(ConfigError::InvalidValue {
				field: "sheet.attribute",
				reason: "must not be empty",
			});
		}
		Ok(())
	}

	/// Registry options described by `[sheet]`.
	pub fn registry_options(&self) -> RegistryOptions {
		RegistryOptions {
			strategy: self.sheet.strategy,
			attribute: self.sheet.attribute.clone(),
			version_attribute: self.sheet.version_attribute.clone(),
			max_groups_per_tag: self.sheet.max_groups_per_tag,
			max_rules_per_tag: self.sheet.max_rules_per_tag,
			..RegistryOptions::default()
		}
	}

	/// Builds the transformer from built-in stages.
	pub fn transformer(&self) -> Result<Transformer> {
		self.transformer_with(|_| None)
	}

	/// Builds the transformer, resolving each stage name with `lookup`
	/// first and the built-in stages second.
	pub fn transformer_with(
		&self,
		lookup: impl Fn(&str) -> Option<Arc<dyn Stage>>,
	) -> Result<Transformer> {
		let stages = self
			.transform
			.stages
			.iter()
			.map(|name| {
				lookup(name)
					.or_else(|| builtin_stage(name))
					.ok_or_else(|| ConfigError::UnknownStage(name.clone()))
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(Transformer::with_stages(stages)?)
	}
}

#[cfg(test)]
mod tests;
