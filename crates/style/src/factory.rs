//! Entry point bundling the transformer and identifier generation.

use serde_json::Value;
use tincture_config::Config;
use tincture_primitives::{ComponentId, GeneratedName};
use tincture_registry::StyleRegistry;
use tincture_transform::{Result, Transformer};

use crate::context::{Attr, ExecutionContext, Props};
use crate::definition::StyleDefinition;
use crate::ident::IdGenerator;
use crate::keyframes::Keyframes;
use crate::rule::{Rule, RuleSet};

/// Options for [`StyleFactory::define`].
#[derive(Debug, Clone, Default)]
pub struct DefineOptions {
	pub display_name: Option<String>,
	/// Explicit identifier; skips generation.
	pub component_id: Option<ComponentId>,
	pub parent_component_id: Option<ComponentId>,
	pub attrs: Vec<Attr>,
}

impl DefineOptions {
	pub fn named(display_name: impl Into<String>) -> Self {
		Self {
			display_name: Some(display_name.into()),
			..Self::default()
		}
	}

	pub fn attr(mut self, attr: Attr) -> Self {
		self.attrs.push(attr);
		self
	}
}

/// Result of rendering a definition once.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
	pub name: GeneratedName,
	/// Value for the element's `class` attribute.
	pub class_name: String,
	/// Attributes resolved for this render.
	pub attrs: Props,
}

/// Creates definitions and keyframes sharing one transformer.
#[derive(Debug, Default)]
pub struct StyleFactory {
	transformer: Transformer,
	ids: IdGenerator,
}

impl StyleFactory {
	pub fn new(transformer: Transformer, ids: IdGenerator) -> Self {
		Self { transformer, ids }
	}

	/// Builds the transformer and class prefix from `config`.
	pub fn from_config(config: &Config) -> tincture_config::Result<Self> {
		Ok(Self::new(
			config.transformer()?,
			IdGenerator::new(config.naming.class_prefix.clone()),
		))
	}

	pub fn transformer(&self) -> &Transformer {
		&self.transformer
	}

	pub fn define(
		&mut self,
		options: DefineOptions,
		rules: RuleSet,
		registry: &mut StyleRegistry,
	) -> StyleDefinition {
		let id = self.component_id(&options);
		StyleDefinition::with_attrs(rules, options.attrs, id, registry)
	}

	/// Defines a component whose rules follow those of `base`.
	pub fn extend(
		&mut self,
		base: &StyleDefinition,
		options: DefineOptions,
		rules: RuleSet,
		registry: &mut StyleRegistry,
	) -> StyleDefinition {
		let id = self.component_id(&options);
		base.extend(rules, options.attrs, id, registry)
	}

	pub fn keyframes(&self, rules: &[Rule]) -> Result<Keyframes> {
		Keyframes::new(rules, &self.transformer)
	}

	/// Resolves attributes, generates the class name and injects its CSS.
	pub fn render(
		&self,
		definition: &StyleDefinition,
		props: Props,
		theme: Option<&Value>,
		registry: &mut StyleRegistry,
	) -> Result<Rendered> {
		let (ctx, attrs) = if definition.is_static() && definition.attrs().is_empty() {
			(ExecutionContext::default(), Props::new())
		} else {
			ExecutionContext::build(props, theme, definition.attrs())
		};
		let name = definition.generate_and_inject(&ctx, registry, &self.transformer)?;
		Ok(Rendered {
			class_name: definition.class_list(&name),
			name,
			attrs,
		})
	}

	fn component_id(&mut self, options: &DefineOptions) -> ComponentId {
		match &options.component_id {
			Some(id) => match &options.parent_component_id {
				Some(parent) => ComponentId::new(format!("{parent}-{id}")),
				None => id.clone(),
			},
			None => self.ids.generate(
				options.display_name.as_deref(),
				options.parent_component_id.as_ref(),
			),
		}
	}
}
