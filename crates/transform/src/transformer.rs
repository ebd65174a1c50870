//! The configured transform pipeline.

use std::fmt;
use std::sync::Arc;

use tincture_primitives::{combine, hash};

use crate::compile::compile;
use crate::error::{Result, TransformError};
use crate::parse::{parse, strip_comments};
use crate::rule::CssRule;
use crate::stage::{SelfReference, Stage, StageContext};

/// Turns flat, possibly nested CSS text into top-level rules.
///
/// Cloning is cheap; stages are shared.
#[derive(Clone, Default)]
pub struct Transformer {
	stages: Vec<Arc<dyn Stage>>,
	config_hash: Option<u32>,
}

impl fmt::Debug for Transformer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Transformer")
			.field("stages", &self.stage_names().collect::<Vec<_>>())
			.field("config_hash", &self.config_hash)
			.finish()
	}
}

impl Transformer {
	/// Creates a pipeline without user stages.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a pipeline running `stages` in order before self-reference
	/// substitution.
	///
	/// Fails with [`TransformError::UnnamedStage`] if any stage reports an
	/// empty name.
	pub fn with_stages(stages: Vec<Arc<dyn Stage>>) -> Result<Self> {
		let mut config_hash = None;
		for (index, stage) in stages.iter().enumerate() {
			let name = stage.name().trim();
			if name.is_empty() {
				return Err(TransformError::UnnamedStage { index });
			}
			config_hash = Some(match config_hash {
				None => hash(name),
				Some(acc) => combine(acc, name),
			});
		}
		Ok(Self {
			stages,
			config_hash,
		})
	}

	/// Hash of the configured stage names, `None` without user stages.
	pub fn config_hash(&self) -> Option<u32> {
		self.config_hash
	}

	/// Names of the configured user stages, in order.
	pub fn stage_names(&self) -> impl Iterator<Item = &str> + '_ {
		self.stages.iter().map(|s| s.name())
	}

	/// Transforms `css` into top-level rules.
	///
	/// With a `prefix`, the input is wrapped as `prefix selector { css }`
	/// (`@keyframes name { ... }`) and compiled without a root selector.
	/// Otherwise top-level declarations land on `selector`.
	pub fn transform(
		&self,
		css: &str,
		selector: Option<&str>,
		prefix: Option<&str>,
		scoping_id: Option<&str>,
	) -> Result<Vec<String>> {
		Ok(self
			.transform_rules(css, selector, prefix, scoping_id)?
			.iter()
			.map(ToString::to_string)
			.collect())
	}

	/// Like [`Self::transform`], returning structured rules.
	pub fn transform_rules(
		&self,
		css: &str,
		selector: Option<&str>,
		prefix: Option<&str>,
		scoping_id: Option<&str>,
	) -> Result<Vec<CssRule>> {
		let flat = strip_comments(css)?;
		let (source, root) = match (selector, prefix) {
			(Some(sel), Some(prefix)) => (format!("{prefix} {sel} {{ {flat} }}"), Vec::new()),
			(Some(sel), None) => (flat, vec![sel.to_string()]),
			(None, _) => (flat, Vec::new()),
		};

		let mut rules = compile(&parse(&source)?, &root);

		let cx = StageContext {
			selector,
			scoping_id,
		};
		let self_reference = selector
			.zip(scoping_id)
			.and_then(|(compiled, id)| SelfReference::new(compiled, id));
		for rule in &mut rules {
			let CssRule::Style(style) = rule else { continue };
			for stage in &self.stages {
				stage.apply(style, &cx);
			}
			if let Some(self_reference) = &self_reference {
				self_reference.apply(style, &cx);
			}
		}
		tracing::trace!(
			selector = selector.unwrap_or(""),
			rules = rules.len(),
			"css transformed"
		);
		Ok(rules)
	}
}
