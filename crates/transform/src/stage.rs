//! Named pipeline stages run over every compiled style rule.
//!
//! Stage names feed the transformer configuration hash, which keeps two
//! differently configured pipelines from producing colliding class names.
//! A stage without a name cannot contribute to that hash and is rejected
//! when the [`crate::Transformer`] is built.

use std::sync::Arc;

use regex::{Captures, Regex};

use crate::rule::{Declaration, StyleRule};

/// Per-call information available to stages.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
	/// Selector the input was compiled under (`.name`), if any.
	pub selector: Option<&'a str>,
	/// Identifier that self-references resolve to.
	pub scoping_id: Option<&'a str>,
}

/// One step of the transform pipeline.
pub trait Stage: Send + Sync {
	/// Stable identifying name. Must not be empty.
	fn name(&self) -> &str;

	/// Rewrites one compiled style rule in place.
	fn apply(&self, rule: &mut StyleRule, cx: &StageContext<'_>);
}

/// Names accepted by [`builtin_stage`].
pub const BUILTIN_STAGES: &[&str] = &[Prefixer::NAME, Minify::NAME];

/// Looks up a built-in stage by name.
pub fn builtin_stage(name: &str) -> Option<Arc<dyn Stage>> {
	match name {
		Prefixer::NAME => Some(Arc::new(Prefixer)),
		Minify::NAME => Some(Arc::new(Minify)),
		_ => None,
	}
}

/// Adds vendor-prefixed copies of declarations that still need them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prefixer;

impl Prefixer {
	pub const NAME: &'static str = "prefixer";

	fn prefixes(property: &str) -> &'static [&'static str] {
		match property {
			"user-select" | "text-size-adjust" => &["-webkit-", "-moz-", "-ms-"],
			"appearance" => &["-webkit-", "-moz-"],
			"hyphens" => &["-webkit-", "-ms-"],
			"backdrop-filter" | "mask" | "mask-image" | "box-decoration-break" => &["-webkit-"],
			"tab-size" => &["-moz-"],
			_ => &[],
		}
	}
}

impl Stage for Prefixer {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn apply(&self, rule: &mut StyleRule, _cx: &StageContext<'_>) {
		let mut out = Vec::with_capacity(rule.declarations.len());
		for decl in rule.declarations.drain(..) {
			for prefix in Self::prefixes(&decl.property) {
				out.push(Declaration::new(format!("{prefix}{}", decl.property), decl.value.clone()));
			}
			out.push(decl);
		}
		rule.declarations = out;
	}
}

/// Collapses whitespace runs inside declaration values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minify;

impl Minify {
	pub const NAME: &'static str = "minify";
}

impl Stage for Minify {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn apply(&self, rule: &mut StyleRule, _cx: &StageContext<'_>) {
		for decl in &mut rule.declarations {
			if decl.value.contains(['"', '\'']) {
				continue;
			}
			decl.value = decl
				.value
				.split_ascii_whitespace()
				.collect::<Vec<_>>()
				.join(" ")
				.replace(", ", ",");
		}
	}
}

/// Rewrites repeated self-references to the scoping class.
///
/// Within one complex selector, every occurrence of the compiled selector
/// after the first becomes `.{scoping_id}`, except occurrences glued to a
/// preceding copy of the selector (`.a.a` raises specificity on purpose).
/// Always runs last and is not part of the configuration hash.
#[derive(Debug, Clone)]
pub(crate) struct SelfReference {
	compiled: String,
	replacement: String,
	pattern: Regex,
}

impl SelfReference {
	pub(crate) const NAME: &'static str = "self-reference";

	/// Builds the rewrite of `compiled` to `.{scoping_id}`, once per
	/// transform call.
	pub(crate) fn new(compiled: &str, scoping_id: &str) -> Option<Self> {
		let pattern = Regex::new(&format!(r"{}\b", regex::escape(compiled))).ok()?;
		Some(Self {
			compiled: compiled.to_string(),
			replacement: format!(".{scoping_id}"),
			pattern,
		})
	}

	pub(crate) fn rewrite(&self, selector: &str) -> String {
		let compiled = self.compiled.as_str();
		if selector.rfind(compiled).is_none_or(|last| last == 0) {
			return selector.to_string();
		}
		self.pattern
			.replace_all(selector, |caps: &Captures<'_>| {
				let Some(found) = caps.get(0) else {
					return String::new();
				};
				let offset = found.start();
				let before = &selector[..offset];
				if offset > 0 && before.contains(compiled) && !before.ends_with(compiled) {
					self.replacement.clone()
				} else {
					found.as_str().to_string()
				}
			})
			.into_owned()
	}
}

impl Stage for SelfReference {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn apply(&self, rule: &mut StyleRule, _cx: &StageContext<'_>) {
		for selector in &mut rule.selectors {
			*selector = self.rewrite(selector);
		}
	}
}
