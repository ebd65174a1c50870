//! Reduces rule trees to ordered CSS fragments.

use tincture_registry::StyleRegistry;

use crate::context::ExecutionContext;
use crate::css::{add_unit, format_number, hyphenate};
use crate::rule::{DeclValue, Declarations, LazyRule, Rule};

/// One flattened fragment.
#[derive(Debug, Clone)]
pub enum Chunk {
	Css(String),
	/// Lazy rule left in place because no context was supplied.
	Deferred(LazyRule),
}

impl Chunk {
	/// Fragment text; deferred chunks contribute nothing.
	pub fn as_css(&self) -> &str {
		match self {
			Self::Css(text) => text,
			Self::Deferred(_) => "",
		}
	}

	pub fn is_deferred(&self) -> bool {
		matches!(self, Self::Deferred(_))
	}
}

/// Flattens `rule` into fragments.
///
/// Lazy rules are invoked only when `context` is given; keyframes are
/// injected only when `registry` is given. Never fails.
pub fn flatten(
	rule: &Rule,
	context: Option<&ExecutionContext>,
	registry: Option<&mut StyleRegistry>,
) -> Vec<Chunk> {
	let mut out = Vec::new();
	Flattener { context, registry }.rule(rule, &mut out);
	out
}

/// Flattens every rule of `rules` into one fragment sequence.
pub fn flatten_all(
	rules: &[Rule],
	context: Option<&ExecutionContext>,
	registry: Option<&mut StyleRegistry>,
) -> Vec<Chunk> {
	let mut out = Vec::new();
	let mut flattener = Flattener { context, registry };
	for rule in rules {
		flattener.rule(rule, &mut out);
	}
	out
}

/// Concatenated text of `chunks`.
pub fn join(chunks: &[Chunk]) -> String {
	chunks.iter().map(Chunk::as_css).collect()
}

/// Whether no rule in `rules` depends on an execution context.
pub fn is_static(rules: &[Rule]) -> bool {
	rules.iter().all(rule_is_static)
}

fn rule_is_static(rule: &Rule) -> bool {
	match rule {
		Rule::Lazy(_) => false,
		Rule::Nested(rules) => is_static(rules),
		Rule::Object(decls) => decls_are_static(decls),
		_ => true,
	}
}

fn decls_are_static(decls: &Declarations) -> bool {
	decls.iter().all(|(_, value)| match value {
		DeclValue::Lazy(_) => false,
		DeclValue::Block(inner) => decls_are_static(inner),
		_ => true,
	})
}

struct Flattener<'a> {
	context: Option<&'a ExecutionContext>,
	registry: Option<&'a mut StyleRegistry>,
}

impl Flattener<'_> {
	fn rule(&mut self, rule: &Rule, out: &mut Vec<Chunk>) {
		match rule {
			Rule::Null | Rule::Bool(false) => {}
			Rule::Bool(true) => out.push(Chunk::Css("true".to_string())),
			Rule::Number(n) => out.push(Chunk::Css(format_number(*n))),
			Rule::Text(text) if text.is_empty() => {}
			Rule::Text(text) => out.push(Chunk::Css(text.clone())),
			Rule::Nested(rules) => {
				for rule in rules {
					self.rule(rule, out);
				}
			}
			Rule::Component(component) => out.push(Chunk::Css(component.selector())),
			Rule::Animation(keyframes) => {
				if let Some(registry) = self.registry.as_deref_mut() {
					keyframes.inject(registry);
				}
				out.push(Chunk::Css(keyframes.name().to_string()));
			}
			Rule::Lazy(lazy) => match self.context {
				Some(ctx) => {
					let resolved = lazy.call(ctx);
					self.rule(&resolved, out);
				}
				None => out.push(Chunk::Deferred(lazy.clone())),
			},
			Rule::Object(decls) => self.object(decls, out),
		}
	}

	fn object(&mut self, decls: &Declarations, out: &mut Vec<Chunk>) {
		for (key, value) in decls.iter() {
			match value {
				DeclValue::Null | DeclValue::Bool(false) => {}
				DeclValue::Text(text) if text.is_empty() => {}
				DeclValue::Bool(true) => out.push(declaration(key, "true")),
				DeclValue::Text(text) => out.push(declaration(key, text)),
				DeclValue::Number(n) => out.push(numeric_declaration(key, *n)),
				DeclValue::Block(inner) => {
					out.push(Chunk::Css(format!("{key} {{")));
					self.object(inner, out);
					out.push(Chunk::Css("}".to_string()));
				}
				DeclValue::Lazy(lazy) => match self.context {
					Some(ctx) => match lazy.call(ctx) {
						Rule::Number(n) => out.push(numeric_declaration(key, n)),
						resolved => {
							let mut parts = Vec::new();
							self.rule(&resolved, &mut parts);
							let value = join(&parts);
							if !value.is_empty() {
								out.push(declaration(key, &value));
							}
						}
					},
					None => {
						out.push(Chunk::Css(format!("{}: ", hyphenate(key))));
						out.push(Chunk::Deferred(lazy.clone()));
						out.push(Chunk::Css(";".to_string()));
					}
				},
			}
		}
	}
}

fn declaration(key: &str, value: &str) -> Chunk {
	Chunk::Css(format!("{}: {value};", hyphenate(key)))
}

fn numeric_declaration(key: &str, n: f64) -> Chunk {
	let property = hyphenate(key);
	let value = add_unit(&property, n);
	Chunk::Css(format!("{property}: {value};"))
}
