//! Values handed to lazy rules at generation time.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Property map used for props and resolved attributes.
pub type Props = Map<String, Value>;

/// Render-time inputs of one generation: props, theme and resolved
/// attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
	props: Props,
	theme: Value,
}

impl ExecutionContext {
	pub fn new(props: Props, theme: Value) -> Self {
		Self { props, theme }
	}

	/// Builds the context for one render.
	///
	/// A `theme` entry in `props` wins over `theme`. Attributes are then
	/// resolved in order, each seeing the context built so far, and merged
	/// into both the context and the returned attribute map.
	pub fn build(mut props: Props, theme: Option<&Value>, attrs: &[Attr]) -> (Self, Props) {
		let theme = match props.remove("theme") {
			Some(own) if !own.is_null() => own,
			_ => theme.cloned().unwrap_or(Value::Null),
		};
		let mut ctx = Self::new(props, theme);
		let mut resolved = Props::new();

		for attr in attrs {
			for (key, value) in attr.resolve(&ctx) {
				if key == "theme" {
					ctx.theme = value.clone();
				} else {
					ctx.props.insert(key.clone(), value.clone());
				}
				resolved.insert(key, value);
			}
		}

		(ctx, resolved)
	}

	pub fn props(&self) -> &Props {
		&self.props
	}

	pub fn prop(&self, key: &str) -> Option<&Value> {
		self.props.get(key)
	}

	/// String prop, if present and a string.
	pub fn prop_str(&self, key: &str) -> Option<&str> {
		self.prop(key).and_then(Value::as_str)
	}

	/// Prop with JavaScript-like truthiness: absent, `null`, `false`, `0`
	/// and `""` are false.
	pub fn flag(&self, key: &str) -> bool {
		match self.prop(key) {
			None | Some(Value::Null) => false,
			Some(Value::Bool(b)) => *b,
			Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
			Some(Value::String(s)) => !s.is_empty(),
			Some(_) => true,
		}
	}

	pub fn theme(&self) -> &Value {
		&self.theme
	}

	/// Theme lookup by JSON pointer, e.g. `/colors/primary`.
	pub fn theme_value(&self, pointer: &str) -> Option<&Value> {
		self.theme.pointer(pointer)
	}

	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.props.insert(key.into(), value.into());
	}
}

/// One attribute entry of a definition.
#[derive(Clone)]
pub enum Attr {
	Static(Props),
	Lazy(Arc<dyn Fn(&ExecutionContext) -> Props + Send + Sync>),
}

impl Attr {
	pub fn lazy(f: impl Fn(&ExecutionContext) -> Props + Send + Sync + 'static) -> Self {
		Self::Lazy(Arc::new(f))
	}

	pub fn resolve(&self, ctx: &ExecutionContext) -> Props {
		match self {
			Self::Static(map) => map.clone(),
			Self::Lazy(f) => f(ctx),
		}
	}
}

impl fmt::Debug for Attr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Static(map) => f.debug_tuple("Static").field(map).finish(),
			Self::Lazy(_) => f.write_str("Lazy(..)"),
		}
	}
}
