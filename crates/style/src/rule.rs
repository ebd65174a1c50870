//! Interpolation values making up a style definition.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tincture_primitives::ComponentId;

use crate::context::ExecutionContext;
use crate::keyframes::Keyframes;

/// Ordered rule list of one style definition.
pub type RuleSet = Vec<Rule>;

/// One interpolated value.
#[derive(Debug, Clone)]
pub enum Rule {
	/// Dropped when flattened.
	Null,
	/// `false` is dropped; `true` renders as `true`.
	Bool(bool),
	/// Rendered without a unit; `0` is kept.
	Number(f64),
	/// Literal CSS text; the empty string is dropped.
	Text(String),
	/// Resolved against the execution context at generation time.
	Lazy(LazyRule),
	/// Spliced into the surrounding sequence.
	Nested(RuleSet),
	/// Selector of another definition.
	Component(ComponentRef),
	/// Keyframes, injected on use and replaced by their name.
	Animation(Keyframes),
	/// Property mapping converted to declarations.
	Object(Declarations),
}

impl Rule {
	/// Wraps a function of the execution context.
	pub fn lazy<F, R>(f: F) -> Self
	where
		F: Fn(&ExecutionContext) -> R + Send + Sync + 'static,
		R: Into<Rule>,
	{
		Self::Lazy(LazyRule::new(f))
	}

	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}
}

impl From<&str> for Rule {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Rule {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for Rule {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for Rule {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i32> for Rule {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<RuleSet> for Rule {
	fn from(value: RuleSet) -> Self {
		Self::Nested(value)
	}
}

impl From<ComponentRef> for Rule {
	fn from(value: ComponentRef) -> Self {
		Self::Component(value)
	}
}

impl From<Keyframes> for Rule {
	fn from(value: Keyframes) -> Self {
		Self::Animation(value)
	}
}

impl From<Declarations> for Rule {
	fn from(value: Declarations) -> Self {
		Self::Object(value)
	}
}

impl<T: Into<Rule>> From<Option<T>> for Rule {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// Converts JSON values, e.g. theme entries, into rules.
///
/// Arrays nest; objects become declaration mappings.
impl From<&Value> for Rule {
	fn from(value: &Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Bool(b) => Self::Bool(*b),
			Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
			Value::String(s) => Self::Text(s.clone()),
			Value::Array(items) => Self::Nested(items.iter().map(Self::from).collect()),
			Value::Object(map) => Self::Object(Declarations::from(map)),
		}
	}
}

impl From<Value> for Rule {
	fn from(value: Value) -> Self {
		Self::from(&value)
	}
}

/// Shared function of the execution context.
#[derive(Clone)]
pub struct LazyRule(Arc<dyn Fn(&ExecutionContext) -> Rule + Send + Sync>);

impl LazyRule {
	pub fn new<F, R>(f: F) -> Self
	where
		F: Fn(&ExecutionContext) -> R + Send + Sync + 'static,
		R: Into<Rule>,
	{
		Self(Arc::new(move |ctx| f(ctx).into()))
	}

	pub fn call(&self, ctx: &ExecutionContext) -> Rule {
		(self.0)(ctx)
	}
}

impl fmt::Debug for LazyRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("LazyRule(..)")
	}
}

/// Reference to another definition, flattened to its class selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
	id: ComponentId,
}

impl ComponentRef {
	pub fn new(id: ComponentId) -> Self {
		Self { id }
	}

	pub fn id(&self) -> &ComponentId {
		&self.id
	}

	/// `.id`
	pub fn selector(&self) -> String {
		self.id.selector()
	}
}

/// Value of one entry in a [`Declarations`] mapping.
#[derive(Debug, Clone)]
pub enum DeclValue {
	Null,
	Bool(bool),
	Number(f64),
	Text(String),
	Lazy(LazyRule),
	/// Nested mapping; the entry's key is its selector.
	Block(Declarations),
}

impl From<&str> for DeclValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for DeclValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<f64> for DeclValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i32> for DeclValue {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<bool> for DeclValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<Declarations> for DeclValue {
	fn from(value: Declarations) -> Self {
		Self::Block(value)
	}
}

impl From<LazyRule> for DeclValue {
	fn from(value: LazyRule) -> Self {
		Self::Lazy(value)
	}
}

impl From<&Value> for DeclValue {
	fn from(value: &Value) -> Self {
		match value {
			Value::Null | Value::Array(_) => Self::Null,
			Value::Bool(b) => Self::Bool(*b),
			Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
			Value::String(s) => Self::Text(s.clone()),
			Value::Object(map) => Self::Block(Declarations::from(map)),
		}
	}
}

/// Ordered property mapping, written in either camelCase or CSS case.
#[derive(Debug, Clone, Default)]
pub struct Declarations(Vec<(String, DeclValue)>);

impl Declarations {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `key: value`.
	pub fn set(mut self, key: impl Into<String>, value: impl Into<DeclValue>) -> Self {
		self.0.push((key.into(), value.into()));
		self
	}

	/// Appends a value computed from the execution context.
	pub fn lazy<F, R>(self, key: impl Into<String>, f: F) -> Self
	where
		F: Fn(&ExecutionContext) -> R + Send + Sync + 'static,
		R: Into<Rule>,
	{
		self.set(key, DeclValue::Lazy(LazyRule::new(f)))
	}

	/// Appends a nested block under `selector`.
	pub fn block(self, selector: impl Into<String>, body: Declarations) -> Self {
		self.set(selector, DeclValue::Block(body))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &DeclValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<&serde_json::Map<String, Value>> for Declarations {
	fn from(map: &serde_json::Map<String, Value>) -> Self {
		Self(map.iter().map(|(k, v)| (k.clone(), DeclValue::from(v))).collect())
	}
}
