//! Compiled rule representation handed to pipeline stages.

use std::fmt;

/// `property: value` pair inside a style rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
	pub property: String,
	pub value: String,
}

impl Declaration {
	/// Splits `property: value` at the first colon.
	///
	/// Returns `None` for text without a colon or with an empty property.
	pub fn parse(text: &str) -> Option<Self> {
		let (property, value) = text.split_once(':')?;
		let property = property.trim();
		if property.is_empty() {
			return None;
		}
		Some(Self {
			property: property.to_string(),
			value: value.trim().to_string(),
		})
	}

	pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			property: property.into(),
			value: value.into(),
		}
	}
}

impl fmt::Display for Declaration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{};", self.property, self.value)
	}
}

/// A selector list with its declarations, possibly nested in conditional
/// group rules such as `@media`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleRule {
	/// Enclosing conditional preludes, outermost first.
	pub conditions: Vec<String>,
	/// Fully expanded complex selectors.
	pub selectors: Vec<String>,
	pub declarations: Vec<Declaration>,
}

/// One top-level rule of transform output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssRule {
	Style(StyleRule),
	/// At-rule or bare statement emitted as written (minified), wrapped in
	/// `conditions`.
	Verbatim { conditions: Vec<String>, text: String },
}

fn write_wrapped(
	f: &mut fmt::Formatter<'_>,
	conditions: &[String],
	body: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
	for condition in conditions {
		write!(f, "{condition}{{")?;
	}
	body(f)?;
	for _ in conditions {
		f.write_str("}")?;
	}
	Ok(())
}

impl fmt::Display for CssRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Style(rule) => write_wrapped(f, &rule.conditions, |f| {
				write!(f, "{}{{", rule.selectors.join(","))?;
				for decl in &rule.declarations {
					write!(f, "{decl}")?;
				}
				f.write_str("}")
			}),
			Self::Verbatim { conditions, text } => write_wrapped(f, conditions, |f| f.write_str(text)),
		}
	}
}
