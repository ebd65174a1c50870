use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Arc<str>);

		impl $name {
			/// Wraps an owned or borrowed string.
			pub fn new(value: impl Into<Arc<str>>) -> Self {
				Self(value.into())
			}

			/// Returns the underlying text.
			#[inline]
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Debug for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}({:?})", stringify!($name), &*self.0)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self::new(value)
			}
		}

		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self::new(value)
			}
		}
	};
}

string_id!(
	/// Stable per-definition identifier.
	///
	/// Doubles as a CSS class token on rendered elements and as the
	/// partitioning key of the style registry.
	ComponentId
);

string_id!(
	/// Content-addressed class name produced for one flattened rule set.
	GeneratedName
);

impl ComponentId {
	/// Returns the class selector (`.id`) referring to this component.
	pub fn selector(&self) -> String {
		format!(".{}", self.0)
	}
}

impl GeneratedName {
	/// Returns the class selector (`.name`) for this generated class.
	pub fn selector(&self) -> String {
		format!(".{}", self.0)
	}
}
