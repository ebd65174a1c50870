//! Style definitions for tincture.
//!
//! # Role
//!
//! Turns component rule sets into class names. A [`StyleDefinition`]
//! flattens its [`Rule`]s against an [`ExecutionContext`], derives a
//! content-addressed [`GeneratedName`] and hands the compiled CSS to a
//! [`StyleRegistry`] through a [`Transformer`].
//!
//! # Mental Model
//!
//! ```text
//! RuleSet --flatten(ctx)--> [Chunk] --hash--> name --transform--> rules --> registry
//! ```
//!
//! The same identifier and fragment sequence always produce the same name,
//! and each (identifier, name) pair is inserted at most once.
//!
//! # Invariants
//!
//! - Flattening never fails; only the transformer returns errors.
//! - A definition registers its identifier when it is created, so cascade
//!   order follows definition order, not render order.
//! - Static definitions compute their name once per registry lifetime.

mod context;
pub mod css;
mod definition;
mod factory;
pub mod flatten;
mod ident;
mod keyframes;
mod rule;

pub use context::{Attr, ExecutionContext, Props};
pub use definition::{CLASS_WARNING_THRESHOLD, StyleDefinition};
pub use factory::{DefineOptions, Rendered, StyleFactory};
pub use flatten::{Chunk, flatten};
pub use ident::{DEFAULT_DISPLAY_NAME, IdGenerator, escape};
pub use keyframes::{KEYFRAMES_ID_PREFIX, Keyframes};
pub use rule::{ComponentRef, DeclValue, Declarations, LazyRule, Rule, RuleSet};
pub use tincture_primitives::{ComponentId, GeneratedName};
pub use tincture_registry::StyleRegistry;
pub use tincture_transform::Transformer;
