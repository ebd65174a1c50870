//! CSS text transform used by the style generator.
//!
//! # Role
//!
//! Takes the flat text a style definition flattens to, which may still
//! contain nested blocks (`&:hover { ... }`, `@media ... { ... }`), and
//! produces standalone rules ready for insertion, one string per rule.
//!
//! # Pipeline
//!
//! 1. Strip comments.
//! 2. Parse the brace structure ([`TransformError`] on malformed input).
//! 3. Expand nesting against the root selector.
//! 4. Run the configured [`Stage`]s over each style rule, in order.
//! 5. Substitute repeated self-references with the scoping class.

mod compile;
mod error;
mod parse;
mod rule;
mod stage;
mod transformer;

pub use error::{Result, TransformError};
pub use rule::{CssRule, Declaration, StyleRule};
pub use stage::{BUILTIN_STAGES, Minify, Prefixer, Stage, StageContext, builtin_stage};
pub use transformer::Transformer;

#[cfg(test)]
mod tests;
