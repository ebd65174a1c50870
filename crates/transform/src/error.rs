//! Error types for the CSS text transform.

use thiserror::Error;

/// Errors raised while building a [`crate::Transformer`] or transforming CSS.
///
/// Transform errors indicate malformed authoring input and are not
/// recovered from; stage errors are reported when the pipeline is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
	/// A `}` closed a block that was never opened.
	#[error("unbalanced `}}` at byte {offset}")]
	UnbalancedBrace {
		/// Byte offset of the stray brace in the comment-free input.
		offset: usize,
	},

	/// Input ended while a block was still open.
	#[error("unclosed block `{prelude}`")]
	UnclosedBlock {
		/// Prelude (selector or at-rule) of the innermost open block.
		prelude: String,
	},

	/// Input ended inside a quoted string.
	#[error("unterminated string starting at byte {offset}")]
	UnterminatedString {
		/// Byte offset of the opening quote.
		offset: usize,
	},

	/// Input ended inside a `/* ... */` comment.
	#[error("unterminated comment starting at byte {offset}")]
	UnterminatedComment {
		/// Byte offset of the opening `/*`.
		offset: usize,
	},

	/// A pipeline stage has an empty name.
	#[error("transform stage at position {index} has no name")]
	UnnamedStage {
		/// Position of the stage in the configured list.
		index: usize,
	},
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
