//! Error types for configuration parsing.

use std::path::PathBuf;

use thiserror::Error;
use tincture_transform::TransformError;

/// Errors that can occur when loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A field holds a value outside its accepted range.
	#[error("invalid value for {field}: {reason}")]
	InvalidValue {
		field: &'static str,
		reason: &'static str,
	},

	/// A configured transform stage name matched no known stage.
	#[error("unknown transform stage: {0}")]
	UnknownStage(String),

	/// The transform pipeline rejected the configured stages.
	#[error(transparent)]
	Transform(#[from] TransformError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
