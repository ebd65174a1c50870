use thiserror::Error;

/// Errors produced by the style registry's serialization surface.
///
/// Insertion itself never fails: rules a tag refuses are dropped and logged.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// A manifest could not be encoded or decoded.
	#[error("manifest serialization failed: {0}")]
	Manifest(#[from] serde_json::Error),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
