//! Leaf types shared by every tincture crate: the content hash, the
//! letters-only name generator, and the identifier newtypes.

/// Order-sensitive 32-bit content hashing.
pub mod hash;
/// Identifier newtypes for components and generated class names.
pub mod ids;
/// Hash to CSS-identifier mapping.
pub mod name;

pub use hash::{SEED, combine, hash};
pub use ids::{ComponentId, GeneratedName};
pub use name::generate_alphabetic_name;
