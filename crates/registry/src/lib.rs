//! Ordered, deduplicating registry of generated CSS.
//!
//! # Purpose
//!
//! Style definitions register their identifier when they are declared and
//! insert generated rules when they render. The registry guarantees that
//! each (identifier, name) pair is inserted once and that the cascade
//! follows declaration order, not render order.
//!
//! # Mental Model
//!
//! 1. **Registration:** [`StyleRegistry::register_id`] appends a [`Group`]
//!    and reserves its slot in the last [`Tag`], opening a new tag when the
//!    last one reached its ceiling.
//! 2. **Insertion:** [`StyleRegistry::insert`] records the name and writes
//!    the rules into the group's tag, either at a tracked index
//!    ([`Strategy::Direct`]) or into the group's text segment
//!    ([`Strategy::Text`]).
//! 3. **Isolation:** independent passes clone the registry or build a new
//!    one; [`StyleRegistry::reset`] empties one in place.
//! 4. **Server output:** [`StyleRegistry::manifest`] and
//!    [`StyleRegistry::host_styles`] serialize what was inserted;
//!    [`StyleRegistry::rehydrate`] reads it back.
//!
//! # Invariants
//!
//! - An (identifier, name) pair is physically inserted at most once.
//!   - Enforced in: [`StyleRegistry::insert`].
//!   - Tested by: `tests::test_insert_is_idempotent`.
//! - If A registered before B, all of A's rules precede all of B's in
//!   [`StyleRegistry::to_css`], whatever the insertion order.
//!   - Enforced in: `StyleRegistry::place`, `StyleRegistry::tag_for_new_group`.
//!   - Tested by: `tests::test_registration_order_wins_over_insertion_order`,
//!     `tests::test_order_holds_across_chained_tags`.

mod error;
mod group;
mod options;
mod registry;
mod server;
mod tag;

pub use error::{RegistryError, Result};
pub use group::Group;
pub use options::{
	DEFAULT_ATTRIBUTE, DEFAULT_VERSION_ATTRIBUTE, RegistryOptions, SPLITTER, Strategy, TagMarker,
	VERSION,
};
pub use registry::StyleRegistry;
pub use server::{HostStyle, Manifest};
pub use tag::Tag;

#[cfg(test)]
mod tests;
