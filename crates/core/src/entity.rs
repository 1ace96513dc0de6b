//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Anything stored in a [`Table`](crate::Table) is keyed by its entity id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
