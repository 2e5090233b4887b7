//! Records whose identity outlives their contents.

/// A record identified by id rather than by value.
///
/// A custom role is an entity: two roles with identical grants are still
/// different roles, and renaming a role keeps it the same role.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
