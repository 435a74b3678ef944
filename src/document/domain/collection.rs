//! Collection names used by the document collaborator.

use std::fmt;

/// Name of a collaborator collection.
///
/// Collections are fixed at compile time; the known set is exposed as
/// associated constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionName(&'static str);

impl CollectionName {
    /// Project documents, including their column configuration.
    pub const PROJECTS: Self = Self("projects");

    /// Task documents scoped to a project.
    pub const TASKS: Self = Self("tasks");

    /// User account documents keyed by identity-provider id.
    pub const USERS: Self = Self("users");

    /// Returns the collection name as `str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
