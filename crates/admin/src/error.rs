//! Errors raised by the catalog store.
//!
//! Unknown ids are not errors: lookups and mutations signal absence with
//! `None` so the request layer can map it to "not found". The variants here
//! cover structural changes the store refuses to make.

use thiserror::Error;

use storekeep_core::CategoryId;

/// A category mutation that would break the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The payload names a parent category that does not exist.
    #[error("parent category {0} does not exist")]
    UnknownParent(CategoryId),

    /// The new parent is the category itself or one of its descendants.
    #[error("moving category {id} under {parent} would create a cycle")]
    CategoryCycle {
        /// Category being moved.
        id: CategoryId,
        /// Requested parent.
        parent: CategoryId,
    },

    /// Deleting a category that still has children would orphan them.
    #[error("category {id} still has {children} child categories")]
    CategoryHasChildren {
        /// Category being deleted.
        id: CategoryId,
        /// Number of direct children.
        children: usize,
    },
}
