//! Category domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// A named grouping for notes.
///
/// Categories have no delete operation; a note keeps its `category_id`
/// reference even if the category list is later replaced by an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Creates a category with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
