//! Rubric entity: a named category for publications.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use validator::Validate;

use super::same_identity;

/// A category publications can be filed under.
///
/// Inside a publication payload a rubric is a reference: only `id` is
/// significant, so `name` may be omitted there.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
}

impl Rubric {
    /// Creates an unsaved rubric.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a persisted rubric.
    pub fn persisted(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Returns true if the rubric has not been stored yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl PartialEq for Rubric {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Eq for Rubric {}

impl Hash for Rubric {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
