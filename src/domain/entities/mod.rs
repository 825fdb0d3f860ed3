//! Core domain entities.
//!
//! - [`Publication`] - A text with a title, an author and a set of rubrics
//! - [`Rubric`] - A named category publications are filed under
//! - [`Author`] - The owner of a publication
//!
//! Publications and rubrics double as the REST wire format. An entity whose
//! `id` is `None` has not been persisted yet and is equal only to itself;
//! persisted entities are equal iff their identifiers match.

pub mod author;
pub mod publication;
pub mod rubric;

pub use author::{Author, AuthorSummary, NewAuthor};
pub use publication::Publication;
pub use rubric::Rubric;

/// Identity comparison for entities with an optional identifier.
///
/// Unsaved entities never share an identity.
pub(crate) fn same_identity(a: Option<i64>, b: Option<i64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

#[cfg(test)]
mod tests {
    use super::same_identity;

    #[test]
    fn test_same_identity() {
        assert!(same_identity(Some(1), Some(1)));
        assert!(!same_identity(Some(1), Some(2)));
        assert!(!same_identity(None, Some(1)));
        assert!(!same_identity(None, None));
    }
}
