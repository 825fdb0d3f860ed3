//! Author entity: the owner of a publication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered author.
///
/// Authors are referenced by publications. Request bodies only need to carry
/// the `id`; the remaining fields are filled in when the publication is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    #[serde(default)]
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Author {
    pub fn new(
        id: i64,
        login: String,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            id,
            login,
            first_name,
            last_name,
        }
    }

    /// A reference to an author by id only.
    pub fn reference(id: i64) -> Self {
        Self {
            id,
            login: String::new(),
            first_name: None,
            last_name: None,
        }
    }

    /// Human-readable name, falling back to the login.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.login.clone(),
        }
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

/// Input data for registering an author.
#[derive(Debug, Clone, Validate)]
pub struct NewAuthor {
    #[validate(length(min = 1, max = 50, message = "Login must be 1-50 characters"))]
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Listing row used by the admin tooling.
#[derive(Debug, Clone)]
pub struct AuthorSummary {
    pub author: Author,
    pub publications: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let full = Author::new(
            1,
            "jdoe".to_string(),
            Some("John".to_string()),
            Some("Doe".to_string()),
        );
        assert_eq!(full.display_name(), "John Doe");

        let login_only = Author::new(2, "anon".to_string(), None, None);
        assert_eq!(login_only.display_name(), "anon");
    }

    #[test]
    fn test_equality_by_id() {
        let a = Author::new(1, "a".to_string(), None, None);
        assert_eq!(a, Author::reference(1));
        assert_ne!(a, Author::reference(2));
    }

    #[test]
    fn test_reference_deserializes_from_id() {
        let author: Author = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(author.id, 3);
        assert!(author.login.is_empty());
    }

    #[test]
    fn test_new_author_validation() {
        let empty = NewAuthor {
            login: String::new(),
            first_name: None,
            last_name: None,
        };
        assert!(empty.validate().is_err());

        let ok = NewAuthor {
            login: "writer".to_string(),
            first_name: None,
            last_name: None,
        };
        assert!(ok.validate().is_ok());
    }
}
