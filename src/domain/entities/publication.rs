//! Publication entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};
use validator::Validate;

use super::{Author, Rubric, same_identity};

/// A published text.
///
/// `publication_date` defaults to the moment the value is built, and to the
/// moment of deserialization when absent or `null`. `rubrics` behaves as a
/// set keyed by rubric id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(default)]
    pub id: Option<i64>,

    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    pub title: String,

    #[validate(length(min = 2, message = "Text must be at least 2 characters"))]
    pub text: String,

    #[serde(default = "Utc::now", deserialize_with = "date_or_now")]
    pub publication_date: DateTime<Utc>,

    pub author: Author,

    #[serde(default)]
    pub rubrics: Vec<Rubric>,
}

fn date_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<Utc>>::deserialize(deserializer)?.unwrap_or_else(Utc::now))
}

impl Publication {
    /// Creates an unsaved publication dated now, without rubrics.
    pub fn new(title: impl Into<String>, text: impl Into<String>, author: Author) -> Self {
        Self {
            id: None,
            title: title.into(),
            text: text.into(),
            publication_date: Utc::now(),
            author,
            rubrics: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_publication_date(mut self, publication_date: DateTime<Utc>) -> Self {
        self.publication_date = publication_date;
        self
    }

    pub fn with_rubrics(mut self, rubrics: Vec<Rubric>) -> Self {
        self.rubrics = Vec::new();
        for rubric in rubrics {
            self.add_rubric(rubric);
        }
        self
    }

    /// Returns true if the publication has not been stored yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Adds a rubric unless an equal one is already attached.
    pub fn add_rubric(&mut self, rubric: Rubric) {
        if !self.rubrics.contains(&rubric) {
            self.rubrics.push(rubric);
        }
    }

    /// Detaches every rubric equal to `rubric`.
    pub fn remove_rubric(&mut self, rubric: &Rubric) {
        self.rubrics.retain(|r| r != rubric);
    }

    /// Distinct ids of the attached rubrics, ascending. Unsaved rubrics are skipped.
    pub fn rubric_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.rubrics.iter().filter_map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl PartialEq for Publication {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Eq for Publication {}

impl Hash for Publication {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
