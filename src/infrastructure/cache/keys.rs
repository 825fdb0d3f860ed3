//! Cache key layout.

pub fn publication_key(id: i64) -> String {
    format!("publication:{id}")
}

pub fn rubric_key(id: i64) -> String {
    format!("rubric:{id}")
}
