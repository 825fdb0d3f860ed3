//! Helpers for inspecting database errors.

/// Returns true if `e` is a foreign key violation, optionally on a specific constraint.
pub fn is_foreign_key_violation(e: &sqlx::Error, constraint: Option<&str>) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_foreign_key_violation() {
        return false;
    }

    match constraint {
        Some(name) => db_err.constraint() == Some(name),
        None => true,
    }
}
