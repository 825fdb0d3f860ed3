//! Utility helpers shared by the persistence layer.
//!
//! - [`db_error`] - Classification of PostgreSQL constraint violations

pub mod db_error;
