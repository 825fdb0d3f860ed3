//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod publications;
pub mod rubrics;

pub use health::health_handler;
pub use publications::{
    create_publication_handler, delete_publication_handler, get_publication_handler,
    list_publications_handler, update_publication_handler,
};
pub use rubrics::{
    create_rubric_handler, delete_rubric_handler, get_rubric_handler, list_rubrics_handler,
    update_rubric_handler,
};
