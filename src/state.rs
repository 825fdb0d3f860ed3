//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{PublicationService, RubricService};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgAuthorRepository, PgPublicationRepository, PgRubricRepository,
};

pub type AppPublicationService = PublicationService<PgPublicationRepository, PgAuthorRepository>;
pub type AppRubricService = RubricService<PgRubricRepository>;

#[derive(Clone)]
pub struct AppState {
    pub publication_service: Arc<AppPublicationService>,
    pub rubric_service: Arc<AppRubricService>,
    pub cache: Arc<dyn CacheService>,
    /// Page size used when a listing request does not specify one.
    pub default_page_size: u32,
}

impl AppState {
    pub fn new(
        publication_service: Arc<AppPublicationService>,
        rubric_service: Arc<AppRubricService>,
        cache: Arc<dyn CacheService>,
        default_page_size: u32,
    ) -> Self {
        Self {
            publication_service,
            rubric_service,
            cache,
            default_page_size,
        }
    }
}
