//! Pagination, sorting and filtering query parameters.

use serde::Deserialize;
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::page::{PageRequest, Sort, SortProperty};
use crate::error::AppError;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Pagination query parameters: `?page=0&size=20&sort=name,desc`.
///
/// Pages are zero-based. Uses `serde_with` to parse numbers from query
/// strings, which plain serde cannot do once the struct is flattened.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub size: Option<u32>,

    #[serde(default)]
    pub sort: Option<String>,
}

impl PageParams {
    /// Validates the parameters and builds a page request.
    ///
    /// # Defaults
    ///
    /// - `page`: 0
    /// - `size`: `default_size`
    /// - `sort`: `id,asc`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `size` is outside `1..=2000` or
    /// `sort` names an unknown property or direction.
    pub fn to_page_request<P: SortProperty>(
        &self,
        default_size: u32,
    ) -> Result<PageRequest<P>, AppError> {
        let page = self.page.unwrap_or(0);
        let size = self.size.unwrap_or(default_size);

        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(AppError::bad_request(
                format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
                json!({ "size": size }),
            ));
        }

        let sort = match self.sort.as_deref() {
            None | Some("") => Sort::default(),
            Some(raw) => Sort::parse(raw).ok_or_else(|| {
                AppError::bad_request("Invalid sort parameter", json!({ "sort": raw }))
            })?,
        };

        Ok(PageRequest::new(page, size, sort))
    }
}

/// Query parameters for `GET /api/publications`.
#[derive(Debug, Deserialize)]
pub struct PublicationQueryParams {
    #[serde(flatten)]
    pub pagination: PageParams,

    /// Restricts the listing to one author's login.
    pub author: Option<String>,
}
