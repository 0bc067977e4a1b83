//! API handlers for the LocalLibrary REST endpoints

pub mod auth;
pub mod authors;
pub mod books;
pub mod genres;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod summary;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Named routes used as redirect targets after successful mutations
pub mod routes {
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const BOOKS: &str = "/api/v1/books";
    pub const AUTHORS: &str = "/api/v1/authors";
    pub const ALL_BORROWED: &str = "/api/v1/loans/borrowed";

    pub fn book_detail(id: i32) -> String {
        format!("{}/{}", BOOKS, id)
    }

    pub fn author_detail(id: i32) -> String {
        format!("{}/{}", AUTHORS, id)
    }
}

/// Fixed page size for every list view
pub const PAGE_SIZE: i64 = 10;

/// Pagination query parameter, 1-based
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * PAGE_SIZE
    }
}

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// One page of records
    pub items: Vec<T>,
    /// Total number of records
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Records per page
    pub per_page: i64,
}

impl<T> PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, total: i64, page: i64) -> Self {
        Self {
            items,
            total,
            page,
            per_page: PAGE_SIZE,
        }
    }
}

/// Extractor for authenticated user from JWT token.
///
/// A request with no usable bearer token is redirected to the login route.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::LoginRequired)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::LoginRequired)?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::LoginRequired)?;

        Ok(AuthenticatedUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_to_first() {
        let query = PageQuery { page: None };
        assert_eq!(query.page(), 1);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_page_offset() {
        let query = PageQuery { page: Some(3) };
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_page_clamps_below_one() {
        let query = PageQuery { page: Some(0) };
        assert_eq!(query.page(), 1);
        assert_eq!(query.offset(), 0);
    }
}
