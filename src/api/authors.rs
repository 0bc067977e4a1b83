//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, AuthorDetails, CreateAuthor, UpdateAuthor},
};

use super::{routes, AuthenticatedUser, PageQuery, PaginatedResponse, PAGE_SIZE};

/// List authors ordered by name
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of authors", body = PaginatedResponse<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Author>>> {
    let (items, total) = state
        .services
        .catalog
        .list_authors(PAGE_SIZE, query.offset())
        .await?;

    Ok(Json(PaginatedResponse::new(items, total, query.page())))
}

/// Get author details by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details with their books", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetails>> {
    let details = state.services.catalog.get_author(id).await?;
    Ok(Json(details))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 303, description = "Author created, redirects to their detail route"),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Librarian permission required")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(author): Json<CreateAuthor>,
) -> AppResult<Redirect> {
    claims.require_can_mark_returned()?;
    author.validate()?;

    let created = state.services.catalog.create_author(author).await?;
    Ok(Redirect::to(&routes::author_detail(created.id)))
}

/// Update an existing author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = UpdateAuthor,
    responses(
        (status = 303, description = "Author updated, redirects to their detail route"),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Librarian permission required"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(author): Json<UpdateAuthor>,
) -> AppResult<Redirect> {
    claims.require_can_mark_returned()?;
    author.validate()?;

    let updated = state.services.catalog.update_author(id, author).await?;
    Ok(Redirect::to(&routes::author_detail(updated.id)))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 303, description = "Author deleted, redirects to the author list"),
        (status = 403, description = "Librarian permission required"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author still has books")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    claims.require_can_mark_returned()?;

    state.services.catalog.delete_author(id).await?;
    Ok(Redirect::to(routes::AUTHORS))
}
