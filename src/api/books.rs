//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{BookDetails, BookListItem, CreateBook, UpdateBook},
};

use super::{routes, AuthenticatedUser, PageQuery, PaginatedResponse, PAGE_SIZE};

/// List books ordered by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of books", body = PaginatedResponse<BookListItem>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BookListItem>>> {
    let (items, total) = state
        .services
        .catalog
        .list_books(PAGE_SIZE, query.offset())
        .await?;

    Ok(Json(PaginatedResponse::new(items, total, query.page())))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let details = state.services.catalog.get_book(id).await?;
    Ok(Json(details))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 303, description = "Book created, redirects to its detail route"),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Librarian permission required")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<Redirect> {
    claims.require_can_mark_returned()?;
    book.validate()?;

    let created = state.services.catalog.create_book(book).await?;
    Ok(Redirect::to(&routes::book_detail(created.id)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 303, description = "Book updated, redirects to its detail route"),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Librarian permission required"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(book): Json<UpdateBook>,
) -> AppResult<Redirect> {
    claims.require_can_mark_returned()?;
    book.validate()?;

    let updated = state.services.catalog.update_book(id, book).await?;
    Ok(Redirect::to(&routes::book_detail(updated.id)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Book deleted, redirects to the book list"),
        (status = 403, description = "Librarian permission required"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book still has copies")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    claims.require_can_mark_returned()?;

    state.services.catalog.delete_book(id).await?;
    Ok(Redirect::to(routes::BOOKS))
}
