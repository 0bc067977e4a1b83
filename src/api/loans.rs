//! Loan list and renewal endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{proposed_renewal_date, FieldError, RenewBookForm},
    models::book_instance::LoanListItem,
};

use super::{routes, AuthenticatedUser, PageQuery, PaginatedResponse, PAGE_SIZE};

/// Renewal form context handed to the presentation layer
#[derive(Serialize, ToSchema)]
pub struct RenewalFormContext {
    /// The copy being renewed
    pub book_instance: LoanListItem,
    /// Current form value for the due-back field, `YYYY-MM-DD`
    pub due_back: String,
    /// Field-level errors; empty on the initial form
    pub errors: Vec<FieldError>,
}

/// Copies on loan to the current user, soonest due first
#[utoipa::path(
    get,
    path = "/loans/my",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "The caller's active loans", body = PaginatedResponse<LoanListItem>),
        (status = 303, description = "Not authenticated, redirected to login")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<LoanListItem>>> {
    let (items, total) = state
        .services
        .loans
        .user_loans(claims.user_id, PAGE_SIZE, query.offset())
        .await?;

    Ok(Json(PaginatedResponse::new(items, total, query.page())))
}

/// All copies on loan, for librarians
#[utoipa::path(
    get,
    path = "/loans/borrowed",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All active loans", body = PaginatedResponse<LoanListItem>),
        (status = 303, description = "Not authenticated, redirected to login"),
        (status = 403, description = "Librarian permission required")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<LoanListItem>>> {
    claims.require_can_mark_returned()?;

    let (items, total) = state
        .services
        .loans
        .all_borrowed(PAGE_SIZE, query.offset())
        .await?;

    Ok(Json(PaginatedResponse::new(items, total, query.page())))
}

/// Present the renewal form, pre-filled with today + 3 weeks
#[utoipa::path(
    get,
    path = "/instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Renewal form context", body = RenewalFormContext),
        (status = 303, description = "Not authenticated, redirected to login"),
        (status = 403, description = "Librarian permission required"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renew_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalFormContext>> {
    claims.require_can_mark_returned()?;

    let book_instance = state.services.loans.renewal_target(id).await?;
    let proposed = proposed_renewal_date(Utc::now().date_naive());

    Ok(Json(RenewalFormContext {
        book_instance,
        due_back: proposed.format("%Y-%m-%d").to_string(),
        errors: Vec::new(),
    }))
}

/// Submit the renewal form.
///
/// On success the instance's due-back date is overwritten and the caller is
/// redirected to the all-borrowed list; on validation failure the form
/// context comes back annotated with field errors and nothing is written.
#[utoipa::path(
    post,
    path = "/instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    request_body = RenewBookForm,
    responses(
        (status = 303, description = "Renewed, redirects to the all-borrowed list"),
        (status = 400, description = "Invalid due date", body = RenewalFormContext),
        (status = 403, description = "Librarian permission required"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renew_submit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(form): Json<RenewBookForm>,
) -> AppResult<Response> {
    claims.require_can_mark_returned()?;

    // The target must exist before either branch runs
    let book_instance = state.services.loans.renewal_target(id).await?;

    match form.validate(Utc::now().date_naive()) {
        Ok(due_back) => {
            state.services.loans.renew(id, due_back).await?;
            Ok(Redirect::to(routes::ALL_BORROWED).into_response())
        }
        Err(error) => Ok((
            StatusCode::BAD_REQUEST,
            Json(RenewalFormContext {
                book_instance,
                due_back: form.due_back,
                errors: vec![error],
            }),
        )
            .into_response()),
    }
}
