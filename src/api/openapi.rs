//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, genres, health, loans, summary};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLibrary API",
        version = "1.0.0",
        description = "Library catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Summary
        summary::summary,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        // Loans
        loans::my_loans,
        loans::all_borrowed,
        loans::renew_form,
        loans::renew_submit,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::UserInfo,
            // Summary
            summary::SummaryResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookListItem,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorDetails,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Genres
            crate::models::genre::Genre,
            // Instances and loans
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::InstanceStatus,
            crate::models::book_instance::LoanListItem,
            loans::RenewalFormContext,
            crate::forms::RenewBookForm,
            crate::forms::FieldError,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "summary", description = "Landing summary"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Author records"),
        (name = "genres", description = "Genre labels"),
        (name = "loans", description = "Loan views and renewal")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
