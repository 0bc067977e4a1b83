//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{author::Author, book_instance::BookInstance, genre::Genre};

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub language: Option<String>,
    pub author_id: i32,
}

/// Book list entry with the author name resolved for display
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookListItem {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    /// "Lastname, Firstname"
    pub author: String,
}

/// Book detail context: the record plus its relations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub author_id: i32,
    #[validate(length(min = 1, max = 1000, message = "Enter a brief description of the book"))]
    pub summary: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    #[validate(length(max = 30))]
    pub language: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request; the form posts the full field set
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub author_id: i32,
    #[validate(length(min = 1, max = 1000, message = "Enter a brief description of the book"))]
    pub summary: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    #[validate(length(max = 30))]
    pub language: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}
