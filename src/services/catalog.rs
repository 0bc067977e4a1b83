//! Catalog service: books, authors and genres

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorDetails, CreateAuthor, UpdateAuthor},
        book::{Book, BookDetails, BookListItem, CreateBook, UpdateBook},
        genre::Genre,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // Books

    pub async fn list_books(&self, limit: i64, offset: i64) -> AppResult<(Vec<BookListItem>, i64)> {
        self.repository.books.list(limit, offset).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        self.check_book_relations(book.author_id, &book.genre_ids).await?;
        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        self.check_book_relations(book.author_id, &book.genre_ids).await?;
        self.repository.books.update(id, &book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Referenced author and genres must exist before a book is written
    async fn check_book_relations(&self, author_id: i32, genre_ids: &[i32]) -> AppResult<()> {
        match self.repository.authors.get_by_id(author_id).await {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Validation(format!(
                    "Unknown author id {}",
                    author_id
                )));
            }
            Err(e) => return Err(e),
        }

        if !genre_ids.is_empty() {
            let existing = self.repository.genres.count_existing(genre_ids).await?;
            if existing != genre_ids.len() as i64 {
                return Err(AppError::Validation("Unknown genre id".to_string()));
            }
        }

        Ok(())
    }

    // Authors

    pub async fn list_authors(&self, limit: i64, offset: i64) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.list(limit, offset).await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.authors.books_by_author(id).await?;
        Ok(AuthorDetails { author, books })
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, &author).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // Genres

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list_all().await
    }
}
