//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetails, BookListItem, CreateBook, UpdateBook},
        book_instance::BookInstance,
        genre::Genre,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// List books ordered by title, one page at a time, with author names
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<BookListItem>, i64)> {
        let books = sqlx::query_as::<_, BookListItem>(
            r#"
            SELECT b.id, b.title, b.author_id,
                   a.last_name || ', ' || a.first_name AS author
            FROM books b
            JOIN authors a ON b.author_id = a.id
            ORDER BY b.title
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Book detail context: the record plus author, genres and all copies
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.get_by_id(id).await?;

        let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(book.author_id)
            .fetch_one(&self.pool)
            .await?;

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.*
            FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let instances = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY imprint, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(BookDetails {
            book,
            author,
            genres,
            instances,
        })
    }

    /// Create a new book and its genre links in one transaction
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, summary, isbn, language, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(&book.language)
        .bind(book.author_id)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(created.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update a book; genre links are replaced with the posted set
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, summary = $2, isbn = $3, language = $4, author_id = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(&book.language)
        .bind(book.author_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a book. Books with copies are kept and reported as a conflict.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                    AppError::Conflict("Book still has copies in the catalog".to_string())
                }
                _ => AppError::Database(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count books whose title contains the needle, case-insensitive
    pub async fn count_title_containing(&self, needle: &str) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE title ILIKE '%' || $1 || '%'")
                .bind(needle)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
