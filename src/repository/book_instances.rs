//! Book instances repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, LoanListItem},
};

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get instance by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Get one instance as a loan list entry (book title and borrower resolved)
    pub async fn get_loan_item(&self, id: Uuid) -> AppResult<LoanListItem> {
        let row = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, b.title, bi.imprint, bi.due_back,
                   u.username AS borrower
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            WHERE bi.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))?;

        Ok(loan_item_from_row(&row, Utc::now().date_naive()))
    }

    /// Copies on loan to one borrower, soonest due first
    pub async fn loans_for_user(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<LoanListItem>, i64)> {
        let rows = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, b.title, bi.imprint, bi.due_back,
                   u.username AS borrower
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            WHERE bi.borrower_id = $1 AND bi.status = 'o'
            ORDER BY bi.due_back
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE borrower_id = $1 AND status = 'o'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let today = Utc::now().date_naive();
        let items = rows.iter().map(|r| loan_item_from_row(r, today)).collect();
        Ok((items, total))
    }

    /// All copies on loan regardless of borrower, soonest due first
    pub async fn all_on_loan(&self, limit: i64, offset: i64) -> AppResult<(Vec<LoanListItem>, i64)> {
        let rows = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, b.title, bi.imprint, bi.due_back,
                   u.username AS borrower
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            WHERE bi.status = 'o'
            ORDER BY bi.due_back
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = 'o'")
                .fetch_one(&self.pool)
                .await?;

        let today = Utc::now().date_naive();
        let items = rows.iter().map(|r| loan_item_from_row(r, today)).collect();
        Ok((items, total))
    }

    /// Overwrite the due-back date of one instance. Status and borrower are
    /// never touched here.
    pub async fn update_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        let result = sqlx::query("UPDATE book_instances SET due_back = $1 WHERE id = $2")
            .bind(due_back)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }

        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies currently available
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = 'a'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

fn loan_item_from_row(row: &sqlx::postgres::PgRow, today: NaiveDate) -> LoanListItem {
    let due_back: Option<NaiveDate> = row.get("due_back");
    LoanListItem {
        id: row.get("id"),
        book_id: row.get("book_id"),
        title: row.get("title"),
        imprint: row.get("imprint"),
        due_back,
        borrower: row.get("borrower"),
        is_overdue: due_back.map(|d| d < today).unwrap_or(false),
    }
}
