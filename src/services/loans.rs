//! Loan views and renewal service

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{error::AppResult, models::book_instance::LoanListItem, repository::Repository};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Copies on loan to the given user, soonest due first
    pub async fn user_loans(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<LoanListItem>, i64)> {
        self.repository.instances.loans_for_user(user_id, limit, offset).await
    }

    /// All copies on loan, soonest due first
    pub async fn all_borrowed(&self, limit: i64, offset: i64) -> AppResult<(Vec<LoanListItem>, i64)> {
        self.repository.instances.all_on_loan(limit, offset).await
    }

    /// The instance targeted by a renewal form, resolved for display
    pub async fn renewal_target(&self, id: Uuid) -> AppResult<LoanListItem> {
        self.repository.instances.get_loan_item(id).await
    }

    /// Persist a validated renewal: re-derive the instance from its key and
    /// overwrite due_back only.
    pub async fn renew(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        self.repository.instances.update_due_back(id, due_back).await
    }
}
