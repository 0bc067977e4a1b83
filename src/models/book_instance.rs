//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

/// Loan status of a copy, stored as a one-char code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Available,
    OnLoan,
    Maintenance,
    Reserved,
}

impl InstanceStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "a",
            InstanceStatus::OnLoan => "o",
            InstanceStatus::Maintenance => "m",
            InstanceStatus::Reserved => "r",
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::OnLoan => "On loan",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for InstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(InstanceStatus::Available),
            "o" => Ok(InstanceStatus::OnLoan),
            "m" => Ok(InstanceStatus::Maintenance),
            "r" => Ok(InstanceStatus::Reserved),
            _ => Err(format!("Invalid instance status code: {}", s)),
        }
    }
}

// SQLx conversion: the column is a one-char TEXT code
impl sqlx::Type<Postgres> for InstanceStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for InstanceStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for InstanceStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_code().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Full book instance model from database.
///
/// `due_back` is meaningful only while the copy is on loan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: Option<String>,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
}

/// Loan list entry: a copy with its book title and borrower resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanListItem {
    pub id: Uuid,
    pub book_id: i32,
    pub title: String,
    pub imprint: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub borrower: Option<String>,
    pub is_overdue: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for status in [
            InstanceStatus::Available,
            InstanceStatus::OnLoan,
            InstanceStatus::Maintenance,
            InstanceStatus::Reserved,
        ] {
            assert_eq!(status.as_code().parse::<InstanceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!("x".parse::<InstanceStatus>().is_err());
        assert!("".parse::<InstanceStatus>().is_err());
    }
}
