//! Form binding and validation, decoupled from persistence.
//!
//! A form takes untrusted submitted field values and returns either the
//! typed value or structured field-level errors that the handler feeds
//! back into the form context.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Proposed renewal period shown in the pre-filled form
pub const RENEWAL_PROPOSED_WEEKS: i64 = 3;
/// Upper bound of the accepted renewal window
pub const RENEWAL_WINDOW_WEEKS: i64 = 4;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A field-level validation error
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Submitted renewal form data
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenewBookForm {
    /// Proposed due-back date, `YYYY-MM-DD`
    pub due_back: String,
}

impl RenewBookForm {
    /// Validate the submitted due-back date against the accepted window
    /// [today, today + 4 weeks]. Returns the typed date on success.
    pub fn validate(&self, today: NaiveDate) -> Result<NaiveDate, FieldError> {
        let due_back = NaiveDate::parse_from_str(self.due_back.trim(), DATE_FORMAT)
            .map_err(|_| FieldError::new("due_back", "Enter a valid date (YYYY-MM-DD)"))?;

        if due_back < today {
            return Err(FieldError::new("due_back", "Invalid date - renewal in past"));
        }
        if due_back > today + Duration::weeks(RENEWAL_WINDOW_WEEKS) {
            return Err(FieldError::new(
                "due_back",
                "Invalid date - renewal more than 4 weeks ahead",
            ));
        }

        Ok(due_back)
    }
}

/// Default due-back date pre-filled into the renewal form
pub fn proposed_renewal_date(today: NaiveDate) -> NaiveDate {
    today + Duration::weeks(RENEWAL_PROPOSED_WEEKS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn form(value: &str) -> RenewBookForm {
        RenewBookForm {
            due_back: value.to_string(),
        }
    }

    #[test]
    fn test_accepts_today() {
        assert_eq!(form("2024-06-15").validate(today()).unwrap(), today());
    }

    #[test]
    fn test_accepts_window_boundary() {
        // Exactly four weeks out is still valid
        let due = form("2024-07-13").validate(today()).unwrap();
        assert_eq!(due, today() + Duration::weeks(4));
    }

    #[test]
    fn test_rejects_past_date() {
        let err = form("2024-06-14").validate(today()).unwrap_err();
        assert_eq!(err.field, "due_back");
        assert!(err.message.contains("past"));
    }

    #[test]
    fn test_rejects_beyond_four_weeks() {
        let err = form("2024-07-14").validate(today()).unwrap_err();
        assert!(err.message.contains("4 weeks"));
    }

    #[test]
    fn test_rejects_five_weeks_out() {
        assert!(form("2024-07-20").validate(today()).is_err());
    }

    #[test]
    fn test_rejects_malformed_date() {
        let err = form("next tuesday").validate(today()).unwrap_err();
        assert_eq!(err.field, "due_back");
        assert!(err.message.contains("valid date"));
    }

    #[test]
    fn test_trims_whitespace() {
        assert!(form(" 2024-06-20 ").validate(today()).is_ok());
    }

    #[test]
    fn test_proposed_date_is_three_weeks_out() {
        assert_eq!(
            proposed_renewal_date(today()),
            NaiveDate::from_ymd_opt(2024, 7, 6).unwrap()
        );
    }
}
