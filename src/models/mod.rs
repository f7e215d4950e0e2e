pub mod applications;
pub mod artists;
pub mod availability;
pub mod clients;
pub mod commissions;
pub mod portfolio;
pub mod progress_updates;
pub mod projects;
pub mod users;

use serde::Deserialize;
use validator::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Money amounts must be finite and non-negative.
pub fn finite_amount<T: std::borrow::Borrow<f64>>(value: T) -> Result<(), ValidationError> {
    let value: &f64 = value.borrow();
    if !value.is_finite() || *value < 0.0 {
        return Err(ValidationError::new("amount")
            .with_message("must be a non-negative number".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let q = PaginationQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 100);

        let q = PaginationQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 20);
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
        assert!(not_blank("a sketch").is_ok());
    }

    #[test]
    fn amounts_must_be_finite_and_non_negative() {
        assert!(finite_amount(&100.0).is_ok());
        assert!(finite_amount(&0.0).is_ok());
        assert!(finite_amount(&-1.0).is_err());
        assert!(finite_amount(&f64::NAN).is_err());
        assert!(finite_amount(&f64::INFINITY).is_err());
    }
}
