//! Record identifier parsing.
//!
//! Path parameters arrive as strings; they are turned into positive integer
//! ids here so nothing past the HTTP boundary ever sees a non-numeric id.

use super::errors::{DomainError, DomainResult};

/// Parse a raw identifier for `entity` ("Order", "Product", "User").
///
/// Accepts only plain decimal digits that fit a positive `i32`.
pub fn parse_record_id(entity: &str, raw: &str) -> DomainResult<i32> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit());

    match trimmed.parse::<i32>() {
        Ok(id) if valid && id > 0 => Ok(id),
        _ => Err(DomainError::InvalidArgument(format!(
            "{} id is not valid",
            entity
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse_record_id("Order", "42").unwrap(), 42);
        assert_eq!(parse_record_id("Order", " 7 ").unwrap(), 7);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        for raw in ["abc", "", "1.5", "-3", "0", "+4", "12a", "99999999999"] {
            let err = parse_record_id("Order", raw).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidArgument(ref m) if m == "Order id is not valid"),
                "{raw:?} should be rejected"
            );
        }
    }
}
