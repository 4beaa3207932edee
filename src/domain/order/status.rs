//! Order status and transition rules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::errors::DomainError;

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Canceled,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Confirmed, Self::Canceled, Self::Delivered];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Canceled => "CANCELED",
            Self::Delivered => "DELIVERED",
        }
    }

    /// "CONFIRMED, CANCELED, DELIVERED"
    pub fn options() -> String {
        Self::ALL
            .iter()
            .map(OrderStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled | Self::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    /// Exact match on the upper-case literals only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::InvalidArgument(format!(
                    "Status must be either of the options: {}",
                    Self::options()
                ))
            })
    }
}

/// Which status changes `set_status` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Any status may be relabelled to any other, including itself.
    #[default]
    Permissive,
    /// Re-applying the current status is always allowed; otherwise only
    /// CONFIRMED may move on, and CANCELED / DELIVERED are final.
    Strict,
}

impl TransitionPolicy {
    pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => from == to || !from.is_terminal(),
        }
    }

    /// Returns `InvalidArgument` when the transition is not allowed.
    pub fn check(&self, from: OrderStatus, to: OrderStatus) -> Result<(), DomainError> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(DomainError::InvalidArgument(format!(
                "Order status cannot change from {} to {}",
                from, to
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_exact_literals() {
        assert_eq!("CONFIRMED".parse::<OrderStatus>().unwrap(), OrderStatus::Confirmed);
        assert_eq!("CANCELED".parse::<OrderStatus>().unwrap(), OrderStatus::Canceled);
        assert_eq!("DELIVERED".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert!("confirmed".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn rejection_lists_valid_options() {
        let err = "SHIPPED".parse::<OrderStatus>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status must be either of the options: CONFIRMED, CANCELED, DELIVERED"
        );
    }

    #[test]
    fn default_status_is_confirmed() {
        assert_eq!(OrderStatus::default(), OrderStatus::Confirmed);
    }

    #[test]
    fn permissive_policy_allows_everything() {
        let policy = TransitionPolicy::Permissive;
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                assert!(policy.allows(from, to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn strict_policy_makes_canceled_and_delivered_final() {
        let policy = TransitionPolicy::Strict;
        assert!(policy.allows(OrderStatus::Confirmed, OrderStatus::Delivered));
        assert!(policy.allows(OrderStatus::Confirmed, OrderStatus::Canceled));
        assert!(policy.allows(OrderStatus::Canceled, OrderStatus::Canceled));
        assert!(!policy.allows(OrderStatus::Canceled, OrderStatus::Confirmed));
        assert!(!policy.allows(OrderStatus::Delivered, OrderStatus::Canceled));
        assert!(policy.check(OrderStatus::Delivered, OrderStatus::Confirmed).is_err());
    }
}
