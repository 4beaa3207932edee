//! Order domain entities and read projections

use chrono::{DateTime, Utc};

use super::status::OrderStatus;
use crate::shared::errors::{DomainError, DomainResult};

/// Order header
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One requested (product, quantity) pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: i32,
    pub quantity: i32,
}

impl LineItem {
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < 1 {
            return Err(DomainError::InvalidArgument(
                "Quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Header plus line items, written as one unit.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
}

impl NewOrder {
    /// Validates every line item; a single bad entry rejects the whole batch.
    pub fn new(user_id: i32, status: OrderStatus, items: Vec<LineItem>) -> DomainResult<Self> {
        for item in &items {
            item.validate()?;
        }
        Ok(Self {
            user_id,
            status,
            items,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// A line item joined with its product.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub line_item_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub price: i32,
    pub quantity: i32,
}

/// Composed view of a single order.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub user: Option<UserSummary>,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuantity {
    pub name: String,
    pub quantity: i32,
}

/// Flattened listing entry.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub id: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub user: Option<UserSummary>,
    pub products: Vec<ProductQuantity>,
}
