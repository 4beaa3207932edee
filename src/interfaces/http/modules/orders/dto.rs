//! Order DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{LineItem, Order, OrderDetails, OrderSummary, UserSummary};

/// One requested product. `productId` is accepted as an alias of `id`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    #[serde(alias = "productId")]
    pub id: i32,
    /// Defaults to 1; values below 1 reject the whole order
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

impl From<&OrderItemRequest> for LineItem {
    fn from(item: &OrderItemRequest) -> Self {
        Self {
            product_id: item.id,
            quantity: item.quantity,
        }
    }
}

/// Create order request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(rename = "userId")]
    #[validate(range(min = 1, message = "User id is not valid"))]
    pub user_id: i32,
    /// CONFIRMED (default), CANCELED or DELIVERED
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<OrderItemRequest>>,
}

/// Status change request. Any value that is not one of the status
/// literals, including a missing one, is rejected with the list of options.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "DELIVERED")]
    pub status: Option<serde_json::Value>,
}

impl UpdateStatusRequest {
    /// The requested status text, or "" when absent or not a string.
    pub fn status_text(&self) -> &str {
        self.status
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderUserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<UserSummary> for OrderUserDto {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// A product as it appears on one line of an order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderProductDto {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}

/// Composed order view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: i32,
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: Option<OrderUserDto>,
    pub products: Vec<OrderProductDto>,
}

impl From<OrderDetails> for OrderDto {
    fn from(d: OrderDetails) -> Self {
        Self {
            id: d.order.id,
            user_id: d.order.user_id,
            status: d.order.status.to_string(),
            created_at: d.order.created_at,
            updated_at: d.order.updated_at,
            user: d.user.map(OrderUserDto::from),
            products: d
                .lines
                .into_iter()
                .map(|l| OrderProductDto {
                    id: l.product_id,
                    name: l.product_name,
                    price: l.price,
                    quantity: l.quantity,
                })
                .collect(),
        }
    }
}

/// Minimal projection returned after a status change
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderStatusDto {
    pub id: i32,
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub status: String,
}

impl From<Order> for OrderStatusDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            status: o.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductQuantityDto {
    pub name: String,
    pub quantity: i32,
}

/// Flattened listing entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderListItemDto {
    pub id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub user: Option<OrderUserDto>,
    pub products: Vec<ProductQuantityDto>,
}

impl From<OrderSummary> for OrderListItemDto {
    fn from(s: OrderSummary) -> Self {
        Self {
            id: s.id,
            status: s.status.to_string(),
            created_at: s.created_at,
            user: s.user.map(OrderUserDto::from),
            products: s
                .products
                .into_iter()
                .map(|p| ProductQuantityDto {
                    name: p.name,
                    quantity: p.quantity,
                })
                .collect(),
        }
    }
}
