//! Order aggregate
//!
//! An order header owns its line items; reads compose the header with the
//! owning user and the products referenced by each line item.

pub mod model;
pub mod repository;
pub mod status;

pub use model::{
    LineItem, NewOrder, Order, OrderDetails, OrderLine, OrderSummary, ProductQuantity,
    UserSummary,
};
pub use repository::OrderRepository;
pub use status::{OrderStatus, TransitionPolicy};
