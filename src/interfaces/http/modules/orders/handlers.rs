//! Order API handlers
//!
//! Thin wrappers that parse path ids at the boundary and delegate to
//! `OrderService`.

use std::sync::Arc;

use axum::extract::{Path, State};

use super::dto::{
    CreateOrderRequest, OrderDto, OrderListItemDto, OrderStatusDto, UpdateStatusRequest,
};
use crate::application::{CreateOrder, OrderService};
use crate::domain::LineItem;
use crate::interfaces::http::common::{
    created, ok, record_id, ApiResponse, ApiResult, EmptyData, OrFail, ValidatedJson,
};

#[derive(Clone)]
pub struct OrderHandlerState {
    pub order_service: Arc<OrderService>,
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderDto>),
        (status = 400, description = "Invalid status or line item"),
        (status = 500, description = "Store failure, nothing persisted")
    )
)]
pub async fn create_order(
    State(state): State<OrderHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> ApiResult<OrderDto> {
    let items: Vec<LineItem> = request
        .products
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(LineItem::from)
        .collect();

    let details = state
        .order_service
        .create(CreateOrder {
            user_id: request.user_id,
            status: request.status,
            items,
        })
        .await
        .or_fail("Error creating the order")?;

    created("Order successfully created", OrderDto::from(details))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Composed order", body = ApiResponse<OrderDto>),
        (status = 400, description = "Order id is not valid"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<OrderHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<OrderDto> {
    let id = record_id("Order", &id)?;
    let details = state
        .order_service
        .get_by_id(id)
        .await
        .or_fail("Error retrieving order")?;

    ok("Order retrieved successfully", OrderDto::from(details))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<OrderStatusDto>),
        (status = 400, description = "Invalid id or status"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    State(state): State<OrderHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<OrderStatusDto> {
    let id = record_id("Order", &id)?;
    let order = state
        .order_service
        .set_status(id, request.status_text())
        .await
        .or_fail("Error updating order status")?;

    let message = format!("Order status updated to {}", order.status);
    ok(message, OrderStatusDto::from(order))
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All orders, newest first", body = ApiResponse<Vec<OrderListItemDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_orders(State(state): State<OrderHandlerState>) -> ApiResult<Vec<OrderListItemDto>> {
    let orders = state
        .order_service
        .list_all()
        .await
        .or_fail("Error retrieving orders")?;

    ok(
        "Orders retrieved successfully",
        orders.into_iter().map(OrderListItemDto::from).collect(),
    )
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order and its line items deleted", body = ApiResponse<EmptyData>),
        (status = 400, description = "Order id is not valid"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    State(state): State<OrderHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<EmptyData> {
    let id = record_id("Order", &id)?;
    state
        .order_service
        .delete(id)
        .await
        .or_fail("Error deleting the order")?;

    ok("Order successfully deleted", EmptyData {})
}
