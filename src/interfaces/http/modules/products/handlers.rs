//! Product API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension,
};

use super::dto::{CreateProductRequest, ProductDto, UpdateProductRequest};
use crate::application::ProductService;
use crate::interfaces::http::common::{
    created, ok, record_id, ApiResponse, ApiResult, EmptyData, OrFail, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct ProductHandlerState {
    pub product_service: Arc<ProductService>,
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "Product list", body = ApiResponse<Vec<ProductDto>>)
    )
)]
pub async fn list_products(State(state): State<ProductHandlerState>) -> ApiResult<Vec<ProductDto>> {
    let products = state
        .product_service
        .list()
        .await
        .or_fail("Error getting the products")?;

    ok(
        "Products retrieved successfully",
        products.into_iter().map(ProductDto::from).collect(),
    )
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductDto>),
        (status = 400, description = "Product id is not valid"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<ProductDto> {
    let id = record_id("Product", &id)?;
    let product = state
        .product_service
        .get(id)
        .await
        .or_fail("Error getting the product")?;

    ok("Product was found", ProductDto::from(product))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only admins can create products")
    )
)]
pub async fn create_product(
    State(state): State<ProductHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> ApiResult<ProductDto> {
    let product = state
        .product_service
        .create(&user.caller(), request.into())
        .await
        .or_fail("Error creating the product")?;

    created("Product successfully created", ProductDto::from(product))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductDto>),
        (status = 400, description = "Invalid id or body"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<ProductDto> {
    let id = record_id("Product", &id)?;
    let product = state
        .product_service
        .update(id, request.into())
        .await
        .or_fail("Error updating the product")?;

    ok("Product updated successfully", ProductDto::from(product))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<EmptyData>),
        (status = 400, description = "Product id is not valid"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<EmptyData> {
    let id = record_id("Product", &id)?;
    state
        .product_service
        .delete(id)
        .await
        .or_fail("Error deleting the product")?;

    ok("Product successfully deleted", EmptyData {})
}
