//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{OrderService, ProductService, UserService};
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    auth, health, metrics as metrics_module, orders, products, request_id, users,
};

/// Unified router state. Each handler keeps its own `State<T>` extractor
/// and Axum derives it via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub product_service: Arc<ProductService>,
    pub order_service: Arc<OrderService>,
    pub auth: AuthState,
    pub db: DatabaseConnection,
    pub metrics: PrometheusHandle,
    pub started_at: Arc<Instant>,
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for products::ProductHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            product_service: Arc::clone(&s.product_service),
        }
    }
}

impl FromRef<AppState> for orders::OrderHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            order_service: Arc::clone(&s.order_service),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for metrics_module::MetricsState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            handle: s.metrics.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from POST /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Products
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        // Orders
        orders::create_order,
        orders::get_order,
        orders::update_order_status,
        orders::list_orders,
        orders::delete_order,
    ),
    components(
        schemas(
            ApiResponse<EmptyData>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            products::ProductDto,
            products::CreateProductRequest,
            products::UpdateProductRequest,
            orders::CreateOrderRequest,
            orders::OrderItemRequest,
            orders::UpdateStatusRequest,
            orders::OrderDto,
            orders::OrderUserDto,
            orders::OrderProductDto,
            orders::OrderStatusDto,
            orders::OrderListItemDto,
            orders::ProductQuantityDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Login (JWT) and current user"),
        (name = "Users", description = "Registration and account management"),
        (name = "Products", description = "Product catalog"),
        (name = "Orders", description = "Order composition, status, listing and deletion"),
    ),
    info(
        title = "Shop Service API",
        version = "1.0.0",
        description = "REST API for users, products and orders",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let require_auth = middleware::from_fn_with_state(state.auth.clone(), auth_middleware);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics_module::prometheus_metrics))
        // Auth
        .route("/auth/login", post(auth::login))
        .route(
            "/auth/me",
            get(auth::get_current_user).route_layer(require_auth.clone()),
        )
        // Users: registration is public
        .route(
            "/users",
            post(users::create_user).merge(get(users::list_users).route_layer(require_auth.clone())),
        )
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user)
                .route_layer(require_auth.clone()),
        )
        // Products: reads are public
        .route(
            "/products",
            get(products::list_products)
                .merge(post(products::create_product).route_layer(require_auth.clone())),
        )
        .route(
            "/products/{id}",
            get(products::get_product).merge(
                put(products::update_product)
                    .delete(products::delete_product)
                    .route_layer(require_auth.clone()),
            ),
        )
        // Orders: only the listing needs a token
        .route(
            "/orders",
            post(orders::create_order).merge(get(orders::list_orders).route_layer(require_auth)),
        )
        .route(
            "/orders/{id}",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route("/orders/{id}/status", put(orders::update_order_status))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(metrics_module::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
