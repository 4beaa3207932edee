//! Integration tests for the order endpoints

mod common;

use axum::http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{json, Value};

use common::{spawn_app, TestApp};
use shop_service::infrastructure::database::entities::order_product;

struct Seeded {
    admin_token: String,
    user_id: i32,
    lamp: i32,
    desk: i32,
}

async fn seed(app: &TestApp) -> Seeded {
    let admin_token = app.admin_token().await;
    let user_id = app.register("Ana", "ana@example.com", "secret-pw").await;
    let lamp = app.create_product(&admin_token, "Lamp", 1999).await;
    let desk = app.create_product(&admin_token, "Desk", 14900).await;
    Seeded {
        admin_token,
        user_id,
        lamp,
        desk,
    }
}

/// Line-item rows stored for an order.
async fn line_count(app: &TestApp, order_id: i64) -> u64 {
    order_product::Entity::find()
        .filter(order_product::Column::OrderId.eq(order_id as i32))
        .count(&app.state.db)
        .await
        .unwrap()
}

async fn create_order(app: &TestApp, body: Value) -> (StatusCode, Value) {
    app.request("POST", "/orders", Some(body), None).await
}

#[tokio::test]
async fn test_create_order_composes_products() {
    let app = spawn_app().await;
    let s = seed(&app).await;

    let (status, body) = create_order(
        &app,
        json!({
            "userId": s.user_id,
            "products": [{"id": s.lamp, "quantity": 2}, {"id": s.desk, "quantity": 1}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order successfully created");
    let data = &body["data"];
    assert_eq!(data["status"], "CONFIRMED");
    assert_eq!(data["userId"], s.user_id);
    assert_eq!(data["user"]["email"], "ana@example.com");
    assert!(data["user"].get("password_hash").is_none());

    let products = data["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["quantity"], 2);
    assert_eq!(products[0]["name"], "Lamp");
    assert_eq!(products[1]["quantity"], 1);
    assert_eq!(products[1]["price"], 14900);
}

#[tokio::test]
async fn test_get_order_matches_created_view() {
    let app = spawn_app().await;
    let s = seed(&app).await;

    let (_, created) = create_order(
        &app,
        json!({"userId": s.user_id, "status": "DELIVERED", "products": [{"productId": s.desk}]}),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, fetched) = app.request("GET", &format!("/orders/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["message"], "Order retrieved successfully");
    assert_eq!(fetched["data"], created["data"]);
    assert_eq!(fetched["data"]["products"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_create_order_without_products() {
    let app = spawn_app().await;
    let s = seed(&app).await;

    let (status, body) = create_order(&app, json!({"userId": s.user_id})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["products"], json!([]));

    let (status, body) = create_order(&app, json!({"userId": s.user_id, "products": []})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["products"], json!([]));
}

#[tokio::test]
async fn test_invalid_quantities_reject_the_whole_order() {
    let app = spawn_app().await;
    let s = seed(&app).await;

    let (status, body) = create_order(
        &app,
        json!({
            "userId": s.user_id,
            "products": [{"id": s.lamp, "quantity": 3}, {"id": s.desk, "quantity": 0}]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Quantity must be at least 1");
    assert_eq!(body["data"], json!({}));

    let (status, body) = create_order(
        &app,
        json!({"userId": s.user_id, "products": [{"id": s.lamp, "quantity": "a"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, listed) = app.request("GET", "/orders", None, Some(&s.admin_token)).await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn test_unknown_product_leaves_no_order_behind() {
    let app = spawn_app().await;
    let s = seed(&app).await;

    let (status, body) = create_order(
        &app,
        json!({"userId": s.user_id, "products": [{"id": s.lamp}, {"id": 4242}]}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error creating the order");
    assert!(body["data"].is_string());

    let (_, listed) = app.request("GET", "/orders", None, Some(&s.admin_token)).await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn test_set_status_is_idempotent() {
    let app = spawn_app().await;
    let s = seed(&app).await;
    let (_, created) = create_order(&app, json!({"userId": s.user_id})).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/orders/{id}/status");

    let (status, first) = app
        .request("PUT", &uri, Some(json!({"status": "CANCELED"})), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "Order status updated to CANCELED");
    assert_eq!(
        first["data"],
        json!({"id": id, "userId": s.user_id, "status": "CANCELED"})
    );

    let (status, second) = app
        .request("PUT", &uri, Some(json!({"status": "CANCELED"})), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"], first["data"]);
}

#[tokio::test]
async fn test_invalid_status_leaves_order_unchanged() {
    let app = spawn_app().await;
    let s = seed(&app).await;
    let (_, created) = create_order(&app, json!({"userId": s.user_id})).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .request(
            "PUT",
            &format!("/orders/{id}/status"),
            Some(json!({"status": "SHIPPED"})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Status must be either of the options: CONFIRMED, CANCELED, DELIVERED"
    );

    let (_, fetched) = app.request("GET", &format!("/orders/{id}"), None, None).await;
    assert_eq!(fetched["data"]["status"], "CONFIRMED");
}

#[tokio::test]
async fn test_missing_or_non_string_status_lists_options() {
    let app = spawn_app().await;
    let s = seed(&app).await;
    let (_, created) = create_order(&app, json!({"userId": s.user_id})).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/orders/{id}/status");

    for body in [json!({}), json!({"status": 5}), json!({"status": null})] {
        let (status, resp) = app.request("PUT", &uri, Some(body.clone()), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            resp["message"],
            "Status must be either of the options: CONFIRMED, CANCELED, DELIVERED"
        );
    }

    let (_, fetched) = app.request("GET", &uri.replace("/status", ""), None, None).await;
    assert_eq!(fetched["data"]["status"], "CONFIRMED");
}

#[tokio::test]
async fn test_status_update_checks_id_before_status() {
    let app = spawn_app().await;

    let (status, resp) = app
        .request("PUT", "/orders/abc/status", Some(json!({})), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "Order id is not valid");
}

#[tokio::test]
async fn test_invalid_status_on_create_is_rejected() {
    let app = spawn_app().await;
    let s = seed(&app).await;

    let (status, body) = create_order(&app, json!({"userId": s.user_id, "status": "PENDING"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("CONFIRMED, CANCELED, DELIVERED"));
}

#[tokio::test]
async fn test_non_numeric_ids_are_rejected() {
    let app = spawn_app().await;

    for (method, uri, body) in [
        ("GET", "/orders/abc", None),
        ("DELETE", "/orders/abc", None),
        ("PUT", "/orders/abc/status", Some(json!({"status": "CANCELED"}))),
        ("GET", "/orders/-1", None),
    ] {
        let (status, resp) = app.request(method, uri, body, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(resp["message"], "Order id is not valid");
        assert_eq!(resp["data"], json!({}));
    }
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let app = spawn_app().await;

    let (status, body) = app.request("GET", "/orders/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Order not found");

    let (status, _) = app
        .request("PUT", "/orders/999/status", Some(json!({"status": "DELIVERED"})), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_order() {
    let app = spawn_app().await;
    let s = seed(&app).await;
    let (_, created) = create_order(
        &app,
        json!({
            "userId": s.user_id,
            "products": [{"id": s.lamp, "quantity": 5}, {"id": s.lamp, "quantity": 1}]
        }),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    assert_eq!(line_count(&app, id).await, 2);

    let (status, body) = app.request("DELETE", &format!("/orders/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order successfully deleted");
    assert_eq!(body["data"], json!({}));
    assert_eq!(line_count(&app, id).await, 0);

    let (status, _) = app.request("GET", &format!("/orders/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request("DELETE", &format!("/orders/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_requires_token() {
    let app = spawn_app().await;

    let (status, body) = app.request("GET", "/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app.request("GET", "/orders", None, Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = spawn_app().await;
    let s = seed(&app).await;

    let mut ids = Vec::new();
    for qty in 1..=3 {
        let (_, created) = create_order(
            &app,
            json!({"userId": s.user_id, "products": [{"id": s.lamp, "quantity": qty}, {"id": s.desk}]}),
        )
        .await;
        ids.push(created["data"]["id"].as_i64().unwrap());
    }

    let (status, body) = app.request("GET", "/orders", None, Some(&s.admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Orders retrieved successfully");

    let listed = body["data"].as_array().unwrap();
    let listed_ids: Vec<i64> = listed.iter().map(|o| o["id"].as_i64().unwrap()).collect();
    ids.reverse();
    assert_eq!(listed_ids, ids);

    for pair in listed.windows(2) {
        let a = pair[0]["created_at"].as_str().unwrap();
        let b = pair[1]["created_at"].as_str().unwrap();
        let a = chrono::DateTime::parse_from_rfc3339(a).unwrap();
        let b = chrono::DateTime::parse_from_rfc3339(b).unwrap();
        assert!(a >= b);
    }

    let newest = &listed[0];
    assert_eq!(newest["user"], json!({"id": s.user_id, "name": "Ana", "email": "ana@example.com"}));
    assert_eq!(
        newest["products"],
        json!([{"name": "Lamp", "quantity": 3}, {"name": "Desk", "quantity": 1}])
    );
}
