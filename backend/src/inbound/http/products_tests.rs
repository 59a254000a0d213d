//! Tests for product HTTP handlers.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{in_memory_state, init_app};

async fn send(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    req: Request,
) -> (StatusCode, Value) {
    let res = actix_test::call_service(app, req).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = serde_json::from_slice(&body).expect("response body is JSON");
    (status, value)
}

fn with_json(req: actix_test::TestRequest, uri: &str, body: Value) -> Request {
    req.uri(uri).set_json(body).to_request()
}

fn get(uri: &str) -> Request {
    actix_test::TestRequest::get().uri(uri).to_request()
}

/// Seed category Phones(1) holding product X1(1).
async fn seed_phones(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
) {
    let (status, _) = send(
        app,
        with_json(
            actix_test::TestRequest::post(),
            "/categories",
            json!({"name": "Phones"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(
        app,
        with_json(
            actix_test::TestRequest::post(),
            "/products",
            json!({"name": "X1", "price": 199.99, "category_id": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn create_returns_product_with_category_name() {
    let app = init_app(in_memory_state()).await;
    seed_phones(&app).await;

    let (status, body) = send(
        &app,
        with_json(
            actix_test::TestRequest::post(),
            "/products/",
            json!({"name": "Z9", "price": 0.0, "category_id": 1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 2,
            "name": "Z9",
            "price": 0.0,
            "category_id": 1,
            "category_name": "Phones"
        })
    );
}

#[rstest]
#[actix_web::test]
async fn get_and_list_return_views() {
    let app = init_app(in_memory_state()).await;
    seed_phones(&app).await;

    let (status, one) = send(&app, get("/products/1")).await;
    let (_, all) = send(&app, get("/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["category_name"], "Phones");
    assert_eq!(all, json!([one]));
}

#[rstest]
#[case(json!({"name": "X2", "price": -1.0, "category_id": 1}), "price_negative")]
#[case(json!({"name": "X", "price": 1.0, "category_id": 1}), "name_too_short")]
#[actix_web::test]
async fn invalid_fields_are_unprocessable(#[case] payload: Value, #[case] code: &str) {
    let app = init_app(in_memory_state()).await;
    seed_phones(&app).await;

    let (status, body) = send(
        &app,
        with_json(actix_test::TestRequest::post(), "/products", payload),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn unknown_category_conflicts() {
    let app = init_app(in_memory_state()).await;
    seed_phones(&app).await;

    let (status, body) = send(
        &app,
        with_json(
            actix_test::TestRequest::post(),
            "/products",
            json!({"name": "Orphan", "price": 5.0, "category_id": 42}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[actix_web::test]
async fn empty_patch_is_rejected_and_changes_nothing() {
    let app = init_app(in_memory_state()).await;
    seed_phones(&app).await;

    let (status, body) = send(
        &app,
        with_json(actix_test::TestRequest::patch(), "/products/1", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    let (_, product) = send(&app, get("/products/1")).await;
    assert_eq!(product["price"], 199.99);
}

#[rstest]
#[actix_web::test]
async fn partial_patch_updates_only_given_fields() {
    let app = init_app(in_memory_state()).await;
    seed_phones(&app).await;

    let (status, body) = send(
        &app,
        with_json(
            actix_test::TestRequest::patch(),
            "/products/1",
            json!({"price": 149.5, "name": null}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "X1");
    assert_eq!(body["price"], 149.5);
}

#[rstest]
#[case(actix_test::TestRequest::get())]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn missing_product_is_not_found(#[case] req: actix_test::TestRequest) {
    let app = init_app(in_memory_state()).await;

    let (status, body) = send(&app, req.uri("/products/7").to_request()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "product not found");
}

#[rstest]
#[actix_web::test]
async fn delete_removes_product() {
    let app = init_app(in_memory_state()).await;
    seed_phones(&app).await;
    let req = actix_test::TestRequest::delete()
        .uri("/products/1")
        .to_request();

    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"detail": "product deleted"}));
    let (status, _) = send(&app, get("/products/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, category) = send(&app, get("/categories/1")).await;
    assert_eq!(category["products"], json!([]));
}
