mod common;

use actix_web::http::{StatusCode, header::ContentType};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use pizza_restaurants::api::{self, middleware::{REQUEST_ID_HEADER, RequestId}};
use pizza_restaurants::app_state::AppState;

use common::{restaurant_pizza_count, restaurant_pizza_count_for_restaurant, seeded_db};

macro_rules! init_app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState { db: $db.clone() }))
                .configure(api::init_routes),
        )
        .await
    };
}

fn keys(value: &Value) -> Vec<&str> {
    let mut keys: Vec<&str> = value
        .as_object()
        .expect("json object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    keys
}

fn post_restaurant_pizza(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/restaurant_pizzas")
        .set_json(body)
}

// --- index ---

#[actix_web::test]
async fn index_serves_greeting() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "<h1>Code challenge</h1>");
}

// --- restaurants ---

#[actix_web::test]
async fn list_restaurants_exposes_only_summary_fields() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/restaurants").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let restaurants = body.as_array().expect("array");
    assert_eq!(restaurants.len(), 3);
    for restaurant in restaurants {
        assert_eq!(keys(restaurant), ["address", "id", "name"]);
    }
    assert_eq!(restaurants[0]["name"], "Karen's Pizza Shack");
}

#[actix_web::test]
async fn get_restaurant_nests_pizzas_without_cycles() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/restaurants/1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(keys(&body), ["address", "id", "name", "restaurant_pizzas"]);
    assert_eq!(body["id"], 1);

    let entries = body["restaurant_pizzas"].as_array().expect("array");
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(keys(entry), ["id", "pizza", "pizza_id", "price", "restaurant_id"]);
    assert_eq!(entry["price"], 1);
    assert_eq!(entry["restaurant_id"], 1);
    assert_eq!(keys(&entry["pizza"]), ["id", "ingredients", "name"]);
    assert_eq!(entry["pizza"]["name"], "Emma");
}

#[actix_web::test]
async fn get_unknown_restaurant_is_404() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/restaurants/999").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Restaurant not found" }));
}

#[actix_web::test]
async fn non_integer_restaurant_id_is_404() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/restaurants/abc").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn out_of_range_restaurant_id_is_json_404() {
    let db = seeded_db().await;
    let app = init_app!(db);

    for req in [
        test::TestRequest::get().uri("/restaurants/99999999999"),
        test::TestRequest::delete().uri("/restaurants/99999999999"),
    ] {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Restaurant not found" }));
    }
    assert_eq!(restaurant_pizza_count(&db).await, 3);
}

#[actix_web::test]
async fn delete_restaurant_cascades_to_its_restaurant_pizzas() {
    let db = seeded_db().await;
    let app = init_app!(db);

    // second association for restaurant 2
    let resp = test::call_service(
        &app,
        post_restaurant_pizza(json!({ "price": 9, "pizza_id": 3, "restaurant_id": 2 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(restaurant_pizza_count_for_restaurant(&db, 2).await, 2);
    assert_eq!(restaurant_pizza_count(&db).await, 4);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/restaurants/2").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    assert_eq!(restaurant_pizza_count_for_restaurant(&db, 2).await, 0);
    assert_eq!(restaurant_pizza_count(&db).await, 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/restaurants/2").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_unknown_restaurant_is_404() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/restaurants/42").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Restaurant not found" }));
    assert_eq!(restaurant_pizza_count(&db).await, 3);
}

// --- pizzas ---

#[actix_web::test]
async fn list_pizzas_exposes_only_whitelisted_fields() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/pizzas").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let pizzas = body.as_array().expect("array");
    assert_eq!(pizzas.len(), 3);
    for pizza in pizzas {
        assert_eq!(keys(pizza), ["id", "ingredients", "name"]);
    }
    assert_eq!(pizzas[1]["ingredients"], "Dough, Tomato Sauce, Cheese, Pepperoni");
}

// --- restaurant_pizzas ---

#[actix_web::test]
async fn create_restaurant_pizza_returns_full_projection() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        post_restaurant_pizza(json!({ "price": 5, "pizza_id": 1, "restaurant_id": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        keys(&body),
        ["id", "pizza", "pizza_id", "price", "restaurant", "restaurant_id"]
    );
    assert_eq!(body["price"], 5);
    assert_eq!(body["pizza_id"], 1);
    assert_eq!(body["restaurant_id"], 1);
    assert_eq!(body["pizza"]["id"], 1);
    assert_eq!(body["restaurant"]["id"], 1);
    assert_eq!(keys(&body["restaurant"]), ["address", "id", "name"]);
    assert_eq!(keys(&body["pizza"]), ["id", "ingredients", "name"]);
    assert_eq!(restaurant_pizza_count(&db).await, 4);
}

#[actix_web::test]
async fn create_restaurant_pizza_accepts_boundary_prices() {
    let db = seeded_db().await;
    let app = init_app!(db);

    for price in [1, 30] {
        let resp = test::call_service(
            &app,
            post_restaurant_pizza(json!({ "price": price, "pizza_id": 2, "restaurant_id": 3 }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED, "price {}", price);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["price"], price);
    }
    assert_eq!(restaurant_pizza_count(&db).await, 5);
}

#[actix_web::test]
async fn create_restaurant_pizza_rejects_out_of_range_prices() {
    let db = seeded_db().await;
    let app = init_app!(db);

    for price in [0, 31, -5, 10_000_000_000_i64] {
        let resp = test::call_service(
            &app,
            post_restaurant_pizza(json!({ "price": price, "pizza_id": 1, "restaurant_id": 2 }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "price {}", price);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "errors": ["validation errors"] }));
    }
    assert_eq!(restaurant_pizza_count(&db).await, 3);
}

#[actix_web::test]
async fn create_restaurant_pizza_requires_all_fields() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let bodies = [
        json!({ "pizza_id": 1, "restaurant_id": 1 }),
        json!({ "price": 5, "restaurant_id": 1 }),
        json!({ "price": 5, "pizza_id": 1 }),
        json!({ "price": null, "pizza_id": 1, "restaurant_id": 1 }),
        json!({}),
        Value::Null,
    ];
    for body in bodies {
        let resp = test::call_service(&app, post_restaurant_pizza(body.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(
            error,
            json!({ "errors": ["price, pizza_id and restaurant_id are required"] })
        );
    }
    assert_eq!(restaurant_pizza_count(&db).await, 3);
}

#[actix_web::test]
async fn create_restaurant_pizza_with_unknown_pizza_is_404() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        post_restaurant_pizza(json!({ "price": 5, "pizza_id": 99, "restaurant_id": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Pizza not found" }));
    assert_eq!(restaurant_pizza_count(&db).await, 3);
}

#[actix_web::test]
async fn create_restaurant_pizza_with_unknown_restaurant_is_404() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        post_restaurant_pizza(json!({ "price": 5, "pizza_id": 1, "restaurant_id": 99 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Restaurant not found" }));
    assert_eq!(restaurant_pizza_count(&db).await, 3);
}

#[actix_web::test]
async fn lookups_happen_before_price_validation() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        post_restaurant_pizza(json!({ "price": 0, "pizza_id": 99, "restaurant_id": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_body_is_a_validation_error() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/restaurant_pizzas")
        .insert_header(ContentType::json())
        .set_payload("{\"price\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "errors": ["validation errors"] }));

    let resp = test::call_service(
        &app,
        post_restaurant_pizza(json!({ "price": "five", "pizza_id": 1, "restaurant_id": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(restaurant_pizza_count(&db).await, 3);
}

#[actix_web::test]
async fn non_integral_price_is_a_validation_error() {
    let db = seeded_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        post_restaurant_pizza(json!({ "price": 5.0, "pizza_id": 1, "restaurant_id": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "errors": ["validation errors"] }));
    assert_eq!(restaurant_pizza_count(&db).await, 3);
}

// --- middleware ---

#[actix_web::test]
async fn responses_carry_request_id() {
    let db = seeded_db().await;
    let app = test::init_service(
        App::new()
            .wrap(RequestId)
            .app_data(web::Data::new(AppState { db: db.clone() }))
            .configure(api::init_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/pizzas").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert_eq!(id.len(), 36);
}
