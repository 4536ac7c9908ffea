//! End-to-end tests for `HttpGateway` against an in-process mock of the
//! try-on service, mirroring its real wire contract: gender-filtered
//! product listing, cumulative cart adds, and a try-on endpoint that
//! reports generation failures inside a 200 response.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use fitroom_client::{ClientConfig, Gateway, HttpGateway, Session, TryOnState};
use fitroom_core::{Gender, PhotoInput, ProductId};

const PREVIEW_BYTES: &[u8] = b"png-bytes";

#[derive(Clone)]
struct MockService {
    cart: Arc<Mutex<Vec<(i32, u32)>>>,
}

fn products_db() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Red Dress", "image_name": "dress1.png", "price": 1999.0, "gender": "female"}),
        json!({"id": 3, "name": "Casual Shirt", "image_name": "shirt1.png", "price": 1299.0, "gender": "male"}),
        json!({"id": 4, "name": "Black T-Shirt", "image_name": "tshirt1.png", "price": 899.0, "gender": "unisex"}),
        // Contract violation the client must drop defensively.
        json!({"id": 9, "name": "Mystery Item", "image_name": "x.png", "price": 1.0, "gender": "kids"}),
    ]
}

#[derive(Deserialize)]
struct ProductsQuery {
    gender: Option<String>,
}

async fn get_products(Query(query): Query<ProductsQuery>) -> Json<Vec<Value>> {
    let db = products_db();
    let Some(gender) = query.gender else {
        return Json(db);
    };
    Json(
        db.into_iter()
            .filter(|p| {
                let g = p["gender"].as_str().unwrap_or("");
                g == gender || g == "unisex"
            })
            .collect(),
    )
}

fn cart_json(cart: &[(i32, u32)]) -> Vec<Value> {
    cart.iter()
        .map(|(id, quantity)| json!({"product_id": id, "quantity": quantity}))
        .collect()
}

async fn get_cart(State(service): State<MockService>) -> Json<Vec<Value>> {
    Json(cart_json(&service.cart.lock().expect("lock")))
}

#[derive(Deserialize)]
struct AddItem {
    product_id: i32,
    quantity: u32,
}

async fn add_to_cart(
    State(service): State<MockService>,
    Json(item): Json<AddItem>,
) -> Json<Vec<Value>> {
    let mut cart = service.cart.lock().expect("lock");
    if let Some(line) = cart.iter_mut().find(|(id, _)| *id == item.product_id) {
        line.1 += item.quantity;
    } else {
        cart.push((item.product_id, item.quantity));
    }
    Json(cart_json(&cart))
}

async fn clear_cart(State(service): State<MockService>) -> Json<Value> {
    service.cart.lock().expect("lock").clear();
    Json(json!({"message": "Cart cleared"}))
}

async fn try_on(mut multipart: Multipart) -> Json<Value> {
    let mut product_id = None;
    let mut photo_len = 0;

    while let Some(field) = multipart.next_field().await.expect("valid multipart") {
        match field.name() {
            Some("product_id") => {
                let text = field.text().await.expect("text field");
                product_id = text.parse::<i32>().ok();
            }
            Some("person_photo") => {
                photo_len = field.bytes().await.expect("bytes field").len();
            }
            _ => {}
        }
    }

    if photo_len == 0 {
        return Json(json!({"error": "Invalid person image"}));
    }
    match product_id {
        Some(id) if products_db().iter().any(|p| p["id"] == id) => {
            Json(json!({"try_on_image_url": "/outputs/test.png"}))
        }
        _ => Json(json!({"error": "Product not found"})),
    }
}

async fn preview_asset() -> &'static [u8] {
    PREVIEW_BYTES
}

async fn spawn_service() -> SocketAddr {
    let service = MockService {
        cart: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/products", get(get_products))
        .route("/cart", get(get_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/clear", post(clear_cart))
        .route("/try-on", post(try_on))
        .route("/outputs/test.png", get(preview_asset))
        .with_state(service);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn gateway_for(addr: SocketAddr) -> HttpGateway {
    let base_url = Url::parse(&format!("http://{addr}")).expect("valid url");
    HttpGateway::new(&ClientConfig::new(base_url)).expect("client builds")
}

#[tokio::test]
async fn test_fetch_products_filters_and_drops_unknown_gender() {
    let addr = spawn_service().await;
    let gateway = gateway_for(addr);

    let products = gateway.fetch_products(Gender::Female).await.expect("fetch");

    // Service returns female + unisex; the "kids" row is dropped
    // client-side.
    let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[tokio::test]
async fn test_try_on_error_payload_maps_to_service_failure() {
    let addr = spawn_service().await;
    let gateway = gateway_for(addr);
    let photo = PhotoInput::new(vec![0xFF, 0xD8, 0xFF], "me.jpg");

    let err = gateway
        .submit_try_on(&photo, ProductId::new(999), Gender::Female)
        .await
        .expect_err("unknown product");
    assert_eq!(err.to_string(), "service error: Product not found");
}

#[tokio::test]
async fn test_fetch_asset_returns_preview_bytes() {
    let addr = spawn_service().await;
    let gateway = gateway_for(addr);

    let bytes = gateway.fetch_asset("/outputs/test.png").await.expect("asset");
    assert_eq!(bytes, PREVIEW_BYTES);
}

#[tokio::test]
async fn test_full_session_flow() {
    let addr = spawn_service().await;
    let session = Session::new(gateway_for(addr));

    // Initial load: default gender is female.
    session.bootstrap().await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.products.len(), 2);
    assert!(snapshot.cart.is_empty());

    // Try-on without a photo fails fast; with one it succeeds.
    assert!(session.try_on(ProductId::new(1)).await.is_err());
    session.set_photo(PhotoInput::new(vec![0xFF, 0xD8, 0xFF], "me.jpg"));
    session.try_on(ProductId::new(1)).await.expect("photo set");
    match &session.snapshot().try_on {
        TryOnState::Succeeded { image_ref, .. } => {
            assert_eq!(image_ref, "/outputs/test.png");
        }
        other => panic!("expected Succeeded, got {other:?}"),
    }

    // Sequential adds of the same product merge server-side.
    session
        .add_to_cart(ProductId::new(1), 1)
        .await
        .expect("cart idle");
    session
        .add_to_cart(ProductId::new(1), 1)
        .await
        .expect("cart idle");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.cart.len(), 1);
    assert_eq!(snapshot.cart[0].quantity, 2);

    // Switching gender swaps the catalog and resets the preview.
    session.set_gender(Gender::Male).await;
    let snapshot = session.snapshot();
    let ids: Vec<i32> = snapshot.products.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![3, 4]);
    assert_eq!(snapshot.try_on, TryOnState::Idle);

    // Clearing twice stays empty and does not error.
    session.clear_cart().await.expect("cart idle");
    session.clear_cart().await.expect("cart idle");
    assert!(session.snapshot().cart.is_empty());
}
