//! Palmetto Storefront - self-hosted shop service

use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post, put}, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palmetto_storefront::config::Config;
use palmetto_storefront::domain::cart::Cart;
use palmetto_storefront::domain::catalog::Catalog;
use palmetto_storefront::domain::checkout::{place_order, CheckoutRequest, OrderReceipt};
use palmetto_storefront::domain::events::{CheckoutEvent, DomainEvent};
use palmetto_storefront::domain::pricing::{Fulfillment, ShippingPolicy};
use palmetto_storefront::domain::search::{filter_products, ProductFilter};
use palmetto_storefront::store::CartStore;
use palmetto_storefront::views::{CartView, ProductCard};
use palmetto_storefront::ShopError;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub shipping: Arc<ShippingPolicy>,
    pub store: Arc<CartStore>,
    pub cart: Arc<Mutex<Cart>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = Config::from_env();
    let catalog = Catalog::seed()?;
    let store = CartStore::new(&config.cart_store_path);
    let cart = store.load();
    tracing::info!(lines = cart.line_count(), path = %store.path().display(), "cart loaded");
    let state = AppState {
        catalog: Arc::new(catalog),
        shipping: Arc::new(config.shipping.clone()),
        store: Arc::new(store),
        cart: Arc::new(Mutex::new(cart)),
    };

    let app = Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "palmetto-storefront"})) }))
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/:id", get(get_product))
        .route("/api/v1/categories", get(list_categories))
        .route("/api/v1/cart", get(get_cart).delete(clear_cart))
        .route("/api/v1/cart/items", post(add_to_cart))
        .route("/api/v1/cart/items/:id", put(update_cart_item).delete(remove_cart_item))
        .route("/api/v1/checkout", post(checkout))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state);

    tracing::info!("🚀 Palmetto Storefront listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)] pub struct CartQuery { #[serde(default)] pub fulfillment: Fulfillment }
#[derive(Debug, Deserialize)] pub struct AddToCartRequest { pub product_id: String, #[serde(default = "default_quantity")] pub quantity: u32 }
#[derive(Debug, Deserialize)] pub struct UpdateQuantityRequest { pub quantity: u32 }
#[derive(Debug, Serialize)] pub struct CartMutationResponse { pub message: String, pub cart: CartView }

fn default_quantity() -> u32 { 1 }

fn error_response(err: ShopError) -> (StatusCode, String) {
    let status = match &err {
        ShopError::ProductNotFound(_) | ShopError::CartItemNotFound(_) => StatusCode::NOT_FOUND,
        ShopError::InvalidQuantity
        | ShopError::EmptyCart
        | ShopError::InvalidSku(_)
        | ShopError::InvalidCheckout(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ShopError::CurrencyMismatch | ShopError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn publish(events: Vec<DomainEvent>) {
    for event in events {
        tracing::info!(?event, "domain event");
    }
}

fn cart_response(message: &str, cart: &Cart, s: &AppState) -> CartMutationResponse {
    let summary = cart.summarize(&s.catalog);
    let totals = s.shipping.totals(&summary.subtotal, Fulfillment::Ship);
    CartMutationResponse { message: message.to_string(), cart: CartView::project(&summary, &totals) }
}

async fn list_products(State(s): State<AppState>, Query(filter): Query<ProductFilter>) -> Json<Vec<ProductCard>> {
    let cards = filter_products(&s.catalog, &filter).into_iter().map(ProductCard::from_product).collect();
    Json(cards)
}

async fn get_product(State(s): State<AppState>, Path(id): Path<String>) -> Result<Json<ProductCard>, (StatusCode, String)> {
    s.catalog.get(&id).map(ProductCard::from_product).map(Json).ok_or_else(|| error_response(ShopError::ProductNotFound(id)))
}

async fn list_categories(State(s): State<AppState>) -> Json<Vec<String>> {
    Json(s.catalog.categories().into_iter().map(String::from).collect())
}

async fn get_cart(State(s): State<AppState>, Query(q): Query<CartQuery>) -> Result<Json<CartView>, (StatusCode, String)> {
    let cart = s.cart.lock().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let summary = cart.summarize(&s.catalog);
    let totals = s.shipping.totals(&summary.subtotal, q.fulfillment);
    Ok(Json(CartView::project(&summary, &totals)))
}

async fn add_to_cart(State(s): State<AppState>, Json(r): Json<AddToCartRequest>) -> Result<(StatusCode, Json<CartMutationResponse>), (StatusCode, String)> {
    let mut cart = s.cart.lock().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let product = s.catalog.get(&r.product_id).ok_or_else(|| error_response(ShopError::ProductNotFound(r.product_id.clone())))?;
    cart.add(product, r.quantity).map_err(error_response)?;
    s.store.save(&cart).map_err(error_response)?;
    publish(cart.take_events());
    Ok((StatusCode::CREATED, Json(cart_response("Added to cart", &cart, &s))))
}

async fn update_cart_item(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<UpdateQuantityRequest>) -> Result<Json<CartMutationResponse>, (StatusCode, String)> {
    let mut cart = s.cart.lock().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    cart.set_quantity(&id, r.quantity).map_err(error_response)?;
    s.store.save(&cart).map_err(error_response)?;
    publish(cart.take_events());
    Ok(Json(cart_response("Cart updated", &cart, &s)))
}

async fn remove_cart_item(State(s): State<AppState>, Path(id): Path<String>) -> Result<Json<CartMutationResponse>, (StatusCode, String)> {
    let mut cart = s.cart.lock().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    cart.remove(&id).map_err(error_response)?;
    s.store.save(&cart).map_err(error_response)?;
    publish(cart.take_events());
    Ok(Json(cart_response("Removed from cart", &cart, &s)))
}

async fn clear_cart(State(s): State<AppState>) -> Result<Json<CartMutationResponse>, (StatusCode, String)> {
    let mut cart = s.cart.lock().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    cart.clear();
    s.store.save(&cart).map_err(error_response)?;
    publish(cart.take_events());
    Ok(Json(cart_response("Cart cleared", &cart, &s)))
}

async fn checkout(State(s): State<AppState>, Json(r): Json<CheckoutRequest>) -> Result<Json<OrderReceipt>, (StatusCode, String)> {
    let mut cart = s.cart.lock().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let summary = cart.summarize(&s.catalog);
    let receipt = place_order(&summary, &s.shipping, &r).map_err(error_response)?;
    cart.clear();
    s.store.save(&cart).map_err(error_response)?;
    let mut events = cart.take_events();
    events.push(DomainEvent::Checkout(CheckoutEvent::OrderPlaced {
        order_number: receipt.order_number.clone(),
        total: receipt.totals.total.amount(),
    }));
    publish(events);
    Ok(Json(receipt))
}
