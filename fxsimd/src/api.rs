//! HTTP API for the fxsim daemon.
//!
//! Provides REST endpoints for:
//! - Health check
//! - List orders
//! - Place order
//! - Get order by id
//! - Cancel order
//!
//! The WebSocket route lives in [`crate::ws`] but is mounted here so the
//! whole surface shares one router and state.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use fxsim_domain::{Order, OrderId, OrderStatus};
use fxsim_engine::{Engine, EngineError};
use fxsim_store::OrderRepository;

use crate::validation;
use crate::ws::ws_handler;

// =============================================================================
// API State
// =============================================================================

/// Shared state for API handlers.
pub struct ApiState<S: OrderRepository + 'static> {
    /// The order lifecycle engine
    pub engine: Arc<Engine<S>>,
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service health indicator
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Order record as exposed on the wire.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    /// Order identifier
    pub id: OrderId,
    /// Currency pair name
    pub stocks: String,
    /// Order size
    pub quantity: Decimal,
    /// Current lifecycle status
    pub status: OrderStatus,
}

impl OrderResponse {
    fn from_order(order: &Order) -> Self {
        Self {
            id: order.id,
            stocks: order.stocks.as_str().to_string(),
            quantity: order.quantity.as_decimal(),
            status: order.status,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Description of the failure
    pub error: String,
}

// =============================================================================
// Router
// =============================================================================

/// Create the API router.
pub fn create_router<S>(state: Arc<ApiState<S>>) -> Router
where
    S: OrderRepository + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/orders", get(list_orders_handler).post(place_order_handler))
        .route(
            "/orders/:id",
            get(get_order_handler).delete(cancel_order_handler),
        )
        .route("/ws", get(ws_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List all current orders.
async fn list_orders_handler<S>(
    State(state): State<Arc<ApiState<S>>>,
) -> Result<Json<Vec<OrderResponse>>, (StatusCode, Json<ErrorResponse>)>
where
    S: OrderRepository + 'static,
{
    let orders = state.engine.list().await.map_err(to_error_response)?;
    Ok(Json(orders.iter().map(OrderResponse::from_order).collect()))
}

/// Place a new order.
///
/// Returns 201 with the created record, or 400 with one error record per
/// invalid field.
async fn place_order_handler<S>(State(state): State<Arc<ApiState<S>>>, body: Bytes) -> Response
where
    S: OrderRepository + 'static,
{
    let draft = match validation::parse_order(&body) {
        Ok(draft) => draft,
        Err(errors) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
        }
    };

    match state.engine.submit(&draft.stocks, draft.quantity).await {
        Ok(order) => {
            (StatusCode::CREATED, Json(OrderResponse::from_order(&order))).into_response()
        }
        Err(e) => to_error_response(e).into_response(),
    }
}

/// Get a single order.
async fn get_order_handler<S>(
    State(state): State<Arc<ApiState<S>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, (StatusCode, Json<ErrorResponse>)>
where
    S: OrderRepository + 'static,
{
    let order = state.engine.get(id).await.map_err(to_error_response)?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// Cancel (remove) an order.
async fn cancel_order_handler<S>(
    State(state): State<Arc<ApiState<S>>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)>
where
    S: OrderRepository + 'static,
{
    state.engine.cancel(id).await.map_err(to_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

fn to_error_response(error: EngineError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &error {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        EngineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

// =============================================================================
// Tests
// =============================================================================
