use acp_core::order::Order;
use acp_core::repository::OrderRepository;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/orders/{id}", get(get_order))
}

/// GET /orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .orders
        .get_order(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("not_found".to_string()))?;
    Ok(Json(order))
}
