//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod clients;
pub mod health;
pub mod orders;
pub mod products;
pub mod suppliers;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(clients::routes())
        .merge(suppliers::routes())
        .merge(products::routes())
        .merge(orders::routes())
}
