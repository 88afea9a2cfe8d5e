//! Product catalog routes.
//!
//! Stock is read-only here; it only moves through order completion and
//! reversal.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use comercia_db::entities::products;
use comercia_db::{CreateProductInput, ProductRepository, UpdateProductInput};
use comercia_shared::types::{Page, PageParams};

use crate::AppState;
use crate::error::ApiError;

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/{product_id}", get(get_product))
        .route("/products/{product_id}", patch(update_product))
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Display name.
    pub name: String,
    /// Default unit price.
    pub price: Decimal,
    /// Opening stock level; defaults to zero.
    #[serde(default)]
    pub initial_stock: i32,
}

/// Request body for updating a product.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProductRequest {
    /// New display name.
    pub name: Option<String>,
    /// New default unit price.
    pub price: Option<Decimal>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Response for a product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Product ID.
    pub id: Uuid,
    /// Assigned `PRO` code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Default unit price.
    pub price: Decimal,
    /// Current stock level.
    pub stock: i32,
    /// Whether the product is active.
    pub active: bool,
}

impl From<products::Model> for ProductResponse {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            price: model.price,
            stock: model.stock,
            active: model.active,
        }
    }
}

/// GET /products - List products.
async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ProductResponse>>, ApiError> {
    let page = ProductRepository::new((*state.db).clone())
        .list(&params)
        .await?;

    Ok(Json(Page {
        data: page.data.into_iter().map(ProductResponse::from).collect(),
        meta: page.meta,
    }))
}

/// POST /products - Create a product.
async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = ProductRepository::new((*state.db).clone())
        .create(CreateProductInput {
            name: payload.name,
            price: payload.price,
            initial_stock: payload.initial_stock,
        })
        .await?;

    tracing::info!(product_id = %product.id, code = %product.code, "product created");
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET `/products/{product_id}` - Get a product.
async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = ProductRepository::new((*state.db).clone())
        .get(product_id)
        .await?;
    Ok(Json(product.into()))
}

/// PATCH `/products/{product_id}` - Update a product.
async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = ProductRepository::new((*state.db).clone())
        .update(
            product_id,
            UpdateProductInput {
                name: payload.name,
                price: payload.price,
                active: payload.active,
            },
        )
        .await?;
    Ok(Json(product.into()))
}
