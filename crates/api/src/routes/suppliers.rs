//! Supplier management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use comercia_core::credit::CreditAccount;
use comercia_db::entities::suppliers;
use comercia_db::{CreateSupplierInput, SupplierRepository, UpdateSupplierInput};
use comercia_shared::types::{Page, PageParams};

use crate::AppState;
use crate::error::ApiError;

/// Creates the supplier routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list_suppliers))
        .route("/suppliers", post(create_supplier))
        .route("/suppliers/{supplier_id}", get(get_supplier))
        .route("/suppliers/{supplier_id}", patch(update_supplier))
}

/// Request body for creating a supplier.
#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    /// Display name.
    pub name: String,
    /// Credit limit granted to us by this supplier; defaults to zero.
    #[serde(default)]
    pub credit_limit: Decimal,
    /// Credit days; defaults to zero (no credit terms).
    #[serde(default)]
    pub credit_days: i32,
}

/// Request body for updating a supplier.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateSupplierRequest {
    /// New display name.
    pub name: Option<String>,
    /// New credit limit.
    pub credit_limit: Option<Decimal>,
    /// New credit days.
    pub credit_days: Option<i32>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Response for a supplier, including the derived credit summary.
#[derive(Debug, Serialize)]
pub struct SupplierResponse {
    /// Supplier ID.
    pub id: Uuid,
    /// Assigned `SUP` code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Credit limit.
    pub credit_limit: Decimal,
    /// Credit currently consumed.
    pub credit_used: Decimal,
    /// Credit still available.
    pub credit_available: Decimal,
    /// Share of the limit consumed, as a percentage.
    pub credit_used_pct: Decimal,
    /// Credit days.
    pub credit_days: i32,
    /// Lifetime completed order volume.
    pub total_transacted: Decimal,
    /// Date of the most recent completed order.
    pub last_transaction_date: Option<NaiveDate>,
    /// Whether the supplier is active.
    pub active: bool,
}

impl From<suppliers::Model> for SupplierResponse {
    fn from(model: suppliers::Model) -> Self {
        let account = CreditAccount {
            credit_limit: model.credit_limit,
            credit_used: model.credit_used,
            credit_days: model.credit_days,
            active: model.active,
        };
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            credit_limit: model.credit_limit,
            credit_used: model.credit_used,
            credit_available: account.credit_available(),
            credit_used_pct: account.credit_used_pct(),
            credit_days: model.credit_days,
            total_transacted: model.total_transacted,
            last_transaction_date: model.last_transaction_date,
            active: model.active,
        }
    }
}

/// GET /suppliers - List suppliers.
async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<SupplierResponse>>, ApiError> {
    let page = SupplierRepository::new((*state.db).clone())
        .list(&params)
        .await?;

    Ok(Json(Page {
        data: page.data.into_iter().map(SupplierResponse::from).collect(),
        meta: page.meta,
    }))
}

/// POST /suppliers - Create a supplier.
async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<SupplierResponse>), ApiError> {
    let supplier = SupplierRepository::new((*state.db).clone())
        .create(CreateSupplierInput {
            name: payload.name,
            credit_limit: payload.credit_limit,
            credit_days: payload.credit_days,
        })
        .await?;

    tracing::info!(supplier_id = %supplier.id, code = %supplier.code, "supplier created");
    Ok((StatusCode::CREATED, Json(supplier.into())))
}

/// GET `/suppliers/{supplier_id}` - Get a supplier with its credit summary.
async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> Result<Json<SupplierResponse>, ApiError> {
    let supplier = SupplierRepository::new((*state.db).clone())
        .get(supplier_id)
        .await?;
    Ok(Json(supplier.into()))
}

/// PATCH `/suppliers/{supplier_id}` - Update a supplier.
async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> Result<Json<SupplierResponse>, ApiError> {
    let supplier = SupplierRepository::new((*state.db).clone())
        .update(
            supplier_id,
            UpdateSupplierInput {
                name: payload.name,
                credit_limit: payload.credit_limit,
                credit_days: payload.credit_days,
                active: payload.active,
            },
        )
        .await?;
    Ok(Json(supplier.into()))
}
