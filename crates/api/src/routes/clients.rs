//! Client management routes.

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
use comercia_db::entities::clients;
use comercia_db::{ClientRepository, CreateClientInput, UpdateClientInput};
use comercia_shared::types::{Page, PageParams};

use crate::AppState;
use crate::error::ApiError;

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients", post(create_client))
        .route("/clients/{client_id}", get(get_client))
        .route("/clients/{client_id}", patch(update_client))
}

/// Request body for creating a client.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    /// Display name.
    pub name: String,
    /// Credit limit; defaults to zero.
    #[serde(default)]
    pub credit_limit: Decimal,
    /// Credit days; defaults to zero (no credit terms).
    #[serde(default)]
    pub credit_days: i32,
}

/// Request body for updating a client.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateClientRequest {
    /// New display name.
    pub name: Option<String>,
    /// New credit limit.
    pub credit_limit: Option<Decimal>,
    /// New credit days.
    pub credit_days: Option<i32>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Response for a client, including the derived credit summary.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    /// Client ID.
    pub id: Uuid,
    /// Assigned `CLI` code.
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
    /// Whether the client is active.
    pub active: bool,
}

impl From<clients::Model> for ClientResponse {
    fn from(model: clients::Model) -> Self {
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

/// GET /clients - List clients.
async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ClientResponse>>, ApiError> {
    let page = ClientRepository::new((*state.db).clone())
        .list(&params)
        .await?;

    Ok(Json(Page {
        data: page.data.into_iter().map(ClientResponse::from).collect(),
        meta: page.meta,
    }))
}

/// POST /clients - Create a client.
async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), ApiError> {
    let client = ClientRepository::new((*state.db).clone())
        .create(CreateClientInput {
            name: payload.name,
            credit_limit: payload.credit_limit,
            credit_days: payload.credit_days,
        })
        .await?;

    tracing::info!(client_id = %client.id, code = %client.code, "client created");
    Ok((StatusCode::CREATED, Json(client.into())))
}

/// GET `/clients/{client_id}` - Get a client with its credit summary.
async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = ClientRepository::new((*state.db).clone())
        .get(client_id)
        .await?;
    Ok(Json(client.into()))
}

/// PATCH `/clients/{client_id}` - Update a client.
async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = ClientRepository::new((*state.db).clone())
        .update(
            client_id,
            UpdateClientInput {
                name: payload.name,
                credit_limit: payload.credit_limit,
                credit_days: payload.credit_days,
                active: payload.active,
            },
        )
        .await?;
    Ok(Json(client.into()))
}
