//! Error-to-response mapping.
//!
//! Repository errors are folded into the shared [`AppError`] taxonomy,
//! which fixes the HTTP status and stable error code for each kind of
//! failure. Handlers return `Result<_, ApiError>` and let `?` do the
//! mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use comercia_db::{OrderError, OrderItemError, PartyError, PartyRepoError, SequenceError};
use comercia_shared::AppError;

/// Wrapper that renders an [`AppError`] as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        let app = match &err {
            OrderError::NotFound(_) | OrderError::PartyNotFound(_) | OrderError::ProductNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            OrderError::Totals(_) => AppError::Validation(err.to_string()),
            OrderError::NotEditable { .. } | OrderError::Lifecycle(_) | OrderError::Credit(_) => {
                AppError::BusinessRule(err.to_string())
            }
            OrderError::Sequence(SequenceError::LockTimeout) | OrderError::LockTimeout => {
                AppError::LockTimeout(err.to_string())
            }
            OrderError::Sequence(_) | OrderError::Database(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}

impl From<OrderItemError> for ApiError {
    fn from(err: OrderItemError) -> Self {
        let app = match &err {
            OrderItemError::OrderNotFound(_)
            | OrderItemError::ItemNotFound(_)
            | OrderItemError::ProductNotFound(_) => AppError::NotFound(err.to_string()),
            OrderItemError::Totals(_) => AppError::Validation(err.to_string()),
            OrderItemError::NotEditable { .. } => AppError::BusinessRule(err.to_string()),
            OrderItemError::LockTimeout => AppError::LockTimeout(err.to_string()),
            OrderItemError::Database(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}

impl From<PartyError> for ApiError {
    fn from(err: PartyError) -> Self {
        let app = match &err {
            PartyError::NotFound(_) => AppError::NotFound(err.to_string()),
            PartyError::Credit(_) => AppError::BusinessRule(err.to_string()),
            PartyError::LockTimeout => AppError::LockTimeout(err.to_string()),
            PartyError::Database(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}

impl From<PartyRepoError> for ApiError {
    fn from(err: PartyRepoError) -> Self {
        let app = match &err {
            PartyRepoError::NotFound(_) => AppError::NotFound(err.to_string()),
            PartyRepoError::Sequence(SequenceError::LockTimeout) | PartyRepoError::LockTimeout => {
                AppError::LockTimeout(err.to_string())
            }
            PartyRepoError::Sequence(_) | PartyRepoError::Database(_) => {
                AppError::Database(err.to_string())
            }
        };
        Self(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case(OrderError::NotFound(Uuid::nil()), 404)]
    #[case(OrderError::LockTimeout, 503)]
    #[case(
        OrderError::Lifecycle(comercia_core::lifecycle::LifecycleError::AlreadyVoided),
        422
    )]
    fn order_errors_map_to_expected_status(#[case] err: OrderError, #[case] expected: u16) {
        let api: ApiError = err.into();
        assert_eq!(api.0.status_code(), expected);
    }

    #[test]
    fn item_validation_maps_to_400() {
        let err = OrderItemError::Totals(comercia_core::totals::TotalsError::NonPositiveQuantity(0));
        let api: ApiError = err.into();
        assert_eq!(api.0.status_code(), 400);
        assert_eq!(api.0.error_code(), "VALIDATION_ERROR");
    }
}
