use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use clearbill_core::DomainError;
use clearbill_invoicing::ServiceError;

use crate::app::messages;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Repository(e) => {
            tracing::error!(error = %e, "storage failure while processing invoice");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                messages::GENERIC,
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::InvalidStatusTransition(code) => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_status_transition",
            messages::status_transition_message(&code),
        ),
        DomainError::InvalidProductLine(code) => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_product_line",
            messages::product_line_message(&code),
        ),
        // Path ids are constrained to the UUID grammar, so an unparseable id
        // reads as a miss, not a bad request.
        DomainError::InvalidId(_) => not_found(),
    }
}

pub fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", messages::NOT_FOUND)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
