use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::app::errors;
use crate::app::services::AppServices;

/// Delivery-confirmation webhook for the external notification channel.
///
/// `delivered` confirms receipt of the referenced resource; any other action
/// is acknowledged without effect. The reference must be a UUID, otherwise
/// the hook reads as an unknown route.
pub async fn hook(
    Extension(services): Extension<Arc<AppServices>>,
    Path((action, reference)): Path<(String, String)>,
) -> axum::response::Response {
    let Ok(reference) = reference.parse::<Uuid>() else {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "unknown notification hook",
        );
    };

    if action == "delivered" {
        services.notifications.delivered(reference).await;
    } else {
        tracing::debug!(%action, %reference, "ignoring unknown notification hook action");
    }

    (StatusCode::OK, Json(serde_json::json!({}))).into_response()
}
