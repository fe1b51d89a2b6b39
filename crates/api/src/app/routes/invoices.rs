use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use clearbill_core::InvoiceId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route("/:id", get(get_invoice))
        .route("/:id/product-lines", post(add_product_line))
        .route("/:id/send", post(send_invoice))
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.invoices.get_all_invoices().await {
        Ok(invoices) => (StatusCode::OK, Json(invoices)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<InvoiceId>() else {
        return errors::not_found();
    };

    match services.invoices.get_invoice(id).await {
        Ok(Some(invoice)) => (StatusCode::OK, Json(invoice)).into_response(),
        Ok(None) => errors::not_found(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateInvoiceRequest>,
) -> axum::response::Response {
    if body.customer_name.trim().is_empty() {
        return errors::json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "customer_name must not be empty",
        );
    }
    if body.customer_email.trim().is_empty() || !body.customer_email.contains('@') {
        return errors::json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "customer_email must be a valid email address",
        );
    }

    match services
        .invoices
        .create_invoice(body.customer_name, body.customer_email)
        .await
    {
        Ok(invoice) => (
            StatusCode::CREATED,
            Json(dto::invoice_envelope("Invoice successfully created", &invoice)),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_product_line(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AddProductLineRequest>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<InvoiceId>() else {
        return errors::not_found();
    };

    if body.name.trim().is_empty() {
        return errors::json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "name must not be empty",
        );
    }

    match services
        .invoices
        .add_product_line(id, body.name, body.quantity, body.unit_price)
        .await
    {
        Ok(Some(invoice)) => (
            StatusCode::CREATED,
            Json(dto::invoice_envelope(
                "Product line successfully added",
                &invoice,
            )),
        )
            .into_response(),
        Ok(None) => errors::not_found(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn send_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<InvoiceId>() else {
        return errors::not_found();
    };

    match services.invoices.send_invoice(id).await {
        Ok(Some(invoice)) => (
            StatusCode::OK,
            Json(dto::invoice_envelope(
                "Invoice has been sent successfully",
                &invoice,
            )),
        )
            .into_response(),
        Ok(None) => errors::not_found(),
        Err(e) => errors::service_error_to_response(e),
    }
}
