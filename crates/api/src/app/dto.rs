use serde::Deserialize;

use clearbill_invoicing::InvoiceDto;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_name: String,
    pub customer_email: String,
}

#[derive(Debug, Deserialize)]
pub struct AddProductLineRequest {
    pub name: String,
    pub quantity: i64,
    pub unit_price: i64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// `{message, data}` envelope used by the mutating endpoints.
pub fn invoice_envelope(message: &str, invoice: &InvoiceDto) -> serde_json::Value {
    serde_json::json!({
        "message": message,
        "data": invoice,
    })
}
