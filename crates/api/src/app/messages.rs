//! User-facing message catalog.
//!
//! Keyed by the stable short codes raised from the domain. The codes are the
//! contract; the texts here are presentation only and free to change.

pub const NOT_FOUND: &str = "Invoice not found.";
pub const GENERIC: &str = "An error occurred while processing the invoice.";

pub fn status_transition_message(code: &str) -> String {
    match code {
        "invalid_status_transition_send" => {
            "Cannot send invoice: invoice must be in draft status.".to_string()
        }
        "invalid_status_transition_mark_sent" => {
            "Cannot mark invoice as sent: invoice must be in sending status.".to_string()
        }
        other => format!("Invalid status transition: {other}"),
    }
}

pub fn product_line_message(code: &str) -> String {
    match code {
        "no_product_lines" => "Cannot send invoice: no product lines added.".to_string(),
        "invalid_product_lines" => {
            "Cannot send invoice: one or more product lines are invalid.".to_string()
        }
        other => format!("Product line error: {other}"),
    }
}
