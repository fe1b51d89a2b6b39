//! Snapshot DTOs returned across the core boundary.
//!
//! These are immutable, serialization-ready projections of aggregate state.
//! Nothing past the orchestrator ever sees the aggregate itself.

use serde::{Deserialize, Serialize};

use clearbill_core::{Entity, InvoiceId, ProductLineId};

use crate::invoice::{Invoice, InvoiceStatus};
use crate::product_line::ProductLine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLineDto {
    pub id: ProductLineId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub total_price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDto {
    pub id: InvoiceId,
    pub status: InvoiceStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub product_lines: Vec<ProductLineDto>,
    pub total_price: i64,
}

impl From<&ProductLine> for ProductLineDto {
    fn from(line: &ProductLine) -> Self {
        Self {
            id: *line.id(),
            name: line.name().to_string(),
            quantity: line.quantity(),
            unit_price: line.unit_price(),
            total_price: line.total_price(),
        }
    }
}

impl From<&Invoice> for InvoiceDto {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: *invoice.id(),
            status: invoice.status(),
            customer_name: invoice.customer_name().to_string(),
            customer_email: invoice.customer_email().to_string(),
            product_lines: invoice.product_lines().iter().map(Into::into).collect(),
            total_price: invoice.total_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_mirrors_aggregate_state() {
        let mut invoice = Invoice::create(InvoiceId::new(), "Jane Doe", "jane@example.com");
        invoice.add_product_line(
            ProductLine::new(ProductLineId::new(), "Widget", 2, 500).unwrap(),
        );

        let dto = InvoiceDto::from(&invoice);
        assert_eq!(dto.id, *invoice.id());
        assert_eq!(dto.status, InvoiceStatus::Draft);
        assert_eq!(dto.product_lines.len(), 1);
        assert_eq!(dto.product_lines[0].name, "Widget");
        assert_eq!(dto.product_lines[0].total_price, 1000);
        assert_eq!(dto.total_price, 1000);
    }

    #[test]
    fn status_serializes_as_string_tag() {
        let invoice = Invoice::create(InvoiceId::new(), "Jane Doe", "jane@example.com");
        let json = serde_json::to_value(InvoiceDto::from(&invoice)).unwrap();
        assert_eq!(json["status"], "draft");
    }
}
