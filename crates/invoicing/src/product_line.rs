use serde::{Deserialize, Serialize};

use clearbill_core::{DomainError, DomainResult, Entity, ProductLineId};

/// A single billed position on an invoice.
///
/// Product lines are immutable once constructed and are owned exclusively by
/// their invoice (no line is shared across invoices, no back-reference to the
/// invoice is kept).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    id: ProductLineId,
    name: String,
    quantity: i64,
    /// Price in smallest currency unit (e.g., cents).
    unit_price: i64,
}

impl ProductLine {
    /// Construct a validated product line.
    ///
    /// Fails when `quantity` or `unit_price` is not strictly positive, or when
    /// their product does not fit an `i64`.
    pub fn new(
        id: ProductLineId,
        name: impl Into<String>,
        quantity: i64,
        unit_price: i64,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::invalid_product_line(
                "quantity must be greater than zero",
            ));
        }

        if unit_price <= 0 {
            return Err(DomainError::invalid_product_line(
                "unit price must be greater than zero",
            ));
        }

        if quantity.checked_mul(unit_price).is_none() {
            return Err(DomainError::invalid_product_line(
                "product line total overflows",
            ));
        }

        Ok(Self {
            id,
            name: name.into(),
            quantity,
            unit_price,
        })
    }

    /// Rebuild a line from stored state without re-running construction
    /// validation.
    ///
    /// For persistence adapters only: a row corrupted at rest must still load,
    /// so the invoice's own `is_valid` guard can reject it at send time.
    pub fn restore(
        id: ProductLineId,
        name: impl Into<String>,
        quantity: i64,
        unit_price: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    /// Derived line total: `quantity * unit_price`.
    ///
    /// Saturates instead of wrapping for restored-but-corrupt lines; validated
    /// lines cannot overflow.
    pub fn total_price(&self) -> i64 {
        self.quantity.saturating_mul(self.unit_price)
    }

    /// True iff quantity and unit price are both strictly positive.
    ///
    /// Construction already enforces this; the check exists for state that was
    /// rehydrated from storage.
    pub fn is_valid(&self) -> bool {
        self.quantity > 0 && self.unit_price > 0
    }
}

impl Entity for ProductLine {
    type Id = ProductLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn computes_total_price() {
        let line = ProductLine::new(ProductLineId::new(), "Widget", 2, 500).unwrap();
        assert_eq!(line.total_price(), 1000);
        assert!(line.is_valid());
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let err = ProductLine::new(ProductLineId::new(), "Widget", 0, 500).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidProductLine("quantity must be greater than zero".to_string())
        );
    }

    #[test]
    fn rejects_non_positive_unit_price() {
        let err = ProductLine::new(ProductLineId::new(), "Widget", 3, -1).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidProductLine("unit price must be greater than zero".to_string())
        );
    }

    #[test]
    fn rejects_overflowing_total() {
        let err = ProductLine::new(ProductLineId::new(), "Widget", i64::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidProductLine("product line total overflows".to_string())
        );
    }

    #[test]
    fn restore_skips_validation() {
        let line = ProductLine::restore(ProductLineId::new(), "Broken", -4, 100);
        assert!(!line.is_valid());
    }

    proptest! {
        // Quantity guard fires for any unit price, valid ones included.
        #[test]
        fn non_positive_quantity_always_fails(quantity in i64::MIN..=0, unit_price in any::<i64>()) {
            let err = ProductLine::new(ProductLineId::new(), "x", quantity, unit_price).unwrap_err();
            prop_assert_eq!(
                err,
                DomainError::InvalidProductLine("quantity must be greater than zero".to_string())
            );
        }

        #[test]
        fn non_positive_unit_price_always_fails(quantity in 1..=i64::MAX, unit_price in i64::MIN..=0) {
            let err = ProductLine::new(ProductLineId::new(), "x", quantity, unit_price).unwrap_err();
            prop_assert_eq!(
                err,
                DomainError::InvalidProductLine("unit price must be greater than zero".to_string())
            );
        }

        #[test]
        fn valid_lines_compute_exact_totals(quantity in 1i64..=1_000_000, unit_price in 1i64..=1_000_000) {
            let line = ProductLine::new(ProductLineId::new(), "x", quantity, unit_price).unwrap();
            prop_assert_eq!(line.total_price(), quantity * unit_price);
            prop_assert!(line.is_valid());
        }
    }
}
