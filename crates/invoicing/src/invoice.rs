use serde::{Deserialize, Serialize};

use clearbill_core::{DomainError, DomainResult, Entity, InvoiceId};

use crate::product_line::ProductLine;

/// Invoice status lifecycle.
///
/// Status only moves forward, draft → sending → sent-to-client; no transition
/// skips a state and none reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceStatus {
    Draft,
    Sending,
    SentToClient,
}

impl InvoiceStatus {
    /// Stable string tag used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sending => "sending",
            InvoiceStatus::SentToClient => "sent-to-client",
        }
    }

    /// Inverse of [`InvoiceStatus::as_str`]; `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "draft" => Some(InvoiceStatus::Draft),
            "sending" => Some(InvoiceStatus::Sending),
            "sent-to-client" => Some(InvoiceStatus::SentToClient),
            _ => None,
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate root: Invoice.
///
/// Owns its product lines exclusively; all consistency-relevant mutations flow
/// through the methods below. `total_price` is derived state, recomputed from
/// scratch whenever the line collection changes (never maintained
/// incrementally, so it cannot drift if lines are ever removed or edited).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    customer_name: String,
    customer_email: String,
    status: InvoiceStatus,
    product_lines: Vec<ProductLine>,
    total_price: i64,
}

impl Invoice {
    /// Create a new draft invoice with no lines and a zero total.
    pub fn create(
        id: InvoiceId,
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            status: InvoiceStatus::Draft,
            product_lines: Vec::new(),
            total_price: 0,
        }
    }

    /// Rebuild an invoice from stored state.
    ///
    /// For persistence adapters only. The stored status is trusted as-is; the
    /// total is recomputed from the restored lines rather than read back.
    pub fn restore(
        id: InvoiceId,
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
        status: InvoiceStatus,
        product_lines: Vec<ProductLine>,
    ) -> Self {
        let mut invoice = Self {
            id,
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            status,
            product_lines,
            total_price: 0,
        };
        invoice.recalculate_total_price();
        invoice
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn product_lines(&self) -> &[ProductLine] {
        &self.product_lines
    }

    /// Sum of all line totals, in smallest currency unit.
    pub fn total_price(&self) -> i64 {
        self.total_price
    }

    /// Append a product line and recompute the total.
    ///
    /// Deliberately unguarded by status: lines can be appended to an invoice
    /// that already left draft, silently changing its total after dispatch.
    /// Status constraints are enforced only at `send`.
    pub fn add_product_line(&mut self, product_line: ProductLine) {
        self.product_lines.push(product_line);
        self.recalculate_total_price();
    }

    fn recalculate_total_price(&mut self) {
        self.total_price = self
            .product_lines
            .iter()
            .fold(0i64, |carry, line| carry.saturating_add(line.total_price()));
    }

    /// Attempt to send the invoice to the customer (draft → sending).
    ///
    /// Guards, in order: the invoice must be in draft status, must have at
    /// least one product line, and every line must be valid.
    pub fn send(&mut self) -> DomainResult<()> {
        if self.status != InvoiceStatus::Draft {
            return Err(DomainError::invalid_transition(
                "invalid_status_transition_send",
            ));
        }

        if self.product_lines.is_empty() {
            return Err(DomainError::invalid_product_line("no_product_lines"));
        }

        if self.product_lines.iter().any(|line| !line.is_valid()) {
            return Err(DomainError::invalid_product_line("invalid_product_lines"));
        }

        self.status = InvoiceStatus::Sending;
        Ok(())
    }

    /// Confirm delivery to the customer (sending → sent-to-client).
    ///
    /// Driven by the external delivery-confirmation event, never directly by
    /// an end user.
    pub fn mark_as_sent_to_client(&mut self) -> DomainResult<()> {
        if self.status != InvoiceStatus::Sending {
            return Err(DomainError::invalid_transition(
                "invalid_status_transition_mark_sent",
            ));
        }

        self.status = InvoiceStatus::SentToClient;
        Ok(())
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
