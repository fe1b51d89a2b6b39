//! Invoice orchestration: load → mutate → persist → snapshot.

use std::sync::Arc;

use thiserror::Error;

use clearbill_core::{DomainError, Entity, InvoiceId, ProductLineId};
use clearbill_notifications::{Notifier, NotifyData};

use crate::dto::InvoiceDto;
use crate::invoice::Invoice;
use crate::product_line::ProductLine;
use crate::repository::{InvoiceRepository, RepositoryError};

/// Failure of an orchestrator operation.
///
/// Domain-rule failures pass through unmodified so the boundary can key its
/// message catalog off their short codes; storage faults are carried
/// separately and map to a generic failure response.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// The only component allowed to mutate an invoice's persisted state.
///
/// Each operation is one synchronous unit of work: one load, zero-or-more
/// in-memory mutations, one save — no internal parallelism, no retries.
/// An invoice id that does not resolve yields `Ok(None)`, a normal outcome
/// that collaborators check explicitly, never an error.
pub struct InvoiceService {
    repository: Arc<dyn InvoiceRepository>,
    notifier: Arc<dyn Notifier>,
}

impl InvoiceService {
    pub fn new(repository: Arc<dyn InvoiceRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Create and persist a new draft invoice.
    ///
    /// Values are assumed pre-validated by the caller; this cannot fail
    /// validation-wise.
    pub async fn create_invoice(
        &self,
        customer_name: String,
        customer_email: String,
    ) -> ServiceResult<InvoiceDto> {
        let invoice = Invoice::create(InvoiceId::new(), customer_name, customer_email);
        self.repository.save(&invoice).await?;
        Ok(InvoiceDto::from(&invoice))
    }

    pub async fn get_invoice(&self, id: InvoiceId) -> ServiceResult<Option<InvoiceDto>> {
        let invoice = self.repository.find_by_id(id).await?;
        Ok(invoice.as_ref().map(InvoiceDto::from))
    }

    pub async fn get_all_invoices(&self) -> ServiceResult<Vec<InvoiceDto>> {
        let invoices = self.repository.find_all().await?;
        Ok(invoices.iter().map(InvoiceDto::from).collect())
    }

    /// Append a freshly constructed product line to an existing invoice.
    ///
    /// Line construction may fail with a product-line error, in which case
    /// nothing is persisted.
    pub async fn add_product_line(
        &self,
        invoice_id: InvoiceId,
        name: String,
        quantity: i64,
        unit_price: i64,
    ) -> ServiceResult<Option<InvoiceDto>> {
        let Some(mut invoice) = self.repository.find_by_id(invoice_id).await? else {
            return Ok(None);
        };

        let product_line = ProductLine::new(ProductLineId::new(), name, quantity, unit_price)?;
        invoice.add_product_line(product_line);

        self.repository.save(&invoice).await?;
        Ok(Some(InvoiceDto::from(&invoice)))
    }

    /// Dispatch the invoice to the customer.
    ///
    /// On a successful transition the order is: mutate → notify → persist.
    /// Notification failure semantics are the notification boundary's
    /// concern, not this core's.
    pub async fn send_invoice(&self, id: InvoiceId) -> ServiceResult<Option<InvoiceDto>> {
        let Some(mut invoice) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        invoice.send()?;

        self.notifier
            .notify(&NotifyData {
                resource_id: (*invoice.id()).into(),
                to_email: invoice.customer_email().to_string(),
                subject: format!("Invoice #{}", invoice.id()),
                message: format!(
                    "Dear {}, your invoice has been sent.",
                    invoice.customer_name()
                ),
            })
            .await;

        self.repository.save(&invoice).await?;
        Ok(Some(InvoiceDto::from(&invoice)))
    }

    /// Confirm delivery of the invoice.
    ///
    /// Invoked exclusively by the external delivery-confirmation event, never
    /// directly by an end user.
    pub async fn mark_as_sent_to_client(&self, id: InvoiceId) -> ServiceResult<Option<InvoiceDto>> {
        let Some(mut invoice) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        invoice.mark_as_sent_to_client()?;

        self.repository.save(&invoice).await?;
        Ok(Some(InvoiceDto::from(&invoice)))
    }
}
