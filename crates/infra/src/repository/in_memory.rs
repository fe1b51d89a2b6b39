use std::sync::RwLock;

use async_trait::async_trait;

use clearbill_core::{Entity, InvoiceId};
use clearbill_invoicing::{Invoice, InvoiceRepository, RepositoryError};

/// In-memory invoice store.
///
/// Intended for tests/dev. Keeps invoices in insertion order; `save` replaces
/// the stored aggregate wholesale, so the header and its full line set are
/// always visible together. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceRepository {
    invoices: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn save(&self, invoice: &Invoice) -> Result<(), RepositoryError> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;

        match invoices.iter_mut().find(|stored| stored.id() == invoice.id()) {
            Some(stored) => *stored = invoice.clone(),
            None => invoices.push(invoice.clone()),
        }

        Ok(())
    }

    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        let invoices = self
            .invoices
            .read()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;

        Ok(invoices.iter().find(|stored| *stored.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError> {
        let invoices = self
            .invoices
            .read()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;

        Ok(invoices.clone())
    }
}
