//! Repository port for durable invoice storage.

use async_trait::async_trait;
use thiserror::Error;

use clearbill_core::InvoiceId;

use crate::invoice::Invoice;

/// Infrastructure-level storage failure.
///
/// Not a domain concept: these propagate to the boundary unmodified and map
/// to a generic failure response there.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store failed (connection, query, transaction).
    #[error("storage failure: {0}")]
    Storage(String),

    /// Stored state could not be mapped back to a domain entity.
    #[error("corrupt stored state: {0}")]
    Corrupt(String),
}

impl RepositoryError {
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage(reason.into())
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt(reason.into())
    }
}

/// Port for durable invoice storage, implemented by the surrounding
/// infrastructure.
///
/// `save` is an idempotent upsert keyed by invoice id, replacing the entire
/// line collection, and is atomic with respect to the invoice header and its
/// full line set (no partial writes visible to subsequent reads). Concurrent
/// saves against the same id are not coordinated here: last save wins.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn save(&self, invoice: &Invoice) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, RepositoryError>;

    /// All stored invoices, in storage order (not otherwise guaranteed).
    async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError>;
}
