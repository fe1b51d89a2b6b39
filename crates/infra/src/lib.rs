//! Infrastructure layer: repository adapters for the invoicing core.

pub mod repository;

pub use repository::{InMemoryInvoiceRepository, PostgresInvoiceRepository};
