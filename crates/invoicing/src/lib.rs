//! Invoicing domain module.
//!
//! This crate contains the business rules for the invoice lifecycle
//! (draft → sending → sent-to-client), implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage), plus the two narrow ports the
//! orchestrator needs from the surrounding infrastructure: durable storage
//! and outbound notification.

pub mod dto;
pub mod invoice;
pub mod product_line;
pub mod repository;
pub mod service;

pub use dto::{InvoiceDto, ProductLineDto};
pub use invoice::{Invoice, InvoiceStatus};
pub use product_line::ProductLine;
pub use repository::{InvoiceRepository, RepositoryError};
pub use service::{InvoiceService, ServiceError, ServiceResult};
