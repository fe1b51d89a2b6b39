//! Notifications module.
//!
//! Outbound side: the [`Notifier`] port dispatches "you have an invoice"
//! messages through a pluggable [`NotificationDriver`]. Inbound side: the
//! external delivery channel confirms receipt through
//! [`NotificationService::delivered`], which fans out to registered
//! [`DeliveryListener`]s. The two sides form an at-least-two-step handshake:
//! "we attempted delivery" and "delivery confirmed" are never conflated.

pub mod driver;
pub mod facade;
pub mod service;

pub use driver::{DummyDriver, NotificationDriver};
pub use facade::{NotificationFacade, Notifier, NotifyData};
pub use service::{DeliveryListener, NotificationService};
