//! Delivery channel drivers.

use async_trait::async_trait;

/// A concrete delivery channel (SMTP relay, transactional-mail API, ...).
///
/// `reference` identifies the resource the message is about; the external
/// channel echoes it back on its delivery-confirmation callback.
#[async_trait]
pub trait NotificationDriver: Send + Sync {
    /// Returns whether the channel accepted the message for delivery.
    async fn send(&self, to_email: &str, subject: &str, message: &str, reference: &str) -> bool;
}

/// Driver that accepts everything without delivering anything.
///
/// Used in dev and tests; the send is only logged.
#[derive(Debug, Default)]
pub struct DummyDriver;

impl DummyDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDriver for DummyDriver {
    async fn send(&self, to_email: &str, subject: &str, _message: &str, reference: &str) -> bool {
        tracing::info!(to_email, subject, reference, "dummy driver accepted notification");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dummy_driver_always_accepts() {
        let driver = DummyDriver::new();
        let accepted = driver
            .send("jane@example.com", "Invoice #1", "hello", "ref-1")
            .await;
        assert!(accepted);
    }
}
