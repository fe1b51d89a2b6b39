//! Inbound delivery-confirmation dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

/// Listener for delivery confirmations from the external channel.
#[async_trait]
pub trait DeliveryListener: Send + Sync {
    async fn resource_delivered(&self, resource_id: Uuid);
}

/// Fans a delivery confirmation out to every registered listener.
///
/// The confirmation arrives asynchronously from the external delivery system
/// at an unspecified time after the original send; listeners decide what the
/// confirmation means for their own resource.
#[derive(Default)]
pub struct NotificationService {
    listeners: Vec<Arc<dyn DeliveryListener>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn DeliveryListener>) {
        self.listeners.push(listener);
    }

    pub async fn delivered(&self, reference: Uuid) {
        tracing::debug!(%reference, "delivery confirmation received");
        for listener in &self.listeners {
            listener.resource_delivered(reference).await;
        }
    }
}
