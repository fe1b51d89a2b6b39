//! Outbound notification port and its driver-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::driver::NotificationDriver;

/// Everything a notification needs: target resource, destination, content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyData {
    pub resource_id: Uuid,
    pub to_email: String,
    pub subject: String,
    pub message: String,
}

/// Port for dispatching a notification, fire-and-forget from the caller's
/// perspective: failures stay inside the notification boundary.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, data: &NotifyData);
}

/// [`Notifier`] implementation that hands messages to a delivery driver.
pub struct NotificationFacade {
    driver: Arc<dyn NotificationDriver>,
}

impl NotificationFacade {
    pub fn new(driver: Arc<dyn NotificationDriver>) -> Self {
        Self { driver }
    }
}

#[async_trait]
impl Notifier for NotificationFacade {
    async fn notify(&self, data: &NotifyData) {
        let reference = data.resource_id.to_string();
        let accepted = self
            .driver
            .send(&data.to_email, &data.subject, &data.message, &reference)
            .await;

        if !accepted {
            tracing::warn!(
                resource_id = %data.resource_id,
                to_email = %data.to_email,
                "delivery channel rejected notification"
            );
        }
    }
}
