use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use clearbill_core::InvoiceId;
use clearbill_infra::{InMemoryInvoiceRepository, PostgresInvoiceRepository};
use clearbill_invoicing::{InvoiceRepository, InvoiceService};
use clearbill_notifications::{
    DeliveryListener, DummyDriver, NotificationFacade, NotificationService, Notifier,
};

/// Everything the route handlers need, wired once at startup.
pub struct AppServices {
    pub invoices: Arc<InvoiceService>,
    pub notifications: Arc<NotificationService>,
}

/// Wire repository, notifier, orchestrator, and the delivery-confirmation
/// path.
///
/// Storage is selected by environment: `DATABASE_URL` set → Postgres,
/// otherwise the in-memory store (dev/test).
pub async fn build_services() -> AppServices {
    let repository: Arc<dyn InvoiceRepository> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&url)
                .await
                .expect("failed to connect to postgres");
            Arc::new(PostgresInvoiceRepository::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory invoice store");
            Arc::new(InMemoryInvoiceRepository::new())
        }
    };

    let notifier: Arc<dyn Notifier> =
        Arc::new(NotificationFacade::new(Arc::new(DummyDriver::new())));
    let invoices = Arc::new(InvoiceService::new(repository, notifier));

    let mut notifications = NotificationService::new();
    notifications.register(Arc::new(InvoiceDeliveryListener {
        invoices: invoices.clone(),
    }));

    AppServices {
        invoices,
        notifications: Arc::new(notifications),
    }
}

/// Confirms delivery on the addressed invoice when the external channel
/// reports it.
struct InvoiceDeliveryListener {
    invoices: Arc<InvoiceService>,
}

#[async_trait]
impl DeliveryListener for InvoiceDeliveryListener {
    async fn resource_delivered(&self, resource_id: Uuid) {
        match self
            .invoices
            .mark_as_sent_to_client(InvoiceId::from_uuid(resource_id))
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::debug!(%resource_id, "delivery confirmation for unknown invoice");
            }
            Err(err) => {
                tracing::warn!(%resource_id, error = %err, "delivery confirmation not applied");
            }
        }
    }
}
