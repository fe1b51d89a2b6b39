//! Postgres-backed invoice repository.
//!
//! Expected schema (managed outside this crate):
//!
//! | table                   | columns                                                              |
//! |-------------------------|----------------------------------------------------------------------|
//! | `invoices`              | `id uuid pk`, `customer_name text`, `customer_email text`, `status text`, `created_at timestamptz`, `updated_at timestamptz` |
//! | `invoice_product_lines` | `id uuid pk`, `invoice_id uuid`, `name text`, `quantity bigint`, `price bigint`, `position int` |
//!
//! `save` runs in a single transaction: upsert the header, then delete and
//! reinsert the full line set. `position` records insertion order so reads
//! return lines in display order. Rows that no longer satisfy construction
//! invariants still load (via the non-validating restore constructors); the
//! aggregate's own guards reject them at send time. An unknown status tag is
//! a mapping failure, surfaced as `RepositoryError::Corrupt`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use clearbill_core::{Entity, InvoiceId, ProductLineId};
use clearbill_invoicing::{
    Invoice, InvoiceRepository, InvoiceStatus, ProductLine, RepositoryError,
};

/// Invoice repository persisting to PostgreSQL via a SQLx connection pool.
///
/// `Send + Sync`; the pool handles thread-safe connection management.
#[derive(Debug, Clone)]
pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.id()), err)]
    async fn save_invoice(&self, invoice: &Invoice) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        sqlx::query(
            r#"
            INSERT INTO invoices (id, customer_name, customer_email, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, now(), now())
            ON CONFLICT (id) DO UPDATE SET
                customer_name = EXCLUDED.customer_name,
                customer_email = EXCLUDED.customer_email,
                status = EXCLUDED.status,
                updated_at = now()
            "#,
        )
        .bind(invoice.id().as_uuid())
        .bind(invoice.customer_name())
        .bind(invoice.customer_email())
        .bind(invoice.status().as_str())
        .execute(&mut *tx)
        .await
        .map_err(storage)?;

        sqlx::query("DELETE FROM invoice_product_lines WHERE invoice_id = $1")
            .bind(invoice.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        for (position, line) in invoice.product_lines().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_product_lines (id, invoice_id, name, quantity, price, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(line.id().as_uuid())
            .bind(invoice.id().as_uuid())
            .bind(line.name())
            .bind(line.quantity())
            .bind(line.unit_price())
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        }

        tx.commit().await.map_err(storage)
    }

    #[instrument(skip(self), fields(invoice_id = %id), err)]
    async fn load_invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        let row = sqlx::query(
            "SELECT customer_name, customer_email, status FROM invoices WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let customer_name: String = row.try_get("customer_name").map_err(storage)?;
        let customer_email: String = row.try_get("customer_email").map_err(storage)?;
        let status = parse_status(&row)?;
        let lines = self.load_lines(id).await?;

        Ok(Some(Invoice::restore(
            id,
            customer_name,
            customer_email,
            status,
            lines,
        )))
    }

    #[instrument(skip(self), err)]
    async fn load_all_invoices(&self) -> Result<Vec<Invoice>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, customer_name, customer_email, status FROM invoices ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id").map_err(storage)?;
            let id = InvoiceId::from_uuid(id);
            let customer_name: String = row.try_get("customer_name").map_err(storage)?;
            let customer_email: String = row.try_get("customer_email").map_err(storage)?;
            let status = parse_status(&row)?;
            let lines = self.load_lines(id).await?;

            invoices.push(Invoice::restore(
                id,
                customer_name,
                customer_email,
                status,
                lines,
            ));
        }

        Ok(invoices)
    }

    async fn load_lines(&self, invoice_id: InvoiceId) -> Result<Vec<ProductLine>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, quantity, price
            FROM invoice_product_lines
            WHERE invoice_id = $1
            ORDER BY position
            "#,
        )
        .bind(invoice_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id").map_err(storage)?;
            let name: String = row.try_get("name").map_err(storage)?;
            let quantity: i64 = row.try_get("quantity").map_err(storage)?;
            let price: i64 = row.try_get("price").map_err(storage)?;

            lines.push(ProductLine::restore(
                ProductLineId::from_uuid(id),
                name,
                quantity,
                price,
            ));
        }

        Ok(lines)
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn save(&self, invoice: &Invoice) -> Result<(), RepositoryError> {
        self.save_invoice(invoice).await
    }

    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        self.load_invoice(id).await
    }

    async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError> {
        self.load_all_invoices().await
    }
}

fn storage(err: sqlx::Error) -> RepositoryError {
    RepositoryError::storage(err.to_string())
}

fn parse_status(row: &sqlx::postgres::PgRow) -> Result<InvoiceStatus, RepositoryError> {
    let tag: String = row.try_get("status").map_err(storage)?;
    InvoiceStatus::from_tag(&tag)
        .ok_or_else(|| RepositoryError::corrupt(format!("unknown invoice status '{tag}'")))
}
