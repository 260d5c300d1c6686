use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Counter, Payment};

use super::WriteOutcome;

/// A reading may only be overwritten once the most recent payment is at
/// least this old.
const UPDATE_COOLDOWN_DAYS: i64 = 2;

/// Outcome of `update_payment`. Rejection by the cooldown policy is a
/// normal result, distinguishable from an applied update but not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentUpdate {
    Updated(u64),
    TooRecent,
}

/// Store for the utility-meter variant: the `counter` and `payment`
/// tables. Every public operation runs in one transaction and either
/// fully commits or fully fails.
#[derive(Clone)]
pub struct CounterStore {
    pool: SqlitePool,
}

impl CounterStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the schema and inserts the fixture rows. Idempotent: the
    /// seed is skipped when counters already exist.
    pub async fn init(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS counter (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                number INTEGER NOT NULL
            )",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS payment (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                id_counter INTEGER NOT NULL,
                counter_reading INTEGER NOT NULL,
                last_update TEXT NOT NULL
            )",
        )
        .execute(&mut *tx)
        .await?;

        let counters: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM counter")
            .fetch_one(&mut *tx)
            .await?;
        if counters == 0 {
            sqlx::query("INSERT INTO counter (name, number) VALUES (?1, ?2)")
                .bind("name")
                .bind(12345_i64)
                .execute(&mut *tx)
                .await?;
            sqlx::query("INSERT INTO counter (name, number) VALUES (?1, ?2)")
                .bind("asdf")
                .bind(623475_i64)
                .execute(&mut *tx)
                .await?;
            sqlx::query(
                "INSERT INTO payment (id_counter, counter_reading, last_update)
                 VALUES (?1, ?2, ?3)",
            )
            .bind(12_i64)
            .bind(15_i64)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("counter schema ready");
        Ok(())
    }

    pub async fn counters(&self) -> Result<Vec<Counter>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query_as::<_, Counter>(
            "SELECT id, name, number FROM counter ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(rows)
    }

    /// All payments recorded against `counter_id`. Orphans left behind by
    /// a deleted counter are still returned here.
    pub async fn payments(&self, counter_id: i64) -> Result<Vec<Payment>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query_as::<_, Payment>(
            "SELECT id, id_counter, counter_reading, last_update
             FROM payment WHERE id_counter = ?1 ORDER BY id",
        )
        .bind(counter_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(rows)
    }

    /// Records a new reading unconditionally and returns the new row id.
    pub async fn add_payment(&self, counter_id: i64, reading: i64) -> Result<i64, sqlx::Error> {
        self.add_payment_at(counter_id, reading, Utc::now()).await
    }

    pub async fn add_payment_at(
        &self,
        counter_id: i64,
        reading: i64,
        at: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query(
            "INSERT INTO payment (id_counter, counter_reading, last_update)
             VALUES (?1, ?2, ?3)",
        )
        .bind(counter_id)
        .bind(reading)
        .bind(at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        tx.commit().await?;
        info!(payment_id = id, counter_id, "payment recorded");
        Ok(id)
    }

    /// Overwrites the reading on every payment of `counter_id`, gated by
    /// the cooldown: the write only proceeds when the newest payment row
    /// in the whole table (by id, across ALL counters) is more than
    /// `UPDATE_COOLDOWN_DAYS` old. The global scope mirrors the original
    /// system and is kept on purpose; see DESIGN.md.
    pub async fn update_payment(
        &self,
        counter_id: i64,
        reading: i64,
    ) -> Result<PaymentUpdate, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let last: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT last_update FROM payment ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;

        let cutoff = Utc::now() - Duration::days(UPDATE_COOLDOWN_DAYS);
        if !last.map_or(true, |t| t < cutoff) {
            tx.commit().await?;
            info!(counter_id, "payment not updated, last reading too recent");
            return Ok(PaymentUpdate::TooRecent);
        }

        let rows = sqlx::query(
            "UPDATE payment SET counter_reading = ?1, last_update = ?2
             WHERE id_counter = ?3",
        )
        .bind(reading)
        .bind(Utc::now())
        .bind(counter_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        info!(counter_id, rows, "payment updated");
        Ok(PaymentUpdate::Updated(rows))
    }

    /// Removes the counter row only. Payments referencing it are NOT
    /// cascaded and stay queryable under the old counter id.
    pub async fn delete_counter(&self, counter_id: i64) -> Result<WriteOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query("DELETE FROM counter WHERE id = ?1")
            .bind(counter_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        info!(counter_id, rows, "counter deleted");
        Ok(WriteOutcome::from_rows(rows))
    }
}
