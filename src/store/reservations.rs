use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Performance, Place, PlaceListing};

use super::WriteOutcome;

/// Store for the theater variant: the `performance` and `place` tables.
/// A seat is reserved exactly when its `place_date` is non-NULL; the
/// conditional updates below are the whole state machine.
#[derive(Clone)]
pub struct ReservationStore {
    pool: SqlitePool,
}

impl ReservationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the schema and inserts the fixture rows. Idempotent: the
    /// seed is skipped when a performance already exists.
    pub async fn init(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS performance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                performance_name TEXT NOT NULL,
                performance_date TEXT NOT NULL,
                places INTEGER NOT NULL
            )",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS place (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                price INTEGER NOT NULL,
                id_performance INTEGER NOT NULL,
                place_date TEXT,
                buy BOOLEAN NOT NULL
            )",
        )
        .execute(&mut *tx)
        .await?;

        let performances: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM performance")
            .fetch_one(&mut *tx)
            .await?;
        if performances == 0 {
            sqlx::query(
                "INSERT INTO performance (performance_name, performance_date, places)
                 VALUES (?1, ?2, ?3)",
            )
            .bind("Ololoev Ololo")
            .bind(Utc::now())
            .bind(100_i64)
            .execute(&mut *tx)
            .await?;
            // The seeded seat starts out reserved.
            sqlx::query(
                "INSERT INTO place (price, id_performance, place_date, buy)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(100_i64)
            .bind(1_i64)
            .bind(Utc::now())
            .bind(false)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("theater schema ready");
        Ok(())
    }

    pub async fn performances(&self) -> Result<Vec<Performance>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query_as::<_, Performance>(
            "SELECT id, performance_name, performance_date, places
             FROM performance ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(rows)
    }

    /// All seats of one performance, each carrying the performance name.
    /// An unknown performance id yields an empty listing, not an error.
    pub async fn places(&self, performance_id: i64) -> Result<Vec<PlaceListing>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query_as::<_, PlaceListing>(
            "SELECT place.id AS id, performance.performance_name AS performance_name
             FROM place
             JOIN performance ON performance.id = place.id_performance
             WHERE place.id_performance = ?1
             ORDER BY place.id",
        )
        .bind(performance_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(rows)
    }

    /// Price of the seat matching both ids, or None when no such seat
    /// exists.
    pub async fn place_price(
        &self,
        performance_id: i64,
        place_id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let place = sqlx::query_as::<_, Place>(
            "SELECT id, price, id_performance, place_date, buy
             FROM place WHERE id_performance = ?1 AND id = ?2",
        )
        .bind(performance_id)
        .bind(place_id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(place.map(|p| p.price))
    }

    /// Unreserved -> Reserved. The predicate requires the seat to belong
    /// to the performance, be free and not bought; anything else leaves
    /// the table untouched and reports a no-op.
    pub async fn reserve(
        &self,
        performance_id: i64,
        place_id: i64,
    ) -> Result<WriteOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(
            "UPDATE place SET place_date = ?1
             WHERE id_performance = ?2 AND id = ?3
               AND place_date IS NULL AND buy = ?4",
        )
        .bind(Utc::now())
        .bind(performance_id)
        .bind(place_id)
        .bind(false)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        tx.commit().await?;
        info!(performance_id, place_id, rows, "reserve place");
        Ok(WriteOutcome::from_rows(rows))
    }

    /// Reserved -> Unreserved. No-op when the seat is not currently
    /// reserved or does not belong to the performance.
    pub async fn cancel(
        &self,
        performance_id: i64,
        place_id: i64,
    ) -> Result<WriteOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(
            "UPDATE place SET place_date = NULL
             WHERE id_performance = ?1 AND id = ?2 AND place_date IS NOT NULL",
        )
        .bind(performance_id)
        .bind(place_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        tx.commit().await?;
        info!(performance_id, place_id, rows, "cancel reservation");
        Ok(WriteOutcome::from_rows(rows))
    }

    /// Moves a reservation from one seat to another inside a single
    /// transaction: release the old seat (only if reserved), then take
    /// the new one (only if free). Each half can no-op independently.
    /// Nothing checks that both seats belong to the same performance.
    pub async fn swap(
        &self,
        old_place_id: i64,
        new_place_id: i64,
    ) -> Result<(WriteOutcome, WriteOutcome), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let released = sqlx::query(
            "UPDATE place SET place_date = NULL
             WHERE id = ?1 AND place_date IS NOT NULL",
        )
        .bind(old_place_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let taken = sqlx::query(
            "UPDATE place SET place_date = ?1
             WHERE id = ?2 AND place_date IS NULL",
        )
        .bind(Utc::now())
        .bind(new_place_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        info!(old_place_id, new_place_id, released, taken, "swap place");
        Ok((
            WriteOutcome::from_rows(released),
            WriteOutcome::from_rows(taken),
        ))
    }
}
