use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub mod counters;
pub mod reservations;

pub use counters::CounterStore;
pub use reservations::ReservationStore;

/// Opens the process-local database. The pool is capped at a single
/// connection so that every request sees the same in-memory instance;
/// sqlite itself serializes the transactions. The connection is also
/// pinned for the life of the process: the pool's default idle and
/// lifetime limits would eventually retire it, and closing the last
/// connection to an in-memory database drops the database with it.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(database_url)
        .await
}

/// Result of a conditional write: either some rows changed, or the
/// predicate matched nothing and the statement did not touch the table.
/// A no-op is not an error; callers decide how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied(u64),
    NoOp,
}

impl WriteOutcome {
    pub fn from_rows(rows: u64) -> Self {
        if rows == 0 {
            WriteOutcome::NoOp
        } else {
            WriteOutcome::Applied(rows)
        }
    }

    pub fn applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied(_))
    }
}
