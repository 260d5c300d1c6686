use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One physical utility meter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Counter {
    pub id: i64,
    pub name: String,
    pub number: i64,
}

/// One recorded reading event for a counter. `id_counter` is a logical
/// reference only; no foreign key is declared, so payments can outlive
/// their counter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub id_counter: i64,
    pub counter_reading: i64,
    pub last_update: DateTime<Utc>,
}
