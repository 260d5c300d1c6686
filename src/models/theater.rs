use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One show. `places` is the advertised seat capacity; actual seats are
/// `Place` rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Performance {
    pub id: i64,
    #[serde(rename = "name")]
    pub performance_name: String,
    #[serde(rename = "date")]
    pub performance_date: DateTime<Utc>,
    pub places: i64,
}

/// One seat. `place_date` doubles as the reservation flag: NULL means the
/// seat is free, non-NULL is the moment it was reserved. `buy` is seeded
/// false and no exposed operation ever sets it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: i64,
    pub price: i64,
    pub id_performance: i64,
    pub place_date: Option<DateTime<Utc>>,
    pub buy: bool,
}

/// Row shape of the places listing: seat id joined with the name of its
/// performance.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlaceListing {
    pub id: i64,
    pub performance_name: String,
}
