use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::models::{Counter, Payment};
use crate::store::counters::PaymentUpdate;
use crate::store::{CounterStore, WriteOutcome};
use crate::utils::error::AppError;
use crate::utils::response::{empty_success, success};

#[derive(Serialize)]
struct CountersBody {
    counters: Vec<Counter>,
}

#[derive(Serialize)]
struct PaymentsBody {
    payments: Vec<Payment>,
}

#[derive(Serialize)]
struct NewPaymentBody {
    id: i64,
}

pub async fn test() -> &'static str {
    info!("test query");
    "Hello World!"
}

pub async fn list_counters(State(store): State<CounterStore>) -> Result<Response, AppError> {
    let counters = store.counters().await?;
    Ok(Json(CountersBody { counters }).into_response())
}

pub async fn list_payments(
    State(store): State<CounterStore>,
    Path(counter): Path<i64>,
) -> Result<Response, AppError> {
    let payments = store.payments(counter).await?;
    Ok(Json(PaymentsBody { payments }).into_response())
}

pub async fn delete_counter(
    State(store): State<CounterStore>,
    Path(counter): Path<i64>,
) -> Result<Response, AppError> {
    match store.delete_counter(counter).await? {
        WriteOutcome::Applied(_) => Ok(empty_success("Counter deleted").into_response()),
        WriteOutcome::NoOp => Err(AppError::NotFound(format!(
            "Counter with id '{counter}' was not found"
        ))),
    }
}

pub async fn add_payment(
    State(store): State<CounterStore>,
    Path((counter, data_payment)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let id = store.add_payment(counter, data_payment).await?;
    Ok(success(NewPaymentBody { id }, "Payment recorded").into_response())
}

pub async fn update_payment(
    State(store): State<CounterStore>,
    Path((counter, data_payment)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    match store.update_payment(counter, data_payment).await? {
        PaymentUpdate::Updated(_) => Ok(empty_success("Payment updated").into_response()),
        PaymentUpdate::TooRecent => Ok(empty_success(
            "Payment not updated: last reading is too recent",
        )
        .into_response()),
    }
}
