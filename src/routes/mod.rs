use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{counters, theater};
use crate::store::{CounterStore, ReservationStore};

pub fn utility_routes(store: CounterStore) -> Router {
    Router::new()
        .route("/test", get(counters::test))
        .route("/counters", get(counters::list_counters))
        .route(
            "/counters/:counter",
            get(counters::list_payments).delete(counters::delete_counter),
        )
        .route(
            "/counters/:counter/:data_payment",
            post(counters::add_payment).put(counters::update_payment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub fn theater_routes(store: ReservationStore) -> Router {
    Router::new()
        .route("/performances", get(theater::list_performances))
        .route("/places/:perform_id", get(theater::list_places))
        .route("/place/:perform_id/:place_id", get(theater::place_price))
        // PUT shares the path pattern; its params are old/new place ids.
        .route(
            "/performance/:perform_id/:place_id",
            post(theater::reserve)
                .delete(theater::cancel)
                .put(theater::swap),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
