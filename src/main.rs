use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use kassa_server::config::{Config, ServiceKind};
use kassa_server::routes::{theater_routes, utility_routes};
use kassa_server::store::{self, CounterStore, ReservationStore};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let pool = store::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    let app: Router = match config.service {
        ServiceKind::Utility => {
            let store = CounterStore::new(pool);
            store.init().await.expect("Failed to initialize schema");
            utility_routes(store)
        }
        ServiceKind::Theater => {
            let store = ReservationStore::new(pool);
            store.init().await.expect("Failed to initialize schema");
            theater_routes(store)
        }
    };

    tracing::info!("Schema created and seed data inserted");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 {} service running at http://{}", config.service, addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
