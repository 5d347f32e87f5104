use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::appointment_service::AppointmentService;
use crate::backend::BookingBackend;
use crate::configuration::{Args, Configuration};
use crate::database_store::DatabaseStore;
use crate::http::start_server;
use crate::local_store::LocalStore;
use crate::notification_service::NotificationService;

mod appointment_service;
mod availability;
mod backend;
mod configuration;
mod database_store;
mod error;
mod http;
mod local_store;
mod notification_service;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
struct AppState<B: BookingBackend> {
    appointments: AppointmentService<B>,
    notifications: NotificationService<B>,
    admin_password: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Configuration::load(Args::parse());
    let listener = TcpListener::bind(("127.0.0.1", config.port))
        .await
        .unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());

    match config.database_url.clone() {
        Some(url) => {
            let store = DatabaseStore::new(&url).expect("failed to connect to the database");
            serve(store, config, listener).await;
        }
        None => {
            tracing::info!("no database configured, using the in-memory store");
            serve(LocalStore::default(), config, listener).await;
        }
    }
}

async fn serve<B: BookingBackend>(store: B, config: Configuration, listener: TcpListener) {
    let state = AppState {
        appointments: AppointmentService::new(store.clone()),
        notifications: NotificationService::new(store),
        admin_password: config.admin_password,
    };
    start_server(state, listener).await;
}
