use crate::backend::AppointmentBackend;
use crate::booking::BookingManager;
use crate::catalog::ServiceCatalog;
use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::database_interface::DatabaseInterface;
use crate::http::start_server;
use crate::local_appointments::LocalAppointments;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod booking;
mod catalog;
mod configuration;
mod configuration_handler;
mod database_interface;
mod error;
mod http;
mod local_appointments;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
pub struct AppState<T: AppointmentBackend> {
    pub booking_manager: BookingManager<T>,
    pub admin_password: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("salon_booking=info")),
        )
        .init();

    let configuration = ConfigurationHandler::parse();
    let catalog = ServiceCatalog::builtin();

    match configuration.database_url() {
        Some(database_url) => {
            let backend = DatabaseInterface::new(&database_url)
                .expect("failed to connect to the appointment database");
            tracing::info!("using the PostgreSQL appointment backend");
            serve(backend, catalog, configuration).await;
        }
        None => {
            tracing::info!("no database configured, keeping appointments in memory");
            serve(LocalAppointments::default(), catalog, configuration).await;
        }
    }
}

async fn serve<T: AppointmentBackend, C: Configuration>(
    backend: T,
    catalog: ServiceCatalog,
    configuration: C,
) {
    let state = AppState {
        booking_manager: BookingManager::new(backend, catalog),
        admin_password: configuration.admin_password(),
    };
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", configuration.port()))
        .await
        .unwrap();
    start_server(state, listener).await;
}
