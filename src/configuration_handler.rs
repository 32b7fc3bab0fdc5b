use crate::configuration::Configuration;
use clap::Parser;

/// Process configuration from CLI flags, falling back to the environment
/// (`PORT`, `ADMIN_PASSWORD`, `DATABASE_URL`; `.env` files are honored by
/// `main`).
#[derive(Debug, Clone, Parser)]
#[command(name = "salon_booking", about = "Appointment booking service")]
pub struct ConfigurationHandler {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Shared secret expected in the x-admin-password header
    #[arg(long)]
    admin_password: Option<String>,

    /// PostgreSQL connection URL; appointments stay in memory when unset
    #[arg(long)]
    database_url: Option<String>,
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> u16 {
        self.port
            .or_else(|| std::env::var("PORT").ok().and_then(|value| value.parse().ok()))
            .unwrap_or(3000)
    }

    fn admin_password(&self) -> String {
        self.admin_password
            .clone()
            .or_else(|| std::env::var("ADMIN_PASSWORD").ok())
            .unwrap_or_else(|| "123".into())
    }

    fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }
}
