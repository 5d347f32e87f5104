use clap::Parser;
use std::env;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "cleaning_booking",
    about = "Appointment booking service for domestic cleaning"
)]
pub struct Args {
    /// Port to listen on; falls back to PORT, then 3000
    #[arg(long)]
    pub port: Option<u16>,

    /// PostgreSQL connection string; falls back to DATABASE_URL. Without
    /// either, the in-memory store is used.
    #[arg(long)]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Configuration {
    pub port: u16,
    pub database_url: Option<String>,
    pub admin_password: String,
}

impl Configuration {
    /// Command-line arguments win over environment variables; `.env` has
    /// been loaded into the environment before this runs.
    pub fn load(args: Args) -> Self {
        let port = args
            .port
            .or_else(|| env::var("PORT").ok().and_then(|port| port.parse().ok()))
            .unwrap_or(3000);
        let database_url = args.database_url.or_else(|| env::var("DATABASE_URL").ok());
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123".into());
        Self {
            port,
            database_url,
            admin_password,
        }
    }
}
