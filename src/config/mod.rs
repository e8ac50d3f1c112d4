use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Seconds between SSE keep-alive comment frames.
    pub sse_keepalive_secs: u64,
    /// Capacity of the in-process notification channel.
    pub bus_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            sse_keepalive_secs: env::var("SSE_KEEPALIVE_SECS")
                .unwrap_or_else(|_| "15".into())
                .parse()
                .unwrap_or(15),
            bus_capacity: env::var("BUS_CAPACITY")
                .unwrap_or_else(|_| "256".into())
                .parse()
                .unwrap_or(256),
        })
    }
}
