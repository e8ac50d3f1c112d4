pub mod api;
pub mod bus;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;

use crate::bus::NotificationBus;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub bus: NotificationBus,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
