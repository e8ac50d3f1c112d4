pub mod broadcast;
pub mod confirmations;
pub mod consumers;
pub mod health;
pub mod metrics;
pub mod strategies;
pub mod stream;
