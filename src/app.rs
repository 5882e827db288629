pub use configuration::*;
pub use startup::RelayApp;
pub use telemetry::setup_tracing;

mod configuration;
mod startup;
mod telemetry;
