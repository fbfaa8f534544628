use crate::config::Config;

/// Shared server state. The configuration is immutable for the process
/// lifetime, so handlers clone it freely into worker tasks.
pub struct AppState {
    pub config: Config,
}
