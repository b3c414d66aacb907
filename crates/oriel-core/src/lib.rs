//! Oriel Core
//!
//! Coordination layer for the pane session manager. Rust owns the pane
//! state; the rendering surface is a stateless consumer of session
//! snapshots.

mod config;

pub use config::Config;

// Re-export core components
pub use oriel_panes::{ClosedHistory, ClosedPane, OpenRequest, Pane, PaneUpdate};
pub use oriel_session::{
    PaneSession, SessionError, SessionLimits, SessionManager, DEFAULT_PANE_URL,
};

pub type Result<T> = std::result::Result<T, SessionError>;

/// Build a session manager from a configuration.
pub fn session_manager(config: &Config) -> SessionManager {
    SessionManager::with_default_url(config.limits(), config.default_url.clone())
}

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_manager_from_config() {
        let config = Config {
            max_panes: 4,
            max_closed: 2,
            default_url: "https://start.example".to_string(),
        };
        let manager = session_manager(&config);

        assert_eq!(manager.panes().len(), 1);
        assert_eq!(manager.panes()[0].url, "https://start.example");
        assert_eq!(manager.snapshot().limits().max_panes, 4);
    }
}
