//! Surface configuration

use serde::{Deserialize, Serialize};

use oriel_session::{SessionLimits, DEFAULT_PANE_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ceiling on the number of open panes
    pub max_panes: usize,
    /// Depth of the closed-pane history
    pub max_closed: usize,
    /// URL seeded into the initial pane and on every reset
    pub default_url: String,
}

impl Config {
    pub fn limits(&self) -> SessionLimits {
        SessionLimits {
            max_panes: self.max_panes,
            max_closed: self.max_closed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let limits = SessionLimits::default();
        Self {
            max_panes: limits.max_panes,
            max_closed: limits.max_closed,
            default_url: DEFAULT_PANE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_closed, 20);
        assert_eq!(config.default_url, "about:blank");
        assert_eq!(config.limits().max_panes, config.max_panes);
    }
}
