//! Application state for API handlers

use crate::config::AuthConfig;
use std::sync::Arc;
use taskforge_engine::{CascadeEngine, Directory};
use taskforge_store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub store: Arc<dyn Store>,

    /// Cascade engine
    pub engine: Arc<CascadeEngine>,

    /// Record creation and maintenance
    pub directory: Arc<Directory>,

    /// Session configuration
    pub auth: Arc<AuthConfig>,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn Store>, auth: AuthConfig) -> Self {
        Self {
            engine: Arc::new(CascadeEngine::new(store.clone())),
            directory: Arc::new(Directory::new(store.clone())),
            store,
            auth: Arc::new(auth),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Uptime as a compact two-unit string, e.g. "3d4h" or "12m5s".
    pub fn uptime(&self) -> String {
        let mut secs = (chrono::Utc::now() - self.started_at).num_seconds().max(0);
        let days = secs / 86400;
        secs %= 86400;
        let hours = secs / 3600;
        secs %= 3600;
        let mins = secs / 60;
        secs %= 60;

        match (days, hours, mins) {
            (0, 0, 0) => format!("{}s", secs),
            (0, 0, _) => format!("{}m{}s", mins, secs),
            (0, _, _) => format!("{}h{}m", hours, mins),
            _ => format!("{}d{}h", days, hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use chrono::Duration;
    use taskforge_store::InMemoryStore;

    fn state_started_ago(ago: Duration) -> AppState {
        let mut state = AppState::new(Arc::new(InMemoryStore::new()), AuthConfig::default());
        state.started_at = chrono::Utc::now() - ago;
        state
    }

    #[test]
    fn test_uptime_picks_two_largest_units() {
        assert_eq!(state_started_ago(Duration::seconds(42)).uptime(), "42s");
        assert_eq!(
            state_started_ago(Duration::minutes(12) + Duration::seconds(5)).uptime(),
            "12m5s"
        );
        assert_eq!(
            state_started_ago(Duration::hours(2) + Duration::minutes(5)).uptime(),
            "2h5m"
        );
        assert_eq!(
            state_started_ago(Duration::days(3) + Duration::hours(4)).uptime(),
            "3d4h"
        );
    }
}
