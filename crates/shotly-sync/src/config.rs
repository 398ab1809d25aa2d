//! Sync service configuration loaded from environment variables.

use shotly_shared::constants::{ACTIVITY_NAMESPACE, DEFAULT_SYNC_URL};

/// Configuration for the sync client task.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the hosted sync service.
    /// Env: `SHOTLY_SYNC_URL`
    /// Default: `https://sync.shotly.app`
    pub base_url: String,

    /// Application id assigned by the sync service.
    /// Env: `SHOTLY_SYNC_APP_ID`
    /// Default: `shotly-dev` (development only).
    pub app_id: String,

    /// Collection namespace holding activity records.
    pub namespace: String,

    /// Seconds to wait before re-establishing a lost subscription.
    pub resubscribe_delay_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SYNC_URL.to_string(),
            app_id: "shotly-dev".to_string(),
            namespace: ACTIVITY_NAMESPACE.to_string(),
            resubscribe_delay_secs: 3,
        }
    }
}

impl SyncConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SHOTLY_SYNC_URL") {
            if !url.is_empty() {
                config.base_url = url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(app_id) = std::env::var("SHOTLY_SYNC_APP_ID") {
            if !app_id.is_empty() {
                config.app_id = app_id;
            }
        }

        config
    }

    /// URL of the append endpoint.
    pub fn append_url(&self) -> String {
        format!(
            "{}/apps/{}/{}",
            self.base_url, self.app_id, self.namespace
        )
    }

    /// URL of the push-subscription endpoint.
    pub fn subscribe_url(&self) -> String {
        format!(
            "{}/apps/{}/{}/subscribe",
            self.base_url, self.app_id, self.namespace
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls() {
        let config = SyncConfig {
            base_url: "https://sync.test".to_string(),
            app_id: "app1".to_string(),
            ..SyncConfig::default()
        };
        assert_eq!(config.append_url(), "https://sync.test/apps/app1/activities");
        assert_eq!(
            config.subscribe_url(),
            "https://sync.test/apps/app1/activities/subscribe"
        );
    }
}
