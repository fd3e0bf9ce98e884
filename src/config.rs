//! Dispatcher settings
//!
//! Loading configuration files is a host concern; the struct derives
//! `Deserialize` so hosts can source it from whatever format they use.

use serde::Deserialize;

/// Settings for a [`Dispatcher`](crate::dispatch::Dispatcher)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Invocation prefix a message must start with to be considered a command
    pub prefix: String,

    /// Worker pool size; defaults to the host's available parallelism
    pub workers: Option<usize>,
}

impl DispatcherConfig {
    /// Create a config with the given prefix and default worker count
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            workers: None,
        }
    }

    /// Effective worker pool size
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
            workers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_is_bang() {
        let config = DispatcherConfig::default();
        assert_eq!(config.prefix, "!");
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: DispatcherConfig = serde_json::from_str(r#"{"prefix": "?"}"#).unwrap();
        assert_eq!(config.prefix, "?");
        assert_eq!(config.workers, None);
    }

    #[test]
    fn explicit_worker_count_wins() {
        let config: DispatcherConfig =
            serde_json::from_str(r#"{"prefix": "!", "workers": 2}"#).unwrap();
        assert_eq!(config.worker_count(), 2);
    }
}
