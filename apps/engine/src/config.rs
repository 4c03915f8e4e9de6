//! Engine configuration.

use hanja_core::history::DEFAULT_HISTORY_SIZE;
use hanja_core::Grade;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::services::DEFAULT_CANDIDATE_LIMIT;

/// Tunables supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Database file. `None` uses the platform data directory.
    pub db_path: Option<PathBuf>,
    /// Cards drawn when a study session starts.
    pub initial_stack_size: usize,
    pub recent_window: usize,
    pub history_size: usize,
    /// Storage-side sample bound per related-word tier.
    pub related_candidate_limit: usize,
    pub default_grade: Grade,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            initial_stack_size: 50,
            recent_window: DEFAULT_HISTORY_SIZE,
            history_size: DEFAULT_HISTORY_SIZE,
            related_candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            default_grade: Grade::Eight,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing keys take their defaults.
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Configured path, or the platform default.
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(crate::get_db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.initial_stack_size, 50);
        assert_eq!(config.recent_window, 10);
        assert_eq!(config.history_size, 10);
        assert_eq!(config.related_candidate_limit, 15);
        assert_eq!(config.default_grade, Grade::Eight);
        assert!(config.resolved_db_path().ends_with("hanja-cards/hanja.db"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{"initial_stack_size": 20, "default_grade": 6}"#).unwrap();
        assert_eq!(config.initial_stack_size, 20);
        assert_eq!(config.default_grade, Grade::Six);
        assert_eq!(config.recent_window, 10);
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn rejects_invalid_grade() {
        assert!(EngineConfig::from_json_str(r#"{"default_grade": 9}"#).is_err());
    }
}
