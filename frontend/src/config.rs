use std::sync::OnceLock;

use uuid::Uuid;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Process-wide configuration, resolved on first use.
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

const DEFAULT_API_BASE_URL: &str = "/api";
const DEFAULT_RECENT_RUNS_LIMIT: u32 = 10;

/// Build-time settings. Values come from the environment of the `trunk build`
/// that produced the bundle, with defaults for local development.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub business_id: Option<Uuid>,
    pub recent_runs_limit: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("AI_ADMIN_API_BASE_URL"),
            option_env!("AI_ADMIN_BUSINESS_ID"),
            option_env!("AI_ADMIN_RECENT_RUNS_LIMIT"),
        )
    }

    fn from_values(
        api_base_url: Option<&str>,
        business_id: Option<&str>,
        recent_runs_limit: Option<&str>,
    ) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let business_id = business_id.and_then(|id| match Uuid::parse_str(id.trim()) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Ignoring invalid AI_ADMIN_BUSINESS_ID {:?}: {}", id, e);
                None
            }
        });

        let recent_runs_limit = recent_runs_limit
            .and_then(|limit| limit.trim().parse::<u32>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_RECENT_RUNS_LIMIT);

        Self {
            api_base_url,
            business_id,
            recent_runs_limit,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.business_id, None);
        assert_eq!(config.recent_runs_limit, 10);
        assert_eq!(config.endpoint("/calendar/status"), "/api/calendar/status");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_values(
            Some("https://admin.example.com/api/"),
            Some("5f0c6f3e-9a34-4c31-a9f4-0a3b0c1d2e3f"),
            Some("25"),
        );
        assert_eq!(config.endpoint("knowledge"), "https://admin.example.com/api/knowledge");
        assert!(config.business_id.is_some());
        assert_eq!(config.recent_runs_limit, 25);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some("not-a-uuid"), Some("0"));
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.business_id, None);
        assert_eq!(config.recent_runs_limit, 10);
    }
}
