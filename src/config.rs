//! Configuration types.

use crate::flow::Flow;

/// Compiled-in configuration with environment overrides.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Feature switch for the onboarding flow. A disabled flow's gate
    /// reports complete without consulting storage.
    pub onboarding_enabled: bool,
    /// Feature switch for the user-info flow.
    pub user_info_enabled: bool,
    /// Path to the local settings database.
    pub db_path: String,
    /// Port for the status API.
    pub http_port: u16,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            onboarding_enabled: true,
            user_info_enabled: true,
            db_path: "./data/intake.db".to_string(),
            http_port: 8080,
        }
    }
}

impl IntakeConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            onboarding_enabled: flag_from_env(
                "INTAKE_ONBOARDING_ENABLED",
                defaults.onboarding_enabled,
            ),
            user_info_enabled: flag_from_env("INTAKE_USER_INFO_ENABLED", defaults.user_info_enabled),
            db_path: std::env::var("INTAKE_DB_PATH").unwrap_or(defaults.db_path),
            http_port: std::env::var("INTAKE_HTTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.http_port),
        }
    }

    /// Whether the given flow's gate should consult storage at all.
    pub fn flow_enabled(&self, flow: Flow) -> bool {
        match flow {
            Flow::Onboarding => self.onboarding_enabled,
            Flow::UserInfo => self.user_info_enabled,
        }
    }
}

fn flag_from_env(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => !matches!(v.trim(), "0" | "false" | "no"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_both_flows() {
        let config = IntakeConfig::default();
        assert!(config.flow_enabled(Flow::Onboarding));
        assert!(config.flow_enabled(Flow::UserInfo));
        assert_eq!(config.http_port, 8080);
    }

    #[test]
    fn flow_enabled_tracks_switches() {
        let config = IntakeConfig {
            onboarding_enabled: false,
            ..Default::default()
        };
        assert!(!config.flow_enabled(Flow::Onboarding));
        assert!(config.flow_enabled(Flow::UserInfo));
    }
}
