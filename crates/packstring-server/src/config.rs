use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Dev mode: the availability store re-reads its file when it changes
    /// on disk, so hand edits show up without a restart.
    #[serde(default)]
    pub dev: bool,

    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default = "default_availability_path")]
    pub availability_path: String,

    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Leaving this unset disables the whole /admin surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,

    #[serde(default)]
    pub stripe: StripeSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StripeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_path() -> String {
    "data/packstring.db".to_string()
}

fn default_availability_path() -> String {
    "data/availability.yaml".to_string()
}

fn default_site_url() -> String {
    packstring_core::SITE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dev: false,
            database_path: default_database_path(),
            availability_path: default_availability_path(),
            site_url: default_site_url(),
            admin_password: None,
            stripe: StripeSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence).
    ///
    /// `PORT`, `DATABASE_PATH`, and `SITE_URL` are the names existing
    /// deployments already set; the `PACKSTRING_`-prefixed forms are
    /// accepted too and win when both are present.
    pub fn merge_env(&mut self) {
        fn env_first(names: &[&str]) -> Option<String> {
            names.iter().find_map(|name| std::env::var(name).ok())
        }

        if let Ok(val) = std::env::var("PACKSTRING_HOST") {
            self.host = val;
        }
        if let Some(val) = env_first(&["PACKSTRING_PORT", "PORT"]) {
            match val.parse() {
                Ok(port) => self.port = port,
                Err(_) => eprintln!("Warning: invalid PORT '{}', ignoring", val),
            }
        }
        if let Ok(val) = std::env::var("PACKSTRING_DEV") {
            self.dev = matches!(val.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(val) = env_first(&["PACKSTRING_DATABASE_PATH", "DATABASE_PATH"]) {
            self.database_path = val;
        }
        if let Ok(val) = std::env::var("PACKSTRING_AVAILABILITY_PATH") {
            self.availability_path = val;
        }
        if let Some(val) = env_first(&["PACKSTRING_SITE_URL", "SITE_URL"]) {
            self.site_url = val;
        }
        if let Ok(val) = std::env::var("ADMIN_PASSWORD") {
            self.admin_password = Some(val);
        }
        if let Ok(val) = std::env::var("STRIPE_SECRET_KEY") {
            self.stripe.secret_key = Some(val);
        }
        if let Ok(val) = std::env::var("STRIPE_WEBHOOK_SECRET") {
            self.stripe.webhook_secret = Some(val);
        }
        if let Ok(val) = std::env::var("PACKSTRING_LOG_LEVEL") {
            self.logging.level = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: ServerConfig = serde_yaml::from_str("port: 9000").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.database_path, "data/packstring.db");
        assert!(config.admin_password.is_none());
        assert!(!config.dev);
    }

    // Single test touching the process environment; keeping every env
    // assertion here avoids cross-test races on the shared var space.
    #[test]
    fn env_overrides_config() {
        std::env::set_var("PORT", "9090");
        std::env::set_var("DATABASE_PATH", "/srv/packstring.db");
        std::env::set_var("SITE_URL", "https://env.mthuntfish.com");
        std::env::set_var("ADMIN_PASSWORD", "from-env");

        let mut config = ServerConfig::default();
        config.merge_env();
        assert_eq!(config.port, 9090);
        assert_eq!(config.database_path, "/srv/packstring.db");
        assert_eq!(config.site_url, "https://env.mthuntfish.com");
        assert_eq!(config.admin_password.as_deref(), Some("from-env"));

        // Prefixed names win over the bare ones when both are set.
        std::env::set_var("PACKSTRING_PORT", "7070");
        let mut config = ServerConfig::default();
        config.merge_env();
        assert_eq!(config.port, 7070);

        for name in [
            "PORT",
            "PACKSTRING_PORT",
            "DATABASE_PATH",
            "SITE_URL",
            "ADMIN_PASSWORD",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn full_config_parses() {
        let yaml = r#"
host: 127.0.0.1
port: 3000
dev: true
database_path: /tmp/test.db
availability_path: /tmp/availability.yaml
site_url: https://staging.mthuntfish.com
admin_password: hunter2
stripe:
  secret_key: sk_test_123
  webhook_secret: whsec_123
logging:
  level: debug
"#;
        let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.dev);
        assert_eq!(config.admin_password.as_deref(), Some("hunter2"));
        assert_eq!(config.stripe.secret_key.as_deref(), Some("sk_test_123"));
        assert_eq!(config.logging.level, "debug");
    }
}
