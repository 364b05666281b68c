/*
 * Responsibility
 * - load settings from the environment (TOKEN_PASSWORD, bypass paths, realm, ...)
 * - validate them once at startup (missing secret => startup fails)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::SharedSecret;

/// Prefix every v1 route is mounted under.
pub const API_PREFIX: &str = "/api/v1/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // HMAC key shared with whoever issues tokens
    pub token_secret: SharedSecret,
    pub token_ttl_seconds: u64,
    pub token_leeway_seconds: u64,

    // Realm hint forwarded to the authenticator on every login
    pub auth_realm: String,
    // Extra paths exempt from authentication (login is always exempt)
    pub bypass_paths: Vec<String>,
    // `login:password` pairs for the static authenticator
    pub static_users: Vec<(String, String)>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this function over `std::env::var`; tests pass a map instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let token_secret = lookup("TOKEN_PASSWORD")
            .ok_or(ConfigError::Missing("TOKEN_PASSWORD"))
            .and_then(|raw| {
                SharedSecret::new(raw.into_bytes()).ok_or(ConfigError::Invalid("TOKEN_PASSWORD"))
            })?;

        let token_ttl_seconds = match lookup("TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or(ConfigError::Invalid("TOKEN_TTL_SECONDS"))?,
            None => 3600,
        };

        // No skew tolerance unless asked for: an expired token is rejected.
        let token_leeway_seconds = match lookup("TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let auth_realm = lookup("AUTH_REALM")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "local".to_string());

        let bypass_paths = lookup("AUTH_BYPASS_PATHS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        if bypass_paths.iter().any(|p| !p.starts_with('/')) {
            return Err(ConfigError::Invalid("AUTH_BYPASS_PATHS"));
        }

        let static_users = parse_users(&lookup("AUTH_USERS").unwrap_or_default())?;

        Ok(Self {
            addr,
            app_env,
            token_secret,
            token_ttl_seconds,
            token_leeway_seconds,
            auth_realm,
            bypass_paths,
            static_users,
        })
    }

    /// Path of the login endpoint; always on the bypass list.
    pub fn login_path() -> String {
        format!("{API_PREFIX}login")
    }
}

fn parse_users(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((login, password)) if !login.is_empty() && !password.is_empty() => {
                Ok((login.to_string(), password.to_string()))
            }
            _ => Err(ConfigError::Invalid("AUTH_USERS")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_password_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("TOKEN_PASSWORD"));
    }

    #[test]
    fn empty_token_password_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("TOKEN_PASSWORD", "")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("TOKEN_PASSWORD"));
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup_from(&[("TOKEN_PASSWORD", "s3cret")])).unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.token_ttl_seconds, 3600);
        assert_eq!(config.token_leeway_seconds, 0);
        assert_eq!(config.auth_realm, "local");
        assert!(config.bypass_paths.is_empty());
        assert!(config.static_users.is_empty());
    }

    #[test]
    fn parses_lists_and_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TOKEN_PASSWORD", "s3cret"),
            ("PORT", "9000"),
            ("APP_ENV", "PROD"),
            ("AUTH_REALM", "ldap.example.com"),
            ("AUTH_BYPASS_PATHS", " /health, ,/metrics "),
            ("AUTH_USERS", "alice:wonderland, bob:builder"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 9000);
        assert!(config.app_env.is_production());
        assert_eq!(config.auth_realm, "ldap.example.com");
        assert_eq!(config.bypass_paths, vec!["/health", "/metrics"]);
        assert_eq!(
            config.static_users,
            vec![
                ("alice".to_string(), "wonderland".to_string()),
                ("bob".to_string(), "builder".to_string()),
            ]
        );
    }

    #[test]
    fn unparsable_leeway_is_rejected() {
        for raw in ["sixty", "-5", ""] {
            let err = Config::from_lookup(lookup_from(&[
                ("TOKEN_PASSWORD", "s3cret"),
                ("TOKEN_LEEWAY_SECONDS", raw),
            ]))
            .unwrap_err();
            assert_eq!(err, ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"), "{raw:?}");
        }
    }

    #[test]
    fn leeway_can_be_set_explicitly() {
        let config = Config::from_lookup(lookup_from(&[
            ("TOKEN_PASSWORD", "s3cret"),
            ("TOKEN_LEEWAY_SECONDS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.token_leeway_seconds, 30);
    }

    #[test]
    fn rejects_relative_bypass_path() {
        let err = Config::from_lookup(lookup_from(&[
            ("TOKEN_PASSWORD", "s3cret"),
            ("AUTH_BYPASS_PATHS", "health"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("AUTH_BYPASS_PATHS"));
    }

    #[test]
    fn rejects_user_entry_without_password() {
        let err = Config::from_lookup(lookup_from(&[
            ("TOKEN_PASSWORD", "s3cret"),
            ("AUTH_USERS", "alice"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("AUTH_USERS"));
    }

    #[test]
    fn login_path_is_under_api_prefix() {
        assert_eq!(Config::login_path(), "/api/v1/login");
    }
}
