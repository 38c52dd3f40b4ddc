use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub jobs: JobsConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub secret: String,
    /// Lifetime of issued tokens, in seconds
    pub max_jwt_expiration: i64,
}

// Keep the signing secret out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("max_jwt_expiration", &self.max_jwt_expiration)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobsConfig {
    /// Location stored when a job is created without one
    pub default_work_location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub token: Option<String>,
}

/// Plain environment variables and the config key each one overrides.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("DB_MAX_CONNECTIONS", "database.max_connections"),
    ("DB_MIN_CONNECTIONS", "database.min_connections"),
    ("JWT_SECRET", "auth.secret"),
    ("MAX_JWT_EXPIRATION", "auth.max_jwt_expiration"),
    ("DEFAULT_WORK_LOCATION", "jobs.default_work_location"),
    ("JOBTRACK_API_URL", "client.api_url"),
    ("JOBTRACK_TOKEN", "client.token"),
];

impl Config {
    /// Load configuration from `.env`, the process environment and built-in defaults.
    ///
    /// Nested keys can also be set as `JOBTRACK__SECTION__KEY`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    /// Layers, lowest first: defaults, plain variables, `JOBTRACK__*` variables.
    fn from_vars(vars: config::Map<String, String>) -> Result<Self> {
        let mut plain = config::Config::builder();
        for (var, key) in ENV_OVERRIDES {
            plain = plain.set_override_option(*key, vars.get(*var).cloned())?;
        }
        if let Some(origins) = vars.get("ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            plain = plain.set_override("server.cors_allowed_origins", origins)?;
        }

        let config: Config = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default(
                "server.cors_allowed_origins",
                vec!["http://localhost:3000", "http://localhost:5173"],
            )?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("auth.secret", "")?
            .set_default("auth.max_jwt_expiration", 86_400)?
            .set_default("jobs.default_work_location", "Remote")?
            .set_default("client.api_url", "http://localhost:3000")?
            .add_source(plain.build()?)
            .add_source(
                config::Environment::with_prefix("JOBTRACK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?
            .try_deserialize()
            .context("invalid configuration")?;

        Ok(config)
    }

    /// Checks needed before the HTTP server may start
    pub fn validate_for_server(&self, in_memory: bool) -> Result<()> {
        if self.auth.secret.is_empty() {
            anyhow::bail!("JWT_SECRET must be set");
        }
        if !in_memory && self.database.url.is_empty() {
            anyhow::bail!("DATABASE_URL must be set (or run with --in-memory)");
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 1,
                min_connections: 1,
            },
            auth: AuthConfig {
                secret: "test-secret".to_string(),
                max_jwt_expiration: 3600,
            },
            jobs: JobsConfig {
                default_work_location: "Remote".to_string(),
            },
            client: ClientConfig {
                api_url: "http://localhost:3000".to_string(),
                token: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_requires_secret() {
        let mut config = Config::for_tests();
        assert!(config.validate_for_server(true).is_ok());
        assert!(config.validate_for_server(false).is_err());

        config.auth.secret.clear();
        assert!(config.validate_for_server(true).is_err());
    }

    #[test]
    fn test_auth_debug_redacts_secret() {
        let config = Config::for_tests();
        let printed = format!("{:?}", config.auth);
        assert!(!printed.contains("test-secret"));
    }

    fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_and_plain_variables() {
        let config = Config::from_vars(vars(&[
            ("PORT", "1111"),
            ("JWT_SECRET", "s3cret"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 1111);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.secret, "s3cret");
        assert_eq!(config.server.cors_allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.jobs.default_work_location, "Remote");
        assert_eq!(config.client.token, None);
    }

    #[test]
    fn test_prefixed_variables_win_over_plain() {
        let config = Config::from_vars(vars(&[
            ("PORT", "1111"),
            ("JOBTRACK__SERVER__PORT", "2222"),
            ("DEFAULT_WORK_LOCATION", "Berlin"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 2222);
        assert_eq!(config.jobs.default_work_location, "Berlin");
    }
}
