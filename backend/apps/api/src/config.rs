//! Server configuration
//!
//! Read once at startup, after `.env` has been loaded.

use anyhow::{Context, bail};
use platform::env::EnvSource;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_APP_ENV: &str = "development";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    /// Deployment environment name, reported by the health endpoint
    pub app_env: String,
}

impl AppConfig {
    pub fn from_env<E: EnvSource + ?Sized>(env: &E) -> anyhow::Result<Self> {
        let database_url = match env.var("DATABASE_URL")? {
            Some(url) if !url.trim().is_empty() => url,
            _ => bail!("DATABASE_URL must be set in environment"),
        };

        let bind_addr = env
            .var("BIND_ADDR")?
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr}"))?;

        let frontend_origins = env
            .var("FRONTEND_ORIGINS")?
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let app_env = env
            .var("APP_ENV")?
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APP_ENV.to_string());

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            app_env,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::env::MapEnv;

    #[test]
    fn test_defaults() {
        let env = MapEnv::from_pairs([("DATABASE_URL", "postgres://localhost/airdrops")]);
        let config = AppConfig::from_env(&env).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:31113".parse().unwrap());
        assert_eq!(config.app_env, "development");
        assert_eq!(
            config.frontend_origins,
            vec!["http://localhost:40922", "http://127.0.0.1:40922"]
        );
    }

    #[test]
    fn test_overrides() {
        let env = MapEnv::from_pairs([
            ("DATABASE_URL", "postgres://db/airdrops"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("FRONTEND_ORIGINS", "https://airdrops.example, "),
            ("APP_ENV", "production"),
        ]);
        let config = AppConfig::from_env(&env).unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.frontend_origins, vec!["https://airdrops.example"]);
        assert_eq!(config.app_env, "production");
    }

    #[test]
    fn test_missing_database_url() {
        let err = AppConfig::from_env(&MapEnv::default()).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_bad_bind_addr() {
        let env = MapEnv::from_pairs([
            ("DATABASE_URL", "postgres://db/airdrops"),
            ("BIND_ADDR", "nowhere"),
        ]);
        assert!(AppConfig::from_env(&env).is_err());
    }
}
