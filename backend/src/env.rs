use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use crate::views::DEDUP_TTL;

pub const ENV_REDIS_URL: &str = "REDIS_URL";
pub const ENV_RELAX_CORS: &str = "RELAX_CORS";
pub const ENV_PORT: &str = "PV_PORT";
pub const ENV_CONTENT_DIR: &str = "PV_CONTENT_DIR";
pub const ENV_DEDUP_TTL_SECS: &str = "PV_DEDUP_TTL_SECS";
pub const ENV_STORE_TIMEOUT_MS: &str = "PV_STORE_TIMEOUT_MS";
pub const ENV_TRUST_FORWARDED: &str = "PV_TRUST_FORWARDED";
pub const ENV_FEATURED: &str = "PV_FEATURED";
pub const ENV_SENTRY_DSN: &str = "PV_SENTRY_DSN";

const DEFAULT_PORT: u16 = 8090;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: Option<String>,
    pub content_dir: PathBuf,
    pub dedup_ttl: Duration,
    pub store_timeout: Duration,
    pub trust_forwarded: bool,
    pub featured: Vec<String>,
    pub sentry_dsn: Option<String>,
    pub relax_cors: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            port: parse_or(lookup(ENV_PORT), ENV_PORT, DEFAULT_PORT),
            redis_url: lookup(ENV_REDIS_URL),
            content_dir: lookup(ENV_CONTENT_DIR)
                .map_or_else(|| PathBuf::from("content"), PathBuf::from),
            dedup_ttl: dedup_ttl(parse_or(
                lookup(ENV_DEDUP_TTL_SECS),
                ENV_DEDUP_TTL_SECS,
                DEDUP_TTL.as_secs(),
            )),
            store_timeout: Duration::from_millis(parse_or(
                lookup(ENV_STORE_TIMEOUT_MS),
                ENV_STORE_TIMEOUT_MS,
                DEFAULT_STORE_TIMEOUT_MS,
            )),
            trust_forwarded: lookup(ENV_TRUST_FORWARDED).is_some_and(|v| is_enabled(&v)),
            featured: lookup(ENV_FEATURED)
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|slug| !slug.is_empty())
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            sentry_dsn: lookup(ENV_SENTRY_DSN),
            relax_cors: lookup(ENV_RELAX_CORS).is_some_and(|v| is_enabled(&v)),
        }
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("invalid {key} value '{value}': {e}, using default");
            default
        }),
        None => default,
    }
}

/// A zero window would let every marker expire on arrival.
fn dedup_ttl(secs: u64) -> Duration {
    if secs == 0 {
        tracing::warn!("{ENV_DEDUP_TTL_SECS} must be at least 1, using 1");
    }

    Duration::from_secs(secs.max(1))
}

fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tracing_test::traced_test;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);

        assert_eq!(cfg.port, 8090);
        assert_eq!(cfg.redis_url, None);
        assert_eq!(cfg.content_dir, PathBuf::from("content"));
        assert_eq!(cfg.dedup_ttl, Duration::from_secs(86400));
        assert_eq!(cfg.store_timeout, Duration::from_secs(1));
        assert!(!cfg.trust_forwarded);
        assert!(cfg.featured.is_empty());
        assert!(!cfg.relax_cors);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            (ENV_PORT, "3000"),
            (ENV_REDIS_URL, "redis://localhost:6379"),
            (ENV_DEDUP_TTL_SECS, "60"),
            (ENV_STORE_TIMEOUT_MS, "250"),
            (ENV_TRUST_FORWARDED, "TRUE"),
            (ENV_FEATURED, "poker-scientist, crypto-prices,,"),
            (ENV_RELAX_CORS, "1"),
        ]);

        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(cfg.dedup_ttl, Duration::from_secs(60));
        assert_eq!(cfg.store_timeout, Duration::from_millis(250));
        assert!(cfg.trust_forwarded);
        assert_eq!(cfg.featured, vec!["poker-scientist", "crypto-prices"]);
        assert!(cfg.relax_cors);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config(&[(ENV_PORT, "eighty"), (ENV_REDIS_URL, " ")]);

        assert_eq!(cfg.port, 8090);
        assert_eq!(cfg.redis_url, None);
    }

    #[test]
    #[traced_test]
    fn test_zero_dedup_ttl_is_clamped() {
        let cfg = config(&[(ENV_DEDUP_TTL_SECS, "0")]);

        assert_eq!(cfg.dedup_ttl, Duration::from_secs(1));
        assert!(logs_contain("must be at least 1"));
    }
}
