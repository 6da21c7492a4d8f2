// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use dotenvy::dotenv;
use url::Url;

const DEFAULT_QUESTIONS_API: &str = "https://apigametcc.azurewebsites.net/api";
const DEFAULT_STUDENTS_API: &str = "https://somenteapialuno.azurewebsites.net";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the service hosting `pergunta` and `resposta`.
    pub questions_api: Url,
    /// Base URL of the service hosting `alunos`.
    pub students_api: Url,
    pub bind_addr: SocketAddr,
    pub upstream_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let questions_api = url_var("QUESTIONS_API_URL", DEFAULT_QUESTIONS_API);
        let students_api = url_var("STUDENTS_API_URL", DEFAULT_STUDENTS_API);

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|raw| {
                raw.parse()
                    .map_err(|_| tracing::warn!("Ignoring invalid BIND_ADDR {:?}", raw))
                    .ok()
            })
            .unwrap_or_else(default_bind_addr);

        let upstream_timeout = timeout_secs(env::var("UPSTREAM_TIMEOUT_SECS").ok().as_deref());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            questions_api,
            students_api,
            bind_addr,
            upstream_timeout,
            rust_log,
        }
    }

    /// Configuration pointing both upstreams at the given base URLs.
    /// Used by tests and local tooling.
    pub fn with_upstreams(questions_api: Url, students_api: Url) -> Self {
        Self {
            questions_api,
            students_api,
            bind_addr: default_bind_addr(),
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rust_log: "error".to_string(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    DEFAULT_BIND_ADDR
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 3000)))
}

fn timeout_secs(raw: Option<&str>) -> Duration {
    let secs = match raw {
        Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid UPSTREAM_TIMEOUT_SECS {:?}", raw);
            DEFAULT_TIMEOUT_SECS
        }),
        None => DEFAULT_TIMEOUT_SECS,
    };
    Duration::from_secs(secs)
}

fn url_var(key: &str, default: &str) -> Url {
    let fallback = || Url::parse(default).expect("default upstream URL is valid");

    match env::var(key) {
        Ok(raw) => Url::parse(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}={:?}: {}", key, raw, e);
            fallback()
        }),
        Err(_) => fallback(),
    }
}
