use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_API_PREFIX: &str = "/api";

// Console configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub bind_addr: SocketAddr,
    /// Path the console is mounted under; empty or `/prefix` without a trailing slash.
    pub base_path: String,
    /// Path prefix of API routes below the base path, e.g. `/api`.
    pub api_prefix: String,
    /// Embed diagnostic traces in 500 responses.
    pub expose_stacktrace: bool,
}

#[derive(Debug, Deserialize)]
struct ConsoleConfigOverride {
    bind_addr: Option<String>,
    base_path: Option<String>,
    api_prefix: Option<String>,
    expose_stacktrace: Option<bool>,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("CONSOLE_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .with_context(|| "parse CONSOLE_BIND")?;
        let base_path = normalize_base_path(&std::env::var("CONSOLE_BASE_PATH").unwrap_or_default());
        let api_prefix = normalize_api_prefix(
            &std::env::var("CONSOLE_API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string()),
        );
        let expose_stacktrace = match std::env::var("CONSOLE_EXPOSE_STACKTRACE") {
            Ok(value) => value
                .parse()
                .with_context(|| "parse CONSOLE_EXPOSE_STACKTRACE")?,
            Err(_) => true,
        };
        Ok(Self {
            bind_addr,
            base_path,
            api_prefix,
            expose_stacktrace,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("CONSOLE_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read CONSOLE_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: ConsoleConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse console config yaml")?;
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.base_path {
            self.base_path = normalize_base_path(&value);
        }
        if let Some(value) = override_cfg.api_prefix {
            self.api_prefix = normalize_api_prefix(&value);
        }
        if let Some(value) = override_cfg.expose_stacktrace {
            self.expose_stacktrace = value;
        }
        Ok(())
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

// A blank prefix would mark every path as an API call; fall back to the default.
fn normalize_api_prefix(raw: &str) -> String {
    let normalized = normalize_base_path(raw);
    if normalized.is_empty() {
        DEFAULT_API_PREFIX.to_string()
    } else {
        normalized
    }
}
