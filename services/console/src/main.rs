//! Cluster console HTTP service entry point.
//!
//! # Purpose
//! Loads configuration, initializes observability and serves the router
//! until ctrl-c.
use anyhow::Context;
use console::app::{AppState, build_router};
use console::config::ConsoleConfig;
use console::observability;
use std::future::Future;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConsoleConfig::from_env_or_yaml().context("console config")?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: ConsoleConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    observability::init_observability("cluster-console");
    let app = build_router(AppState::from_config(&config));

    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(
        %addr,
        base_path = %config.base_path,
        expose_stacktrace = config.expose_stacktrace,
        "cluster console listening"
    );
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConsoleConfig {
        ConsoleConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind"),
            base_path: String::new(),
            api_prefix: "/api".to_string(),
            expose_stacktrace: true,
        }
    }

    #[tokio::test]
    async fn run_with_shutdown_starts_and_stops() {
        run_with_shutdown(config(), async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        })
        .await
        .expect("run should stop cleanly");
    }

    #[tokio::test]
    async fn run_with_shutdown_reports_bind_failure() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let mut config = config();
        config.bind_addr = taken.local_addr().expect("addr");
        let err = run_with_shutdown(config, async {})
            .await
            .expect_err("address in use");
        assert!(err.to_string().contains("bind"));
    }
}
