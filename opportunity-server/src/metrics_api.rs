//! Metrics Server
//!
//! Request metrics are recorded by [`metric_layer`] on the API router, and the opportunity
//! service records its own counters. Both go through the global recorder installed at startup
//! and are served over /metrics in OpenMetrics format.
use {
    crate::{
        config::RunOptions,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    anyhow::Result,
    axum::{
        extract::State,
        routing::get,
        Router,
    },
    axum_prometheus::PrometheusMetricLayer,
    opportunity_api_types::routes,
    std::sync::{
        atomic::Ordering,
        Arc,
    },
};

pub const OPPORTUNITIES_INGESTED_TOTAL: &str = "opportunities_ingested_total";
pub const IN_MEMORY_OPPORTUNITIES: &str = "in_memory_opportunities";

/// Counts requests, their latency and the ones in flight, labelled by method, route and status.
pub fn metric_layer() -> PrometheusMetricLayer<'static> {
    PrometheusMetricLayer::new()
}

async fn render_metrics(State(store): State<Arc<Store>>) -> String {
    store.metrics_recorder.render()
}

pub fn build_metrics_router(store: Arc<Store>) -> Router {
    Router::new()
        .route(routes::METRICS, get(render_metrics))
        .with_state(store)
}

pub async fn start_metrics(run_options: RunOptions, store: Arc<Store>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&run_options.server.metrics_addr).await?;
    tracing::info!(
        metrics_addr = %run_options.server.metrics_addr,
        "Starting metrics server..."
    );
    axum::serve(listener, build_metrics_router(store))
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down metrics server...");
        })
        .await?;
    Ok(())
}
