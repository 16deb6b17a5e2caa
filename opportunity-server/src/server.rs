use {
    crate::{
        api,
        config::{
            Config,
            RunOptions,
        },
        metrics_api,
        state::Store,
    },
    anyhow::anyhow,
    axum_prometheus::metrics_exporter_prometheus::PrometheusBuilder,
    std::{
        future::Future,
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
};

async fn run_until_exit(
    name: &'static str,
    task: impl Future<Output = anyhow::Result<()>>,
) -> anyhow::Result<()> {
    let result = task.await;
    if let Err(err) = &result {
        tracing::error!(error = ?err, "{} stopped with an error", name);
    }
    // One server going down takes the other one with it.
    SHOULD_EXIT.store(true, Ordering::Release);
    result
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to listen for the shutdown signal");
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = Config::from_options(&run_options.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path:?}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;

    let metrics_recorder = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|err| anyhow!("Failed to install metrics recorder: {:?}", err))?;
    let store = Arc::new(Store::new(metrics_recorder));

    let server_loop = tokio::spawn(run_until_exit(
        "API server",
        api::start_api(run_options.clone(), config, store.clone()),
    ));
    let metrics_loop = tokio::spawn(run_until_exit(
        "Metrics server",
        metrics_api::start_metrics(run_options, store.clone()),
    ));
    let (server_result, metrics_result) = tokio::join!(server_loop, metrics_loop);
    server_result??;
    metrics_result??;
    Ok(())
}

// A static exit flag to indicate to running threads that we're shutting down. This is used to
// gracefully shutdown the application.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
