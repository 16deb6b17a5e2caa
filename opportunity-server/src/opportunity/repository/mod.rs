use {
    super::entities,
    crate::metrics_api::IN_MEMORY_OPPORTUNITIES,
    axum_prometheus::metrics,
    tokio::sync::RwLock,
};

mod get_in_memory_opportunities;
mod upsert_opportunities;

#[derive(Default)]
pub struct Repository {
    in_memory_store: RwLock<entities::OpportunitiesSnapshot>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn update_metrics(&self) {
        let store = self.in_memory_store.read().await;
        metrics::gauge!(IN_MEMORY_OPPORTUNITIES).set(store.opportunities_count() as f64);
    }
}
