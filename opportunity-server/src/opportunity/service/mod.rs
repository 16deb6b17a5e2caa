use {
    super::repository::Repository,
    std::sync::Arc,
};

pub mod get_opportunities;
pub mod ingest_opportunities;

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct ServiceInner {
    repo: Repository,
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}

impl Service {
    pub fn new() -> Self {
        Self(Arc::new(ServiceInner {
            repo: Repository::new(),
        }))
    }

    pub async fn update_metrics(&self) {
        self.repo.update_metrics().await;
    }
}
