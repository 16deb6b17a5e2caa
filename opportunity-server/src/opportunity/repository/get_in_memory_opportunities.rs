use {
    super::Repository,
    crate::opportunity::entities,
};

impl Repository {
    pub async fn get_in_memory_opportunities(&self) -> entities::OpportunitiesSnapshot {
        self.in_memory_store.read().await.clone()
    }
}
