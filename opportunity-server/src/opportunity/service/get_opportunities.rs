use {
    super::Service,
    crate::opportunity::entities,
};

impl Service {
    /// Returns a copy of the whole store, unfiltered.
    pub async fn get_opportunities(&self) -> entities::OpportunitiesSnapshot {
        self.repo.get_in_memory_opportunities().await
    }
}
