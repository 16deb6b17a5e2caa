use {
    super::Repository,
    crate::opportunity::entities::{
        self,
        UpsertOutcome,
    },
};

fn upsert_opportunity(
    table: &mut entities::OpportunityTable,
    opportunity: entities::Opportunity,
) -> UpsertOutcome {
    let opportunities = table.entry(opportunity.get_key().clone()).or_default();
    match opportunities
        .iter()
        .position(|existing| existing.venues == opportunity.venues)
    {
        Some(index) => {
            opportunities[index] = opportunity;
            UpsertOutcome::Replaced
        }
        None => {
            opportunities.push(opportunity);
            UpsertOutcome::Inserted
        }
    }
}

impl Repository {
    /// Replaces the opportunity with the same pair and venues, or appends a new one.
    ///
    /// The whole batch is applied under one write lock. `last_updated` never moves backwards.
    pub async fn upsert_opportunities(
        &self,
        opportunities: Vec<entities::Opportunity>,
        updated_at: entities::UnixTimestamp,
    ) -> Vec<UpsertOutcome> {
        let mut write_guard = self.in_memory_store.write().await;
        let outcomes = opportunities
            .into_iter()
            .map(|opportunity| upsert_opportunity(&mut write_guard.table, opportunity))
            .collect();
        write_guard.last_updated = Some(
            write_guard
                .last_updated
                .map_or(updated_at, |last_updated| last_updated.max(updated_at)),
        );
        drop(write_guard);

        outcomes
    }
}
