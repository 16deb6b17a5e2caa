use {
    super::Service,
    crate::{
        metrics_api::OPPORTUNITIES_INGESTED_TOTAL,
        opportunity::entities::{
            self,
            UpsertOutcome,
        },
    },
    axum_prometheus::metrics,
    time::OffsetDateTime,
};

pub struct IngestOpportunitiesInput {
    pub opportunities: Vec<entities::OpportunityCreate>,
    /// Every opportunity of the batch, and the store itself, is stamped with this time.
    pub received_at:   OffsetDateTime,
}

impl Service {
    #[tracing::instrument(skip_all, fields(received = input.opportunities.len()))]
    pub async fn ingest_opportunities(
        &self,
        input: IngestOpportunitiesInput,
    ) -> entities::IngestSummary {
        let mut summary = entities::IngestSummary::default();
        let mut opportunities = Vec::with_capacity(input.opportunities.len());
        for opportunity in input.opportunities {
            if opportunity.get_pair().is_none() {
                tracing::debug!(opportunity = ?opportunity, "Skipping opportunity without a pair");
                summary.skipped += 1;
                continue;
            }
            opportunities.extend(entities::Opportunity::new_with_time(
                opportunity,
                input.received_at,
            ));
        }

        let outcomes = self
            .repo
            .upsert_opportunities(opportunities, input.received_at.unix_timestamp())
            .await;
        for outcome in outcomes {
            match outcome {
                UpsertOutcome::Inserted => summary.inserted += 1,
                UpsertOutcome::Replaced => summary.replaced += 1,
            }
        }

        metrics::counter!(OPPORTUNITIES_INGESTED_TOTAL, &[("result", "stored")])
            .increment(summary.stored() as u64);
        metrics::counter!(OPPORTUNITIES_INGESTED_TOTAL, &[("result", "skipped")])
            .increment(summary.skipped as u64);
        self.update_metrics().await;

        tracing::info!(
            inserted = summary.inserted,
            replaced = summary.replaced,
            skipped = summary.skipped,
            "Ingested opportunities"
        );
        summary
    }
}
