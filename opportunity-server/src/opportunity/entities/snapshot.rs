use {
    super::{
        Opportunity,
        Pair,
        UnixTimestamp,
    },
    opportunity_api_types::opportunity as api,
    std::collections::BTreeMap,
};

pub type OpportunityTable = BTreeMap<Pair, Vec<Opportunity>>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpportunitiesSnapshot {
    pub last_updated: Option<UnixTimestamp>,
    pub table:        OpportunityTable,
}

impl OpportunitiesSnapshot {
    pub fn opportunities_count(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }
}

/// Outcome of a single ingest call. Skipped records had no pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestSummary {
    pub inserted: usize,
    pub replaced: usize,
    pub skipped:  usize,
}

impl IngestSummary {
    pub fn stored(&self) -> usize {
        self.inserted + self.replaced
    }
}

impl From<OpportunitiesSnapshot> for api::OpportunitiesSnapshot {
    fn from(val: OpportunitiesSnapshot) -> Self {
        Self {
            last_updated: val.last_updated,
            table:        val
                .table
                .into_iter()
                .map(|(pair, opportunities)| {
                    (
                        pair,
                        opportunities.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        }
    }
}

// The wire result does not report how many records were skipped.
impl From<IngestSummary> for api::IngestResult {
    fn from(_: IngestSummary) -> Self {
        Self { stored: true }
    }
}
