use {
    crate::{
        ResponseStatus,
        UnixTimestamp,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    serde_json::Value,
    std::collections::BTreeMap,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

pub type Pair = String;
pub type Venue = String;

/// An opportunity as submitted by an upstream collector.
///
/// Every field may be missing or null. Records whose pair is not a non-empty string are ignored
/// by the server, without failing the rest of the batch.
#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug, Default)]
pub struct OpportunityCreate {
    /// The trading pair the opportunity is about.
    #[schema(example = "BTC-USDT", value_type = Option<String>)]
    pub pair:       Option<Value>,
    /// The venue where the position is shorted.
    #[schema(example = "hyperliquid", value_type = Option<String>)]
    pub short_dex:  Option<Venue>,
    /// The venue where the position is longed.
    #[schema(example = "paradex", value_type = Option<String>)]
    pub long_dex:   Option<Venue>,
    /// Estimated net yield. Stored as received.
    #[schema(example = 12.5, value_type = Option<f64>)]
    pub net_apr:    Option<Value>,
    /// Risk classification, either a label or a score. Stored as received.
    #[schema(example = "low", value_type = Option<String>)]
    pub risk_level: Option<Value>,
}

/// A stored opportunity, the latest one seen for its pair and venues.
#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct Opportunity {
    #[schema(example = "BTC-USDT", value_type = String)]
    pub pair:       Pair,
    #[schema(example = "hyperliquid", value_type = Option<String>)]
    pub short_dex:  Option<Venue>,
    #[schema(example = "paradex", value_type = Option<String>)]
    pub long_dex:   Option<Venue>,
    #[schema(example = 12.5, value_type = Option<f64>)]
    pub net_apr:    Option<Value>,
    #[schema(example = "low", value_type = Option<String>)]
    pub risk_level: Option<Value>,
    /// Unix timestamp in seconds at which the server stored this opportunity.
    #[schema(example = 1718000000, value_type = i64)]
    pub timestamp:  UnixTimestamp,
}

/// The full content of the opportunity store.
#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug, Default)]
pub struct OpportunitiesSnapshot {
    /// Unix timestamp in seconds of the last ingested batch, null if nothing was ingested yet.
    #[schema(example = 1718000000, value_type = Option<i64>)]
    pub last_updated: Option<UnixTimestamp>,
    /// Opportunities grouped by pair, in arrival order within a pair.
    pub table:        BTreeMap<String, Vec<Opportunity>>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct IngestResult {
    #[schema(example = true)]
    pub stored: bool,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct IngestResponse {
    pub status: ResponseStatus,
    pub result: IngestResult,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct OpportunitiesResponse {
    pub status: ResponseStatus,
    pub result: OpportunitiesSnapshot,
}
