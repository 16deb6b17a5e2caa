use {
    serde::{
        Deserialize,
        Serialize,
    },
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

pub mod opportunity;

pub type UnixTimestamp = i64;

#[derive(ToResponse, ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[response(description = "An error occurred processing the request")]
pub struct ErrorBodyResponse {
    pub error: String,
}

/// Status tag carried by every successful response envelope.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Received,
    Success,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: ResponseStatus,
}

pub mod routes {
    pub const ROOT: &str = "/";
    pub const LIVENESS: &str = "/live";
    pub const DASHBOARD: &str = "/dashboard";
    pub const OPPORTUNITIES: &str = "/opportunities";
    pub const DOCS: &str = "/docs";
    pub const OPEN_API: &str = "/docs/openapi.json";
    pub const METRICS: &str = "/metrics";
}
