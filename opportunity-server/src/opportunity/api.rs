use {
    super::{
        entities,
        service::ingest_opportunities::IngestOpportunitiesInput,
    },
    crate::{
        api::RestError,
        state::Store,
    },
    axum::{
        extract::{
            rejection::JsonRejection,
            State,
        },
        routing::get,
        Json,
        Router,
    },
    opportunity_api_types::{
        opportunity::{
            IngestResponse,
            OpportunitiesResponse,
            OpportunityCreate,
        },
        routes,
        ErrorBodyResponse,
        HealthResponse,
        ResponseStatus,
    },
    std::sync::Arc,
    time::OffsetDateTime,
};

/// Check that the receiver is up.
#[utoipa::path(get, path = "/dashboard", responses(
    (status = 200, description = "The receiver is up", body = HealthResponse),
),)]
pub async fn get_dashboard() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: ResponseStatus::Ok,
    })
}

/// Submit a batch of opportunities.
///
/// Each opportunity replaces the stored one with the same pair, short venue and long venue, or is
/// appended to its pair. Opportunities without a pair are ignored.
#[utoipa::path(post, path = "/dashboard", request_body = Vec<OpportunityCreate>, responses(
    (status = 200, description = "The batch was stored", body = IngestResponse),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn post_opportunities(
    State(store): State<Arc<Store>>,
    payload: Result<Json<Vec<OpportunityCreate>>, JsonRejection>,
) -> Result<Json<IngestResponse>, RestError> {
    let Json(opportunities) = payload?;
    if opportunities.is_empty() {
        return Err(RestError::InvalidPayload);
    }

    tracing::debug!(count = opportunities.len(), "Received opportunities");
    let summary = store
        .opportunity_service
        .ingest_opportunities(IngestOpportunitiesInput {
            opportunities: opportunities
                .into_iter()
                .map(entities::OpportunityCreate::from)
                .collect(),
            received_at:   OffsetDateTime::now_utc(),
        })
        .await;
    Ok(Json(IngestResponse {
        status: ResponseStatus::Received,
        result: summary.into(),
    }))
}

/// Fetch the latest opportunities grouped by pair.
#[utoipa::path(get, path = "/opportunities", responses(
    (status = 200, description = "The whole opportunity table", body = OpportunitiesResponse),
),)]
pub async fn get_opportunities(State(store): State<Arc<Store>>) -> Json<OpportunitiesResponse> {
    let snapshot = store.opportunity_service.get_opportunities().await;
    Json(OpportunitiesResponse {
        status: ResponseStatus::Success,
        result: snapshot.into(),
    })
}

pub fn get_routes() -> Router<Arc<Store>> {
    Router::new()
        .route(
            routes::DASHBOARD,
            get(get_dashboard).post(post_opportunities),
        )
        .route(routes::OPPORTUNITIES, get(get_opportunities))
}
