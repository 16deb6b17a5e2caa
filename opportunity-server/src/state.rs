use {
    crate::opportunity::service::Service as OpportunityService,
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
};

pub struct Store {
    pub opportunity_service: OpportunityService,
    pub metrics_recorder:    PrometheusHandle,
}

impl Store {
    pub fn new(metrics_recorder: PrometheusHandle) -> Self {
        Self {
            opportunity_service: OpportunityService::new(),
            metrics_recorder,
        }
    }
}
