use {
    crate::{
        config::{
            Config,
            CorsConfig,
            RunOptions,
        },
        metrics_api::metric_layer,
        opportunity,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    anyhow::Result,
    axum::{
        extract::{
            self,
            rejection::JsonRejection,
        },
        http::{
            header,
            HeaderValue,
            Method,
            StatusCode,
        },
        middleware,
        response::{
            IntoResponse,
            Response,
        },
        routing::get,
        Json,
        Router,
    },
    clap::crate_version,
    opportunity_api_types::{
        opportunity::{
            IngestResponse,
            IngestResult,
            OpportunitiesResponse,
            OpportunitiesSnapshot,
            Opportunity,
            OpportunityCreate,
        },
        routes,
        ErrorBodyResponse,
        HealthResponse,
        ResponseStatus,
    },
    std::{
        any::Any,
        sync::{
            atomic::Ordering,
            Arc,
        },
    },
    tower_http::{
        catch_panic::CatchPanicLayer,
        cors::{
            AllowOrigin,
            CorsLayer,
        },
    },
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Opportunity Receiver API {}", crate_version!())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// The request body could not be parsed
    BadParameters(String),
    /// The request body did not contain any opportunity
    InvalidPayload,
    /// Processing the request failed unexpectedly
    InternalError(String),
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::InvalidPayload => (StatusCode::BAD_REQUEST, "Invalid payload".to_string()),
            RestError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::BadParameters(rejection.body_text())
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(msg) = err.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = err.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        "Unknown error".to_string()
    };
    tracing::error!(error = %details, "Request handler panicked");
    RestError::InternalError(details).into_response()
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

async fn log_request(req: extract::Request, next: middleware::Next) -> Response {
    tracing::info!(method = %req.method(), path = req.uri().path(), "Received request");
    next.run(req).await
}

pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    if config.allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

// Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
#[derive(OpenApi)]
#[openapi(
paths(
opportunity::api::get_dashboard,
opportunity::api::post_opportunities,
opportunity::api::get_opportunities,
),
components(
schemas(
OpportunityCreate,
Opportunity,
OpportunitiesSnapshot,
OpportunitiesResponse,
IngestResult,
IngestResponse,
HealthResponse,
ResponseStatus,
ErrorBodyResponse,
),
responses(
ErrorBodyResponse,
),
),
tags(
(name = "Opportunity Receiver", description = "Opportunity Receiver collects opportunities pushed by the \
collectors, keeps the latest one per pair and venues, and serves them to the dashboard.")
)
)]
struct ApiDoc;

pub fn build_router(store: Arc<Store>, cors: CorsLayer) -> Router {
    Router::new()
        .merge(Redoc::with_url(routes::DOCS, ApiDoc::openapi()))
        .route(
            routes::OPEN_API,
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(opportunity::api::get_routes())
        .route(routes::ROOT, get(root))
        .route(routes::LIVENESS, get(live))
        .layer(middleware::from_fn(log_request))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(metric_layer())
        .layer(cors)
        .with_state(store)
}

pub async fn start_api(run_options: RunOptions, config: Config, store: Arc<Store>) -> Result<()> {
    let app = build_router(store, cors_layer(&config.cors)?);

    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    tracing::info!(
        listen_addr = %run_options.server.listen_addr,
        "Starting API server..."
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down API server...");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        axum_prometheus::metrics_exporter_prometheus::PrometheusBuilder,
    };

    #[test]
    fn test_rest_error_messages() {
        assert_eq!(
            RestError::InvalidPayload.to_status_and_message(),
            (StatusCode::BAD_REQUEST, "Invalid payload".to_string())
        );
        assert_eq!(
            RestError::BadParameters("expected a sequence".to_string()).to_status_and_message(),
            (
                StatusCode::BAD_REQUEST,
                "Bad parameters: expected a sequence".to_string()
            )
        );
        assert_eq!(
            RestError::InternalError("boom".to_string())
                .to_status_and_message()
                .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://dashboard.example\n".to_string()],
        };
        assert!(cors_layer(&config).is_err());
    }

    async fn spawn_with_cors(config: &CorsConfig) -> String {
        let store = Arc::new(Store::new(
            PrometheusBuilder::new().build_recorder().handle(),
        ));
        spawn_router(build_router(store, cors_layer(config).unwrap())).await
    }

    async fn allowed_origin(url: &str, origin: &str) -> Option<String> {
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, url)
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .send()
            .await
            .unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|value| value.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_cors_allows_only_listed_origins() {
        let base = spawn_with_cors(&CorsConfig {
            allowed_origins: vec![
                "https://dashboard.example".to_string(),
                "https://www.dashboard.example".to_string(),
            ],
        })
        .await;
        let url = format!("{}/dashboard", base);
        assert_eq!(
            allowed_origin(&url, "https://www.dashboard.example").await,
            Some("https://www.dashboard.example".to_string())
        );
        assert_eq!(allowed_origin(&url, "https://other.example").await, None);

        let response = reqwest::Client::new()
            .get(format!("{}/live", base))
            .header(header::ORIGIN, "https://other.example")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_cors_without_origins_allows_any_origin() {
        let base = spawn_with_cors(&CorsConfig::default()).await;
        assert_eq!(
            allowed_origin(&format!("{}/dashboard", base), "https://other.example").await,
            Some("*".to_string())
        );
    }

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/dashboard"));
        assert!(doc.paths.paths.contains_key("/opportunities"));
    }
}
