// Axum API Server Module
//
// Purpose: JSON surface over the suitability engine for the map-click and
// weather-dashboard callers. The engine is CPU-only and sub-millisecond, so
// single evaluations run inline; batches go through rayon on a blocking thread.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::error::InvalidInputError;
use crate::suitability::{
    compute_suitability_with, evaluate_batch, find_sample_site, BatchSummary, FallbackDefaults,
    RatingDisplay, ScoringProfile, SiteInput, SiteReadings, SuitabilityResult,
};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub profile: Arc<ScoringProfile>,
    pub fallbacks: FallbackDefaults,
}

impl AppState {
    /// Wrap an (already validated) profile for sharing across handlers
    pub fn new(profile: ScoringProfile, fallbacks: FallbackDefaults) -> Self {
        Self {
            profile: Arc::new(profile),
            fallbacks,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            profile: Arc::new(ScoringProfile::canonical()),
            fallbacks: FallbackDefaults::default(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Active scoring profile
        .route("/api/profile", get(get_profile))

        // Suitability endpoints
        .route("/api/suitability", post(assess_site))
        .route("/api/suitability/batch", post(assess_batch))
        .route("/api/suitability/sample/:name", get(assess_sample_site))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SiteAssessment {
    pub input: SiteInput,
    /// Fields filled from fallback defaults
    pub substituted: Vec<&'static str>,
    pub result: SuitabilityResult,
    pub rating_display: RatingDisplay,
}

impl SiteAssessment {
    fn new(input: SiteInput, substituted: Vec<&'static str>, result: SuitabilityResult) -> Self {
        let rating_display = result.rating.display();
        Self {
            input,
            substituted,
            result,
            rating_display,
        }
    }
}

/// `axum::Json` whose rejection is reported as a JSON `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
struct AppJson<T>(T);

/// Sites stay untyped until each is parsed on its own
#[derive(Debug, Deserialize)]
struct BatchSuitabilityRequest {
    sites: Vec<serde_json::Value>,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_profile(State(state): State<AppState>) -> Json<ScoringProfile> {
    Json(state.profile.as_ref().clone())
}

/// Assess one site
///
/// POST /api/suitability
/// Body: SiteReadings (missing fields other than latitude fall back to defaults)
async fn assess_site(
    State(state): State<AppState>,
    AppJson(body): AppJson<serde_json::Value>,
) -> Result<Json<SiteAssessment>, AppError> {
    let readings = SiteReadings::from_json(body)?;
    let resolved = readings.resolve(&state.fallbacks)?;
    let result = compute_suitability_with(&state.profile, &resolved.input)?;

    tracing::info!(
        latitude = resolved.input.latitude_deg,
        score = result.overall_score,
        substituted = resolved.substituted.len(),
        "assessed site"
    );

    Ok(Json(SiteAssessment::new(resolved.input, resolved.substituted, result)))
}

/// Assess many sites (heat-map refresh)
///
/// POST /api/suitability/batch
/// Body: { "sites": [SiteReadings, ...] }
///
/// Sites that fail to parse, resolve or validate are reported in place with
/// `error` and `field`; they never abort the batch.
async fn assess_batch(
    State(state): State<AppState>,
    AppJson(req): AppJson<BatchSuitabilityRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let start = std::time::Instant::now();
    tracing::info!("Batch suitability check for {} sites", req.sites.len());

    let resolved: Vec<Result<_, InvalidInputError>> = req
        .sites
        .into_iter()
        .map(|site| SiteReadings::from_json(site)?.resolve(&state.fallbacks))
        .collect();

    // Only fully-resolved sites go to rayon; keep their positions for reassembly
    let inputs: Vec<SiteInput> = resolved
        .iter()
        .filter_map(|r| r.as_ref().ok().map(|site| site.input))
        .collect();

    let profile = Arc::clone(&state.profile);
    let computed = tokio::task::spawn_blocking(move || evaluate_batch(&profile, &inputs))
        .await
        .map_err(|e| AppError::Internal(format!("Rayon task failed: {}", e)))?;

    let mut computed = computed.into_iter();
    let mut outcomes: Vec<Result<SuitabilityResult, InvalidInputError>> = Vec::with_capacity(resolved.len());
    let mut results: Vec<serde_json::Value> = Vec::with_capacity(resolved.len());

    for entry in resolved {
        let outcome = match entry {
            Ok(site) => {
                let evaluated = computed
                    .next()
                    .ok_or_else(|| AppError::Internal("Batch result count mismatch".to_string()))?;
                evaluated.map(|result| (site, result))
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok((site, result)) => {
                let assessment = SiteAssessment::new(site.input, site.substituted, result.clone());
                results.push(serde_json::to_value(&assessment)
                    .map_err(|e| AppError::Internal(e.to_string()))?);
                outcomes.push(Ok(result));
            }
            Err(e) => {
                results.push(serde_json::json!({ "error": e.to_string(), "field": e.field() }));
                outcomes.push(Err(e));
            }
        }
    }

    let aggregate = BatchSummary::from_results(&outcomes);
    tracing::info!("  Batch complete in {:?} ({} failed)", start.elapsed(), aggregate.failed);

    Ok(Json(serde_json::json!({
        "results": results,
        "aggregate": aggregate,
    })))
}

/// Assess a hardcoded sample site
///
/// GET /api/suitability/sample/:name
async fn assess_sample_site(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let site = find_sample_site(&name)
        .ok_or_else(|| AppError::NotFound(format!("Sample site '{}' not found", name)))?;
    let result = compute_suitability_with(&state.profile, &site.input)?;

    Ok(Json(serde_json::json!({
        "site": {
            "name": site.name,
            "code": site.code,
            "latitude": site.input.latitude_deg,
            "longitude": site.longitude_deg,
        },
        "assessment": SiteAssessment::new(site.input, Vec::new(), result),
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    InvalidInput(InvalidInputError),
    /// Body was not JSON, or not the expected envelope
    BadBody { status: StatusCode, message: String },
    NotFound(String),
    Internal(String),
}

impl From<InvalidInputError> for AppError {
    fn from(e: InvalidInputError) -> Self {
        AppError::InvalidInput(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::InvalidInput(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({ "error": e.to_string(), "field": e.field() }),
            ),
            AppError::BadBody { status, message } => (status, serde_json::json!({ "error": message })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}
