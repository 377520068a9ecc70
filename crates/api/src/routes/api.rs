use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use common::{
    DerivedPoint, Error, PriceSample, Result, SignalAveraging, ZeroLagAlgorithm,
    ZeroLagMacdParams,
};
use indicator::{compute_zero_lag_macd, detect_crossovers, Crossover, IndicatorSummary};

use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/params", get(get_params))
        .route("/api/series", get(get_series))
        .route("/api/zlmacd", get(get_zlmacd).post(post_zlmacd))
}

type ApiError = (StatusCode, Json<Value>);

pub(crate) fn error_body(err: &Error) -> Value {
    json!({ "error": err.to_string() })
}

fn reject(err: Error) -> ApiError {
    let status = if err.is_caller_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(%status, error = %err, "Indicator request rejected");
    (status, Json(error_body(&err)))
}

// ─── Parameters ───────────────────────────────────────────────────────────────

/// Partial parameter set sent by the form. Missing fields fall back to the
/// server defaults.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamsOverride {
    pub fast_length: Option<i64>,
    pub slow_length: Option<i64>,
    pub signal_length: Option<i64>,
    pub macd_ema_length: Option<i64>,
    pub algorithm: Option<ZeroLagAlgorithm>,
    pub signal_averaging: Option<SignalAveraging>,
    pub show_dots: Option<bool>,
}

impl ParamsOverride {
    pub fn apply(self, base: ZeroLagMacdParams) -> ZeroLagMacdParams {
        ZeroLagMacdParams {
            fast_length: self.fast_length.unwrap_or(base.fast_length),
            slow_length: self.slow_length.unwrap_or(base.slow_length),
            signal_length: self.signal_length.unwrap_or(base.signal_length),
            macd_ema_length: self.macd_ema_length.unwrap_or(base.macd_ema_length),
            algorithm: self.algorithm.unwrap_or(base.algorithm),
            signal_averaging: self.signal_averaging.unwrap_or(base.signal_averaging),
            show_dots: self.show_dots.unwrap_or(base.show_dots),
        }
    }
}

async fn get_params(State(state): State<AppState>) -> Json<ZeroLagMacdParams> {
    Json(state.defaults)
}

// ─── Series ───────────────────────────────────────────────────────────────────

async fn get_series(State(state): State<AppState>) -> Result<Json<Vec<PriceSample>>, ApiError> {
    state.source.load().await.map(Json).map_err(reject)
}

// ─── Indicator ────────────────────────────────────────────────────────────────

/// Full indicator output for one parameter set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorResponse {
    pub params: ZeroLagMacdParams,
    pub points: Vec<DerivedPoint>,
    pub summary: IndicatorSummary,
    pub crossovers: Vec<Crossover>,
}

impl IndicatorResponse {
    pub(crate) fn compute(samples: &[PriceSample], params: ZeroLagMacdParams) -> Result<Self> {
        let points = compute_zero_lag_macd(samples, &params)?;
        Ok(Self {
            params,
            summary: IndicatorSummary::from_points(&points),
            crossovers: detect_crossovers(&points),
            points,
        })
    }
}

async fn get_zlmacd(
    State(state): State<AppState>,
    Query(overrides): Query<ParamsOverride>,
) -> Result<Json<IndicatorResponse>, ApiError> {
    let params = overrides.apply(state.defaults);
    let samples = state.source.load().await.map_err(reject)?;
    IndicatorResponse::compute(&samples, params)
        .map(Json)
        .map_err(reject)
}

#[derive(Debug, Deserialize)]
struct ComputeRequest {
    #[serde(default)]
    params: ParamsOverride,
    /// Caller-supplied series; the configured source is used when absent.
    samples: Option<Vec<PriceSample>>,
}

async fn post_zlmacd(
    State(state): State<AppState>,
    Json(body): Json<ComputeRequest>,
) -> Result<Json<IndicatorResponse>, ApiError> {
    let params = body.params.apply(state.defaults);
    let samples = match body.samples {
        Some(samples) => samples,
        None => state.source.load().await.map_err(reject)?,
    };
    IndicatorResponse::compute(&samples, params)
        .map(Json)
        .map_err(reject)
}
