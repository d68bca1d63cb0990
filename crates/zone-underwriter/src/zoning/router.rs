use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{SuburbSignals, Zone};
use super::repository::{ClassificationRecord, ZoningRepository};
use super::service::ZoningService;
use super::views::{MarketAnalysisView, ZoneDistributionView, ZoneMetricsView};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct BatchClassifyRequest {
    pub suburbs: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchUpdateRequest {
    pub suburbs: Vec<SuburbSignals>,
}

/// Router builder exposing classification, analysis and batch endpoints.
pub fn zoning_router<R>(service: Arc<ZoningService<R>>) -> Router
where
    R: ZoningRepository + 'static,
{
    Router::new()
        .route("/api/v1/zoning/classify/:suburb", get(classify_handler::<R>))
        .route(
            "/api/v1/zoning/market-analysis/:suburb",
            get(market_analysis_handler::<R>),
        )
        .route("/api/v1/zoning/metrics/:zone", get(zone_metrics_handler::<R>))
        .route("/api/v1/zoning/property", post(update_signals_handler::<R>))
        .route(
            "/api/v1/zoning/real-time/metrics",
            get(distribution_handler::<R>),
        )
        .route(
            "/api/v1/zoning/batch/classify",
            post(batch_classify_handler::<R>),
        )
        .route(
            "/api/v1/zoning/batch/update",
            post(batch_update_handler::<R>),
        )
        .route("/api/v1/zoning/refresh", post(refresh_handler::<R>))
        .with_state(service)
}

pub(crate) async fn classify_handler<R>(
    State(service): State<Arc<ZoningService<R>>>,
    Path(suburb): Path<String>,
) -> Result<Json<ClassificationRecord>, AppError>
where
    R: ZoningRepository + 'static,
{
    Ok(Json(service.classify(&suburb)?))
}

pub(crate) async fn market_analysis_handler<R>(
    State(service): State<Arc<ZoningService<R>>>,
    Path(suburb): Path<String>,
) -> Result<Json<MarketAnalysisView>, AppError>
where
    R: ZoningRepository + 'static,
{
    Ok(Json(service.market_analysis(&suburb)?))
}

pub(crate) async fn zone_metrics_handler<R>(
    State(service): State<Arc<ZoningService<R>>>,
    Path(zone): Path<String>,
) -> Result<Json<ZoneMetricsView>, AppError>
where
    R: ZoningRepository + 'static,
{
    let zone = Zone::parse(&zone)
        .ok_or_else(|| AppError::Input(format!("unknown zone '{zone}'")))?;
    Ok(Json(service.zone_metrics(zone)?))
}

pub(crate) async fn update_signals_handler<R>(
    State(service): State<Arc<ZoningService<R>>>,
    Json(signals): Json<SuburbSignals>,
) -> Result<Json<Value>, AppError>
where
    R: ZoningRepository + 'static,
{
    let suburb = signals.suburb.clone();
    service.ingest(signals)?;
    Ok(Json(json!({
        "message": "suburb signals updated",
        "suburb": suburb,
    })))
}

pub(crate) async fn distribution_handler<R>(
    State(service): State<Arc<ZoningService<R>>>,
) -> Result<Json<ZoneDistributionView>, AppError>
where
    R: ZoningRepository + 'static,
{
    Ok(Json(service.distribution()?))
}

pub(crate) async fn batch_classify_handler<R>(
    State(service): State<Arc<ZoningService<R>>>,
    Json(request): Json<BatchClassifyRequest>,
) -> Result<Json<Vec<ClassificationRecord>>, AppError>
where
    R: ZoningRepository + 'static,
{
    Ok(Json(service.classify_batch(&request.suburbs)?))
}

pub(crate) async fn batch_update_handler<R>(
    State(service): State<Arc<ZoningService<R>>>,
    Json(request): Json<BatchUpdateRequest>,
) -> Result<Json<Value>, AppError>
where
    R: ZoningRepository + 'static,
{
    let count = service.ingest_batch(request.suburbs)?;
    Ok(Json(json!({
        "message": "batch update completed",
        "updated": count,
    })))
}

pub(crate) async fn refresh_handler<R>(
    State(service): State<Arc<ZoningService<R>>>,
) -> Result<Json<Vec<ClassificationRecord>>, AppError>
where
    R: ZoningRepository + 'static,
{
    Ok(Json(service.refresh_all()?))
}
