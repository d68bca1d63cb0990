use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::domain::LoanApplication;
use super::parameters::FundParameters;
use super::repository::{DecisionId, DecisionRecord, DecisionRepository, DecisionSummaryView};
use super::service::UnderwritingService;
use crate::error::AppError;

const RECENT_DECISION_LIMIT: usize = 25;

/// Router builder exposing application intake, decision lookup and fund parameters.
pub fn underwriting_router<R>(service: Arc<UnderwritingService<R>>) -> Router
where
    R: DecisionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/underwriting/applications",
            post(submit_handler::<R>),
        )
        .route(
            "/api/v1/underwriting/decisions",
            get(recent_decisions_handler::<R>),
        )
        .route(
            "/api/v1/underwriting/decisions/:decision_id",
            get(decision_handler::<R>),
        )
        .route(
            "/api/v1/fund/parameters",
            get(parameters_handler::<R>).put(update_parameters_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    Json(application): Json<LoanApplication>,
) -> Result<(StatusCode, Json<DecisionRecord>), AppError>
where
    R: DecisionRepository + 'static,
{
    let record = service.submit(application)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn recent_decisions_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
) -> Result<Json<Vec<DecisionSummaryView>>, AppError>
where
    R: DecisionRepository + 'static,
{
    let records = service.recent(RECENT_DECISION_LIMIT)?;
    Ok(Json(records.iter().map(|record| record.summary_view()).collect()))
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    Path(decision_id): Path<String>,
) -> Result<Json<DecisionRecord>, AppError>
where
    R: DecisionRepository + 'static,
{
    Ok(Json(service.get(&DecisionId(decision_id))?))
}

pub(crate) async fn parameters_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
) -> Json<FundParameters>
where
    R: DecisionRepository + 'static,
{
    Json(service.parameters())
}

pub(crate) async fn update_parameters_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    Json(parameters): Json<FundParameters>,
) -> Result<Json<FundParameters>, AppError>
where
    R: DecisionRepository + 'static,
{
    Ok(Json(service.update_parameters(parameters)?))
}
