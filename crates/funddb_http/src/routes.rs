//! Route table and handlers.
//!
//! # Endpoints
//!
//! - `POST /v1/campaigns/create` - create a campaign
//! - `POST /v1/campaigns/:pda/contributors/create` - add a contributor
//! - `DELETE /v1/campaigns/:pda/contributors/:pk/delete` - remove contributors by `pk`
//! - `GET /v1/campaigns/:pda/contributors` - list contributors
//! - `GET /v1/campaigns/:pda/is_refundable` - refundability predicate
//! - `GET /v1/health` - liveness check
//!
//! Path segments that fail to decode take the same 500 JSON error path as an
//! unresolved campaign.

use crate::error::HttpError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use funddb_core::{
    core_version, sanitize_log_field, Campaign, CampaignService, Contributor, ContributorService,
    NewContributor, SqliteCampaignRepository, SqliteContributorRepository,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Body of `POST /v1/campaigns/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignRequest {
    pub pda: String,
}

/// Body of `POST /v1/campaigns/:pda/contributors/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContributorRequest {
    pub pda: String,
    pub pk: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RefundableResponse {
    pub is_refundable: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/campaigns/create", post(create_campaign))
        .route(
            "/v1/campaigns/:pda/contributors/create",
            post(create_contributor),
        )
        .route(
            "/v1/campaigns/:pda/contributors/:pk/delete",
            delete(delete_contributor),
        )
        .route("/v1/campaigns/:pda/contributors", get(list_contributors))
        .route("/v1/campaigns/:pda/is_refundable", get(is_refundable))
        .layer(middleware::from_fn(log_requests))
        .with_state(Arc::new(state))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: core_version(),
    })
}

async fn create_campaign(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Campaign>, HttpError> {
    let request: CreateCampaignRequest = serde_json::from_slice(&body)?;

    let campaign = state
        .run(move |conn| {
            CampaignService::new(SqliteCampaignRepository::new(conn)).create_campaign(&request.pda)
        })
        .await?;

    Ok(Json(campaign))
}

async fn create_contributor(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<Contributor>, HttpError> {
    let Path(campaign_pda) = path?;
    let request: CreateContributorRequest = serde_json::from_slice(&body)?;
    let contributor = NewContributor::new(request.pda, request.pk);

    let created = state
        .run(move |conn| {
            ContributorService::new(SqliteContributorRepository::new(conn))
                .create_contributor(&campaign_pda, &contributor)
        })
        .await?;

    Ok(Json(created))
}

async fn delete_contributor(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<MessageResponse>, HttpError> {
    let Path((campaign_pda, pk)) = path?;
    state
        .run(move |conn| {
            ContributorService::new(SqliteContributorRepository::new(conn))
                .delete_contributor(&campaign_pda, &pk)
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Contributor deleted".to_string(),
    }))
}

async fn list_contributors(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Contributor>>, HttpError> {
    let Path(campaign_pda) = path?;
    let contributors = state
        .run(move |conn| {
            ContributorService::new(SqliteContributorRepository::new(conn))
                .list_contributors(&campaign_pda)
        })
        .await?;

    Ok(Json(contributors))
}

async fn is_refundable(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RefundableResponse>, HttpError> {
    let Path(campaign_pda) = path?;
    let is_refundable = state
        .run(move |conn| {
            ContributorService::new(SqliteContributorRepository::new(conn))
                .is_refundable(&campaign_pda)
        })
        .await?;

    Ok(Json(RefundableResponse { is_refundable }))
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = sanitize_log_field(request.uri().path());

    let response = next.run(request).await;

    info!(
        "event=http_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
