use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::history::ClubHistoryEntry;
use super::linker::{HistoryLinker, LinkReport, LinkerOptions};
use super::repository::{ClubDirectory, DirectoryError};
use crate::config::MatcherConfig;
use crate::error::AppError;
use crate::matching::{normalize, ClubCandidate, ClubId, MatchResult};

/// Shared handler state: the directory plus default matcher thresholds.
pub struct ClubRouterState<D> {
    pub directory: Arc<D>,
    pub matcher: MatcherConfig,
}

impl<D> Clone for ClubRouterState<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            matcher: self.matcher.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub query: String,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub query: String,
    pub normalized_query: String,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct BestMatchRequest {
    pub query: String,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct BestMatchResponse {
    pub query: String,
    pub best_match: Option<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub entries: Vec<ClubHistoryEntry>,
    #[serde(default)]
    pub link_threshold: Option<f64>,
    #[serde(default)]
    pub max_suggestions: Option<usize>,
}

/// Router builder exposing club matching and history linking endpoints.
pub fn club_router<D>(directory: Arc<D>, matcher: MatcherConfig) -> Router
where
    D: ClubDirectory + 'static,
{
    Router::new()
        .route("/api/v1/matches", post(match_handler::<D>))
        .route("/api/v1/matches/best", post(best_match_handler::<D>))
        .route("/api/v1/history/link", post(link_handler::<D>))
        .route("/api/v1/clubs/{club_id}", get(club_handler::<D>))
        .with_state(ClubRouterState { directory, matcher })
}

pub(crate) async fn match_handler<D>(
    State(state): State<ClubRouterState<D>>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError>
where
    D: ClubDirectory + 'static,
{
    let threshold = resolve_threshold(request.threshold, state.matcher.match_threshold)?;
    let limit = resolve_limit(request.limit, state.matcher.max_results)?;
    let matches = state.directory.search(&request.query, threshold, limit)?;

    Ok(Json(MatchResponse {
        normalized_query: normalize(&request.query),
        query: request.query,
        matches,
    }))
}

pub(crate) async fn best_match_handler<D>(
    State(state): State<ClubRouterState<D>>,
    Json(request): Json<BestMatchRequest>,
) -> Result<Json<BestMatchResponse>, AppError>
where
    D: ClubDirectory + 'static,
{
    let threshold = resolve_threshold(request.threshold, state.matcher.best_match_threshold)?;
    let best_match = state.directory.best_match(&request.query, threshold)?;

    Ok(Json(BestMatchResponse {
        query: request.query,
        best_match,
    }))
}

pub(crate) async fn link_handler<D>(
    State(state): State<ClubRouterState<D>>,
    Json(request): Json<LinkRequest>,
) -> Result<Json<LinkReport>, AppError>
where
    D: ClubDirectory + 'static,
{
    let link_threshold =
        resolve_threshold(request.link_threshold, state.matcher.best_match_threshold)?;
    let defaults = LinkerOptions::default();
    let options = LinkerOptions {
        link_threshold,
        suggestion_threshold: state.matcher.match_threshold.min(link_threshold),
        max_suggestions: request.max_suggestions.unwrap_or(defaults.max_suggestions),
    };

    let clubs = state.directory.all()?;
    let linker = HistoryLinker::new(&clubs, options)?;
    Ok(Json(linker.link(&request.entries)))
}

pub(crate) async fn club_handler<D>(
    State(state): State<ClubRouterState<D>>,
    Path(club_id): Path<String>,
) -> Result<Json<ClubCandidate>, AppError>
where
    D: ClubDirectory + 'static,
{
    state
        .directory
        .get(&ClubId(club_id))?
        .map(Json)
        .ok_or(AppError::Directory(DirectoryError::NotFound))
}

fn resolve_threshold(requested: Option<f64>, default: f64) -> Result<f64, AppError> {
    match requested {
        Some(value) if value.is_finite() && (0.0..=1.0).contains(&value) => Ok(value),
        Some(value) => Err(AppError::InvalidRequest(format!(
            "threshold must be within [0, 1], got {value}"
        ))),
        None => Ok(default),
    }
}

fn resolve_limit(requested: Option<usize>, default: usize) -> Result<usize, AppError> {
    match requested {
        Some(0) => Err(AppError::InvalidRequest(
            "limit must be a positive integer".to_string(),
        )),
        Some(limit) => Ok(limit),
        None => Ok(default),
    }
}
