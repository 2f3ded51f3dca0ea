//! RPC request handlers.

use crate::error::RpcError;
use crate::identity::actor_from_headers;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use camara_chamber::{Chamber, MemberPanel};
use camara_session::{Ballot, Choice, NewProposal, Proposal, TallySnapshot};
use camara_types::ProposalId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub type AppState = Arc<Chamber>;

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub roster_size: u32,
    pub stats: HashMap<&'static str, u64>,
}

pub async fn health(State(chamber): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        roster_size: chamber.roster_size(),
        stats: chamber.stats(),
    })
}

// ── Agenda ───────────────────────────────────────────────────────────────

pub async fn submit_proposal(
    State(chamber): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<NewProposal>, JsonRejection>,
) -> Result<(StatusCode, Json<Proposal>), RpcError> {
    let Json(new) = body?;
    let actor = actor_from_headers(&headers)?;
    let proposal = chamber.submit_proposal(&actor, new)?;
    Ok((StatusCode::CREATED, Json(proposal)))
}

pub async fn list_drafts(State(chamber): State<AppState>) -> Json<Vec<Proposal>> {
    Json(chamber.list_draft_proposals())
}

pub async fn open_proposal(State(chamber): State<AppState>) -> Json<Option<Proposal>> {
    Json(chamber.list_open_proposal())
}

#[derive(Deserialize)]
pub struct ClosedQuery {
    pub limit: Option<usize>,
}

pub async fn recently_closed(
    State(chamber): State<AppState>,
    query: Result<Query<ClosedQuery>, QueryRejection>,
) -> Result<Json<Vec<Proposal>>, RpcError> {
    let Query(query) = query?;
    Ok(Json(chamber.list_recently_closed(query.limit)))
}

pub async fn get_proposal(
    State(chamber): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Proposal>, RpcError> {
    let Path(id) = path?;
    Ok(Json(chamber.proposal(ProposalId::new(id))?))
}

// ── Voting window ────────────────────────────────────────────────────────

pub async fn open_voting(
    State(chamber): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Proposal>, RpcError> {
    let Path(id) = path?;
    let actor = actor_from_headers(&headers)?;
    Ok(Json(chamber.open_voting(&actor, ProposalId::new(id))?))
}

pub async fn close_voting(
    State(chamber): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Proposal>, RpcError> {
    let Path(id) = path?;
    let actor = actor_from_headers(&headers)?;
    Ok(Json(chamber.close_voting(&actor, ProposalId::new(id))?))
}

// ── Ballots ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CastRequest {
    pub choice: Choice,
}

pub async fn cast_vote(
    State(chamber): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<CastRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Ballot>), RpcError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let actor = actor_from_headers(&headers)?;
    let ballot = chamber.cast_vote(&actor, ProposalId::new(id), req.choice)?;
    Ok((StatusCode::CREATED, Json(ballot)))
}

pub async fn member_panel(
    State(chamber): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MemberPanel>, RpcError> {
    let actor = actor_from_headers(&headers)?;
    Ok(Json(chamber.member_panel(&actor)))
}

// ── Public screen ────────────────────────────────────────────────────────

pub async fn tally(
    State(chamber): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<TallySnapshot>, RpcError> {
    let Path(id) = path?;
    Ok(Json(chamber.tally_snapshot(ProposalId::new(id))?))
}

/// Snapshot of whatever the public screen should show, or `null`.
pub async fn display(
    State(chamber): State<AppState>,
) -> Result<Json<Option<TallySnapshot>>, RpcError> {
    let Some(proposal) = chamber.current_display_proposal() else {
        return Ok(Json(None));
    };
    Ok(Json(Some(chamber.tally_snapshot(proposal.id)?)))
}
