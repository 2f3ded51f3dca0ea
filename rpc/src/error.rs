//! RPC error types.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use camara_session::SessionError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("missing identity header: {0}")]
    MissingIdentity(&'static str),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("server error: {0}")]
    Server(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Session(e) => match e {
                SessionError::Unauthorized(_) | SessionError::VoterInactive(_) => {
                    StatusCode::FORBIDDEN
                }
                SessionError::ProposalNotFound(_) | SessionError::VoterNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                SessionError::VotingNotOpen(_)
                | SessionError::WindowExpired(_)
                | SessionError::DuplicateVote { .. } => StatusCode::CONFLICT,
                SessionError::InvalidProposal(_) => StatusCode::UNPROCESSABLE_ENTITY,
            },
            Self::MissingIdentity(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Session(e) => e.kind(),
            Self::MissingIdentity(_) => "missing_identity",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Server(_) => "server_error",
        }
    }
}

impl From<JsonRejection> for RpcError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for RpcError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for RpcError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
