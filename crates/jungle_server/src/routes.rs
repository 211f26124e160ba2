//! JSON-over-HTTP routes.

use crate::service::{AiTurn, DEFAULT_SESSION, GameService, MoveView, ServiceError};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use jungle_game::{Difficulty, GameMode, Player, RuleError, SessionSnapshot};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{instrument, warn};

/// Body of `/api/init` and `/api/close`, and query of `/api/state`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    /// Target session; the default session when omitted.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body of `/api/new_game`.
#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    /// Target session.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Seat assignment.
    #[serde(default)]
    pub mode: Option<GameMode>,
    /// AI strength.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

/// Body of `/api/valid_moves`.
#[derive(Debug, Deserialize)]
pub struct ValidMovesRequest {
    /// Target session.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Source row.
    pub from_row: usize,
    /// Source column.
    pub from_col: usize,
    /// Side asking.
    pub player: Player,
}

/// Body of `/api/move`.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    /// Target session.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Source row.
    pub from_row: usize,
    /// Source column.
    pub from_col: usize,
    /// Destination row.
    pub to_row: usize,
    /// Destination column.
    pub to_col: usize,
}

/// Body of `/api/ai_move`.
#[derive(Debug, Default, Deserialize)]
pub struct AiMoveRequest {
    /// Target session.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Strength for this move only; the session's strength when omitted.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

/// Response of `/api/valid_moves`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidMovesResponse {
    /// Legal moves of the requested piece.
    pub moves: Vec<MoveView>,
}

/// JSON body that may be left out entirely.
///
/// An empty body yields `T::default()`; anything else must parse as `T`.
#[derive(Debug)]
pub struct OptionalJson<T>(pub T);

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(IntoResponse::into_response)?;
        Ok(Self(value))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Rule(RuleError::GameAlreadyOver) => StatusCode::CONFLICT,
            ServiceError::Rule(_) => StatusCode::BAD_REQUEST,
            ServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self, "Request rejected");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

fn session_id(requested: &Option<String>) -> &str {
    requested.as_deref().unwrap_or(DEFAULT_SESSION)
}

/// Builds the API router over `service`.
pub fn router(service: GameService) -> Router {
    Router::new()
        .route("/api/init", post(init_game))
        .route("/api/new_game", post(new_game))
        .route("/api/valid_moves", post(valid_moves))
        .route("/api/move", post(apply_move))
        .route("/api/ai_move", post(ai_move))
        .route("/api/state", get(state))
        .route("/api/close", post(close_session))
        .with_state(service)
}

#[instrument(skip(service))]
async fn init_game(
    State(service): State<GameService>,
    OptionalJson(req): OptionalJson<SessionRequest>,
) -> Json<SessionSnapshot> {
    Json(service.init_game(session_id(&req.session_id)).await)
}

#[instrument(skip(service))]
async fn new_game(
    State(service): State<GameService>,
    OptionalJson(req): OptionalJson<NewGameRequest>,
) -> Json<SessionSnapshot> {
    Json(
        service
            .new_game(session_id(&req.session_id), req.mode, req.difficulty)
            .await,
    )
}

#[instrument(skip(service))]
async fn valid_moves(
    State(service): State<GameService>,
    Json(req): Json<ValidMovesRequest>,
) -> Result<Json<ValidMovesResponse>, ServiceError> {
    let moves = service
        .legal_moves(
            session_id(&req.session_id),
            req.from_row,
            req.from_col,
            req.player,
        )
        .await?;
    Ok(Json(ValidMovesResponse { moves }))
}

#[instrument(skip(service))]
async fn apply_move(
    State(service): State<GameService>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<SessionSnapshot>, ServiceError> {
    let snapshot = service
        .apply_move(
            session_id(&req.session_id),
            (req.from_row, req.from_col),
            (req.to_row, req.to_col),
        )
        .await?;
    Ok(Json(snapshot))
}

#[instrument(skip(service))]
async fn ai_move(
    State(service): State<GameService>,
    OptionalJson(req): OptionalJson<AiMoveRequest>,
) -> Result<Json<AiTurn>, ServiceError> {
    let turn = service
        .ai_move(session_id(&req.session_id), req.difficulty)
        .await?;
    Ok(Json(turn))
}

#[instrument(skip(service))]
async fn state(
    State(service): State<GameService>,
    Query(req): Query<SessionRequest>,
) -> Result<Json<SessionSnapshot>, ServiceError> {
    Ok(Json(service.state(session_id(&req.session_id)).await?))
}

#[instrument(skip(service))]
async fn close_session(
    State(service): State<GameService>,
    OptionalJson(req): OptionalJson<SessionRequest>,
) -> Result<StatusCode, ServiceError> {
    service.close_session(session_id(&req.session_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
