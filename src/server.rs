//! HTTP API over the game registry.

use crate::config::ServerConfig;
use crate::error::{ErrorKind, GameError};
use crate::game::GameId;
use crate::player::PlayerId;
use crate::protocol::{GameState, GameSummary, PlayAction};
use crate::registry::GameRegistry;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};
use wordgame_tiles::{Coordinate, Tile};

/// Response to a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameResponse {
    /// New game.
    pub game_id: GameId,
}

/// Body of a join request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGameRequest {
    /// Game to join.
    pub game_id: GameId,
    /// Display name.
    pub player_name: String,
}

/// Response to a successful join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGameResponse {
    /// Joined game.
    pub game_id: GameId,
    /// Id the player uses for every later request.
    pub player_id: PlayerId,
    /// Zero-based turn position.
    pub seat: usize,
}

/// Body of a start request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    /// Game to start.
    pub game_id: GameId,
}

/// Body of a state request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateRequest {
    /// Game to inspect.
    pub game_id: GameId,
    /// Player whose hand is returned.
    pub player_id: PlayerId,
}

/// Body of a play request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    /// Game to play in.
    pub game_id: GameId,
    /// Player taking the turn.
    pub player_id: PlayerId,
    /// Tiles to swap.
    pub tiles: Vec<Tile>,
    /// Defaults to a swap.
    #[serde(default = "default_swap")]
    pub swap: bool,
    /// First square of a placed word.
    #[serde(default)]
    pub start_pos: Option<Coordinate>,
    /// Last square of a placed word.
    #[serde(default)]
    pub end_pos: Option<Coordinate>,
    /// Letters chosen for blanks.
    #[serde(default)]
    pub blanks: Vec<Tile>,
}

fn default_swap() -> bool {
    true
}

impl From<PlayRequest> for PlayAction {
    fn from(req: PlayRequest) -> Self {
        let mut action = PlayAction::new(req.player_id, req.tiles, req.swap);
        action.start = req.start_pos;
        action.end = req.end_pos;
        action.blanks = req.blanks;
        action
    }
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Error category.
    pub kind: ErrorKind,
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            kind,
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the API router.
#[instrument(skip(registry))]
pub fn router(registry: GameRegistry) -> Router {
    Router::new()
        .route("/game/create", post(create_game))
        .route("/game/join", post(join_game))
        .route("/game/start", post(start_game))
        .route("/game/state", post(game_state))
        .route("/game/play", post(play))
        .route("/games", get(list_games))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(registry)
}

fn log_request(req: Request<Body>) -> Request<Body> {
    debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

/// Binds the configured address and serves until Ctrl-C, then stops every
/// game controller.
#[instrument(skip_all, fields(addr = %config.bind_addr()))]
pub async fn serve(config: &ServerConfig, registry: GameRegistry) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Server ready at http://{}/", listener.local_addr()?);

    axum::serve(listener, router(registry.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    registry.shutdown().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[instrument(skip(registry))]
async fn create_game(State(registry): State<GameRegistry>) -> (StatusCode, Json<CreateGameResponse>) {
    let game_id = registry.create_game().await;
    (StatusCode::CREATED, Json(CreateGameResponse { game_id }))
}

#[instrument(skip(registry, req), fields(game_id = %req.game_id, player_name = %req.player_name))]
async fn join_game(
    State(registry): State<GameRegistry>,
    Json(req): Json<JoinGameRequest>,
) -> Result<Json<JoinGameResponse>, GameError> {
    let receipt = registry.join_game(req.game_id, &req.player_name).await?;
    Ok(Json(JoinGameResponse {
        game_id: req.game_id,
        player_id: *receipt.player_id(),
        seat: *receipt.seat(),
    }))
}

#[instrument(skip(registry, req), fields(game_id = %req.game_id))]
async fn start_game(
    State(registry): State<GameRegistry>,
    Json(req): Json<StartGameRequest>,
) -> Result<&'static str, GameError> {
    registry.start_game(req.game_id).await?;
    Ok("OK")
}

#[instrument(skip(registry, req), fields(game_id = %req.game_id, player_id = %req.player_id))]
async fn game_state(
    State(registry): State<GameRegistry>,
    Json(req): Json<GameStateRequest>,
) -> Result<Json<GameState>, GameError> {
    let state = registry.query_state(req.game_id, req.player_id).await?;
    Ok(Json(state))
}

#[instrument(skip(registry, req), fields(game_id = %req.game_id, player_id = %req.player_id))]
async fn play(
    State(registry): State<GameRegistry>,
    Json(req): Json<PlayRequest>,
) -> Result<Json<GameState>, GameError> {
    let game_id = req.game_id;
    let state = registry.submit_play(game_id, req.into()).await?;
    Ok(Json(state))
}

#[instrument(skip(registry))]
async fn list_games(State(registry): State<GameRegistry>) -> Json<Vec<GameSummary>> {
    Json(registry.list().await)
}
