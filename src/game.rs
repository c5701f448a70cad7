//! A single game instance and its join/start lifecycle.

use crate::controller::ControllerHandle;
use crate::error::GameError;
use crate::player::PlayerId;
use crate::protocol::{GameState, JoinReceipt, PlayAction};
use crate::table::GameTable;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use wordgame_tiles::TileSupply;

/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a game can seat.
pub const MAX_PLAYERS: usize = 4;

/// Opaque unique identifier for a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Allocates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the game is in its lifecycle.
#[derive(Debug)]
enum Phase {
    /// Accepting joins; the table is still owned here.
    Waiting(GameTable),
    /// Started; the table lives inside the controller task.
    Running {
        controller: ControllerHandle,
        worker: JoinHandle<()>,
    },
    /// Started and since shut down.
    Stopped,
}

#[derive(Debug)]
struct Lobby {
    phase: Phase,
    player_count: usize,
}

/// One game: a lobby lock guarding join/start, then a controller.
///
/// The lock is only ever held for the join, start or handle lookup itself.
/// State queries and plays go through the controller queue without holding
/// it.
#[derive(Debug)]
pub struct GameInstance {
    id: GameId,
    queue_capacity: usize,
    lobby: Mutex<Lobby>,
}

impl GameInstance {
    /// Creates an inactive game with an empty table.
    #[instrument(skip(supply), fields(game_id = %id))]
    pub(crate) fn new(id: GameId, supply: TileSupply, queue_capacity: usize) -> Self {
        Self {
            id,
            queue_capacity,
            lobby: Mutex::new(Lobby {
                phase: Phase::Waiting(GameTable::new(id, supply)),
                player_count: 0,
            }),
        }
    }

    /// The game's id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// True once the game has started. Never reverts.
    pub async fn is_active(&self) -> bool {
        !matches!(self.lobby.lock().await.phase, Phase::Waiting(_))
    }

    /// Number of seated players.
    pub async fn player_count(&self) -> usize {
        self.lobby.lock().await.player_count
    }

    /// Seats a new player.
    ///
    /// Seats are handed out in the order joins acquire the lobby lock, so
    /// concurrent joins always produce seats `0..n` with no gaps.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub async fn join(&self, name: &str) -> Result<JoinReceipt, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::BlankName);
        }

        let mut lobby = self.lobby.lock().await;
        let Phase::Waiting(table) = &mut lobby.phase else {
            warn!("Join rejected, game already started");
            return Err(GameError::AlreadyStarted);
        };
        if table.player_count() >= MAX_PLAYERS {
            warn!("Join rejected, game is full");
            return Err(GameError::GameFull { max: MAX_PLAYERS });
        }

        let receipt = table.seat_player(name.to_string());
        lobby.player_count += 1;
        info!(player_id = %receipt.player_id(), seat = receipt.seat(), "Player joined");
        Ok(receipt)
    }

    /// Starts the game: deals opening hands and launches the controller.
    ///
    /// Fails without side effects if the game is already active or has too
    /// few players.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub async fn start(&self) -> Result<(), GameError> {
        let mut lobby = self.lobby.lock().await;
        let mut table = match std::mem::replace(&mut lobby.phase, Phase::Stopped) {
            Phase::Waiting(table) => table,
            other => {
                lobby.phase = other;
                warn!("Start rejected, game already started");
                return Err(GameError::AlreadyStarted);
            }
        };

        let count = table.player_count();
        if count < MIN_PLAYERS {
            lobby.phase = Phase::Waiting(table);
            warn!(count, "Start rejected, not enough players");
            return Err(GameError::NotEnoughPlayers {
                min: MIN_PLAYERS,
                count,
            });
        }

        if let Err(error) = table.deal_opening_hands() {
            lobby.phase = Phase::Waiting(table);
            return Err(error);
        }

        let (controller, worker) = ControllerHandle::spawn(table, self.queue_capacity);
        lobby.phase = Phase::Running { controller, worker };
        info!(players = count, "Game started");
        Ok(())
    }

    /// Snapshot of the game for `player_id`.
    pub async fn query(&self, player_id: PlayerId) -> Result<GameState, GameError> {
        self.controller().await?.query(player_id).await
    }

    /// Submits a play and returns the player's resulting view.
    pub async fn play(&self, action: PlayAction) -> Result<GameState, GameError> {
        self.controller().await?.play(action).await
    }

    /// Clones the controller handle; unstarted games are rejected outright.
    async fn controller(&self) -> Result<ControllerHandle, GameError> {
        match &self.lobby.lock().await.phase {
            Phase::Running { controller, .. } => Ok(controller.clone()),
            Phase::Waiting(_) => {
                debug!(game_id = %self.id, "Request for a game that has not started");
                Err(GameError::NotStarted)
            }
            Phase::Stopped => Err(GameError::ControllerStopped { game_id: self.id }),
        }
    }

    /// Closes the controller queue and waits for the controller to finish
    /// whatever is already queued.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub(crate) async fn shutdown(&self) {
        let worker = {
            let mut lobby = self.lobby.lock().await;
            match std::mem::replace(&mut lobby.phase, Phase::Stopped) {
                Phase::Running { controller, worker } => {
                    drop(controller);
                    Some(worker)
                }
                Phase::Waiting(table) => {
                    lobby.phase = Phase::Waiting(table);
                    None
                }
                Phase::Stopped => None,
            }
        };

        if let Some(worker) = worker
            && let Err(error) = worker.await
        {
            warn!(%error, "Controller task ended abnormally");
        }
    }
}
