//! Per-game controller: the single task that owns a started game.
//!
//! Callers never touch a started game's table. They push a [`Command`] onto
//! the controller's queue together with a one-shot reply slot and wait for
//! the answer. The controller drains the queue in arrival order, one command
//! at a time, until every handle to it is dropped.

use crate::error::GameError;
use crate::game::GameId;
use crate::player::PlayerId;
use crate::protocol::{GameState, PlayAction};
use crate::table::GameTable;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

type Reply = oneshot::Sender<Result<GameState, GameError>>;

/// A request queued for a controller.
enum Command {
    /// Read-only snapshot for a player.
    Query { player_id: PlayerId, reply: Reply },
    /// A turn to validate and apply.
    Play { action: PlayAction, reply: Reply },
}

/// Cloneable sending side of a game's controller queue.
#[derive(Debug, Clone)]
pub(crate) struct ControllerHandle {
    game_id: GameId,
    queue: mpsc::Sender<Command>,
}

impl ControllerHandle {
    /// Moves `table` into a new controller task.
    ///
    /// `capacity` bounds the queue; senders wait when it is full.
    #[instrument(skip(table), fields(game_id = %table.game_id()))]
    pub(crate) fn spawn(table: GameTable, capacity: usize) -> (Self, JoinHandle<()>) {
        let (queue, commands) = mpsc::channel(capacity.max(1));
        let game_id = table.game_id();
        let worker = tokio::spawn(run(table, commands));
        info!("Spawned game controller");
        (Self { game_id, queue }, worker)
    }

    /// Requests a snapshot for `player_id`.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub async fn query(&self, player_id: PlayerId) -> Result<GameState, GameError> {
        self.request(|reply| Command::Query { player_id, reply }).await
    }

    /// Submits a play and waits for the resulting snapshot.
    #[instrument(skip(self, action), fields(game_id = %self.game_id, player_id = %action.player_id))]
    pub async fn play(&self, action: PlayAction) -> Result<GameState, GameError> {
        self.request(|reply| Command::Play { action, reply }).await
    }

    async fn request(
        &self,
        command: impl FnOnce(Reply) -> Command,
    ) -> Result<GameState, GameError> {
        let stopped = GameError::ControllerStopped {
            game_id: self.game_id,
        };
        let (reply, response) = oneshot::channel();
        self.queue
            .send(command(reply))
            .await
            .map_err(|_| stopped.clone())?;
        response.await.map_err(|_| stopped)?
    }
}

#[instrument(skip_all, fields(game_id = %table.game_id()))]
async fn run(mut table: GameTable, mut commands: mpsc::Receiver<Command>) {
    debug!("Controller loop running");
    while let Some(command) = commands.recv().await {
        let (result, reply) = match command {
            Command::Query { player_id, reply } => {
                debug!(%player_id, "Serving state query");
                (table.snapshot(&player_id, None), reply)
            }
            Command::Play { action, reply } => {
                debug!(player_id = %action.player_id, swap = action.swap, "Serving play");
                (table.apply_play(action), reply)
            }
        };
        if reply.send(result).is_err() {
            warn!("Requester dropped before the reply was delivered");
        }
    }
    info!(
        turn_counter = table.turn_counter(),
        supply_remaining = table.supply().len(),
        tile_total = table.tile_total(),
        "Controller stopped"
    );
}
