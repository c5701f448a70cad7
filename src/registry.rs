//! Directory of live games, keyed by game id.

use crate::config::ServerConfig;
use crate::error::GameError;
use crate::game::{GameId, GameInstance};
use crate::player::PlayerId;
use crate::protocol::{GameState, GameSummary, JoinReceipt, PlayAction};
use derive_getters::Getters;
use derive_new::new;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use wordgame_tiles::TileSupply;

/// Knobs the registry applies to every game it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct RegistrySettings {
    /// Bound on each controller's request queue.
    queue_capacity: usize,
    /// Base seed for reproducible tile shuffles. Game `n` uses `seed + n`.
    seed: Option<u64>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            seed: None,
        }
    }
}

impl From<&ServerConfig> for RegistrySettings {
    fn from(config: &ServerConfig) -> Self {
        Self::new(*config.queue_capacity(), *config.seed())
    }
}

/// Manages all games.
///
/// Cheap to clone; clones share the same map. The map lock is held only for
/// the insert, lookup or removal itself, never across a game operation.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    games: Arc<Mutex<HashMap<GameId, Arc<GameInstance>>>>,
    settings: RegistrySettings,
    created: Arc<AtomicU64>,
}

impl GameRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new(settings: RegistrySettings) -> Self {
        info!("Creating game registry");
        Self {
            games: Arc::new(Mutex::new(HashMap::new())),
            settings,
            created: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Settings applied to new games.
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Creates and registers a new inactive game.
    #[instrument(skip(self))]
    pub async fn create(&self) -> Arc<GameInstance> {
        let ordinal = self.created.fetch_add(1, Ordering::Relaxed);
        let supply = match self.settings.seed {
            Some(seed) => TileSupply::seeded(seed.wrapping_add(ordinal)),
            None => TileSupply::from_entropy(),
        };
        let game = Arc::new(GameInstance::new(
            GameId::new(),
            supply,
            self.settings.queue_capacity,
        ));

        self.games.lock().await.insert(game.id(), Arc::clone(&game));
        info!(game_id = %game.id(), "Created game");
        game
    }

    /// Looks up a game.
    #[instrument(skip(self))]
    pub async fn get(&self, game_id: GameId) -> Result<Arc<GameInstance>, GameError> {
        let game = self.games.lock().await.get(&game_id).cloned();
        game.ok_or_else(|| {
            debug!(%game_id, "Game not found");
            GameError::GameNotFound { game_id }
        })
    }

    /// Number of registered games.
    pub async fn len(&self) -> usize {
        self.games.lock().await.len()
    }

    /// Returns true if no games are registered.
    pub async fn is_empty(&self) -> bool {
        self.games.lock().await.is_empty()
    }

    /// Lists every registered game.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<GameSummary> {
        let games: Vec<Arc<GameInstance>> = self.games.lock().await.values().cloned().collect();
        let mut summaries = Vec::with_capacity(games.len());
        for game in games {
            summaries.push(GameSummary::new(
                game.id(),
                game.is_active().await,
                game.player_count().await,
            ));
        }
        info!(count = summaries.len(), "Listed games");
        summaries
    }

    /// Removes every game and waits for their controllers to stop.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        let games: Vec<Arc<GameInstance>> = {
            let mut map = self.games.lock().await;
            map.drain().map(|(_, game)| game).collect()
        };
        info!(count = games.len(), "Shutting down games");
        for game in games {
            game.shutdown().await;
        }
    }

    /// Creates a game and returns its id.
    pub async fn create_game(&self) -> GameId {
        self.create().await.id()
    }

    /// Seats `player_name` in the game.
    #[instrument(skip(self))]
    pub async fn join_game(
        &self,
        game_id: GameId,
        player_name: &str,
    ) -> Result<JoinReceipt, GameError> {
        self.get(game_id).await?.join(player_name).await
    }

    /// Starts the game.
    #[instrument(skip(self))]
    pub async fn start_game(&self, game_id: GameId) -> Result<(), GameError> {
        self.get(game_id).await?.start().await
    }

    /// State of the game as seen by `player_id`.
    #[instrument(skip(self))]
    pub async fn query_state(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Result<GameState, GameError> {
        self.get(game_id).await?.query(player_id).await
    }

    /// Submits a play. Rule violations come back inside the state.
    #[instrument(skip(self, action), fields(player_id = %action.player_id))]
    pub async fn submit_play(
        &self,
        game_id: GameId,
        action: PlayAction,
    ) -> Result<GameState, GameError> {
        let state = self.get(game_id).await?.play(action).await?;
        if let Some(error) = state.error() {
            warn!(%game_id, %error, "Play rejected");
        }
        Ok(state)
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(RegistrySettings::default())
    }
}
