//! Turn validation and the tile-swap action.

use crate::error::{GameError, PlayError};
use crate::protocol::{GameState, PlayAction};
use crate::table::GameTable;
use tracing::{debug, info, instrument, warn};
use wordgame_tiles::{HAND_SIZE, Tile};

impl GameTable {
    /// Runs a play for its player and returns the player's new view.
    ///
    /// A rejected play leaves the table untouched and comes back as the
    /// snapshot's `error`. Only an unknown player fails outright.
    #[instrument(skip(self, action), fields(game_id = %self.game_id(), player_id = %action.player_id))]
    pub(crate) fn apply_play(&mut self, action: PlayAction) -> Result<GameState, GameError> {
        match self.execute_play(&action) {
            Ok(()) => {
                self.advance_turn();
                info!(
                    turn_counter = self.turn_counter(),
                    next_seat = self.current_seat(),
                    "Play accepted"
                );
                self.snapshot(&action.player_id, None)
            }
            Err(PlayOutcome::Rejected(error)) => {
                warn!(%error, "Play rejected");
                self.snapshot(&action.player_id, Some(error))
            }
            Err(PlayOutcome::Failed(error)) => Err(error),
        }
    }

    fn execute_play(&mut self, action: &PlayAction) -> Result<(), PlayOutcome> {
        self.validate_turn(action)?;
        if !action.swap {
            return Err(PlayError::PlacementUnsupported.into());
        }
        self.swap_tiles(action)
    }

    /// Checks that it is the player's turn and the tile count fits a hand.
    fn validate_turn(&self, action: &PlayAction) -> Result<(), PlayOutcome> {
        let player = self
            .player(&action.player_id)
            .ok_or(GameError::PlayerNotFound {
                player_id: action.player_id,
            })?;

        let expected = self.current_seat();
        if *player.seat() != expected {
            return Err(PlayError::OutOfTurn {
                expected,
                seat: *player.seat(),
            }
            .into());
        }

        if action.tiles.len() > HAND_SIZE {
            return Err(PlayError::TooManyTiles {
                count: action.tiles.len(),
                max: HAND_SIZE,
            }
            .into());
        }

        Ok(())
    }

    /// Exchanges the named tiles for fresh ones from the supply.
    ///
    /// Hand size and supply size are the same afterwards.
    fn swap_tiles(&mut self, action: &PlayAction) -> Result<(), PlayOutcome> {
        let count = action.tiles.len();
        let available = self.supply().len();
        if count > available {
            return Err(PlayError::NotEnoughTiles {
                requested: count,
                available,
            }
            .into());
        }

        let player = self
            .player_mut(&action.player_id)
            .ok_or(GameError::PlayerNotFound {
                player_id: action.player_id,
            })?;
        player.remove_tiles(&action.tiles)?;

        let fresh = match self.supply_mut().deal(count) {
            Ok(fresh) => fresh,
            Err(source) => {
                self.restore_hand(action);
                return Err(GameError::from(source).into());
            }
        };
        if let Some(player) = self.player_mut(&action.player_id) {
            player.receive(fresh);
        }
        self.supply_mut().return_tiles(action.tiles.iter().copied());

        debug!(
            swapped = %action.tiles.iter().map(Tile::to_string).collect::<String>(),
            supply_remaining = self.supply().len(),
            "Swapped tiles"
        );
        Ok(())
    }

    fn restore_hand(&mut self, action: &PlayAction) {
        if let Some(player) = self.player_mut(&action.player_id) {
            player.receive(action.tiles.iter().copied());
        }
    }
}

/// Internal split between a rule rejection and a hard failure.
#[derive(Debug)]
enum PlayOutcome {
    Rejected(PlayError),
    Failed(GameError),
}

impl From<PlayError> for PlayOutcome {
    fn from(error: PlayError) -> Self {
        PlayOutcome::Rejected(error)
    }
}

impl From<GameError> for PlayOutcome {
    fn from(error: GameError) -> Self {
        PlayOutcome::Failed(error)
    }
}
