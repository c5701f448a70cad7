//! The mutable state of one game: board, supply, players and turn counter.
//!
//! Before a game starts the table sits behind the game's lobby lock. At start
//! it is moved into the game's controller task, which is its only owner from
//! then on.

use crate::error::{GameError, PlayError};
use crate::game::GameId;
use crate::player::{Player, PlayerId};
use crate::protocol::{GameState, JoinReceipt};
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use wordgame_tiles::{Board, HAND_SIZE, TileSupply};

#[derive(Debug)]
pub(crate) struct GameTable {
    game_id: GameId,
    board: Board,
    supply: TileSupply,
    players: HashMap<PlayerId, Player>,
    seat_order: Vec<PlayerId>,
    turn_counter: usize,
}

impl GameTable {
    pub(crate) fn new(game_id: GameId, supply: TileSupply) -> Self {
        Self {
            game_id,
            board: Board::standard(),
            supply,
            players: HashMap::new(),
            seat_order: Vec::new(),
            turn_counter: 0,
        }
    }

    pub(crate) fn game_id(&self) -> GameId {
        self.game_id
    }

    pub(crate) fn player_count(&self) -> usize {
        self.players.len()
    }

    pub(crate) fn turn_counter(&self) -> usize {
        self.turn_counter
    }

    pub(crate) fn supply(&self) -> &TileSupply {
        &self.supply
    }

    pub(crate) fn supply_mut(&mut self) -> &mut TileSupply {
        &mut self.supply
    }

    pub(crate) fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub(crate) fn player_mut(&mut self, player_id: &PlayerId) -> Option<&mut Player> {
        self.players.get_mut(player_id)
    }

    /// Seat whose turn it is. Only meaningful once players are seated.
    pub(crate) fn current_seat(&self) -> usize {
        match self.players.len() {
            0 => 0,
            n => self.turn_counter % n,
        }
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turn_counter += 1;
    }

    /// Seats a new player at the next free seat. Capacity and phase checks
    /// belong to the caller.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub(crate) fn seat_player(&mut self, name: String) -> JoinReceipt {
        let seat = self.players.len();
        let player = Player::new(name, seat);
        let player_id = *player.id();
        self.players.insert(player_id, player);
        debug!(%player_id, seat, "Seated player");
        JoinReceipt::new(player_id, seat)
    }

    /// Deals a full hand to every player and fixes the seat order.
    ///
    /// Checks the supply first so a failure leaves every hand untouched.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub(crate) fn deal_opening_hands(&mut self) -> Result<(), GameError> {
        let needed = HAND_SIZE * self.players.len();
        if needed > self.supply.len() {
            return Err(GameError::Supply {
                source: wordgame_tiles::TileError::NotEnoughTiles {
                    requested: needed,
                    available: self.supply.len(),
                },
            });
        }

        let mut seated: Vec<&mut Player> = self.players.values_mut().collect();
        seated.sort_by_key(|p| *p.seat());
        let mut order = Vec::with_capacity(seated.len());
        for player in seated {
            let hand = self.supply.deal(HAND_SIZE)?;
            player.receive(hand);
            order.push(*player.id());
        }
        self.seat_order = order;

        info!(
            players = self.players.len(),
            supply_remaining = self.supply.len(),
            "Dealt opening hands"
        );
        Ok(())
    }

    /// Snapshot for `player_id`, exposing only that player's hand.
    pub(crate) fn snapshot(
        &self,
        player_id: &PlayerId,
        error: Option<PlayError>,
    ) -> Result<GameState, GameError> {
        let requester = self
            .players
            .get(player_id)
            .ok_or(GameError::PlayerNotFound {
                player_id: *player_id,
            })?;

        let players = self
            .seat_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .map(Player::summary)
            .collect();

        Ok(GameState::new(
            self.game_id,
            players,
            self.board.clone(),
            self.current_seat(),
            self.turn_counter,
            self.supply.len(),
            requester.hand().clone(),
            error,
        ))
    }

    /// Tiles accounted for across supply, hands and board.
    pub(crate) fn tile_total(&self) -> usize {
        self.supply.len()
            + self.players.values().map(|p| p.hand().len()).sum::<usize>()
            + self.board.placed_tiles().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordgame_tiles::STANDARD_TILE_COUNT;

    fn table_with(names: &[&str]) -> (GameTable, Vec<PlayerId>) {
        let mut table = GameTable::new(GameId::new(), TileSupply::seeded(11));
        let ids = names
            .iter()
            .map(|n| *table.seat_player(n.to_string()).player_id())
            .collect();
        (table, ids)
    }

    #[test]
    fn test_seats_follow_join_order() {
        let (table, ids) = table_with(&["A", "B", "C"]);
        for (seat, id) in ids.iter().enumerate() {
            assert_eq!(*table.player(id).unwrap().seat(), seat);
        }
    }

    #[test]
    fn test_deal_gives_seven_each_and_conserves_tiles() {
        let (mut table, ids) = table_with(&["A", "B", "C", "D"]);
        table.deal_opening_hands().expect("Deal failed");
        for id in &ids {
            assert_eq!(table.player(id).unwrap().hand().len(), HAND_SIZE);
        }
        assert_eq!(table.supply().len(), STANDARD_TILE_COUNT - 4 * HAND_SIZE);
        assert_eq!(table.tile_total(), STANDARD_TILE_COUNT);
    }

    #[test]
    fn test_snapshot_is_seat_ordered_and_hides_other_hands() {
        let (mut table, ids) = table_with(&["A", "B", "C"]);
        table.deal_opening_hands().expect("Deal failed");
        let state = table.snapshot(&ids[1], None).expect("Snapshot failed");
        let names: Vec<&str> = state.players().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(state.hand(), table.player(&ids[1]).unwrap().hand());
        assert_eq!(*state.current_turn_seat(), 0);
        assert_eq!(state.tile_total(), STANDARD_TILE_COUNT);
    }

    #[test]
    fn test_deal_fixes_seat_order_from_join_order() {
        let (mut table, ids) = table_with(&["A", "B", "C", "D"]);
        table.deal_opening_hands().expect("Deal failed");
        assert_eq!(table.seat_order, ids);
    }

    #[test]
    fn test_snapshot_unknown_player() {
        let (table, _) = table_with(&["A", "B"]);
        let stranger = PlayerId::new();
        assert_eq!(
            table.snapshot(&stranger, None).unwrap_err(),
            GameError::PlayerNotFound {
                player_id: stranger
            }
        );
    }

    #[test]
    fn test_current_seat_wraps() {
        let (mut table, _) = table_with(&["A", "B", "C"]);
        for _ in 0..4 {
            table.advance_turn();
        }
        assert_eq!(table.current_seat(), 1);
    }
}
