use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::player::Player;
use crate::domain::seats::Seats;
use crate::domain::SeatIndex;
use crate::engine::errors::EngineError;

/// Стол: места, общие карты и позиция дилерской кнопки.
/// Живёт весь матч, борд чистится в начале каждого раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub seats: Seats,
    /// Общие карты борда (0–5 карт).
    community_cards: Vec<Card>,
    /// Индекс дилерской кнопки.
    pub dealer_button: SeatIndex,
}

impl Table {
    pub const MAX_COMMUNITY_CARDS: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seats(seats: Seats) -> Self {
        Self {
            seats,
            community_cards: Vec::new(),
            dealer_button: 0,
        }
    }

    pub fn sitdown(&mut self, player: Player) -> Result<SeatIndex, EngineError> {
        self.seats.sitdown(player)
    }

    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }

    pub fn add_community_card(&mut self, card: Card) -> Result<(), EngineError> {
        if self.community_cards.len() >= Self::MAX_COMMUNITY_CARDS {
            return Err(EngineError::BoardFull);
        }
        self.community_cards.push(card);
        Ok(())
    }

    /// Новый раунд: пустой борд, у игроков сброшены карты/ставки/история.
    pub fn reset(&mut self) {
        self.community_cards.clear();
        for player in self.seats.players_mut() {
            player.reset_for_round();
        }
    }
}
