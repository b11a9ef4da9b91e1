use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::SeatIndex;
use crate::engine::errors::EngineError;

/// Места за столом: индекс вектора = позиция.
/// После рассадки порядок не меняется, игроки не удаляются посреди раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seats {
    players: Vec<Player>,
}

impl Seats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Посадить игрока на следующее свободное место.
    pub fn sitdown(&mut self, player: Player) -> Result<SeatIndex, EngineError> {
        if self.position_of(&player.uuid).is_some() {
            return Err(EngineError::DuplicateSeat(player.uuid));
        }
        self.players.push(player);
        Ok(self.players.len() - 1)
    }

    pub fn size(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn get(&self, seat: SeatIndex) -> Result<&Player, EngineError> {
        self.players.get(seat).ok_or(EngineError::InvalidSeat(seat))
    }

    pub fn get_mut(&mut self, seat: SeatIndex) -> Result<&mut Player, EngineError> {
        self.players.get_mut(seat).ok_or(EngineError::InvalidSeat(seat))
    }

    pub fn position_of(&self, uuid: &str) -> Option<SeatIndex> {
        self.players.iter().position(|p| p.uuid == uuid)
    }

    pub fn find(&self, uuid: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.uuid == uuid)
    }

    /// Не сфолдившие и не вылетевшие.
    pub fn count_active_players(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Те, кого ещё можно спрашивать (не фолд, не олл-ин).
    pub fn count_ask_wait_players(&self) -> usize {
        self.players.iter().filter(|p| p.is_waiting_ask()).count()
    }

    /// Игроки, у которых остались фишки.
    pub fn count_players_with_chips(&self) -> usize {
        self.players.iter().filter(|p| !p.stack.is_zero()).count()
    }

    /// Сумма стеков всех игроков (без банка).
    pub fn total_stack(&self) -> Chips {
        self.players.iter().map(|p| p.stack).sum()
    }

    /// Сумма всех взносов в банк текущего раунда.
    pub fn total_paid(&self) -> Chips {
        self.players.iter().map(|p| p.paid).sum()
    }
}
