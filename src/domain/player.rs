use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::history::ActionRecord;
use crate::domain::PlayerUuid;
use crate::engine::errors::EngineError;

/// Статус игрока в текущем раунде.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PayStatus {
    /// Игрок в игре и ещё может получать запросы на действие.
    PayTillEnd,
    /// Игрок поставил весь стек – в банке, но больше не ходит.
    AllIn,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// У игрока нет фишек, в раунде он не участвует.
    Busted,
}

/// Игрок за местом: идентичность, стек, карманные карты, ставки и история за раунд.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub uuid: PlayerUuid,
    pub name: String,
    pub stack: Chips,
    /// Карманные карты: 0 или ровно 2.
    pub hole_cards: Vec<Card>,
    /// Ставка на текущей улице.
    pub current_bet: Chips,
    /// Сколько всего внесено в банк за раунд (включая анте).
    pub paid: Chips,
    pub status: PayStatus,
    /// Собственные действия игрока за раунд.
    pub action_histories: Vec<ActionRecord>,
}

impl Player {
    pub fn new(uuid: impl Into<PlayerUuid>, stack: Chips, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            stack,
            hole_cards: Vec::new(),
            current_bet: Chips::ZERO,
            paid: Chips::ZERO,
            status: PayStatus::PayTillEnd,
            action_histories: Vec::new(),
        }
    }

    /// Раздать карманные карты. Повторная раздача в том же раунде – ошибка.
    pub fn add_hole_cards(&mut self, cards: [Card; 2]) -> Result<(), EngineError> {
        if !self.hole_cards.is_empty() {
            return Err(EngineError::HoleCardsAlreadyDealt(self.uuid.clone()));
        }
        self.hole_cards.extend(cards);
        Ok(())
    }

    pub fn clear_hole_cards(&mut self) {
        self.hole_cards.clear();
    }

    /// Снять фишки со стека в банк.
    pub fn collect_bet(&mut self, amount: Chips) -> Result<(), EngineError> {
        self.stack = self
            .stack
            .checked_sub(amount)
            .ok_or(EngineError::NotEnoughChips(self.uuid.clone()))?;
        self.paid += amount;
        Ok(())
    }

    pub fn append_chips(&mut self, amount: Chips) {
        self.stack += amount;
    }

    /// В раунде и претендует на банк (не сфолдил, не вылетел).
    pub fn is_active(&self) -> bool {
        matches!(self.status, PayStatus::PayTillEnd | PayStatus::AllIn)
    }

    /// Может получать запросы на действие.
    pub fn is_waiting_ask(&self) -> bool {
        self.status == PayStatus::PayTillEnd
    }

    pub fn record_action(&mut self, record: ActionRecord) {
        self.action_histories.push(record);
    }

    /// Подготовить игрока к новому раунду: чистим карты, ставки и историю.
    pub fn reset_for_round(&mut self) {
        self.clear_hole_cards();
        self.action_histories.clear();
        self.current_bet = Chips::ZERO;
        self.paid = Chips::ZERO;
        self.status = if self.stack.is_zero() {
            PayStatus::Busted
        } else {
            PayStatus::PayTillEnd
        };
    }
}
