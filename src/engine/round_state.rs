use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Street;
use crate::domain::history::ActionHistories;
use crate::domain::table::Table;
use crate::domain::SeatIndex;

/// Изменяемое состояние раунда. Его получает каждый message builder,
/// наружу уходит только иммутабельная проекция (`RoundStateView`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    pub round_count: u32,
    pub small_blind_amount: Chips,
    pub ante: Chips,
    pub street: Street,
    /// Сколько ждущих игроков подряд согласились с текущей ставкой.
    pub agree_num: usize,
    /// Чей ход. `None`, когда спрашивать некого (раунд закрыт или идёт докрутка).
    pub next_player: Option<SeatIndex>,
    /// Минимальный прирост рейза на текущей улице.
    pub min_raise: Chips,
    pub table: Table,
    pub deck: Deck,
    /// Действия всех игроков за раунд в порядке их совершения.
    pub history: ActionHistories,
}

impl RoundState {
    pub fn new(
        round_count: u32,
        small_blind_amount: Chips,
        ante: Chips,
        table: Table,
        deck: Deck,
    ) -> Self {
        Self {
            round_count,
            small_blind_amount,
            ante,
            street: Street::Preflop,
            agree_num: 0,
            next_player: None,
            min_raise: small_blind_amount.doubled(),
            table,
            deck,
            history: ActionHistories::new(),
        }
    }

    pub fn big_blind_amount(&self) -> Chips {
        self.small_blind_amount.doubled()
    }

    /// Текущий банк: всё, что внесено за раунд и ещё не выплачено.
    pub fn pot(&self) -> Chips {
        self.table.seats.total_paid()
    }

    /// Максимальная ставка на улице – уровень, до которого нужно уравнивать.
    pub fn current_bet(&self) -> Chips {
        self.table
            .seats
            .players()
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    pub fn community_cards(&self) -> &[Card] {
        self.table.community_cards()
    }

    pub fn is_finished(&self) -> bool {
        self.street == Street::Showdown
    }
}
