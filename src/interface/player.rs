use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::hand::Street;
use crate::domain::history::ActionHistories;
use crate::engine::actions::{ActionDecision, ValidAction};
use crate::interface::message::{ActionView, GameInformation, RoundStateView, SeatView};

/// Отказ реализации игрока ответить на запрос.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// Например, удалённый бот не ответил или транспорт оборвался.
    #[error("игрок не ответил: {0}")]
    NoResponse(String),
}

/// Контракт, который обязана выполнять любая подключаемая стратегия.
///
/// Один метод на тип сообщения. Ответ возвращает только `declare_action`,
/// остальные методы – уведомления, по умолчанию пустые.
///
/// Реализация не должна блокироваться бесконечно: движок синхронно ждёт ответа,
/// таймауты – забота транспорта, который стоит за реализацией.
pub trait PokerPlayer {
    fn receive_game_start_message(&mut self, _game_information: &GameInformation) {}

    fn receive_round_start_message(&mut self, _hole_card: &[Card], _seats: &[SeatView]) {}

    fn receive_street_start_message(&mut self, _street: Street, _round_state: &RoundStateView) {}

    /// Решение игрока. Должно входить в `valid_actions`, иначе засчитывается фолд.
    fn declare_action(
        &mut self,
        hole_card: &[Card],
        valid_actions: &[ValidAction],
        round_state: &RoundStateView,
        action_histories: &ActionHistories,
    ) -> Result<ActionDecision, PlayerError>;

    fn receive_game_update_message(
        &mut self,
        _action: &ActionView,
        _round_state: &RoundStateView,
        _action_histories: &ActionHistories,
    ) {
    }

    fn receive_round_result_message(&mut self, _winners: &[SeatView], _round_state: &RoundStateView) {}

    fn receive_game_result_message(&mut self, _game_information: &GameInformation) {}
}
