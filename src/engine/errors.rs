use crate::domain::{PlayerUuid, SeatIndex};

use thiserror::Error;

/// Ошибки движка раунда и доменной модели.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("В колоде не хватает карт: нужно {requested}, осталось {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },

    #[error("На борде уже 5 карт")]
    BoardFull,

    #[error("Игроку {0} уже розданы карманные карты")]
    HoleCardsAlreadyDealt(PlayerUuid),

    #[error("Игрок {0} уже сидит за столом")]
    DuplicateSeat(PlayerUuid),

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Недопустимый id карты: {0}")]
    InvalidCardId(u8),

    #[error("У игрока {0} недостаточно фишек")]
    NotEnoughChips(PlayerUuid),

    #[error("Недостаточно игроков с фишками для раунда")]
    NotEnoughPlayers,

    #[error("Раунд уже завершён")]
    NoActiveRound,

    #[error("Недопустимое действие: {0}")]
    IllegalAction(String),

    #[error("Некорректный конфиг матча: {0}")]
    InvalidConfig(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
