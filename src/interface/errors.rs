use thiserror::Error;

use crate::domain::PlayerUuid;
use crate::engine::EngineError;

/// Ошибки протокола между движком и реализациями игроков.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Идентичность уже привязана к реализации. Фатально для настройки матча.
    #[error("Игрок {0} уже зарегистрирован")]
    DuplicateRegistration(PlayerUuid),

    /// Адресат не зарегистрирован – ошибка программы.
    #[error("Игрок {0} не зарегистрирован")]
    UnknownRecipient(PlayerUuid),

    /// Игрок ответил вне `valid_actions` или не ответил.
    /// Диспетчер гасит её сам, превращая ответ в фолд.
    #[error("Нарушение протокола игроком {uuid}: {reason}")]
    ProtocolViolation { uuid: PlayerUuid, reason: String },

    #[error("Запрос решения нельзя рассылать всем")]
    BroadcastDecision,

    #[error(transparent)]
    Engine(#[from] EngineError),
}
