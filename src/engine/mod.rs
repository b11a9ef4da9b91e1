//! Движок раунда: допустимые действия, ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневое состояние: `RoundState`
//! Основные операции:
//!   - `start_round` – запустить новый раунд
//!   - `apply_action` – применить решение игрока
//!   - `resolve_round` – разделить банк и закрыть раунд
//!
//! Движок ничего не знает о доставке: он возвращает `Envelope` с адресатом,
//! отправкой занимается вызывающий код.

pub mod actions;
pub mod errors;
pub mod positions;
pub mod round;
pub mod round_state;
pub mod showdown;
pub mod side_pots;
pub mod validation;

pub use actions::{Action, ActionAmount, ActionDecision, ValidAction};
pub use errors::EngineError;
pub use round::{apply_action, start_round, Envelope, RoundStatus, RoundStep};
pub use round_state::RoundState;
pub use showdown::{resolve_round, Payout, RoundOutcome};
pub use side_pots::{split_at_levels, split_pots, Contribution, SidePot};
pub use validation::{legal_actions, legal_actions_for, validate_decision};

/// RNG интерфейс для engine и ботов.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Индекс элемента с вероятностью, пропорциональной весу.
    /// `None`, если список пуст или все веса нулевые.
    fn pick_weighted(&mut self, weights: &[u32]) -> Option<usize>;

    /// Равномерное число из `low..=high`.
    fn pick_between(&mut self, low: u64, high: u64) -> u64;
}
