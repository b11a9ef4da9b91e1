//! Эталонные стратегии для харнесса и тестов.
//!
//! - `FoldPlayer` – всегда фолд;
//! - `CallPlayer` – всегда колл (чек/олл-ин в пределах стека);
//! - `RandomPlayer` – взвешенный случайный выбор из допустимых действий.

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::history::ActionHistories;
use crate::engine::actions::{Action, ActionAmount, ActionDecision, ValidAction};
use crate::engine::RandomSource;
use crate::infra::rng::{DeterministicRng, SystemRng};
use crate::interface::message::RoundStateView;
use crate::interface::player::{PlayerError, PokerPlayer};

#[derive(Clone, Copy, Debug, Default)]
pub struct FoldPlayer;

impl PokerPlayer for FoldPlayer {
    fn declare_action(
        &mut self,
        _hole_card: &[Card],
        _valid_actions: &[ValidAction],
        _round_state: &RoundStateView,
        _action_histories: &ActionHistories,
    ) -> Result<ActionDecision, PlayerError> {
        Ok(ActionDecision::fold())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CallPlayer;

impl PokerPlayer for CallPlayer {
    fn declare_action(
        &mut self,
        _hole_card: &[Card],
        valid_actions: &[ValidAction],
        _round_state: &RoundStateView,
        _action_histories: &ActionHistories,
    ) -> Result<ActionDecision, PlayerError> {
        Ok(call_of(valid_actions).unwrap_or_else(ActionDecision::fold))
    }
}

/// Случайный бот: колл чаще всего, фолд реже, рейз изредка.
/// Случайность берётся из `RandomSource`, как и у ведущего.
#[derive(Clone, Debug)]
pub struct RandomPlayer<R = SystemRng> {
    rng: R,
}

impl RandomPlayer<SystemRng> {
    pub fn new() -> Self {
        Self::with_source(SystemRng::default())
    }
}

impl RandomPlayer<DeterministicRng> {
    /// Воспроизводимый бот: одинаковый seed – одинаковые решения.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(DeterministicRng::from_seed(seed))
    }
}

impl<R: RandomSource> RandomPlayer<R> {
    pub fn with_source(rng: R) -> Self {
        Self { rng }
    }

    fn weight(action: Action) -> u32 {
        match action {
            Action::Fold => 15,
            Action::Call => 40,
            Action::Raise => 5,
        }
    }

    fn decide(&mut self, valid: &ValidAction) -> ActionDecision {
        match valid.amount {
            ActionAmount::Fixed(amount) => ActionDecision::new(valid.action, amount),
            ActionAmount::Range { min, max } => {
                let amount = Chips(self.rng.pick_between(min.0, max.0));
                ActionDecision::new(valid.action, amount)
            }
        }
    }
}

impl Default for RandomPlayer<SystemRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> PokerPlayer for RandomPlayer<R> {
    fn declare_action(
        &mut self,
        _hole_card: &[Card],
        valid_actions: &[ValidAction],
        _round_state: &RoundStateView,
        _action_histories: &ActionHistories,
    ) -> Result<ActionDecision, PlayerError> {
        let weights: Vec<u32> = valid_actions.iter().map(|v| Self::weight(v.action)).collect();
        let index = self
            .rng
            .pick_weighted(&weights)
            .ok_or_else(|| PlayerError::NoResponse("нет допустимых действий".to_string()))?;
        Ok(self.decide(&valid_actions[index]))
    }
}

fn call_of(valid_actions: &[ValidAction]) -> Option<ActionDecision> {
    valid_actions.iter().find_map(|v| match (v.action, v.amount) {
        (Action::Call, ActionAmount::Fixed(amount)) => Some(ActionDecision::new(Action::Call, amount)),
        _ => None,
    })
}
