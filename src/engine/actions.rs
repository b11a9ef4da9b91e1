use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::history::ActionKind;

/// Действие, которое игрок может объявить в ответ на запрос.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Fold,
    /// Уравнять (или чек, если доплачивать нечего).
    Call,
    /// Повысить до итоговой ставки на улице.
    Raise,
}

impl Action {
    pub fn kind(self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Call => ActionKind::Call,
            Action::Raise => ActionKind::Raise,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Fold => "fold",
            Action::Call => "call",
            Action::Raise => "raise",
        };
        write!(f, "{s}")
    }
}

/// Ответ игрока на ask: действие и сумма (итоговая ставка на улице).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDecision {
    pub action: Action,
    pub amount: Chips,
}

impl ActionDecision {
    pub fn new(action: Action, amount: Chips) -> Self {
        Self { action, amount }
    }

    pub fn fold() -> Self {
        Self::new(Action::Fold, Chips::ZERO)
    }
}

/// Допустимая сумма: фиксированная или диапазон (для рейза).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ActionAmount {
    Fixed(Chips),
    Range { min: Chips, max: Chips },
}

/// Элемент `valid_actions` в ask-сообщении.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidAction {
    pub action: Action,
    pub amount: ActionAmount,
}

impl ValidAction {
    pub fn fixed(action: Action, amount: Chips) -> Self {
        Self {
            action,
            amount: ActionAmount::Fixed(amount),
        }
    }

    pub fn range(action: Action, min: Chips, max: Chips) -> Self {
        Self {
            action,
            amount: ActionAmount::Range { min, max },
        }
    }

    /// Входит ли решение в это допустимое действие.
    pub fn admits(&self, decision: &ActionDecision) -> bool {
        if self.action != decision.action {
            return false;
        }
        match self.action {
            // Сумма у фолда ни на что не влияет.
            Action::Fold => true,
            _ => match self.amount {
                ActionAmount::Fixed(amount) => amount == decision.amount,
                ActionAmount::Range { min, max } => (min..=max).contains(&decision.amount),
            },
        }
    }
}

/// Найти подходящее допустимое действие для решения.
pub fn find_admitting<'a>(
    valid_actions: &'a [ValidAction],
    decision: &ActionDecision,
) -> Option<&'a ValidAction> {
    valid_actions.iter().find(|v| v.admits(decision))
}
