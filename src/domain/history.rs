use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::PlayerUuid;

/// Что именно сделал игрок (включая принудительные ставки).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    Fold,
    Call,
    Raise,
    SmallBlind,
    BigBlind,
    Ante,
}

/// Одна запись истории действий.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRecord {
    pub uuid: PlayerUuid,
    pub street: Street,
    pub kind: ActionKind,
    /// Итоговая ставка игрока на улице после действия.
    pub amount: Chips,
    /// Сколько фишек реально добавлено этим действием.
    pub add_amount: Chips,
}

/// История раунда, разложенная по улицам в порядке действий.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionHistories {
    pub preflop: Vec<ActionRecord>,
    pub flop: Vec<ActionRecord>,
    pub turn: Vec<ActionRecord>,
    pub river: Vec<ActionRecord>,
}

impl ActionHistories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Записать действие в список его улицы.
    /// Действий на шоудауне не бывает – такие записи игнорируются.
    pub fn push(&mut self, record: ActionRecord) {
        if let Some(list) = self.street_mut(record.street) {
            list.push(record);
        }
    }

    pub fn street(&self, street: Street) -> &[ActionRecord] {
        match street {
            Street::Preflop => &self.preflop,
            Street::Flop => &self.flop,
            Street::Turn => &self.turn,
            Street::River => &self.river,
            Street::Showdown => &[],
        }
    }

    fn street_mut(&mut self, street: Street) -> Option<&mut Vec<ActionRecord>> {
        match street {
            Street::Preflop => Some(&mut self.preflop),
            Street::Flop => Some(&mut self.flop),
            Street::Turn => Some(&mut self.turn),
            Street::River => Some(&mut self.river),
            Street::Showdown => None,
        }
    }

    /// Все записи в хронологическом порядке.
    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.preflop
            .iter()
            .chain(self.flop.iter())
            .chain(self.turn.iter())
            .chain(self.river.iter())
    }

    pub fn len(&self) -> usize {
        self.preflop.len() + self.flop.len() + self.turn.len() + self.river.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.preflop.clear();
        self.flop.clear();
        self.turn.clear();
        self.river.clear();
    }
}
