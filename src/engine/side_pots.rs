use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Взнос игрока в банк за раунд.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub seat: SeatIndex,
    pub amount: Chips,
    /// Может ли игрок выиграть (не сфолдил).
    pub eligible: bool,
}

/// Часть банка, на которую претендуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Разбить банк на слои по уровням взносов претендентов.
///
/// Уровни – различные суммы взносов не сфолдивших игроков (по возрастанию).
/// Слой между соседними уровнями собирается со всех игроков, включая сфолдивших,
/// а претендуют на него только не сфолдившие с взносом не ниже уровня.
///
/// Выход: пустых слоёв нет, сумма слоёв равна сумме взносов.
pub fn split_pots(contributions: &[Contribution]) -> Vec<SidePot> {
    let levels: Vec<Chips> = contributions
        .iter()
        .filter(|c| c.eligible && !c.amount.is_zero())
        .map(|c| c.amount)
        .collect();
    split_at_levels(contributions, &levels)
}

/// То же, но по заданным уровням (порядок и повторы не важны).
/// Взносы выше последнего уровня достаются последнему слою.
pub fn split_at_levels(contributions: &[Contribution], levels: &[Chips]) -> Vec<SidePot> {
    let mut levels = levels.to_vec();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::new();
    let mut prev_level = Chips::ZERO;

    for &level in &levels {
        let amount: Chips = contributions
            .iter()
            .map(|c| c.amount.min(level) - c.amount.min(prev_level))
            .sum();

        let mut eligible_seats: Vec<SeatIndex> = contributions
            .iter()
            .filter(|c| c.eligible && c.amount >= level)
            .map(|c| c.seat)
            .collect();
        eligible_seats.sort_unstable();

        if !amount.is_zero() {
            pots.push(SidePot {
                amount,
                eligible_seats,
            });
        }
        prev_level = level;
    }

    // Сфолдившие могли внести больше, чем любой претендент.
    let overflow: Chips = contributions
        .iter()
        .map(|c| c.amount.saturating_sub(prev_level))
        .sum();
    if !overflow.is_zero() {
        if let Some(last) = pots.last_mut() {
            last.amount += overflow;
        }
    }

    pots
}
