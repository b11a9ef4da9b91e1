//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Для движка ранжирование – внешний коллаборатор: полный порядок на руках,
//! доступный через трейт [`HandEvaluator`]. Реализация по умолчанию –
//! [`BestHandEvaluator`].

pub mod evaluator;
pub mod hand_rank;

use std::cmp::Ordering;

use crate::domain::card::Card;
use crate::domain::hand::HandRank;

pub use evaluator::{compare_hands, evaluate_best_hand, BestHandEvaluator};
pub use hand_rank::{describe_hand, hand_category, HandCategory};

/// Ранжирование рук: 2 hole + 5 board.
pub trait HandEvaluator {
    fn rank(&self, cards: &[Card]) -> HandRank;

    /// greater / equal / less для двух рук.
    fn compare(&self, a: &[Card], b: &[Card]) -> Ordering {
        self.rank(a).cmp(&self.rank(b))
    }
}
