use std::cmp::Ordering;

use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

use super::hand_rank::{encode, HandCategory};
use super::HandEvaluator;

/// Оценщик по умолчанию: лучшая 5-карточная комбинация из всех карт руки.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestHandEvaluator;

impl HandEvaluator for BestHandEvaluator {
    fn rank(&self, cards: &[Card]) -> HandRank {
        evaluate_best_hand(cards)
    }
}

/// Вычислить лучшую руку из произвольного набора карт (обычно 2 hole + 5 board).
///
/// Для 5 и меньше карт оценивается сам набор, иначе перебираются все 5-карточные подмножества.
pub fn evaluate_best_hand(cards: &[Card]) -> HandRank {
    let n = cards.len();
    if n <= 5 {
        return evaluate_five(cards);
    }

    let mut best = HandRank(0);
    let mut five = Vec::with_capacity(5);
    for mask in 0u32..(1u32 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        five.clear();
        five.extend((0..n).filter(|i| mask & (1 << i) != 0).map(|i| cards[i]));
        best = best.max(evaluate_five(&five));
    }
    best
}

/// Сравнить две руки (hole + board) по силе.
pub fn compare_hands(a: &[Card], b: &[Card]) -> Ordering {
    evaluate_best_hand(a).cmp(&evaluate_best_hand(b))
}

/// Оценка набора не больше чем из 5 карт.
fn evaluate_five(cards: &[Card]) -> HandRank {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.rank.value() as usize] += 1;
    }

    // (количество, ранг): сначала по количеству, потом по рангу – оба по убыванию.
    let mut groups: Vec<(u8, Rank)> = Vec::with_capacity(5);
    for value in (2u8..=14).rev() {
        let count = counts[value as usize];
        if count == 0 {
            continue;
        }
        if let Some(rank) = Rank::from_value(value) {
            groups.push((count, rank));
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

    let ranks: Vec<Rank> = groups.iter().map(|&(_, r)| r).collect();
    let pattern: Vec<u8> = groups.iter().map(|&(c, _)| c).collect();

    let full_five = cards.len() == 5;
    let is_flush = full_five && cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = if full_five && groups.len() == 5 {
        straight_high_card(&ranks)
    } else {
        None
    };

    match (straight_high, is_flush, pattern.as_slice()) {
        (Some(high), true, _) => encode(HandCategory::StraightFlush, &[high]),
        (_, _, [4, ..]) => encode(HandCategory::FourOfAKind, &ranks),
        (_, _, [3, 2]) => encode(HandCategory::FullHouse, &ranks),
        (_, true, _) => encode(HandCategory::Flush, &ranks),
        (Some(high), false, _) => encode(HandCategory::Straight, &[high]),
        (_, _, [3, ..]) => encode(HandCategory::ThreeOfAKind, &ranks),
        (_, _, [2, 2, ..]) => encode(HandCategory::TwoPair, &ranks),
        (_, _, [2, ..]) => encode(HandCategory::OnePair, &ranks),
        _ => encode(HandCategory::HighCard, &ranks),
    }
}

/// Старшая карта стрита для 5 разных рангов по убыванию.
/// Wheel (A2345) – стрит до пятёрки.
fn straight_high_card(desc: &[Rank]) -> Option<Rank> {
    let values: Vec<u8> = desc.iter().map(|r| r.value()).collect();
    if values == [14, 5, 4, 3, 2] {
        return Some(Rank::Five);
    }
    if values.first()? - values.last()? == 4 {
        return Some(desc[0]);
    }
    None
}
