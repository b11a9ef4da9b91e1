use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_bits(bits: u32) -> HandCategory {
        match bits {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

/// Упаковать категорию и до 5 значимых рангов (от старшего) в HandRank.
///
/// Схема (u32): [категория:4][r0:4][r1:4][r2:4][r3:4][r4:4].
/// Недостающие ранги – нули, они меньше любой карты.
pub fn encode(category: HandCategory, ranks: &[Rank]) -> HandRank {
    let mut value = (category as u32) << 20;
    for (i, rank) in ranks.iter().take(5).enumerate() {
        value |= (rank.value() as u32) << (16 - 4 * i as u32);
    }
    HandRank(value)
}

pub fn hand_category(rank: HandRank) -> HandCategory {
    HandCategory::from_bits((rank.0 >> 20) & 0x0F)
}

/// Человеческое описание руки по категории (для логов шоудауна).
pub fn describe_hand(rank: HandRank) -> &'static str {
    match hand_category(rank) {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
    }
}
