use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::errors::EngineError;

/// Масть карты. Порядок объявления совпадает с порядком блоков id (1..13 – трефы и т.д.).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn index(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }
}

/// Ранг карты. Туз старший (14).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Ранг по числовому значению 2..=14.
    pub fn from_value(value: u8) -> Option<Rank> {
        let rank = match value {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Игральная карта из 52-карточной колоды.
///
/// Карта однозначно задаётся id в диапазоне `1..=52`:
/// блок из 13 id на масть (трефы, бубны, червы, пики),
/// внутри блока туз идёт первым, дальше 2..K.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const MIN_ID: u8 = 1;
    pub const MAX_ID: u8 = 52;

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Собрать карту по id. `None`, если id вне `1..=52`.
    pub fn from_id(id: u8) -> Option<Self> {
        if !(Self::MIN_ID..=Self::MAX_ID).contains(&id) {
            return None;
        }
        let zero_based = id - 1;
        let suit = Suit::ALL[(zero_based / 13) as usize];
        // В id туз идёт как 1.
        let rank = match zero_based % 13 + 1 {
            1 => Rank::Ace,
            v => Rank::from_value(v)?,
        };
        Some(Card { rank, suit })
    }

    pub fn to_id(&self) -> u8 {
        let in_suit = match self.rank {
            Rank::Ace => 1,
            r => r.value(),
        };
        self.suit.index() * 13 + in_suit
    }
}

impl TryFrom<u8> for Card {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Card::from_id(id).ok_or(EngineError::InvalidCardId(id))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r_ch), Some(s_ch), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("Строка карты должна состоять из 2 символов: {s:?}"));
        };

        let rank = match r_ch.to_ascii_uppercase() {
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            d => d
                .to_digit(10)
                .and_then(|v| Rank::from_value(v as u8))
                .ok_or_else(|| format!("Неизвестный ранг: {r_ch}"))?,
        };

        let suit = match s_ch.to_ascii_lowercase() {
            'c' => Suit::Clubs,
            'd' => Suit::Diamonds,
            'h' => Suit::Hearts,
            's' => Suit::Spades,
            _ => return Err(format!("Неизвестная масть: {s_ch}")),
        };

        Ok(Card { rank, suit })
    }
}
