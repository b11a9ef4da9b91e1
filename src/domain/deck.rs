use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Источник карт для раунда. Движку важно только одно: карты уникальны,
/// и при нехватке возвращается `DeckExhausted`.
pub trait DeckSource {
    fn draw(&mut self, n: usize) -> Result<Vec<Card>, EngineError>;

    fn remaining(&self) -> usize;
}

/// Колода карт. Верх колоды – конец вектора.
/// Перемешивание делает `RandomSource`, НЕ сама колода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Стандартная колода: первой тянется карта с id 1, последней – с id 52.
    pub fn standard_52() -> Self {
        let cards = (Card::MIN_ID..=Card::MAX_ID)
            .rev()
            .filter_map(Card::from_id)
            .collect();
        Deck { cards }
    }

    pub fn shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Self::standard_52();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Колода с заранее заданным порядком раздачи (первая карта тянется первой).
    /// Нужна для воспроизводимых раундов и тестов.
    pub fn stacked(draw_order: Vec<Card>) -> Self {
        let mut cards = draw_order;
        cards.reverse();
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl DeckSource for Deck {
    fn draw(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.cards.len() < n {
            return Err(EngineError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let split_at = self.cards.len() - n;
        let mut taken = self.cards.split_off(split_at);
        taken.reverse();
        Ok(taken)
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }
}
