//! Матч целиком: регистрация игроков, последовательность раундов, итог.

pub mod dealer;

pub use dealer::{Dealer, GameResult};
