//! Доменная модель: карты, фишки, игроки, места, стол, колода и правила матча.

pub mod card;
pub mod chips;
pub mod config;
pub mod deck;
pub mod hand;
pub mod history;
pub mod player;
pub mod seats;
pub mod table;

/// Непрозрачная идентичность игрока. Единственная ссылка между сущностями:
/// по ней диспетчер находит адресата.
pub type PlayerUuid = String;

/// Индекс места за столом (0..seats.size()-1).
pub type SeatIndex = usize;

pub use card::*;
pub use chips::*;
pub use config::*;
pub use deck::*;
pub use hand::*;
pub use history::*;
pub use player::*;
pub use seats::*;
pub use table::*;
