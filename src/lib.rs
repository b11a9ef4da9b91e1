//! Покерный рефери: движок раунда Texas Hold'em и протокол сообщений
//! между движком и подключаемыми стратегиями игроков.
//!
//! Слои:
//! - `domain` – карты, фишки, игроки, стол, правила матча;
//! - `engine` – автомат раунда (`start_round` / `apply_action`), сайд-поты, шоудаун;
//! - `eval` – ранжирование рук;
//! - `interface` – сообщения, их сборка, контракт игрока и диспетчер;
//! - `game` – ведущий матча (`Dealer`);
//! - `players` – эталонные боты;
//! - `infra` – RNG.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod game;
pub mod infra;
pub mod interface;
pub mod players;
