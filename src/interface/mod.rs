//! Протокол между движком и реализациями игроков.
//!
//! - message.rs – семь типов сообщений и иммутабельные снимки состояния;
//! - builder.rs – чистая фабрика сообщений;
//! - player.rs – контракт `PokerPlayer`;
//! - dispatcher.rs – реестр игроков и доставка сообщений;
//! - errors.rs – ошибки протокола.

pub mod builder;
pub mod dispatcher;
pub mod errors;
pub mod message;
pub mod player;

pub use builder::MessageBuilder;
pub use dispatcher::{check_decision, MessageDispatcher, PlayerRegistry, Target};
pub use errors::DispatchError;
pub use message::*;
pub use player::{PlayerError, PokerPlayer};
