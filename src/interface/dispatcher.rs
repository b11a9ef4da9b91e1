use core::convert::Infallible;
use core::fmt;
use std::str::FromStr;

use log::{debug, trace, warn};

use crate::domain::PlayerUuid;
use crate::engine::actions::{find_admitting, ActionDecision, ValidAction};
use crate::interface::errors::DispatchError;
use crate::interface::message::Message;
use crate::interface::player::{PlayerError, PokerPlayer};

/// Адресат сообщения.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Всем зарегистрированным игрокам (на проводе `-1`).
    Broadcast,
    Player(PlayerUuid),
}

impl Target {
    pub const BROADCAST_SENTINEL: &'static str = "-1";

    pub fn player(uuid: impl Into<PlayerUuid>) -> Self {
        Target::Player(uuid.into())
    }
}

impl FromStr for Target {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::BROADCAST_SENTINEL {
            Ok(Target::Broadcast)
        } else {
            Ok(Target::Player(s.to_string()))
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Broadcast => f.write_str(Self::BROADCAST_SENTINEL),
            Target::Player(uuid) => f.write_str(uuid),
        }
    }
}

struct Registered {
    uuid: PlayerUuid,
    player: Box<dyn PokerPlayer>,
}

/// Реестр реализаций игроков на матч.
/// Порядок регистрации = порядок рассылки (дилер регистрирует в порядке мест).
#[derive(Default)]
pub struct PlayerRegistry {
    entries: Vec<Registered>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        uuid: impl Into<PlayerUuid>,
        player: Box<dyn PokerPlayer>,
    ) -> Result<(), DispatchError> {
        let uuid = uuid.into();
        if self.contains(&uuid) {
            return Err(DispatchError::DuplicateRegistration(uuid));
        }
        debug!("[registry] registered {uuid}");
        self.entries.push(Registered { uuid, player });
        Ok(())
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.entries.iter().any(|e| e.uuid == uuid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn uuids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.uuid.as_str())
    }

    fn get_mut(&mut self, uuid: &str) -> Option<&mut (dyn PokerPlayer + 'static)> {
        self.entries
            .iter_mut()
            .find(|e| e.uuid == uuid)
            .map(|e| e.player.as_mut())
    }
}

impl fmt::Debug for PlayerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.uuids()).finish()
    }
}

/// Доставляет сообщения адресатам и возвращает решение на ask.
pub struct MessageDispatcher<'r> {
    registry: &'r mut PlayerRegistry,
}

impl<'r> MessageDispatcher<'r> {
    pub fn new(registry: &'r mut PlayerRegistry) -> Self {
        Self { registry }
    }

    /// Доставить сообщение.
    ///
    /// - `Broadcast`: каждому игроку по одному вызову, в порядке регистрации, без ответа;
    /// - `Player(uuid)`: только ему; для ask возвращается решение.
    ///
    /// Решение вне `valid_actions` (или отказ ответить) превращается в фолд.
    pub fn dispatch(
        &mut self,
        target: &Target,
        message: &Message,
    ) -> Result<Option<ActionDecision>, DispatchError> {
        let kind = message.kind();
        match target {
            Target::Broadcast => {
                if kind.expects_decision() {
                    return Err(DispatchError::BroadcastDecision);
                }
                debug!("[dispatch] broadcast {} to {} players", kind, self.registry.len());
                for entry in self.registry.entries.iter_mut() {
                    trace!("[dispatch] {} -> {}::{}", kind, entry.uuid, kind.handler_name());
                    route(entry.player.as_mut(), message);
                }
                Ok(None)
            }
            Target::Player(uuid) => {
                let player = self
                    .registry
                    .get_mut(uuid)
                    .ok_or_else(|| DispatchError::UnknownRecipient(uuid.clone()))?;
                debug!("[dispatch] unicast {} -> {}::{}", kind, uuid, kind.handler_name());

                let Some(answer) = route(player, message) else {
                    return Ok(None);
                };
                let Message::Ask(ask) = message else {
                    return Ok(None);
                };

                match check_decision(uuid, &ask.valid_actions, answer) {
                    Ok(decision) => {
                        debug!("[dispatch] {} declared {} {}", uuid, decision.action, decision.amount);
                        Ok(Some(decision))
                    }
                    Err(DispatchError::ProtocolViolation { uuid, reason }) => {
                        warn!("[dispatch] protocol violation by {uuid}: {reason}; forced fold");
                        Ok(Some(ActionDecision::fold()))
                    }
                    Err(other) => Err(other),
                }
            }
        }
    }
}

/// Статическая маршрутизация: вариант сообщения → метод трейта,
/// payload раскладывается в позиционные аргументы.
fn route(
    player: &mut dyn PokerPlayer,
    message: &Message,
) -> Option<Result<ActionDecision, PlayerError>> {
    match message {
        Message::GameStart(m) => {
            player.receive_game_start_message(&m.game_information);
            None
        }
        Message::RoundStart(m) => {
            player.receive_round_start_message(&m.hole_card, &m.seats);
            None
        }
        Message::StreetStart(m) => {
            player.receive_street_start_message(m.street, &m.round_state);
            None
        }
        Message::Ask(m) => Some(player.declare_action(
            &m.hole_card,
            &m.valid_actions,
            &m.round_state,
            &m.action_histories,
        )),
        Message::GameUpdate(m) => {
            player.receive_game_update_message(&m.action, &m.round_state, &m.action_histories);
            None
        }
        Message::RoundResult(m) => {
            player.receive_round_result_message(&m.winners, &m.round_state);
            None
        }
        Message::GameResult(m) => {
            player.receive_game_result_message(&m.game_information);
            None
        }
    }
}

/// Проверить ответ игрока против предложенных действий.
pub fn check_decision(
    uuid: &str,
    valid_actions: &[ValidAction],
    answer: Result<ActionDecision, PlayerError>,
) -> Result<ActionDecision, DispatchError> {
    let decision = answer.map_err(|e| DispatchError::ProtocolViolation {
        uuid: uuid.to_string(),
        reason: e.to_string(),
    })?;

    match find_admitting(valid_actions, &decision) {
        Some(_) => Ok(decision),
        None => Err(DispatchError::ProtocolViolation {
            uuid: uuid.to_string(),
            reason: format!("{} {} is not a valid action", decision.action, decision.amount),
        }),
    }
}
