use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::config::MatchConfig;
use crate::domain::hand::Street;
use crate::domain::history::ActionHistories;
use crate::domain::player::{PayStatus, Player};
use crate::domain::seats::Seats;
use crate::domain::{PlayerUuid, SeatIndex};
use crate::engine::actions::{Action, ValidAction};
use crate::engine::round_state::RoundState;
use crate::engine::side_pots::{split_at_levels, Contribution};

/// Сообщение от движка игроку.
///
/// На проводе: `{"type": "<kind>_message", "message": {...}}`.
/// Каждый вариант несёт собственный тип payload, маршрутизация – `match` по варианту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "message")]
pub enum Message {
    #[serde(rename = "game_start_message")]
    GameStart(GameStartMessage),
    #[serde(rename = "round_start_message")]
    RoundStart(RoundStartMessage),
    #[serde(rename = "street_start_message")]
    StreetStart(StreetStartMessage),
    #[serde(rename = "ask_message")]
    Ask(AskMessage),
    #[serde(rename = "game_update_message")]
    GameUpdate(GameUpdateMessage),
    #[serde(rename = "round_result_message")]
    RoundResult(RoundResultMessage),
    #[serde(rename = "game_result_message")]
    GameResult(GameResultMessage),
}

/// Тип сообщения без payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    GameStart,
    RoundStart,
    StreetStart,
    Ask,
    GameUpdate,
    RoundResult,
    GameResult,
}

impl MessageKind {
    pub const ALL: [MessageKind; 7] = [
        MessageKind::GameStart,
        MessageKind::RoundStart,
        MessageKind::StreetStart,
        MessageKind::Ask,
        MessageKind::GameUpdate,
        MessageKind::RoundResult,
        MessageKind::GameResult,
    ];

    /// Имя типа на проводе.
    pub fn wire_name(self) -> &'static str {
        match self {
            MessageKind::GameStart => "game_start_message",
            MessageKind::RoundStart => "round_start_message",
            MessageKind::StreetStart => "street_start_message",
            MessageKind::Ask => "ask_message",
            MessageKind::GameUpdate => "game_update_message",
            MessageKind::RoundResult => "round_result_message",
            MessageKind::GameResult => "game_result_message",
        }
    }

    /// Метод `PokerPlayer`, который обрабатывает этот тип.
    pub fn handler_name(self) -> &'static str {
        match self {
            MessageKind::GameStart => "receive_game_start_message",
            MessageKind::RoundStart => "receive_round_start_message",
            MessageKind::StreetStart => "receive_street_start_message",
            MessageKind::Ask => "declare_action",
            MessageKind::GameUpdate => "receive_game_update_message",
            MessageKind::RoundResult => "receive_round_result_message",
            MessageKind::GameResult => "receive_game_result_message",
        }
    }

    /// Только ask ждёт ответа.
    pub fn expects_decision(self) -> bool {
        self == MessageKind::Ask
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::GameStart(_) => MessageKind::GameStart,
            Message::RoundStart(_) => MessageKind::RoundStart,
            Message::StreetStart(_) => MessageKind::StreetStart,
            Message::Ask(_) => MessageKind::Ask,
            Message::GameUpdate(_) => MessageKind::GameUpdate,
            Message::RoundResult(_) => MessageKind::RoundResult,
            Message::GameResult(_) => MessageKind::GameResult,
        }
    }
}

//
// ====================== PAYLOADS ======================
//

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameInformation {
    pub player_num: usize,
    pub rule: MatchConfig,
    pub seats: Vec<SeatView>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStartMessage {
    pub game_information: GameInformation,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundStartMessage {
    pub round_count: u32,
    /// Карманные карты получателя.
    pub hole_card: Vec<Card>,
    pub seats: Vec<SeatView>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreetStartMessage {
    pub street: Street,
    pub round_state: RoundStateView,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskMessage {
    pub hole_card: Vec<Card>,
    pub valid_actions: Vec<ValidAction>,
    pub round_state: RoundStateView,
    pub action_histories: ActionHistories,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameUpdateMessage {
    pub action: ActionView,
    pub round_state: RoundStateView,
    pub action_histories: ActionHistories,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResultMessage {
    pub round_count: u32,
    pub winners: Vec<SeatView>,
    pub round_state: RoundStateView,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResultMessage {
    pub game_information: GameInformation,
}

//
// ====================== VIEWS ======================
//

/// Публичная проекция игрока: без карманных карт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub name: String,
    pub uuid: PlayerUuid,
    pub stack: Chips,
    pub state: PayStatus,
}

impl From<&Player> for SeatView {
    fn from(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            uuid: p.uuid.clone(),
            stack: p.stack,
            state: p.status,
        }
    }
}

pub fn seat_views(seats: &Seats) -> Vec<SeatView> {
    seats.players().iter().map(SeatView::from).collect()
}

/// Что сделал игрок – payload game_update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionView {
    pub player_uuid: PlayerUuid,
    pub action: Action,
    pub amount: Chips,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePotView {
    pub amount: Chips,
    pub eligibles: Vec<PlayerUuid>,
}

/// Банк: главный пот и сайд-поты.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotView {
    pub main: Chips,
    pub side: Vec<SidePotView>,
}

impl PotView {
    /// Банк посреди раунда: сайд-поты отделяются только на уровнях олл-инов,
    /// всё остальное (включая ещё не уравненные ставки) – в последнем слое.
    pub fn from_seats(seats: &Seats) -> Self {
        let contributions: Vec<Contribution> = seats
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| Contribution {
                seat,
                amount: p.paid,
                eligible: p.is_active(),
            })
            .collect();

        let mut levels: Vec<Chips> = seats
            .players()
            .iter()
            .filter(|p| p.status == PayStatus::AllIn)
            .map(|p| p.paid)
            .collect();
        levels.push(seats.players().iter().map(|p| p.paid).max().unwrap_or(Chips::ZERO));

        let mut pots = split_at_levels(&contributions, &levels).into_iter();
        let main = pots.next().map(|p| p.amount).unwrap_or(Chips::ZERO);
        let side = pots
            .map(|p| SidePotView {
                amount: p.amount,
                eligibles: p
                    .eligible_seats
                    .iter()
                    .filter_map(|&s| seats.players().get(s).map(|pl| pl.uuid.clone()))
                    .collect(),
            })
            .collect();

        Self { main, side }
    }

    pub fn total(&self) -> Chips {
        self.main + self.side.iter().map(|s| s.amount).sum::<Chips>()
    }
}

/// Иммутабельный снимок RoundState: каждый получатель получает свою копию,
/// ссылок в живое состояние нет.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundStateView {
    pub round_count: u32,
    pub street: Street,
    pub small_blind_amount: Chips,
    pub pot: PotView,
    pub community_card: Vec<Card>,
    pub dealer_btn: SeatIndex,
    pub next_player: Option<SeatIndex>,
    pub agree_num: usize,
    pub seats: Vec<SeatView>,
    pub action_histories: ActionHistories,
}

impl From<&RoundState> for RoundStateView {
    fn from(state: &RoundState) -> Self {
        Self {
            round_count: state.round_count,
            street: state.street,
            small_blind_amount: state.small_blind_amount,
            pot: PotView::from_seats(&state.table.seats),
            community_card: state.community_cards().to_vec(),
            dealer_btn: state.table.dealer_button,
            next_player: state.next_player,
            agree_num: state.agree_num,
            seats: seat_views(&state.table.seats),
            action_histories: state.history.clone(),
        }
    }
}
