use crate::domain::chips::Chips;
use crate::domain::config::MatchConfig;
use crate::domain::player::Player;
use crate::domain::seats::Seats;
use crate::domain::SeatIndex;
use crate::engine::actions::Action;
use crate::engine::errors::EngineError;
use crate::engine::round_state::RoundState;
use crate::engine::validation::legal_actions;
use crate::interface::message::*;

/// Чистая фабрика сообщений: одна операция на тип события.
/// Входы не мутируются, все payload – собственные копии.
pub struct MessageBuilder;

impl MessageBuilder {
    pub fn build_game_start(config: &MatchConfig, seats: &Seats) -> Message {
        Message::GameStart(GameStartMessage {
            game_information: game_information(config, seats),
        })
    }

    /// `player_pos` – место получателя: в payload попадают его карманные карты.
    pub fn build_round_start(
        round_count: u32,
        player_pos: SeatIndex,
        seats: &Seats,
    ) -> Result<Message, EngineError> {
        let player = seats.get(player_pos)?;
        Ok(Message::RoundStart(RoundStartMessage {
            round_count,
            hole_card: player.hole_cards.clone(),
            seats: seat_views(seats),
        }))
    }

    pub fn build_street_start(state: &RoundState) -> Message {
        Message::StreetStart(StreetStartMessage {
            street: state.street,
            round_state: RoundStateView::from(state),
        })
    }

    pub fn build_ask(player_pos: SeatIndex, state: &RoundState) -> Result<Message, EngineError> {
        let player = state.table.seats.get(player_pos)?;
        Ok(Message::Ask(AskMessage {
            hole_card: player.hole_cards.clone(),
            valid_actions: legal_actions(state, player_pos)?,
            round_state: RoundStateView::from(state),
            action_histories: state.history.clone(),
        }))
    }

    pub fn build_game_update(
        player_pos: SeatIndex,
        action: Action,
        amount: Chips,
        state: &RoundState,
    ) -> Result<Message, EngineError> {
        let player = state.table.seats.get(player_pos)?;
        Ok(Message::GameUpdate(GameUpdateMessage {
            action: ActionView {
                player_uuid: player.uuid.clone(),
                action,
                amount,
            },
            round_state: RoundStateView::from(state),
            action_histories: state.history.clone(),
        }))
    }

    pub fn build_round_result(round_count: u32, winners: &[Player], state: &RoundState) -> Message {
        Message::RoundResult(RoundResultMessage {
            round_count,
            winners: winners.iter().map(SeatView::from).collect(),
            round_state: RoundStateView::from(state),
        })
    }

    pub fn build_game_result(config: &MatchConfig, seats: &Seats) -> Message {
        Message::GameResult(GameResultMessage {
            game_information: game_information(config, seats),
        })
    }
}

fn game_information(config: &MatchConfig, seats: &Seats) -> GameInformation {
    GameInformation {
        player_num: seats.size(),
        rule: config.clone(),
        seats: seat_views(seats),
    }
}
