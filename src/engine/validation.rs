use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::SeatIndex;
use crate::engine::actions::{find_admitting, Action, ActionDecision, ValidAction};
use crate::engine::errors::EngineError;
use crate::engine::round_state::RoundState;

/// Допустимые действия игрока на месте `seat` при текущем состоянии ставок.
///
/// Правила стола:
/// - fold доступен всегда;
/// - call доступен всегда, сумма ограничена олл-ином
///   (стек 10 против ставки 15 → call на весь стек);
/// - raise доступен, только если стек больше, чем доплата + минимальный прирост.
pub fn legal_actions(state: &RoundState, seat: SeatIndex) -> Result<Vec<ValidAction>, EngineError> {
    let player = state.table.seats.get(seat)?;
    Ok(legal_actions_for(player, state.current_bet(), state.min_raise))
}

/// То же самое, но от явных уровней ставок – удобно для тестов и ботов.
pub fn legal_actions_for(player: &Player, current_bet: Chips, min_raise: Chips) -> Vec<ValidAction> {
    let to_call = diff_to_call(player, current_bet);
    let all_in_level = player.current_bet + player.stack;

    let call_level = if player.stack < to_call {
        all_in_level
    } else {
        player.current_bet + to_call
    };

    let mut actions = vec![
        ValidAction::fixed(Action::Fold, Chips::ZERO),
        ValidAction::fixed(Action::Call, call_level),
    ];

    if player.stack > to_call + min_raise {
        actions.push(ValidAction::range(
            Action::Raise,
            current_bet + min_raise,
            all_in_level,
        ));
    }

    actions
}

/// Проверить решение игрока, которого сейчас спрашивают.
pub fn validate_decision(
    state: &RoundState,
    seat: SeatIndex,
    decision: &ActionDecision,
) -> Result<(), EngineError> {
    let player = state.table.seats.get(seat)?;
    if !player.is_waiting_ask() {
        return Err(EngineError::IllegalAction(format!(
            "игрок {} не может действовать в статусе {:?}",
            player.uuid, player.status
        )));
    }

    let valid = legal_actions(state, seat)?;
    match find_admitting(&valid, decision) {
        Some(_) => Ok(()),
        None => Err(EngineError::IllegalAction(format!(
            "{} {} не входит в допустимые действия",
            decision.action, decision.amount
        ))),
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(player: &Player, current_bet: Chips) -> Chips {
    current_bet.saturating_sub(player.current_bet)
}
