use log::{debug, info, trace};

use crate::domain::chips::Chips;
use crate::domain::deck::{Deck, DeckSource};
use crate::domain::hand::Street;
use crate::domain::history::{ActionKind, ActionRecord};
use crate::domain::player::{PayStatus, Player};
use crate::domain::table::Table;
use crate::domain::SeatIndex;
use crate::engine::actions::{Action, ActionDecision};
use crate::engine::errors::EngineError;
use crate::engine::positions::{blind_positions, next_waiting_seat};
use crate::engine::round_state::RoundState;
use crate::engine::showdown::{resolve_round, RoundOutcome};
use crate::engine::validation::validate_decision;
use crate::eval::HandEvaluator;
use crate::interface::builder::MessageBuilder;
use crate::interface::dispatcher::Target;
use crate::interface::message::Message;

/// Сообщение вместе с адресатом.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub target: Target,
    pub message: Message,
}

impl Envelope {
    pub fn broadcast(message: Message) -> Self {
        Self {
            target: Target::Broadcast,
            message,
        }
    }

    pub fn to(uuid: impl Into<String>, message: Message) -> Self {
        Self {
            target: Target::player(uuid),
            message,
        }
    }
}

/// Статус раунда для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    /// Ждём ответа игрока `state.next_player`.
    Ongoing,
    Finished(RoundOutcome),
}

/// Результат шага автомата: новый статус и сообщения в порядке отправки.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundStep {
    pub status: RoundStatus,
    pub messages: Vec<Envelope>,
}

/// Старт нового раунда:
/// - чистит стол, вылетевшие игроки не участвуют;
/// - собирает анте и блайнды;
/// - раздаёт карманные карты;
/// - рассылает round_start (каждому свой) и street_start;
/// - спрашивает первого игрока или докручивает улицы, если спрашивать некого.
///
/// Кнопка берётся из `table.dealer_button`, её сдвигает вызывающий код.
pub fn start_round<E>(
    round_count: u32,
    small_blind_amount: Chips,
    ante: Chips,
    mut table: Table,
    deck: Deck,
    evaluator: &E,
) -> Result<(RoundState, RoundStep), EngineError>
where
    E: HandEvaluator + ?Sized,
{
    table.reset();
    let (sb_pos, bb_pos) =
        blind_positions(&table.seats, table.dealer_button).ok_or(EngineError::NotEnoughPlayers)?;

    let mut state = RoundState::new(round_count, small_blind_amount, ante, table, deck);
    info!(
        "[round {}] start: button={}, sb={}, bb={}, blinds {}/{}, ante {}",
        round_count,
        state.table.dealer_button,
        sb_pos,
        bb_pos,
        small_blind_amount,
        state.big_blind_amount(),
        ante
    );

    if !ante.is_zero() {
        post_antes(&mut state)?;
    }
    let big_blind = state.big_blind_amount();
    put_chips(&mut state, sb_pos, ActionKind::SmallBlind, small_blind_amount)?;
    put_chips(&mut state, bb_pos, ActionKind::BigBlind, big_blind)?;

    deal_hole_cards(&mut state)?;

    let mut messages = Vec::new();
    for (seat, player) in state.table.seats.players().iter().enumerate() {
        let message = MessageBuilder::build_round_start(round_count, seat, &state.table.seats)?;
        messages.push(Envelope::to(player.uuid.clone(), message));
    }

    let status = open_street(&mut state, bb_pos, evaluator, &mut messages)?;
    Ok((state, RoundStep { status, messages }))
}

/// Применить решение игрока, которого сейчас спрашивают.
///
/// Решение должно входить в допустимые действия, иначе `IllegalAction`
/// и состояние не меняется. Дальше:
/// - рассылается game_update;
/// - если остался один игрок в игре, раунд закрывается без новых карт;
/// - если все ждущие согласились, открывается следующая улица;
/// - иначе спрашивается следующий ждущий игрок.
pub fn apply_action<E>(
    state: &mut RoundState,
    decision: ActionDecision,
    evaluator: &E,
) -> Result<RoundStep, EngineError>
where
    E: HandEvaluator + ?Sized,
{
    if state.is_finished() {
        return Err(EngineError::NoActiveRound);
    }
    let seat = state.next_player.ok_or(EngineError::NoActiveRound)?;
    validate_decision(state, seat, &decision)?;

    match decision.action {
        Action::Fold => fold(state, seat)?,
        Action::Call => {
            put_chips(state, seat, decision.action.kind(), decision.amount)?;
            if state.table.seats.get(seat)?.is_waiting_ask() {
                state.agree_num += 1;
            }
        }
        Action::Raise => {
            let previous_bet = state.current_bet();
            put_chips(state, seat, decision.action.kind(), decision.amount)?;
            // Следующий рейз должен быть не меньше этого.
            state.min_raise = decision.amount.saturating_sub(previous_bet);
            state.agree_num = if state.table.seats.get(seat)?.is_waiting_ask() { 1 } else { 0 };
        }
    }

    let seats = &state.table.seats;
    let lonely = seats.count_active_players() <= 1;
    let street_closed = state.agree_num >= seats.count_ask_wait_players();

    state.next_player = if lonely || street_closed {
        None
    } else {
        next_waiting_seat(seats, seat)
    };

    let mut messages = vec![Envelope::broadcast(MessageBuilder::build_game_update(
        seat,
        decision.action,
        decision.amount,
        state,
    )?)];

    let status = if lonely {
        debug!("[round {}] everybody folded", state.round_count);
        finish_round(state, evaluator, &mut messages)?
    } else if street_closed {
        advance_street(state)?;
        let button = state.table.dealer_button;
        open_street(state, button, evaluator, &mut messages)?
    } else {
        let next = state
            .next_player
            .ok_or(EngineError::Internal("нет ждущего игрока при открытой улице"))?;
        messages.push(ask(state, next)?);
        RoundStatus::Ongoing
    };

    Ok(RoundStep { status, messages })
}

/// Открыть текущую улицу: street_start, затем ask первому ждущему после `first_after`.
/// Улицы, на которых действовать некому, докручиваются до шоудауна.
fn open_street<E>(
    state: &mut RoundState,
    first_after: SeatIndex,
    evaluator: &E,
    messages: &mut Vec<Envelope>,
) -> Result<RoundStatus, EngineError>
where
    E: HandEvaluator + ?Sized,
{
    let mut first_after = first_after;
    loop {
        if state.street == Street::Showdown {
            return finish_round(state, evaluator, messages);
        }

        state.next_player = if needs_action(state) {
            next_waiting_seat(&state.table.seats, first_after)
        } else {
            None
        };
        messages.push(Envelope::broadcast(MessageBuilder::build_street_start(state)));

        if let Some(next) = state.next_player {
            messages.push(ask(state, next)?);
            return Ok(RoundStatus::Ongoing);
        }

        trace!("[round {}] nobody to ask on {}", state.round_count, state.street.name());
        advance_street(state)?;
        first_after = state.table.dealer_button;
    }
}

/// Есть ли на улице кому действовать.
/// Один ждущий игрок действует, только если ему ещё нужно уравнивать.
fn needs_action(state: &RoundState) -> bool {
    let seats = &state.table.seats;
    match seats.count_ask_wait_players() {
        0 => false,
        1 => {
            let current_bet = state.current_bet();
            seats
                .players()
                .iter()
                .any(|p| p.is_waiting_ask() && p.current_bet < current_bet)
        }
        _ => true,
    }
}

/// Перейти на следующую улицу: сбросить ставки улицы и открыть карты борда.
fn advance_street(state: &mut RoundState) -> Result<(), EngineError> {
    let next = state.street.next().ok_or(EngineError::NoActiveRound)?;
    state.street = next;
    state.agree_num = 0;
    state.min_raise = state.big_blind_amount();
    state.next_player = None;
    for player in state.table.seats.players_mut() {
        player.current_bet = Chips::ZERO;
    }

    let reveal = next.cards_to_reveal();
    if reveal > 0 {
        for card in state.deck.draw(reveal)? {
            state.table.add_community_card(card)?;
        }
    }
    debug!(
        "[round {}] street {}, board {:?}",
        state.round_count,
        next.name(),
        state.community_cards()
    );
    Ok(())
}

fn finish_round<E>(
    state: &mut RoundState,
    evaluator: &E,
    messages: &mut Vec<Envelope>,
) -> Result<RoundStatus, EngineError>
where
    E: HandEvaluator + ?Sized,
{
    let outcome = resolve_round(state, evaluator)?;
    let winners: Vec<Player> = outcome
        .winners
        .iter()
        .filter_map(|uuid| state.table.seats.find(uuid).cloned())
        .collect();
    messages.push(Envelope::broadcast(MessageBuilder::build_round_result(
        state.round_count,
        &winners,
        state,
    )));
    Ok(RoundStatus::Finished(outcome))
}

fn ask(state: &RoundState, seat: SeatIndex) -> Result<Envelope, EngineError> {
    let uuid = state.table.seats.get(seat)?.uuid.clone();
    Ok(Envelope::to(uuid, MessageBuilder::build_ask(seat, state)?))
}

fn post_antes(state: &mut RoundState) -> Result<(), EngineError> {
    let street = state.street;
    let ante = state.ante;
    let mut records = Vec::new();

    for player in state.table.seats.players_mut() {
        if player.status == PayStatus::Busted {
            continue;
        }
        let paid = ante.min(player.stack);
        player.collect_bet(paid)?;
        if player.stack.is_zero() {
            player.status = PayStatus::AllIn;
        }
        // Анте – мёртвые деньги: в банк, но не в ставку улицы.
        let record = ActionRecord {
            uuid: player.uuid.clone(),
            street,
            kind: ActionKind::Ante,
            amount: paid,
            add_amount: paid,
        };
        player.record_action(record.clone());
        records.push(record);
    }

    for record in records {
        state.history.push(record);
    }
    Ok(())
}

/// Довести ставку игрока на улице до `level` (не больше, чем позволяет стек).
fn put_chips(
    state: &mut RoundState,
    seat: SeatIndex,
    kind: ActionKind,
    level: Chips,
) -> Result<(), EngineError> {
    let street = state.street;
    let player = state.table.seats.get_mut(seat)?;

    let add = level.saturating_sub(player.current_bet).min(player.stack);
    player.collect_bet(add)?;
    player.current_bet += add;
    if player.stack.is_zero() {
        player.status = PayStatus::AllIn;
    }

    let record = ActionRecord {
        uuid: player.uuid.clone(),
        street,
        kind,
        amount: player.current_bet,
        add_amount: add,
    };
    trace!("[round {}] {} {:?} {}", state.round_count, record.uuid, kind, record.amount);
    player.record_action(record.clone());
    state.history.push(record);
    Ok(())
}

fn fold(state: &mut RoundState, seat: SeatIndex) -> Result<(), EngineError> {
    let street = state.street;
    let player = state.table.seats.get_mut(seat)?;
    player.status = PayStatus::Folded;

    let record = ActionRecord {
        uuid: player.uuid.clone(),
        street,
        kind: ActionKind::Fold,
        amount: Chips::ZERO,
        add_amount: Chips::ZERO,
    };
    player.record_action(record.clone());
    state.history.push(record);
    Ok(())
}

fn deal_hole_cards(state: &mut RoundState) -> Result<(), EngineError> {
    for seat in 0..state.table.seats.size() {
        if state.table.seats.get(seat)?.status == PayStatus::Busted {
            continue;
        }
        let cards = state.deck.draw(2)?;
        let pair = [cards[0], cards[1]];
        state.table.seats.get_mut(seat)?.add_hole_cards(pair)?;
    }
    Ok(())
}
