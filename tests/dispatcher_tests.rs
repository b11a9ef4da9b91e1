//! Доставка сообщений игрокам через MessageDispatcher.
//!
//! Проверяем:
//! - каждый тип сообщения попадает в свой метод PokerPlayer с распакованным payload;
//! - broadcast идёт всем в порядке регистрации, unicast – только адресату;
//! - ответ на ask вне valid_actions превращается в фолд;
//! - ошибки регистрации и адресации.

use std::cell::RefCell;
use std::rc::Rc;

use poker_referee::domain::{
    card::Card, chips::Chips, config::MatchConfig, deck::Deck, hand::Street,
    history::ActionHistories,
    player::{PayStatus, Player},
    seats::Seats,
    table::Table,
};
use poker_referee::engine::{
    apply_action, start_round, Action, ActionDecision, RoundState, RoundStatus, ValidAction,
};
use poker_referee::eval::BestHandEvaluator;
use poker_referee::interface::{
    ActionView, DispatchError, GameInformation, Message, MessageBuilder, MessageDispatcher,
    PlayerError, PlayerRegistry, PokerPlayer, RoundStateView, SeatView, Target,
};

#[derive(Clone, Debug, PartialEq)]
enum Received {
    GameStart(GameInformation),
    RoundStart(Vec<Card>, Vec<SeatView>),
    StreetStart(Street, RoundStateView),
    Ask(Vec<Card>, Vec<ValidAction>, RoundStateView, ActionHistories),
    GameUpdate(ActionView, RoundStateView, ActionHistories),
    RoundResult(Vec<SeatView>, RoundStateView),
    GameResult(GameInformation),
}

type Log = Rc<RefCell<Vec<(&'static str, Received)>>>;

/// Игрок, который записывает все вызовы в общий журнал.
struct Recorder {
    name: &'static str,
    log: Log,
    answer: Result<ActionDecision, PlayerError>,
}

impl Recorder {
    fn boxed(name: &'static str, log: &Log, answer: Result<ActionDecision, PlayerError>) -> Box<Self> {
        Box::new(Self {
            name,
            log: Rc::clone(log),
            answer,
        })
    }

    fn push(&self, received: Received) {
        self.log.borrow_mut().push((self.name, received));
    }
}

impl PokerPlayer for Recorder {
    fn receive_game_start_message(&mut self, game_information: &GameInformation) {
        self.push(Received::GameStart(game_information.clone()));
    }

    fn receive_round_start_message(&mut self, hole_card: &[Card], seats: &[SeatView]) {
        self.push(Received::RoundStart(hole_card.to_vec(), seats.to_vec()));
    }

    fn receive_street_start_message(&mut self, street: Street, round_state: &RoundStateView) {
        self.push(Received::StreetStart(street, round_state.clone()));
    }

    fn declare_action(
        &mut self,
        hole_card: &[Card],
        valid_actions: &[ValidAction],
        round_state: &RoundStateView,
        action_histories: &ActionHistories,
    ) -> Result<ActionDecision, PlayerError> {
        self.push(Received::Ask(
            hole_card.to_vec(),
            valid_actions.to_vec(),
            round_state.clone(),
            action_histories.clone(),
        ));
        self.answer.clone()
    }

    fn receive_game_update_message(
        &mut self,
        action: &ActionView,
        round_state: &RoundStateView,
        action_histories: &ActionHistories,
    ) {
        self.push(Received::GameUpdate(
            action.clone(),
            round_state.clone(),
            action_histories.clone(),
        ));
    }

    fn receive_round_result_message(&mut self, winners: &[SeatView], round_state: &RoundStateView) {
        self.push(Received::RoundResult(winners.to_vec(), round_state.clone()));
    }

    fn receive_game_result_message(&mut self, game_information: &GameInformation) {
        self.push(Received::GameResult(game_information.clone()));
    }
}

//
// ====================== FIXTURES ======================
//

fn card(id: u8) -> Card {
    Card::from_id(id).expect("valid card id")
}

fn config() -> MatchConfig {
    MatchConfig::new(Chips(100), 10, Chips(5))
}

/// Три игрока по 100 фишек, у игрока на месте 1 карманные карты id 1 и 2.
fn seats() -> Seats {
    let mut seats = Seats::new();
    for i in 0..3 {
        let mut player = Player::new(format!("u{i}"), Chips(100), "hoge");
        if i == 1 {
            player.add_hole_cards([card(1), card(2)]).expect("first deal");
        }
        seats.sitdown(player).expect("unique uuid");
    }
    seats
}

/// Флоп, одна карта на борде, ход игрока на месте 2.
fn state() -> RoundState {
    let mut table = Table::with_seats(seats());
    table.add_community_card(card(1)).expect("board has room");
    let mut state = RoundState::new(7, Chips(5), Chips::ZERO, table, Deck::standard_52());
    state.street = Street::Flop;
    state.next_player = Some(2);
    state
}

fn registry_with_recorder(answer: Result<ActionDecision, PlayerError>) -> (PlayerRegistry, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = PlayerRegistry::new();
    registry
        .register("U", Recorder::boxed("U", &log, answer))
        .expect("first registration");
    (registry, log)
}

fn single_call(log: &Log) -> Received {
    let calls = log.borrow();
    assert_eq!(calls.len(), 1, "Ожидаем ровно один вызов игрока");
    calls[0].1.clone()
}

//
// ====================== ROUTING ======================
//

#[test]
fn game_start_goes_to_receive_game_start_message() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));
    let msg = MessageBuilder::build_game_start(&config(), &seats());

    let answer = MessageDispatcher::new(&mut registry)
        .dispatch(&Target::Broadcast, &msg)
        .expect("dispatch ok");
    assert_eq!(answer, None);

    let Message::GameStart(payload) = &msg else {
        panic!("expected game_start");
    };
    assert_eq!(single_call(&log), Received::GameStart(payload.game_information.clone()));
}

#[test]
fn round_start_passes_hole_card_and_seats() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));
    let msg = MessageBuilder::build_round_start(7, 1, &seats()).expect("seat 1 exists");

    MessageDispatcher::new(&mut registry)
        .dispatch(&Target::player("U"), &msg)
        .expect("dispatch ok");

    let Message::RoundStart(payload) = &msg else {
        panic!("expected round_start");
    };
    assert_eq!(payload.hole_card, vec![card(1), card(2)]);
    assert_eq!(
        single_call(&log),
        Received::RoundStart(payload.hole_card.clone(), payload.seats.clone())
    );
}

#[test]
fn street_start_passes_street_and_round_state() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));
    let msg = MessageBuilder::build_street_start(&state());

    MessageDispatcher::new(&mut registry)
        .dispatch(&Target::Broadcast, &msg)
        .expect("dispatch ok");

    let Message::StreetStart(payload) = &msg else {
        panic!("expected street_start");
    };
    assert_eq!(
        single_call(&log),
        Received::StreetStart(Street::Flop, payload.round_state.clone())
    );
}

#[test]
fn ask_goes_to_declare_action_and_returns_decision() {
    let call = ActionDecision::new(Action::Call, Chips::ZERO);
    let (mut registry, log) = registry_with_recorder(Ok(call));
    let msg = MessageBuilder::build_ask(1, &state()).expect("seat 1 exists");

    let answer = MessageDispatcher::new(&mut registry)
        .dispatch(&Target::player("U"), &msg)
        .expect("dispatch ok");
    assert_eq!(answer, Some(call));

    let Message::Ask(payload) = &msg else {
        panic!("expected ask");
    };
    assert_eq!(
        single_call(&log),
        Received::Ask(
            payload.hole_card.clone(),
            payload.valid_actions.clone(),
            payload.round_state.clone(),
            payload.action_histories.clone(),
        )
    );
}

#[test]
fn game_update_passes_action_round_state_and_histories() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));
    let msg = MessageBuilder::build_game_update(1, Action::Call, Chips(10), &state())
        .expect("seat 1 exists");

    MessageDispatcher::new(&mut registry)
        .dispatch(&Target::Broadcast, &msg)
        .expect("dispatch ok");

    let Message::GameUpdate(payload) = &msg else {
        panic!("expected game_update");
    };
    assert_eq!(payload.action.player_uuid, "u1");
    assert_eq!(payload.action.amount, Chips(10));
    assert_eq!(
        single_call(&log),
        Received::GameUpdate(
            payload.action.clone(),
            payload.round_state.clone(),
            payload.action_histories.clone(),
        )
    );
}

#[test]
fn round_result_passes_winners_and_round_state() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));
    let state = state();
    let winners = state.table.seats.players()[1..2].to_vec();
    let msg = MessageBuilder::build_round_result(7, &winners, &state);

    MessageDispatcher::new(&mut registry)
        .dispatch(&Target::Broadcast, &msg)
        .expect("dispatch ok");

    let Message::RoundResult(payload) = &msg else {
        panic!("expected round_result");
    };
    assert_eq!(payload.winners.len(), 1);
    assert_eq!(payload.winners[0].uuid, "u1");
    assert_eq!(
        single_call(&log),
        Received::RoundResult(payload.winners.clone(), payload.round_state.clone())
    );
}

#[test]
fn game_result_goes_to_receive_game_result_message() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));
    let msg = MessageBuilder::build_game_result(&config(), &seats());

    MessageDispatcher::new(&mut registry)
        .dispatch(&Target::Broadcast, &msg)
        .expect("dispatch ok");

    let Message::GameResult(payload) = &msg else {
        panic!("expected game_result");
    };
    assert_eq!(single_call(&log), Received::GameResult(payload.game_information.clone()));
}

//
// ====================== PROTOCOL ======================
//

#[test]
fn answer_outside_valid_actions_becomes_fold() {
    // На флопе с нулевой ставкой минимальный рейз – 10.
    let (mut registry, _log) =
        registry_with_recorder(Ok(ActionDecision::new(Action::Raise, Chips(5))));
    let msg = MessageBuilder::build_ask(1, &state()).expect("seat 1 exists");

    let answer = MessageDispatcher::new(&mut registry)
        .dispatch(&Target::player("U"), &msg)
        .expect("violation is recovered");
    assert_eq!(answer, Some(ActionDecision::fold()));
}

#[test]
fn player_without_answer_is_folded() {
    let (mut registry, _log) =
        registry_with_recorder(Err(PlayerError::NoResponse("timeout".to_string())));
    let msg = MessageBuilder::build_ask(1, &state()).expect("seat 1 exists");

    let answer = MessageDispatcher::new(&mut registry)
        .dispatch(&Target::player("U"), &msg)
        .expect("violation is recovered");
    assert_eq!(answer, Some(ActionDecision::fold()));
}

/// Принудительный фолд от диспетчера доходит до движка: нарушитель выбывает из раунда.
#[test]
fn forced_fold_leaves_violator_folded_in_round() {
    let mut table = Table::new();
    for i in 0..3 {
        table
            .sitdown(Player::new(format!("p{i}"), Chips(100), format!("player {i}")))
            .expect("unique uuid");
    }
    let (mut state, step) = start_round(
        1,
        Chips(5),
        Chips::ZERO,
        table,
        Deck::standard_52(),
        &BestHandEvaluator,
    )
    .expect("round starts");
    let ask = step.messages.last().expect("ask is emitted");
    assert_eq!(ask.target, Target::player("p0"));

    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = PlayerRegistry::new();
    registry
        .register(
            "p0",
            Recorder::boxed("p0", &log, Ok(ActionDecision::new(Action::Raise, Chips(1)))),
        )
        .expect("first registration");

    let decision = MessageDispatcher::new(&mut registry)
        .dispatch(&ask.target, &ask.message)
        .expect("violation is recovered")
        .expect("ask yields a decision");
    assert_eq!(decision, ActionDecision::fold());

    let step = apply_action(&mut state, decision, &BestHandEvaluator).expect("fold is always legal");
    assert_eq!(step.status, RoundStatus::Ongoing);
    assert_eq!(state.table.seats.players()[0].status, PayStatus::Folded, "Нарушитель сфолдил");
    assert_eq!(state.table.seats.players()[0].stack, Chips(100), "Фолд ничего не стоит");
    assert_eq!(state.next_player, Some(1));
}

#[test]
fn ask_cannot_be_broadcast() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));
    let msg = MessageBuilder::build_ask(1, &state()).expect("seat 1 exists");

    let err = MessageDispatcher::new(&mut registry)
        .dispatch(&Target::Broadcast, &msg)
        .unwrap_err();
    assert_eq!(err, DispatchError::BroadcastDecision);
    assert!(log.borrow().is_empty(), "Никто не должен получить ask");
}

#[test]
fn unicast_to_unknown_uuid_is_an_error() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));
    let msg = MessageBuilder::build_round_start(7, 1, &seats()).expect("seat 1 exists");

    let err = MessageDispatcher::new(&mut registry)
        .dispatch(&Target::player("nobody"), &msg)
        .unwrap_err();
    assert_eq!(err, DispatchError::UnknownRecipient("nobody".to_string()));
    assert!(log.borrow().is_empty());
}

#[test]
fn duplicate_registration_is_rejected() {
    let (mut registry, log) = registry_with_recorder(Ok(ActionDecision::fold()));

    let err = registry
        .register("U", Recorder::boxed("U2", &log, Ok(ActionDecision::fold())))
        .unwrap_err();
    assert_eq!(err, DispatchError::DuplicateRegistration("U".to_string()));
    assert_eq!(registry.len(), 1);
}

#[test]
fn broadcast_follows_registration_order_and_unicast_reaches_only_target() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = PlayerRegistry::new();
    for name in ["c", "a", "b"] {
        registry
            .register(name, Recorder::boxed(name, &log, Ok(ActionDecision::fold())))
            .expect("unique uuid");
    }
    assert_eq!(registry.uuids().collect::<Vec<_>>(), vec!["c", "a", "b"]);

    let start = MessageBuilder::build_game_start(&config(), &seats());
    MessageDispatcher::new(&mut registry)
        .dispatch(&Target::Broadcast, &start)
        .expect("dispatch ok");

    let order: Vec<&str> = log.borrow().iter().map(|(name, _)| *name).collect();
    assert_eq!(order, vec!["c", "a", "b"]);

    log.borrow_mut().clear();
    let round_start = MessageBuilder::build_round_start(7, 1, &seats()).expect("seat 1 exists");
    MessageDispatcher::new(&mut registry)
        .dispatch(&Target::player("a"), &round_start)
        .expect("dispatch ok");

    let order: Vec<&str> = log.borrow().iter().map(|(name, _)| *name).collect();
    assert_eq!(order, vec!["a"]);
}

#[test]
fn broadcast_sentinel_parses_to_broadcast_target() {
    assert_eq!("-1".parse::<Target>(), Ok(Target::Broadcast));
    assert_eq!("U".parse::<Target>(), Ok(Target::player("U")));
    assert_eq!(Target::Broadcast.to_string(), "-1");
}
