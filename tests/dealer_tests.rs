//! Матч целиком через Dealer: регистрация, последовательность раундов, итог.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use poker_referee::domain::{card::Card, chips::Chips, config::MatchConfig, history::ActionHistories};
use poker_referee::engine::{Action, ActionAmount, ActionDecision, EngineError, ValidAction};
use poker_referee::eval::BestHandEvaluator;
use poker_referee::game::Dealer;
use poker_referee::infra::DeterministicRng;
use poker_referee::interface::{
    DispatchError, GameInformation, PlayerError, PokerPlayer, RoundStateView, SeatView,
};
use poker_referee::players::{CallPlayer, FoldPlayer, RandomPlayer};

type Counts = Rc<RefCell<HashMap<&'static str, usize>>>;

/// Колл-бот, который считает полученные сообщения.
struct Counting {
    counts: Counts,
}

impl Counting {
    fn bump(&self, key: &'static str) {
        *self.counts.borrow_mut().entry(key).or_insert(0) += 1;
    }
}

impl PokerPlayer for Counting {
    fn receive_game_start_message(&mut self, _game_information: &GameInformation) {
        self.bump("game_start");
    }

    fn receive_round_start_message(&mut self, hole_card: &[Card], _seats: &[SeatView]) {
        // Вылетевший игрок тоже получает round_start, но без карт.
        assert!(hole_card.len() == 2 || hole_card.is_empty(), "got {hole_card:?}");
        self.bump("round_start");
    }

    fn declare_action(
        &mut self,
        hole_card: &[Card],
        valid_actions: &[ValidAction],
        round_state: &RoundStateView,
        action_histories: &ActionHistories,
    ) -> Result<ActionDecision, PlayerError> {
        self.bump("ask");
        CallPlayer.declare_action(hole_card, valid_actions, round_state, action_histories)
    }

    fn receive_round_result_message(&mut self, _winners: &[SeatView], _round_state: &RoundStateView) {
        self.bump("round_result");
    }

    fn receive_game_result_message(&mut self, _game_information: &GameInformation) {
        self.bump("game_result");
    }
}

/// Всегда идёт олл-ин, если можно, иначе коллирует.
struct Shover;

impl PokerPlayer for Shover {
    fn declare_action(
        &mut self,
        hole_card: &[Card],
        valid_actions: &[ValidAction],
        round_state: &RoundStateView,
        action_histories: &ActionHistories,
    ) -> Result<ActionDecision, PlayerError> {
        let shove = valid_actions.iter().find_map(|v| match (v.action, v.amount) {
            (Action::Raise, ActionAmount::Range { max, .. }) => Some(ActionDecision::new(Action::Raise, max)),
            _ => None,
        });
        match shove {
            Some(decision) => Ok(decision),
            None => CallPlayer.declare_action(hole_card, valid_actions, round_state, action_histories),
        }
    }
}

/// Отвечает заведомо недопустимой суммой.
struct Cheater;

impl PokerPlayer for Cheater {
    fn declare_action(
        &mut self,
        _hole_card: &[Card],
        _valid_actions: &[ValidAction],
        _round_state: &RoundStateView,
        _action_histories: &ActionHistories,
    ) -> Result<ActionDecision, PlayerError> {
        Ok(ActionDecision::new(Action::Raise, Chips(1)))
    }
}

fn dealer(config: MatchConfig, seed: u64) -> Dealer<BestHandEvaluator, DeterministicRng> {
    Dealer::new(config, BestHandEvaluator, DeterministicRng::from_seed(seed))
}

fn total_stack(seats: &[SeatView]) -> Chips {
    seats.iter().map(|s| s.stack).sum()
}

#[test]
fn match_conserves_chips_and_notifies_every_round() {
    let counts: Counts = Rc::new(RefCell::new(HashMap::new()));
    let mut dealer = dealer(MatchConfig::new(Chips(1000), 5, Chips(5)), 1);
    dealer
        .register_player("a", "counting", Box::new(Counting { counts: Rc::clone(&counts) }))
        .unwrap();
    dealer.register_player("b", "caller", Box::new(CallPlayer)).unwrap();
    dealer.register_player("c", "random", Box::new(RandomPlayer::seeded(3))).unwrap();

    let result = dealer.start_game().expect("match finishes");

    assert_eq!(result.seats.len(), 3);
    assert_eq!(total_stack(&result.seats), Chips(3000), "Фишки сохраняются");

    let counts = counts.borrow();
    assert_eq!(counts.get("game_start"), Some(&1));
    assert_eq!(counts.get("game_result"), Some(&1));
    assert_eq!(counts.get("round_start"), Some(&(result.rounds_played as usize)));
    assert_eq!(counts.get("round_result"), Some(&(result.rounds_played as usize)));
    assert!(counts.get("ask").copied().unwrap_or(0) > 0);
    assert!(result.rounds_played >= 1 && result.rounds_played <= 5);
}

#[test]
fn folders_bleed_blinds_to_caller() {
    let mut dealer = dealer(MatchConfig::new(Chips(100), 4, Chips(5)), 9);
    dealer.register_player("f1", "folder", Box::new(FoldPlayer)).unwrap();
    dealer.register_player("f2", "folder", Box::new(FoldPlayer)).unwrap();
    dealer.register_player("c", "caller", Box::new(CallPlayer)).unwrap();

    let result = dealer.start_game().expect("match finishes");

    assert_eq!(result.rounds_played, 4);
    assert_eq!(total_stack(&result.seats), Chips(300));
    let caller = result.seats.iter().find(|s| s.uuid == "c").unwrap();
    assert!(caller.stack > Chips(100), "Колл-бот собирает блайнды: {}", caller.stack);
}

#[test]
fn match_stops_when_one_player_has_all_chips() {
    let mut dealer = dealer(MatchConfig::new(Chips(100), 1000, Chips(5)), 5);
    dealer.register_player("s", "shover", Box::new(Shover)).unwrap();
    dealer.register_player("c", "caller", Box::new(CallPlayer)).unwrap();

    let result = dealer.start_game().expect("match finishes");

    assert!(result.rounds_played < 1000);
    assert_eq!(total_stack(&result.seats), Chips(200));
    assert!(result.seats.iter().any(|s| s.stack.is_zero()));
}

#[test]
fn illegal_answers_are_folded_and_match_goes_on() {
    let mut dealer = dealer(MatchConfig::new(Chips(100), 3, Chips(5)), 11);
    dealer.register_player("x", "cheater", Box::new(Cheater)).unwrap();
    dealer.register_player("c", "caller", Box::new(CallPlayer)).unwrap();

    let result = dealer.start_game().expect("violations do not abort the match");

    assert_eq!(result.rounds_played, 3);
    assert_eq!(total_stack(&result.seats), Chips(200));
    let cheater = result.seats.iter().find(|s| s.uuid == "x").unwrap();
    assert!(cheater.stack < Chips(100), "Нарушитель теряет блайнды");
}

#[test]
fn registration_errors() {
    let mut dealer = dealer(MatchConfig::new(Chips(100), 3, Chips(5)), 0);
    assert_eq!(dealer.register_player("a", "a", Box::new(CallPlayer)), Ok(0));
    assert_eq!(
        dealer.register_player("a", "again", Box::new(CallPlayer)),
        Err(DispatchError::DuplicateRegistration("a".to_string()))
    );
    assert_eq!(dealer.table().seats.size(), 1);

    assert_eq!(
        dealer.start_game(),
        Err(DispatchError::Engine(EngineError::NotEnoughPlayers))
    );
}

#[test]
fn invalid_config_aborts_before_first_message() {
    let counts: Counts = Rc::new(RefCell::new(HashMap::new()));
    let mut dealer = dealer(MatchConfig::new(Chips(100), 0, Chips(5)), 0);
    dealer
        .register_player("a", "counting", Box::new(Counting { counts: Rc::clone(&counts) }))
        .unwrap();
    dealer.register_player("b", "caller", Box::new(CallPlayer)).unwrap();

    assert!(matches!(
        dealer.start_game(),
        Err(DispatchError::Engine(EngineError::InvalidConfig(_)))
    ));
    assert!(counts.borrow().is_empty());
}

/// 24 игрока: на ривер карт уже не хватает. Раунд обрывается,
/// но места и стеки за столом остаются как до раунда.
#[test]
fn failed_round_keeps_seats_and_stacks() {
    let mut dealer = dealer(MatchConfig::new(Chips(100), 3, Chips(5)), 2);
    for i in 0..24 {
        dealer
            .register_player(format!("p{i}"), "caller", Box::new(CallPlayer))
            .unwrap();
    }

    let result = dealer.start_game();

    assert_eq!(
        result,
        Err(DispatchError::Engine(EngineError::DeckExhausted {
            requested: 1,
            remaining: 0
        }))
    );
    let seats = &dealer.table().seats;
    assert_eq!(seats.size(), 24, "Игроки не пропадают со стола");
    assert_eq!(seats.total_stack(), Chips(2400));
    assert!(
        seats.players().iter().all(|p| p.stack == Chips(100) && p.paid.is_zero()),
        "Стеки откатываются к началу раунда"
    );
}
