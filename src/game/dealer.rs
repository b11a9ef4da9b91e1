use std::collections::VecDeque;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::config::MatchConfig;
use crate::domain::deck::Deck;
use crate::domain::player::Player;
use crate::domain::table::Table;
use crate::domain::{PlayerUuid, SeatIndex};
use crate::engine::errors::EngineError;
use crate::engine::positions::next_dealer;
use crate::engine::round::{apply_action, start_round, Envelope, RoundStatus};
use crate::engine::RandomSource;
use crate::eval::HandEvaluator;
use crate::interface::builder::MessageBuilder;
use crate::interface::dispatcher::{MessageDispatcher, PlayerRegistry, Target};
use crate::interface::errors::DispatchError;
use crate::interface::message::{seat_views, SeatView};
use crate::interface::player::PokerPlayer;

/// Итог матча: сколько раундов сыграно и финальные стеки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    pub rounds_played: u32,
    pub seats: Vec<SeatView>,
}

/// Ведущий матча: владеет столом и реестром игроков, крутит раунды
/// и доставляет сообщения движка через диспетчер.
pub struct Dealer<E, R> {
    config: MatchConfig,
    table: Table,
    registry: PlayerRegistry,
    evaluator: E,
    rng: R,
}

impl<E, R> Dealer<E, R>
where
    E: HandEvaluator,
    R: RandomSource,
{
    pub fn new(config: MatchConfig, evaluator: E, rng: R) -> Self {
        Self {
            config,
            table: Table::new(),
            registry: PlayerRegistry::new(),
            evaluator,
            rng,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Посадить игрока на следующее свободное место и привязать реализацию.
    /// Порядок регистрации = порядок мест = порядок рассылки.
    pub fn register_player(
        &mut self,
        uuid: impl Into<PlayerUuid>,
        name: impl Into<String>,
        player: Box<dyn PokerPlayer>,
    ) -> Result<SeatIndex, DispatchError> {
        let uuid = uuid.into();
        if self.registry.contains(&uuid) {
            return Err(DispatchError::DuplicateRegistration(uuid));
        }
        let seat = self
            .table
            .sitdown(Player::new(uuid.clone(), self.config.initial_stack, name))?;
        self.registry.register(uuid, player)?;
        Ok(seat)
    }

    /// Сыграть матч: game_start, до `max_round` раундов, game_result.
    ///
    /// Матч заканчивается раньше, если фишки остались меньше чем у двух игроков.
    pub fn start_game(&mut self) -> Result<GameResult, DispatchError> {
        self.config.validate()?;
        if self.table.seats.size() < 2 {
            return Err(EngineError::NotEnoughPlayers.into());
        }

        info!(
            "[dealer] game start: {} players, {} rounds max, stack {}",
            self.table.seats.size(),
            self.config.max_round,
            self.config.initial_stack
        );
        let start = MessageBuilder::build_game_start(&self.config, &self.table.seats);
        MessageDispatcher::new(&mut self.registry).dispatch(&Target::Broadcast, &start)?;

        let mut rounds_played = 0;
        let mut button: Option<SeatIndex> = None;
        for round_count in 1..=self.config.max_round {
            if self.table.seats.count_players_with_chips() < 2 {
                info!("[dealer] only one player with chips left");
                break;
            }

            let next_button = match button {
                None => next_dealer(&self.table.seats, self.table.seats.size() - 1),
                Some(current) => next_dealer(&self.table.seats, current),
            };
            let next_button = next_button.ok_or(EngineError::NotEnoughPlayers)?;
            self.table.dealer_button = next_button;
            button = Some(next_button);

            self.play_round(round_count)?;
            rounds_played = round_count;
        }

        let result = MessageBuilder::build_game_result(&self.config, &self.table.seats);
        MessageDispatcher::new(&mut self.registry).dispatch(&Target::Broadcast, &result)?;

        info!("[dealer] game over after {} rounds", rounds_played);
        Ok(GameResult {
            rounds_played,
            seats: seat_views(&self.table.seats),
        })
    }

    /// Один раунд: сообщения движка уходят в очередь, решения игроков
    /// возвращаются в `apply_action`, пока раунд не закроется.
    ///
    /// Раунд играется на копии стола. Если он оборвался ошибкой,
    /// `self.table` остаётся таким, каким был до раунда.
    fn play_round(&mut self, round_count: u32) -> Result<(), DispatchError> {
        let (small_blind, ante) = self.config.blinds_for_round(round_count);
        let deck = Deck::shuffled(&mut self.rng);
        let table = self.table.clone();

        let (mut state, step) =
            start_round(round_count, small_blind, ante, table, deck, &self.evaluator)?;
        let mut status = step.status;
        let mut queue: VecDeque<Envelope> = step.messages.into();

        let mut dispatcher = MessageDispatcher::new(&mut self.registry);
        while let Some(envelope) = queue.pop_front() {
            let Some(decision) = dispatcher.dispatch(&envelope.target, &envelope.message)? else {
                continue;
            };
            let step = apply_action(&mut state, decision, &self.evaluator)?;
            status = step.status;
            queue.extend(step.messages);
        }

        match status {
            RoundStatus::Finished(outcome) => {
                debug!("[dealer] round {} payouts: {:?}", round_count, outcome.payouts);
                self.table = state.table;
                Ok(())
            }
            RoundStatus::Ongoing => Err(EngineError::Internal("раунд не закрылся").into()),
        }
    }
}
