use std::cmp::Ordering;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{PlayerUuid, SeatIndex, Seats};
use crate::engine::errors::EngineError;
use crate::engine::positions::seats_clockwise_after;
use crate::engine::round_state::RoundState;
use crate::engine::side_pots::{split_pots, Contribution, SidePot};
use crate::eval::{describe_hand, HandEvaluator};

/// Выплата игроку по итогам раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub seat: SeatIndex,
    pub uuid: PlayerUuid,
    pub amount: Chips,
}

/// Итог раунда: победители (в порядке мест) и распределение банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundOutcome {
    pub winners: Vec<PlayerUuid>,
    pub payouts: Vec<Payout>,
}

/// Завершить раунд: разделить банк, выплатить, перевести улицу в Showdown.
///
/// Если в игре остался один игрок, он забирает весь банк без вскрытия.
/// Иначе банк режется на слои по взносам, каждый слой выигрывает лучшая рука
/// среди претендентов этого слоя; ничья делится поровну, лишние фишки получают
/// первые по кругу от кнопки.
pub fn resolve_round<E>(state: &mut RoundState, evaluator: &E) -> Result<RoundOutcome, EngineError>
where
    E: HandEvaluator + ?Sized,
{
    state.street = Street::Showdown;
    state.next_player = None;
    state.agree_num = 0;

    let seats = &state.table.seats;
    let active: Vec<SeatIndex> = seats
        .players()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active())
        .map(|(seat, _)| seat)
        .collect();

    let mut awards = vec![Chips::ZERO; seats.size()];
    let mut winning_seats: Vec<SeatIndex> = Vec::new();

    match active.as_slice() {
        [] => return Err(EngineError::Internal("раунд без активных игроков")),
        [only] => {
            awards[*only] = state.pot();
            winning_seats.push(*only);
        }
        _ => {
            let board = state.table.community_cards();
            let odd_chip_order = seats_clockwise_after(seats, state.table.dealer_button);

            for &seat in &active {
                let player = seats.get(seat)?;
                let mut cards = player.hole_cards.clone();
                cards.extend_from_slice(board);
                debug!(
                    "[round {}] seat {} ({}) shows {}",
                    state.round_count,
                    seat,
                    player.uuid,
                    describe_hand(evaluator.rank(&cards))
                );
            }

            for pot in split_pots(&contributions(seats)) {
                let winners = best_hands(seats, board, &pot, evaluator)?;
                award_pot(&mut awards, &pot, &winners, &odd_chip_order);

                // Слой с единственным претендентом – возврат неуравненной ставки, не выигрыш.
                if pot.eligible_seats.len() > 1 {
                    winning_seats.extend(winners);
                }
            }
        }
    }

    winning_seats.sort_unstable();
    winning_seats.dedup();

    let round_count = state.round_count;
    let mut payouts = Vec::new();
    for (seat, player) in state.table.seats.players_mut().iter_mut().enumerate() {
        // Банк разыгран: взносы обнуляются, фишки уходят в стеки.
        player.paid = Chips::ZERO;
        let amount = awards[seat];
        if amount.is_zero() {
            continue;
        }
        player.append_chips(amount);
        debug!("[round {}] seat {} ({}) receives {}", round_count, seat, player.uuid, amount);
        payouts.push(Payout {
            seat,
            uuid: player.uuid.clone(),
            amount,
        });
    }

    let winners: Vec<PlayerUuid> = winning_seats
        .iter()
        .filter_map(|&s| state.table.seats.players().get(s).map(|p| p.uuid.clone()))
        .collect();

    info!("[round {}] finished, winners: {:?}", round_count, winners);

    Ok(RoundOutcome { winners, payouts })
}

fn contributions(seats: &Seats) -> Vec<Contribution> {
    seats
        .players()
        .iter()
        .enumerate()
        .map(|(seat, p)| Contribution {
            seat,
            amount: p.paid,
            eligible: p.is_active(),
        })
        .collect()
}

/// Места с лучшей рукой среди претендентов слоя (при ничьей – несколько).
fn best_hands<E>(
    seats: &Seats,
    board: &[Card],
    pot: &SidePot,
    evaluator: &E,
) -> Result<Vec<SeatIndex>, EngineError>
where
    E: HandEvaluator + ?Sized,
{
    let hand_of = |seat: SeatIndex| -> Result<Vec<Card>, EngineError> {
        let player = seats.get(seat)?;
        let mut cards = player.hole_cards.clone();
        cards.extend_from_slice(board);
        Ok(cards)
    };

    let mut best: Vec<SeatIndex> = Vec::new();
    let mut best_hand: Vec<Card> = Vec::new();

    for &seat in &pot.eligible_seats {
        let hand = hand_of(seat)?;
        if best.is_empty() {
            best.push(seat);
            best_hand = hand;
            continue;
        }
        match evaluator.compare(&hand, &best_hand) {
            Ordering::Greater => {
                best.clear();
                best.push(seat);
                best_hand = hand;
            }
            Ordering::Equal => best.push(seat),
            Ordering::Less => {}
        }
    }

    if best.is_empty() {
        return Err(EngineError::Internal("слой банка без претендентов"));
    }
    Ok(best)
}

/// Поделить слой поровну; остаток по одной фишке – первым по кругу от кнопки.
fn award_pot(
    awards: &mut [Chips],
    pot: &SidePot,
    winners: &[SeatIndex],
    odd_chip_order: &[SeatIndex],
) {
    let share = Chips(pot.amount.0 / winners.len() as u64);
    let mut remainder = pot.amount.0 % winners.len() as u64;

    for &seat in odd_chip_order.iter().filter(|s| winners.contains(s)) {
        let mut prize = share;
        if remainder > 0 {
            prize.0 += 1;
            remainder -= 1;
        }
        awards[seat] += prize;
    }
}
