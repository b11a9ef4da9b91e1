use crate::domain::player::{PayStatus, Player};
use crate::domain::{SeatIndex, Seats};

/// Найти следующее место по кругу, удовлетворяющее условию (включая/исключая start).
pub fn next_seat_where<F>(seats: &Seats, start: SeatIndex, include_start: bool, pred: F) -> Option<SeatIndex>
where
    F: Fn(&Player) -> bool,
{
    let n = seats.size();
    if n == 0 {
        return None;
    }

    let first = if include_start { 0 } else { 1 };
    (first..first + n)
        .map(|offset| (start + offset) % n)
        .find(|&idx| seats.players().get(idx).map(&pred).unwrap_or(false))
}

/// Следующий игрок, которого можно спрашивать (не фолд, не олл-ин).
pub fn next_waiting_seat(seats: &Seats, start: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(seats, start, false, Player::is_waiting_ask)
}

/// Места по кругу, начиная со следующего за `start` и заканчивая самим `start`.
pub fn seats_clockwise_after(seats: &Seats, start: SeatIndex) -> Vec<SeatIndex> {
    let n = seats.size();
    (1..=n).map(|offset| (start + offset) % n).collect()
}

/// Следующая позиция кнопки: ближайший по кругу игрок с фишками.
pub fn next_dealer(seats: &Seats, current: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(seats, current, false, |p| !p.stack.is_zero())
}

/// Позиции малого и большого блайнда для кнопки `button`.
///
/// Хедз-ап: малый блайнд ставит сама кнопка.
/// Вылетевшие игроки пропускаются.
pub fn blind_positions(seats: &Seats, button: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let playing = |p: &Player| p.status != PayStatus::Busted;
    let in_round = seats.players().iter().filter(|p| playing(*p)).count();
    if in_round < 2 {
        return None;
    }

    let sb = if in_round == 2 {
        next_seat_where(seats, button, true, playing)?
    } else {
        next_seat_where(seats, button, false, playing)?
    };
    let bb = next_seat_where(seats, sb, false, playing)?;
    Some((sb, bb))
}
