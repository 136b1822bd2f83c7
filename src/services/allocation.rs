//! allocation.rs
//!
//! Подбор мест под запрос на `n` билетов. Функции чистые: читают [`SeatMap`]
//! и возвращают кандидатов, ничего не меняя в схеме.
//!
//! 1.  **По умолчанию**: ряды перебираются от экрана (ряд 0) назад. Первый ряд,
//!     где помещается непрерывный блок из `n` свободных мест, получает блок,
//!     центр которого ближе всего к середине ряда (при равенстве - левее).
//!     Если такого ряда нет, места набираются по рядам от центра к краям.
//! 2.  **От якоря**: слева направо от выбранного места, остаток - в следующих
//!     рядах с первого кресла. Центрирование не применяется.

use tracing::debug;

use crate::error::BookingError;
use crate::models::{Seat, SeatMap, SeatState};

/// Выбирает алгоритм по наличию якоря.
pub fn allocate(map: &SeatMap, count: usize, anchor: Option<Seat>) -> Result<Vec<Seat>, BookingError> {
    match anchor {
        Some(anchor) => allocate_from_anchor(map, count, anchor),
        None => allocate_default(map, count),
    }
}

/// Центрированный блок в первом подходящем ряду, иначе раскладка по рядам.
pub fn allocate_default(map: &SeatMap, count: usize) -> Result<Vec<Seat>, BookingError> {
    ensure_capacity(map, count)?;

    // Весь блок в одном ряду, если это где-то возможно
    for row in 0..map.rows() {
        if let Some(start) = centered_run(map.row(row), count) {
            debug!(row, start, count, "centered block found");
            return Ok((start..start + count).map(|c| Seat::new(row, c)).collect());
        }
    }

    // Иначе переливаем по рядам, каждый ряд заполняем от центра
    let order = center_out(map.columns());
    let mut picks = Vec::with_capacity(count);
    'rows: for row in 0..map.rows() {
        let states = map.row(row);
        for &column in &order {
            if states[column] == SeatState::Free {
                picks.push(Seat::new(row, column));
                if picks.len() == count {
                    break 'rows;
                }
            }
        }
    }

    debug!(count, rows_used = ?picks.last().map(|s| s.row + 1), "block split across rows");
    picks.sort();
    Ok(picks)
}

/// Места слева направо от `anchor` без возврата к передним рядам.
pub fn allocate_from_anchor(
    map: &SeatMap,
    count: usize,
    anchor: Seat,
) -> Result<Vec<Seat>, BookingError> {
    let anchor_state = map.state(anchor)?;
    ensure_capacity(map, count)?;
    if anchor_state == SeatState::Sold {
        return Err(BookingError::SeatUnavailable(anchor));
    }

    let mut picks = Vec::with_capacity(count);
    let mut first_column = anchor.column;
    for row in anchor.row..map.rows() {
        let states = map.row(row);
        for column in first_column..map.columns() {
            if states[column] == SeatState::Free {
                picks.push(Seat::new(row, column));
                if picks.len() == count {
                    debug!(%anchor, count, "anchored allocation complete");
                    return Ok(picks);
                }
            }
        }
        first_column = 0;
    }

    // Ряды после якоря закончились раньше, чем набрали нужное число
    Err(BookingError::InsufficientCapacity {
        requested: count,
        available: picks.len(),
    })
}

fn ensure_capacity(map: &SeatMap, count: usize) -> Result<(), BookingError> {
    if count == 0 {
        return Err(BookingError::InvalidSeatCount);
    }
    if count > map.available_count() {
        return Err(BookingError::InsufficientCapacity {
            requested: count,
            available: map.available_count(),
        });
    }
    Ok(())
}

/// Начало непрерывного блока из `count` свободных мест, ближайшего к центру ряда.
///
/// Расстояния считаются в удвоенных единицах, чтобы не уходить в дроби;
/// при равенстве выигрывает меньший индекс.
fn centered_run(states: &[SeatState], count: usize) -> Option<usize> {
    let columns = states.len();
    if count > columns {
        return None;
    }

    let mut best: Option<(usize, usize)> = None;
    let mut free_streak = 0;
    for (column, state) in states.iter().enumerate() {
        free_streak = if *state == SeatState::Free { free_streak + 1 } else { 0 };
        if free_streak < count {
            continue;
        }
        let start = column + 1 - count;
        let distance = (2 * start + count).abs_diff(columns);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((start, distance));
        }
    }
    best.map(|(start, _)| start)
}

/// Индексы кресел от центра к краям, для чётных рядов левый центр первым.
fn center_out(columns: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(columns);
    if columns == 0 {
        return order;
    }
    let mut left = (columns - 1) / 2;
    let mut right = columns / 2;
    if left == right {
        order.push(left);
        right += 1;
        if left == 0 {
            return order;
        }
        left -= 1;
    }
    loop {
        order.push(left);
        if right < columns {
            order.push(right);
        }
        right += 1;
        if left == 0 {
            break;
        }
        left -= 1;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HallConfig;

    fn hall(rows: usize, columns: usize) -> SeatMap {
        SeatMap::new(rows, columns, &HallConfig::default()).unwrap()
    }

    fn fill_row(map: &mut SeatMap, row: usize) {
        let seats: Vec<Seat> = (0..map.columns()).map(|c| Seat::new(row, c)).collect();
        map.commit(&seats).unwrap();
    }

    fn seats(list: &[(usize, usize)]) -> Vec<Seat> {
        list.iter().map(|&(r, c)| Seat::new(r, c)).collect()
    }

    #[test]
    fn center_out_prefers_left_of_center() {
        assert_eq!(center_out(1), vec![0]);
        assert_eq!(center_out(4), vec![1, 2, 0, 3]);
        assert_eq!(center_out(5), vec![2, 1, 3, 0, 4]);
        assert_eq!(center_out(6), vec![2, 3, 1, 4, 0, 5]);
    }

    #[test]
    fn centered_run_breaks_ties_to_the_left() {
        let free = [SeatState::Free; 6];
        // 6 мест, блок из 3: старты 1 и 2 равноудалены
        assert_eq!(centered_run(&free, 3), Some(1));
        assert_eq!(centered_run(&free, 4), Some(1));
        assert_eq!(centered_run(&free, 6), Some(0));
        assert_eq!(centered_run(&free, 7), None);

        let free = [SeatState::Free; 5];
        assert_eq!(centered_run(&free, 3), Some(1));
        assert_eq!(centered_run(&free, 4), Some(0));
    }

    #[test]
    fn centered_run_skips_sold_seats() {
        use SeatState::{Free, Sold};
        let row = [Free, Free, Sold, Free, Free, Free, Free];
        assert_eq!(centered_run(&row, 2), Some(3));
        assert_eq!(centered_run(&row, 3), Some(3));
        assert_eq!(centered_run(&row, 5), None);
    }

    #[test]
    fn default_fills_front_row_centered() {
        let map = hall(5, 5);
        let picked = allocate_default(&map, 3).unwrap();
        assert_eq!(picked, seats(&[(0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn default_four_of_five_on_middle_row_leans_left() {
        let mut map = hall(5, 5);
        fill_row(&mut map, 0);
        fill_row(&mut map, 1);

        let picked = allocate_default(&map, 4).unwrap();
        assert_eq!(picked, seats(&[(2, 0), (2, 1), (2, 2), (2, 3)]));
    }

    #[test]
    fn default_prefers_whole_block_in_a_later_row_over_splitting() {
        let mut map = hall(3, 5);
        map.commit(&seats(&[(0, 2)])).unwrap();

        let picked = allocate_default(&map, 3).unwrap();
        assert_eq!(picked, seats(&[(1, 1), (1, 2), (1, 3)]));

        // 2 места ещё помещаются в ряд 0 целиком
        let picked = allocate_default(&map, 2).unwrap();
        assert_eq!(picked, seats(&[(0, 0), (0, 1)]));
    }

    #[test]
    fn default_splits_from_center_when_no_row_fits() {
        let map = hall(3, 4);
        let picked = allocate_default(&map, 6).unwrap();
        assert_eq!(
            picked,
            seats(&[(0, 0), (0, 1), (0, 2), (0, 3), (1, 1), (1, 2)])
        );
    }

    #[test]
    fn default_split_uses_center_most_leftovers() {
        let mut map = hall(2, 5);
        map.commit(&seats(&[(0, 1), (0, 3), (1, 0), (1, 2), (1, 4)]))
            .unwrap();

        let picked = allocate_default(&map, 4).unwrap();
        assert_eq!(picked, seats(&[(0, 0), (0, 2), (0, 4), (1, 1)]));
    }

    #[test]
    fn default_reports_insufficient_capacity_before_placing() {
        let mut map = hall(2, 2);
        map.commit(&seats(&[(0, 0), (1, 1)])).unwrap();

        assert_eq!(
            allocate_default(&map, 3),
            Err(BookingError::InsufficientCapacity {
                requested: 3,
                available: 2
            })
        );
        assert_eq!(allocate_default(&map, 0), Err(BookingError::InvalidSeatCount));
    }

    #[test]
    fn anchor_fills_rightwards_then_overflows_from_first_column() {
        let map = hall(3, 5);
        let picked = allocate_from_anchor(&map, 3, Seat::new(0, 4)).unwrap();
        assert_eq!(picked, seats(&[(0, 4), (1, 0), (1, 1)]));
    }

    #[test]
    fn anchor_skips_sold_seats() {
        let mut map = hall(2, 5);
        map.commit(&seats(&[(0, 2), (1, 0)])).unwrap();

        let picked = allocate_from_anchor(&map, 4, Seat::new(0, 1)).unwrap();
        assert_eq!(picked, seats(&[(0, 1), (0, 3), (0, 4), (1, 1)]));
    }

    #[test]
    fn anchor_must_be_free_and_in_bounds() {
        let mut map = hall(2, 3);
        map.commit(&seats(&[(1, 1)])).unwrap();

        assert_eq!(
            allocate_from_anchor(&map, 1, Seat::new(1, 1)),
            Err(BookingError::SeatUnavailable(Seat::new(1, 1)))
        );
        assert_eq!(
            allocate_from_anchor(&map, 1, Seat::new(2, 0)),
            Err(BookingError::OutOfBounds { row: 2, column: 0 })
        );
    }

    #[test]
    fn anchor_does_not_wrap_to_earlier_rows() {
        let map = hall(2, 3);
        assert_eq!(
            allocate_from_anchor(&map, 3, Seat::new(1, 1)),
            Err(BookingError::InsufficientCapacity {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn allocate_dispatches_on_anchor() {
        let map = hall(2, 4);
        assert_eq!(allocate(&map, 2, None).unwrap(), seats(&[(0, 1), (0, 2)]));
        assert_eq!(
            allocate(&map, 2, Some(Seat::new(1, 0))).unwrap(),
            seats(&[(1, 0), (1, 1)])
        );
    }
}
