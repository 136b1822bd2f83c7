use std::collections::HashSet;

use tracing::debug;

use crate::config::HallConfig;
use crate::error::BookingError;
use crate::models::{Seat, SeatState};

/// Схема зала: фиксированная сетка `rows x columns`.
///
/// Единственный мутатор - [`SeatMap::commit`], переводит места из `Free` в `Sold`.
/// Обратного перехода нет.
#[derive(Debug, Clone)]
pub struct SeatMap {
    rows: usize,
    columns: usize,
    cells: Vec<SeatState>,
    available: usize,
}

impl SeatMap {
    /// Пустой зал. Размеры вне `1..=limits` дают `Configuration`.
    pub fn new(rows: usize, columns: usize, limits: &HallConfig) -> Result<Self, BookingError> {
        if rows == 0 || columns == 0 {
            return Err(BookingError::Configuration(
                "rows and seats per row must be positive".to_string(),
            ));
        }
        if rows > limits.max_rows {
            return Err(BookingError::Configuration(format!(
                "rows must not exceed {}",
                limits.max_rows
            )));
        }
        if columns > limits.max_seats_per_row {
            return Err(BookingError::Configuration(format!(
                "seats per row must not exceed {}",
                limits.max_seats_per_row
            )));
        }

        let capacity = rows.checked_mul(columns).ok_or_else(|| {
            BookingError::Configuration(format!("hall of {rows} x {columns} seats is too large"))
        })?;
        Ok(Self {
            rows,
            columns,
            cells: vec![SeatState::Free; capacity],
            available: capacity,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn available_count(&self) -> usize {
        self.available
    }

    pub fn state(&self, seat: Seat) -> Result<SeatState, BookingError> {
        self.index(seat)
            .map(|i| self.cells[i])
            .ok_or(BookingError::OutOfBounds {
                row: seat.row,
                column: seat.column,
            })
    }

    pub fn is_free(&self, seat: Seat) -> Result<bool, BookingError> {
        Ok(self.state(seat)? == SeatState::Free)
    }

    pub fn is_sold(&self, seat: Seat) -> Result<bool, BookingError> {
        Ok(self.state(seat)? == SeatState::Sold)
    }

    /// Состояния одного ряда; пустой срез для несуществующего ряда.
    pub fn row(&self, row: usize) -> &[SeatState] {
        if row >= self.rows {
            return &[];
        }
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    pub fn sold_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == SeatState::Sold)
            .map(|(i, _)| Seat::new(i / self.columns, i % self.columns))
    }

    /// Продаёт все места набора атомарно: либо все, либо ни одного.
    ///
    /// Место вне зала, уже проданное или повторённое в наборе даёт
    /// `AllocationConflict` с этим местом; схема при этом не меняется.
    pub fn commit(&mut self, seats: &[Seat]) -> Result<(), BookingError> {
        let mut indices = Vec::with_capacity(seats.len());
        let mut seen = HashSet::with_capacity(seats.len());

        // Сначала проверяем весь набор, потом пишем
        for &seat in seats {
            let index = self
                .index(seat)
                .ok_or(BookingError::AllocationConflict(seat))?;
            if self.cells[index] != SeatState::Free || !seen.insert(index) {
                return Err(BookingError::AllocationConflict(seat));
            }
            indices.push(index);
        }

        for index in indices {
            self.cells[index] = SeatState::Sold;
        }
        self.available -= seats.len();

        debug!(
            committed = seats.len(),
            available = self.available,
            "seats committed"
        );
        Ok(())
    }

    fn index(&self, seat: Seat) -> Option<usize> {
        (seat.row < self.rows && seat.column < self.columns)
            .then(|| seat.row * self.columns + seat.column)
    }
}
