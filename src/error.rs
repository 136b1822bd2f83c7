use thiserror::Error;

use crate::models::Seat;

/// Ошибки движка бронирования.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Некорректная конфигурация зала или приложения
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Координаты места за пределами зала (ошибка вызывающего кода)
    #[error("Seat (row {row}, column {column}) is outside the hall")]
    OutOfBounds { row: usize, column: usize },

    #[error("Not enough seats: requested {requested}, available {available}")]
    InsufficientCapacity { requested: usize, available: usize },

    /// Якорное место уже продано
    #[error("Seat {0} is already sold")]
    SeatUnavailable(Seat),

    /// Кандидат устарел: место занято к моменту фиксации
    #[error("Seat {0} cannot be committed")]
    AllocationConflict(Seat),

    #[error("No pending or confirmed booking with reference {0}")]
    UnknownBooking(String),

    #[error("Seat count must be positive")]
    InvalidSeatCount,
}

impl BookingError {
    /// Можно ли переспросить пользователя вместо завершения сессии.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            BookingError::Configuration(_) | BookingError::OutOfBounds { .. }
        )
    }
}
