pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod cli;

use tracing::info;

pub use error::BookingError;
pub use models::{Booking, BookingStatus, Seat, SeatMap, SeatState};
pub use services::BookingLedger;

// Состояние одной сессии: зал, фильм и журнал броней
#[derive(Debug)]
pub struct Session {
    pub title: String,
    pub ledger: BookingLedger,
}

impl Session {
    pub fn new(
        config: &config::Config,
        title: &str,
        rows: usize,
        seats_per_row: usize,
    ) -> Result<Self, BookingError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BookingError::Configuration("title is required".to_string()));
        }

        let seat_map = SeatMap::new(rows, seats_per_row, &config.hall)?;
        let ledger = BookingLedger::new(seat_map, &config.booking);

        info!(title, rows, seats_per_row, "hall configured");
        Ok(Self {
            title: title.to_string(),
            ledger,
        })
    }
}
