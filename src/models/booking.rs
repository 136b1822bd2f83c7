use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Предложение: места ещё свободны в схеме зала
    Proposed,
    /// Подтверждено: места проданы, запись больше не меняется
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub reference: String,
    pub requested: usize,
    pub seats: Vec<Seat>,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub confirmed_at: Option<NaiveDateTime>,
}

impl Booking {
    pub(crate) fn proposed(reference: String, seats: Vec<Seat>, now: NaiveDateTime) -> Self {
        Self {
            reference,
            requested: seats.len(),
            seats,
            status: BookingStatus::Proposed,
            created_at: now,
            confirmed_at: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub(crate) fn confirm(&mut self, now: NaiveDateTime) {
        self.status = BookingStatus::Confirmed;
        self.confirmed_at = Some(now);
    }

    /// Подписи мест через запятую, для вывода
    pub fn seat_labels(&self) -> String {
        self.seats
            .iter()
            .map(Seat::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
