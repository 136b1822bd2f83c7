use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::models::{Booking, BookingStatus, Seat, SeatMap};
use crate::services::allocation;

/// Журнал бронирований одного зала.
///
/// Владеет схемой зала и всеми бронями; единственный, кто меняет состояние мест.
/// Номера броней идут по собственному счётчику журнала и не переиспользуются.
#[derive(Debug)]
pub struct BookingLedger {
    seat_map: SeatMap,
    bookings: BTreeMap<String, Booking>,
    reference_prefix: String,
    reference_width: usize,
    last_sequence: u64,
}

impl BookingLedger {
    pub fn new(seat_map: SeatMap, config: &BookingConfig) -> Self {
        Self {
            seat_map,
            bookings: BTreeMap::new(),
            reference_prefix: config.reference_prefix.clone(),
            reference_width: config.reference_width,
            last_sequence: 0,
        }
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    pub fn available_count(&self) -> usize {
        self.seat_map.available_count()
    }

    /// Следующий номер брони, например `BK0001`.
    pub fn next_reference(&mut self) -> String {
        self.last_sequence += 1;
        format!(
            "{}{:0width$}",
            self.reference_prefix,
            self.last_sequence,
            width = self.reference_width
        )
    }

    /// Создаёт предложение на `count` мест с раскладкой по умолчанию.
    pub fn quote(&mut self, count: usize) -> Result<Booking, BookingError> {
        let seats = allocation::allocate(&self.seat_map, count, None)?;
        let reference = self.next_reference();
        let booking = Booking::proposed(reference.clone(), seats, Utc::now().naive_utc());

        info!(%reference, count, seats = %booking.seat_labels(), "booking quoted");
        self.bookings.insert(reference, booking.clone());
        Ok(booking)
    }

    /// Пересчитывает места предложения от выбранного якоря; номер не меняется.
    pub fn requote(&mut self, reference: &str, anchor: Seat) -> Result<Booking, BookingError> {
        let requested = self
            .pending_booking(reference)
            .map(|booking| booking.requested)?;

        let seats = allocation::allocate(&self.seat_map, requested, Some(anchor))?;

        let booking = self
            .bookings
            .get_mut(reference)
            .ok_or_else(|| BookingError::UnknownBooking(reference.to_string()))?;
        booking.seats = seats;

        info!(%reference, %anchor, seats = %booking.seat_labels(), "booking requoted");
        Ok(booking.clone())
    }

    /// Фиксирует предложение. Повторное подтверждение возвращает ту же бронь.
    pub fn confirm(&mut self, reference: &str) -> Result<Booking, BookingError> {
        let booking = self
            .bookings
            .get_mut(reference)
            .ok_or_else(|| BookingError::UnknownBooking(reference.to_string()))?;

        if booking.is_confirmed() {
            return Ok(booking.clone());
        }

        if let Err(e) = self.seat_map.commit(&booking.seats) {
            warn!(%reference, error = %e, "stale seat candidate, confirmation refused");
            return Err(e);
        }
        booking.confirm(Utc::now().naive_utc());

        info!(
            %reference,
            seats = %booking.seat_labels(),
            available = self.seat_map.available_count(),
            "booking confirmed"
        );
        Ok(booking.clone())
    }

    /// Бронь по номеру в любом статусе.
    pub fn lookup(&self, reference: &str) -> Result<&Booking, BookingError> {
        self.bookings
            .get(reference)
            .ok_or_else(|| BookingError::UnknownBooking(reference.to_string()))
    }

    /// Убирает неподтверждённое предложение. Неизвестный или подтверждённый номер - no-op.
    pub fn discard(&mut self, reference: &str) -> Option<Booking> {
        let pending = self
            .bookings
            .get(reference)
            .is_some_and(|booking| booking.status == BookingStatus::Proposed);
        if !pending {
            return None;
        }

        let removed = self.bookings.remove(reference);
        info!(%reference, "booking discarded");
        removed
    }

    /// Подтверждённые брони в порядке номеров.
    pub fn confirmed(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values().filter(|b| b.is_confirmed())
    }

    pub fn pending(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values().filter(|b| !b.is_confirmed())
    }

    fn pending_booking(&self, reference: &str) -> Result<&Booking, BookingError> {
        self.bookings
            .get(reference)
            .filter(|booking| booking.status == BookingStatus::Proposed)
            .ok_or_else(|| BookingError::UnknownBooking(reference.to_string()))
    }
}
