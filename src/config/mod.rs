use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::error::BookingError;

/// Ряды подписываются одной буквой, поэтому больше 26 быть не может.
pub const ROW_LABEL_LIMIT: usize = 26;

/// Номер кресла в подписи - не больше двух цифр.
pub const SEAT_NUMBER_LIMIT: usize = 99;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub app: AppConfig,
    pub hall: HallConfig,
    pub booking: BookingConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Ограничения размеров зала
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HallConfig {
    pub max_rows: usize,
    pub max_seats_per_row: usize,
}

// Формат номера брони
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub reference_prefix: String,
    pub reference_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            rust_log: "cinema_booking=warn".to_string(),
        }
    }
}

impl Default for HallConfig {
    fn default() -> Self {
        Self {
            max_rows: ROW_LABEL_LIMIT,
            max_seats_per_row: 50,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reference_prefix: "BK".to_string(),
            reference_width: 4,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, BookingError> {
        let defaults = Config::default();

        let config = Config {
            app: AppConfig {
                environment: env::var("ENVIRONMENT").unwrap_or(defaults.app.environment),
                rust_log: env::var("RUST_LOG").unwrap_or(defaults.app.rust_log),
            },
            hall: HallConfig {
                max_rows: parse_var("HALL_MAX_ROWS", defaults.hall.max_rows)?,
                max_seats_per_row: parse_var(
                    "HALL_MAX_SEATS_PER_ROW",
                    defaults.hall.max_seats_per_row,
                )?,
            },
            booking: BookingConfig {
                reference_prefix: env::var("BOOKING_REFERENCE_PREFIX")
                    .unwrap_or(defaults.booking.reference_prefix),
                reference_width: parse_var(
                    "BOOKING_REFERENCE_WIDTH",
                    defaults.booking.reference_width,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        if self.hall.max_rows == 0 || self.hall.max_rows > ROW_LABEL_LIMIT {
            return Err(BookingError::Configuration(format!(
                "HALL_MAX_ROWS must be between 1 and {ROW_LABEL_LIMIT}"
            )));
        }
        if self.hall.max_seats_per_row == 0 || self.hall.max_seats_per_row > SEAT_NUMBER_LIMIT {
            return Err(BookingError::Configuration(format!(
                "HALL_MAX_SEATS_PER_ROW must be between 1 and {SEAT_NUMBER_LIMIT}"
            )));
        }
        if self.booking.reference_prefix.trim().is_empty() {
            return Err(BookingError::Configuration(
                "BOOKING_REFERENCE_PREFIX must not be empty".to_string(),
            ));
        }
        if !(1..=12).contains(&self.booking.reference_width) {
            return Err(BookingError::Configuration(
                "BOOKING_REFERENCE_WIDTH must be between 1 and 12".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, BookingError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BookingError::Configuration(format!("{key} must be a valid number"))),
        Err(_) => Ok(default),
    }
}
