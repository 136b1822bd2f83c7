use thiserror::Error;

use crate::models::Seat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input. Please enter: [Title] [Rows] [SeatsPerRow].")]
    LayoutFormat,

    #[error("Rows and seats per row must be numbers.")]
    LayoutNumbers,

    #[error("Please enter a positive whole number.")]
    TicketCount,

    #[error("Invalid seat label. Use a row letter and seat number, like B03.")]
    SeatLabel,

    #[error("Seat {0} is outside the hall.")]
    SeatOutOfRange(String),
}

/// Название фильма и размеры зала, как их ввёл оператор.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub title: String,
    pub rows: usize,
    pub seats_per_row: usize,
}

/// `[Title] [Rows] [SeatsPerRow]`; название может содержать пробелы.
pub fn parse_layout(line: &str) -> Result<Layout, InputError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(InputError::LayoutFormat);
    }

    let (title, dims) = tokens.split_at(tokens.len() - 2);
    let rows = dims[0].parse().map_err(|_| InputError::LayoutNumbers)?;
    let seats_per_row = dims[1].parse().map_err(|_| InputError::LayoutNumbers)?;

    Ok(Layout {
        title: title.join(" "),
        rows,
        seats_per_row,
    })
}

pub fn parse_ticket_count(line: &str) -> Result<usize, InputError> {
    match line.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(InputError::TicketCount),
    }
}

/// Разбирает подпись места (`B3`, `b03`) в координаты зала.
pub fn parse_seat_label(line: &str, rows: usize, seats_per_row: usize) -> Result<Seat, InputError> {
    let label = line.trim().to_ascii_uppercase();
    let mut chars = label.chars();

    let row_char = chars
        .next()
        .filter(char::is_ascii_uppercase)
        .ok_or(InputError::SeatLabel)?;
    let digits = chars.as_str();
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::SeatLabel);
    }

    let number: usize = digits.parse().map_err(|_| InputError::SeatLabel)?;
    let row = (row_char as u8 - b'A') as usize;
    if row >= rows || number == 0 || number > seats_per_row {
        return Err(InputError::SeatOutOfRange(label));
    }

    Ok(Seat::new(row, number - 1))
}
