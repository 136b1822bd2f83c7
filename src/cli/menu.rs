use std::io::{self, BufRead, Write};

use tracing::{debug, error, warn};

use crate::cli::chart::SeatChart;
use crate::cli::input;
use crate::config::Config;
use crate::error::BookingError;
use crate::models::Booking;
use crate::Session;

// Что делать после очередного сценария
enum Flow {
    Continue,
    Exit,
}

/// Интерактивное меню кассы. Читает команды построчно, конец ввода равен выходу.
pub struct Menu<R, W> {
    input: R,
    output: W,
    config: Config,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        let Some(mut session) = self.prompt_session()? else {
            return self.say_goodbye();
        };

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Welcome to the cinema booking desk")?;
            writeln!(
                self.output,
                "[1] Book tickets for {} ({} seats available)",
                session.title,
                session.ledger.available_count()
            )?;
            writeln!(self.output, "[2] Check bookings")?;
            writeln!(self.output, "[3] Exit")?;
            writeln!(self.output, "Please enter your selection:")?;

            let Some(choice) = self.prompt()? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.book_tickets(&mut session)?,
                "2" => self.check_bookings(&session)?,
                "3" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        self.say_goodbye()
    }

    fn prompt_session(&mut self) -> io::Result<Option<Session>> {
        loop {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "Please define movie title and seating map in [Title] [Row] [SeatsPerRow] format:"
            )?;
            let Some(line) = self.prompt()? else {
                return Ok(None);
            };

            let layout = match input::parse_layout(&line) {
                Ok(layout) => layout,
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };

            match Session::new(&self.config, &layout.title, layout.rows, layout.seats_per_row) {
                Ok(session) => return Ok(Some(session)),
                Err(e) => writeln!(
                    self.output,
                    "{e}. Rows must be 1-{} and seats per row 1-{}.",
                    self.config.hall.max_rows, self.config.hall.max_seats_per_row
                )?,
            }
        }
    }

    fn book_tickets(&mut self, session: &mut Session) -> io::Result<Flow> {
        let count = loop {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "Enter number of tickets to book, or enter blank to go back to main menu:"
            )?;
            let Some(line) = self.prompt()? else {
                return Ok(Flow::Exit);
            };
            if line.is_empty() {
                return Ok(Flow::Continue);
            }
            match input::parse_ticket_count(&line) {
                Ok(count) => break count,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        };

        let booking = match session.ledger.quote(count) {
            Ok(booking) => booking,
            Err(BookingError::InsufficientCapacity { available, .. }) => {
                writeln!(self.output)?;
                writeln!(self.output, "Sorry, there are only {available} seats available.")?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                let e = escalate(e)?;
                writeln!(self.output, "{e}")?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.output)?;
        writeln!(
            self.output,
            "Successfully reserved {count} {} tickets.",
            session.title
        )?;
        self.show_booking(session, &booking)?;

        self.adjust_and_confirm(session, &booking.reference)
    }

    fn adjust_and_confirm(&mut self, session: &mut Session, reference: &str) -> io::Result<Flow> {
        loop {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "Enter blank to accept seat selection, or enter new seating position:"
            )?;
            let Some(line) = self.prompt()? else {
                session.ledger.discard(reference);
                return Ok(Flow::Exit);
            };

            if line.is_empty() {
                return self.confirm(session, reference);
            }

            let seat_map = session.ledger.seat_map();
            let anchor = match input::parse_seat_label(&line, seat_map.rows(), seat_map.columns()) {
                Ok(anchor) => anchor,
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };

            match session.ledger.requote(reference, anchor) {
                Ok(booking) => {
                    writeln!(self.output)?;
                    self.show_booking(session, &booking)?;
                }
                Err(e) => {
                    let e = escalate(e)?;
                    debug!(error = %e, "requote rejected");
                    writeln!(self.output, "Could not update seats: {e}. Try another position.")?;
                }
            }
        }
    }

    fn confirm(&mut self, session: &mut Session, reference: &str) -> io::Result<Flow> {
        match session.ledger.confirm(reference) {
            Ok(booking) => {
                writeln!(self.output)?;
                writeln!(self.output, "Booking id: {} confirmed.", booking.reference)?;
            }
            Err(e @ BookingError::AllocationConflict(_)) => {
                warn!(%reference, error = %e, "discarding stale proposal");
                session.ledger.discard(reference);
                writeln!(
                    self.output,
                    "Those seats were just taken. Please start the booking again."
                )?;
            }
            Err(e) => {
                session.ledger.discard(reference);
                let e = escalate(e)?;
                writeln!(self.output, "Confirmation failed: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn check_bookings(&mut self, session: &Session) -> io::Result<Flow> {
        loop {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "Enter booking id, or enter blank to go back to main menu:"
            )?;
            let Some(reference) = self.prompt()? else {
                return Ok(Flow::Exit);
            };
            if reference.is_empty() {
                return Ok(Flow::Continue);
            }

            match session.ledger.lookup(&reference) {
                Ok(booking) => {
                    writeln!(self.output)?;
                    self.show_booking(session, booking)?;
                }
                Err(_) => {
                    writeln!(self.output)?;
                    writeln!(self.output, "No booking found for {reference}.")?;
                }
            }
        }
    }

    fn show_booking(&mut self, session: &Session, booking: &Booking) -> io::Result<()> {
        writeln!(self.output, "Booking id: {}", booking.reference)?;
        writeln!(self.output, "Selected seats:")?;
        writeln!(self.output)?;
        write!(
            self.output,
            "{}",
            SeatChart::new(session.ledger.seat_map(), &booking.seats)
        )
    }

    fn say_goodbye(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Thank you for using the cinema booking desk. Bye!")?;
        self.output.flush()
    }

    /// Печатает приглашение и читает строку; `None` - ввод закончился.
    fn prompt(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Восстановимую ошибку отдаёт обратно для показа пользователю,
/// остальные закрывают сессию.
fn escalate(e: BookingError) -> io::Result<BookingError> {
    if e.is_recoverable() {
        return Ok(e);
    }
    error!(error = %e, "booking engine rejected the request, closing session");
    Err(io::Error::new(io::ErrorKind::Other, e))
}
