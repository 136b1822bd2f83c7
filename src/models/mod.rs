pub mod seat;
pub mod booking;
pub mod seat_map;

pub use seat::{Seat, SeatState};
pub use booking::{Booking, BookingStatus};
pub use seat_map::SeatMap;
