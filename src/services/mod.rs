pub mod allocation;
pub mod ledger;

pub use ledger::BookingLedger;
