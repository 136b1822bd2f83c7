//! Текстовый интерфейс поверх движка: разбор ввода, схема зала и меню.

pub mod chart;
pub mod input;
pub mod menu;

pub use chart::SeatChart;
pub use input::{InputError, Layout};
pub use menu::Menu;
