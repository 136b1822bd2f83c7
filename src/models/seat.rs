use serde::{Deserialize, Serialize};
use std::fmt;

/// Место в зале: индекс ряда (0 - ближайший к экрану) и индекс кресла.
///
/// Порядок сортировки - по рядам, затем по возрастанию кресла.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    pub row: usize,
    pub column: usize,
}

impl Seat {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Буква ряда: 0 -> 'A', 1 -> 'B', ...
    pub fn row_letter(&self) -> char {
        row_letter(self.row)
    }

    /// Подпись вида `B3` (номер кресла с единицы)
    pub fn label(&self) -> String {
        self.to_string()
    }
}

pub fn row_letter(row: usize) -> char {
    // за пределами алфавита подпись теряет смысл, но не падаем
    u8::try_from(row)
        .ok()
        .filter(|r| *r < 26)
        .map(|r| (b'A' + r) as char)
        .unwrap_or('?')
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatState {
    Free,
    Sold,
}
