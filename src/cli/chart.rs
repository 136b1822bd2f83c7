use std::collections::HashSet;
use std::fmt;

use crate::models::seat::row_letter;
use crate::models::{Seat, SeatMap, SeatState};

const SEAT_GAP: &str = "  ";
const SCREEN: &str = "S C R E E N";
// "<буква><пробел>"
const ROW_LABEL_WIDTH: usize = 2;

/// Схема зала для вывода в терминал.
///
/// `.` - свободно, `#` - продано, `o` - места показываемой брони.
/// Ряд A ближе всего к экрану и печатается первым.
pub struct SeatChart<'a> {
    map: &'a SeatMap,
    highlight: HashSet<Seat>,
}

impl<'a> SeatChart<'a> {
    pub fn new(map: &'a SeatMap, highlight: &[Seat]) -> Self {
        Self {
            map,
            highlight: highlight.iter().copied().collect(),
        }
    }

    fn seat_area_width(&self) -> usize {
        let columns = self.map.columns();
        columns + columns.saturating_sub(1) * SEAT_GAP.len()
    }

    fn cell(&self, seat: Seat, state: SeatState) -> char {
        if self.highlight.contains(&seat) {
            'o'
        } else if state == SeatState::Sold {
            '#'
        } else {
            '.'
        }
    }
}

impl fmt::Display for SeatChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.seat_area_width();
        let banner_indent = ROW_LABEL_WIDTH + width.saturating_sub(SCREEN.len()) / 2;
        let grid_indent = SCREEN.len().saturating_sub(width) / 2;
        let pad = " ".repeat(ROW_LABEL_WIDTH + grid_indent);

        writeln!(f, "{}{}", " ".repeat(banner_indent), SCREEN)?;
        writeln!(f, "{}{}", pad, "-".repeat(width))?;

        for row in 0..self.map.rows() {
            let cells: Vec<String> = self
                .map
                .row(row)
                .iter()
                .enumerate()
                .map(|(column, state)| self.cell(Seat::new(row, column), *state).to_string())
                .collect();
            writeln!(
                f,
                "{} {}{}",
                row_letter(row),
                " ".repeat(grid_indent),
                cells.join(SEAT_GAP)
            )?;
        }

        let cell_width = 1 + SEAT_GAP.len();
        let axis: String = (1..=self.map.columns())
            .map(|n| format!("{n:<cell_width$}"))
            .collect();
        writeln!(f, "{}{}", pad, axis.trim_end())
    }
}
