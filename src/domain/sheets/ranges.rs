// The timesheet layout is fixed; changing it means changing these constants, not data.

use super::{
    a1_notation::{A1Notation, ToA1Notation},
    cell_position::CellPosition,
    cell_range::CellRange,
    column::Column,
    row::Row,
};

pub const SHEET_TITLE: &str = "Ark1";

/// "Last used" date stamp, written on every successful login.
pub const RW_LAST_SYNC: CellPosition = CellPosition::new(Column::new(6), Row::new(53));

/// Month label shown at the top of the sheet.
pub const RW_MONTH_LABEL: CellPosition = CellPosition::new(Column::new(2), Row::new(2));

/// Day `d` lives on row `DAY_ROW_BASE + d`.
pub const DAY_ROW_BASE: u32 = 9;

/// Columns B..G of the row just above day 1:
/// weekday, start time, end time, activity type, duration, description.
const DAY_ROW_TEMPLATE: CellRange = CellRange::new(
    CellPosition::new(Column::new(2), Row::new(DAY_ROW_BASE)),
    CellPosition::new(Column::new(7), Row::new(DAY_ROW_BASE)),
);

pub const DAY_ROW_WIDTH: usize = 6;

pub const FIRST_DAY: u8 = 1;
pub const LAST_DAY: u8 = 31;

pub fn last_sync_range() -> A1Notation {
    RW_LAST_SYNC.to_a1_notation(Some(SHEET_TITLE))
}

pub fn month_label_range() -> A1Notation {
    RW_MONTH_LABEL.to_a1_notation(Some(SHEET_TITLE))
}

pub fn day_row(day: u8) -> CellRange {
    DAY_ROW_TEMPLATE.shifted_down(u32::from(day))
}

/// # Examples
/// ```
/// use timeseddel::domain::sheets::ranges::day_row_range;
/// assert_eq!(day_row_range(1).as_ref(), "Ark1!B10:G10");
/// assert_eq!(day_row_range(31).as_ref(), "Ark1!B40:G40");
/// ```
pub fn day_row_range(day: u8) -> A1Notation {
    day_row(day).to_a1_notation(Some(SHEET_TITLE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_cells() {
        assert_eq!(last_sync_range().as_ref(), "Ark1!F53");
        assert_eq!(month_label_range().as_ref(), "Ark1!B2");
    }

    #[test]
    fn test_every_day_maps_to_row_nine_plus_day() {
        for day in FIRST_DAY..=LAST_DAY {
            let row = DAY_ROW_BASE + u32::from(day);
            assert_eq!(
                day_row_range(day).as_ref(),
                format!("Ark1!B{row}:G{row}"),
                "day {day}"
            );
        }
    }

    #[test]
    fn test_day_row_spans_one_row() {
        let range = day_row(15);
        assert_eq!(range.start.row, Row::new(24));
        assert_eq!(range.end.row, Row::new(24));
    }
}
