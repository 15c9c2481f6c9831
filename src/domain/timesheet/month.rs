use chrono::{Datelike, NaiveDate};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// Calendar month, displayed with the Danish name the sheet expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum Month {
    #[strum(to_string = "Januar")]
    January,
    #[strum(to_string = "Februar")]
    February,
    #[strum(to_string = "Marts")]
    March,
    #[strum(to_string = "April")]
    April,
    #[strum(to_string = "Maj")]
    May,
    #[strum(to_string = "Juni")]
    June,
    #[strum(to_string = "Juli")]
    July,
    #[strum(to_string = "August")]
    August,
    #[strum(to_string = "September")]
    September,
    #[strum(to_string = "Oktober")]
    October,
    #[strum(to_string = "November")]
    November,
    #[strum(to_string = "December")]
    December,
}

impl Month {
    /// Zero-based index, `January` = 0.
    /// # Examples
    /// ```
    /// use timeseddel::domain::timesheet::month::Month;
    /// assert_eq!(Month::from_index(2), Some(Month::March));
    /// assert_eq!(Month::from_index(2).unwrap().to_string(), "Marts");
    /// assert_eq!(Month::from_index(12), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Month::iter().nth(index)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// 1-based month number, as used by calendar dates.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn of_date(date: NaiveDate) -> Self {
        // `month0` is always in 0..12
        Month::from_index(date.month0() as usize).unwrap_or(Month::January)
    }

    pub fn names() -> Vec<String> {
        Month::iter().map(|month| month.to_string()).collect()
    }
}
