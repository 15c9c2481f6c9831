use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Deserialize;

use super::month::Month;

pub fn danish_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mandag",
        Weekday::Tue => "Tirsdag",
        Weekday::Wed => "Onsdag",
        Weekday::Thu => "Torsdag",
        Weekday::Fri => "Fredag",
        Weekday::Sat => "Lørdag",
        Weekday::Sun => "Søndag",
    }
}

/// Which month a day number is resolved against when computing the weekday column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayBasis {
    /// The month of today's date, whatever month the entry was registered for.
    /// This is what existing sheets were filled with.
    #[default]
    CurrentMonth,
    /// The entry's selected month in the current year.
    SelectedMonth,
}

impl WeekdayBasis {
    /// Resolves `day` to a calendar date.
    ///
    /// With [`WeekdayBasis::CurrentMonth`] a day past the end of the current month rolls
    /// over into the next one (day 31 in a 30-day month is the 1st of the following month).
    /// With [`WeekdayBasis::SelectedMonth`] a day that does not exist in that month
    /// resolves to `None`.
    pub fn resolve(self, today: NaiveDate, selected: Month, day: u8) -> Option<NaiveDate> {
        match self {
            WeekdayBasis::CurrentMonth => {
                let first = today.with_day(1)?;
                first.checked_add_days(Days::new(u64::from(day).checked_sub(1)?))
            }
            WeekdayBasis::SelectedMonth => {
                NaiveDate::from_ymd_opt(today.year(), selected.number(), u32::from(day))
            }
        }
    }

    pub fn weekday_name(self, today: NaiveDate, selected: Month, day: u8) -> Option<&'static str> {
        self.resolve(today, selected, day)
            .map(|date| danish_weekday(date.weekday()))
    }
}
