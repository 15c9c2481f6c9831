use chrono::NaiveTime;
use thiserror::Error;

use super::month::Month;
use crate::domain::sheets::ranges::{FIRST_DAY, LAST_DAY};

const TIME_FORMAT: &str = "%H:%M";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Udfyld venligst alle påkrævede felter")]
    MissingFields,
    #[error("Slut tidspunkt skal være efter starttidspunkt")]
    EndNotAfterStart,
    #[error("Ugyldigt tidspunkt '{0}', brug TT:MM")]
    InvalidTime(String),
    #[error("Dag skal være mellem {} og {}, fik {0}", FIRST_DAY, LAST_DAY)]
    DayOutOfRange(u8),
}

/// One validated registration, ready to be written to its day row.
///
/// Only [`TimeEntry::new`] builds one, so the day is always in range and the end always
/// lies after the start.
///
/// ```compile_fail
/// use chrono::NaiveTime;
/// use timeseddel::domain::timesheet::{month::Month, time_entry::TimeEntry};
/// let reversed = TimeEntry {
///     day: 15,
///     month: Month::June,
///     start: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     activity_type: String::new(),
///     description: String::new(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    day: u8,
    month: Month,
    start: NaiveTime,
    end: NaiveTime,
    activity_type: String,
    description: String,
}

impl TimeEntry {
    pub fn new(
        day: u8,
        month: Month,
        start: NaiveTime,
        end: NaiveTime,
        activity_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !(FIRST_DAY..=LAST_DAY).contains(&day) {
            return Err(ValidationError::DayOutOfRange(day));
        }
        if end <= start {
            return Err(ValidationError::EndNotAfterStart);
        }
        Ok(TimeEntry {
            day,
            month,
            start,
            end,
            activity_type: activity_type.into(),
            description: description.into(),
        })
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn activity_type(&self) -> &str {
        &self.activity_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start_label(&self) -> String {
        self.start.format(TIME_FORMAT).to_string()
    }

    pub fn end_label(&self) -> String {
        self.end.format(TIME_FORMAT).to_string()
    }

    /// Elapsed time written as `"{hours}t {minutes}min"`.
    /// # Examples
    /// ```
    /// use chrono::NaiveTime;
    /// use timeseddel::domain::timesheet::{month::Month, time_entry::TimeEntry};
    /// let entry = TimeEntry::new(
    ///     15,
    ///     Month::March,
    ///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
    ///     "Vikar",
    ///     "dækket time",
    /// )
    /// .unwrap();
    /// assert_eq!(entry.duration_label(), "4t 30min");
    /// ```
    pub fn duration_label(&self) -> String {
        let minutes = (self.end - self.start).num_minutes();
        format!("{}t {}min", minutes / 60, minutes % 60)
    }
}

pub fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidTime(input.trim().to_string()))
}

/// Mutable state of the registration form. Only [`TimeEntryForm::to_entry`] turns it into
/// something that can be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntryForm {
    pub month: Month,
    pub day: Option<u8>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub activity_type: String,
    pub description: String,
}

impl TimeEntryForm {
    pub fn new(month: Month) -> Self {
        TimeEntryForm {
            month,
            day: None,
            start: None,
            end: None,
            activity_type: String::new(),
            description: String::new(),
        }
    }

    pub fn to_entry(&self) -> Result<TimeEntry, ValidationError> {
        let (Some(day), Some(start), Some(end)) = (
            self.day,
            non_blank(self.start.as_deref()),
            non_blank(self.end.as_deref()),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        TimeEntry::new(
            day,
            self.month,
            parse_time(start)?,
            parse_time(end)?,
            self.activity_type.trim(),
            self.description.trim(),
        )
    }

    /// Clears every field except the month.
    pub fn reset(&mut self) {
        *self = TimeEntryForm::new(self.month);
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> TimeEntryForm {
        TimeEntryForm {
            month: Month::March,
            day: Some(15),
            start: Some("08:00".to_string()),
            end: Some("12:30".to_string()),
            activity_type: "Vikar".to_string(),
            description: "dækket time".to_string(),
        }
    }

    #[test]
    fn test_valid_form_becomes_entry() {
        let entry = filled_form().to_entry().unwrap();
        assert_eq!(entry.day(), 15);
        assert_eq!(entry.month(), Month::March);
        assert_eq!(entry.start_label(), "08:00");
        assert_eq!(entry.end_label(), "12:30");
        assert_eq!(entry.duration_label(), "4t 30min");
        assert_eq!(entry.activity_type(), "Vikar");
    }

    #[test]
    fn test_end_equal_to_start_is_rejected() {
        let mut form = filled_form();
        form.end = Some("08:00".to_string());
        assert_eq!(form.to_entry(), Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        for (start, end) in [("08:00", "07:59"), ("23:59", "00:00"), ("12:30", "12:29")] {
            let mut form = filled_form();
            form.start = Some(start.to_string());
            form.end = Some(end.to_string());
            assert_eq!(
                form.to_entry(),
                Err(ValidationError::EndNotAfterStart),
                "{start}-{end}"
            );
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let mut form = filled_form();
        form.day = None;
        assert_eq!(form.to_entry(), Err(ValidationError::MissingFields));

        let mut form = filled_form();
        form.start = Some("  ".to_string());
        assert_eq!(form.to_entry(), Err(ValidationError::MissingFields));

        let mut form = filled_form();
        form.end = None;
        assert_eq!(form.to_entry(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let mut form = filled_form();
        form.activity_type.clear();
        form.description.clear();
        let entry = form.to_entry().unwrap();
        assert_eq!(entry.activity_type(), "");
        assert_eq!(entry.description(), "");
    }

    #[test]
    fn test_invalid_time_text() {
        let mut form = filled_form();
        form.start = Some("8 o'clock".to_string());
        assert_eq!(
            form.to_entry(),
            Err(ValidationError::InvalidTime("8 o'clock".to_string()))
        );
    }

    #[test]
    fn test_day_out_of_range() {
        let mut form = filled_form();
        form.day = Some(32);
        assert_eq!(form.to_entry(), Err(ValidationError::DayOutOfRange(32)));
        form.day = Some(0);
        assert_eq!(form.to_entry(), Err(ValidationError::DayOutOfRange(0)));
    }

    #[test]
    fn test_new_rejects_what_the_form_would_reject() {
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(
            TimeEntry::new(15, Month::June, at(12, 30), at(8, 0), "Vikar", ""),
            Err(ValidationError::EndNotAfterStart)
        );
        assert_eq!(
            TimeEntry::new(15, Month::June, at(8, 0), at(8, 0), "Vikar", ""),
            Err(ValidationError::EndNotAfterStart)
        );
        assert_eq!(
            TimeEntry::new(0, Month::June, at(8, 0), at(9, 0), "Vikar", ""),
            Err(ValidationError::DayOutOfRange(0))
        );
        assert_eq!(
            TimeEntry::new(32, Month::June, at(8, 0), at(9, 0), "Vikar", ""),
            Err(ValidationError::DayOutOfRange(32))
        );
    }

    #[test]
    fn test_duration_under_an_hour() {
        let mut form = filled_form();
        form.start = Some("09:15".to_string());
        form.end = Some("09:50".to_string());
        assert_eq!(form.to_entry().unwrap().duration_label(), "0t 35min");
    }

    #[test]
    fn test_reset_keeps_month() {
        let mut form = filled_form();
        form.reset();
        assert_eq!(form, TimeEntryForm::new(Month::March));
    }
}
