use crate::domain::timesheet::weekday::WeekdayBasis;

#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TimesheetConfig {
    /// Month the weekday column is computed from. Defaults to the current calendar month.
    #[serde(default)]
    pub weekday_basis: WeekdayBasis,
}
