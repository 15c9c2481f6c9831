use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    /// Today's date in the local calendar.
    fn today(&self) -> NaiveDate;
}
