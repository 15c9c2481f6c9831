use chrono::{Local, NaiveDate};

use crate::ports::clock::Clock;

/// Local calendar date of the machine running the app.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
