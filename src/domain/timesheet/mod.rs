pub mod month;
pub mod time_entry;
pub mod weekday;
