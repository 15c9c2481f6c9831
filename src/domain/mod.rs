pub mod session;
pub mod sheets;
pub mod timesheet;

// Re-export commonly used types
pub use session::credential::Credential;
pub use timesheet::{month::Month, time_entry::TimeEntry};
