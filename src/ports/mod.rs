pub mod clock;
pub mod command_handler;
pub mod identity_provider;
pub mod spreadsheet_api;

// Re-export commonly used types
pub use clock::Clock;
pub use command_handler::{Command, CommandError, CommandHandler};
pub use identity_provider::{AuthError, IdentityProvider};
pub use spreadsheet_api::{SpreadsheetApi, SpreadsheetApiError, SpreadsheetConnector};
