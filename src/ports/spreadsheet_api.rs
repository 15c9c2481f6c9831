use std::sync::Arc;

use thiserror::Error;

use crate::domain::{session::credential::Credential, sheets::a1_notation::A1Notation};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetApiError {
    #[error("Failed to build spreadsheet client")]
    FailedToConnect,
    #[error("Failed to fetch spreadsheet")]
    FailedToFetchSpreadsheet,
    #[error("Failed to write range")]
    FailedToWriteRange,
}

/// What the metadata read learns about the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetMetadata {
    pub title: Option<String>,
    pub sheet_titles: Vec<String>,
}

/// The two remote calls the timesheet needs. Values are always sent `USER_ENTERED`,
/// so the service coerces them the way it would coerce typed input.
#[async_trait::async_trait]
pub trait SpreadsheetApi: Send + Sync {
    /// Overwrites `range` with `rows` in a single request.
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &A1Notation,
        rows: Vec<Vec<String>>,
    ) -> error_stack::Result<(), SpreadsheetApiError>;

    async fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
    ) -> error_stack::Result<SpreadsheetMetadata, SpreadsheetApiError>;
}

/// Builds a [`SpreadsheetApi`] that authorizes every call with `credential`.
pub trait SpreadsheetConnector: Send + Sync {
    fn connect(
        &self,
        credential: &Credential,
    ) -> error_stack::Result<Arc<dyn SpreadsheetApi>, SpreadsheetApiError>;
}
