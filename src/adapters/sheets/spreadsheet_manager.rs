use std::{fmt::Debug, sync::Arc};

use error_stack::ResultExt;
use google_sheets4::{api::ValueRange, Sheets};
use tracing::instrument;

use super::{
    http_client::{HttpClient, HttpsConnector},
    value_range_factory::ValueRangeFactory,
};
use crate::{
    domain::{session::credential::Credential, sheets::a1_notation::A1Notation},
    ports::spreadsheet_api::{
        SpreadsheetApi, SpreadsheetApiError, SpreadsheetConnector, SpreadsheetMetadata,
    },
};

/// Spreadsheet calls authorized with a single bearer token. The token is never refreshed.
pub struct SpreadsheetManager {
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager")
    }
}

impl SpreadsheetManager {
    pub fn new(client: HttpClient, credential: &Credential) -> Self {
        let hub = Sheets::new(client, credential.secret().to_string());
        SpreadsheetManager { hub }
    }
}

#[async_trait::async_trait]
impl SpreadsheetApi for SpreadsheetManager {
    #[instrument(skip(rows))]
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &A1Notation,
        rows: Vec<Vec<String>>,
    ) -> error_stack::Result<(), SpreadsheetApiError> {
        self.hub
            .spreadsheets()
            .values_update(ValueRange::from_rows(rows), spreadsheet_id, range.as_ref())
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetApiError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {} ", range))
    }

    #[instrument]
    async fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
    ) -> error_stack::Result<SpreadsheetMetadata, SpreadsheetApiError> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(spreadsheet_id)
            .include_grid_data(false)
            .doit()
            .await
            .change_context(SpreadsheetApiError::FailedToFetchSpreadsheet)?;

        let sheet_titles = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties.and_then(|p| p.title))
            .collect();

        Ok(SpreadsheetMetadata {
            title: spreadsheet.properties.and_then(|p| p.title),
            sheet_titles,
        })
    }
}

/// Hands out a [`SpreadsheetManager`] per credential, all sharing one HTTP client.
#[derive(Clone)]
pub struct GoogleSheetsConnector {
    client: HttpClient,
}

impl Debug for GoogleSheetsConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoogleSheetsConnector")
    }
}

impl GoogleSheetsConnector {
    pub fn new(client: HttpClient) -> Self {
        GoogleSheetsConnector { client }
    }
}

impl SpreadsheetConnector for GoogleSheetsConnector {
    fn connect(
        &self,
        credential: &Credential,
    ) -> error_stack::Result<Arc<dyn SpreadsheetApi>, SpreadsheetApiError> {
        Ok(Arc::new(SpreadsheetManager::new(
            self.client.clone(),
            credential,
        )))
    }
}
