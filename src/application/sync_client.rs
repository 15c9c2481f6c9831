use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    domain::{
        session::credential::Credential,
        sheets::ranges::{self, DAY_ROW_WIDTH},
        timesheet::{month::Month, time_entry::TimeEntry, weekday::WeekdayBasis},
    },
    ports::{
        clock::Clock,
        spreadsheet_api::{SpreadsheetApi, SpreadsheetConnector, SpreadsheetMetadata},
    },
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("Failed to attach the credential to the spreadsheet client")]
    Connect,
    #[error("Failed to stamp the last sync date")]
    StampLastSync,
    #[error("Spreadsheet could not be read with the current credential")]
    ReadMetadata,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("Spreadsheet client is not initialized")]
    NotInitialized,
    #[error("Failed to write month label")]
    MonthLabel,
    #[error("Failed to write time entry for day {0}")]
    TimeEntry(u8),
    #[error("Day {day} does not exist in {month}")]
    InvalidDay { day: u8, month: Month },
}

/// The one spreadsheet this client writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub spreadsheet_id: Box<str>,
}

/// Schema-fixed reads and writes against one remote spreadsheet.
///
/// Nothing guards against two operations running at once; callers are expected to issue
/// one at a time.
pub struct SyncClient {
    target: SyncTarget,
    weekday_basis: WeekdayBasis,
    connector: Arc<dyn SpreadsheetConnector>,
    clock: Arc<dyn Clock>,
    api: Option<Arc<dyn SpreadsheetApi>>,
}

impl std::fmt::Debug for SyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SyncClient {{ target: {:?}, weekday_basis: {:?}, initialized: {} }}",
            self.target,
            self.weekday_basis,
            self.is_initialized()
        )
    }
}

impl SyncClient {
    /// Pure configuration; nothing is sent until [`SyncClient::initialize`].
    pub fn create(
        spreadsheet_id: impl Into<Box<str>>,
        connector: Arc<dyn SpreadsheetConnector>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        SyncClient {
            target: SyncTarget {
                spreadsheet_id: spreadsheet_id.into(),
            },
            weekday_basis: WeekdayBasis::default(),
            connector,
            clock,
            api: None,
        }
    }

    pub fn with_weekday_basis(mut self, weekday_basis: WeekdayBasis) -> Self {
        self.weekday_basis = weekday_basis;
        self
    }

    pub fn target(&self) -> &SyncTarget {
        &self.target
    }

    pub fn is_initialized(&self) -> bool {
        self.api.is_some()
    }

    /// Attaches `credential`, stamps today's date into the last-sync cell and reads the
    /// spreadsheet metadata. The stamp is written on every login, even when nothing else
    /// gets written afterwards.
    ///
    /// On failure the client is left detached and the credential should be considered
    /// invalid.
    #[instrument(skip(self, credential), fields(spreadsheet_id = %self.target.spreadsheet_id))]
    pub async fn initialize(
        &mut self,
        credential: &Credential,
    ) -> error_stack::Result<SpreadsheetMetadata, InitError> {
        self.api = None;

        let api = self
            .connector
            .connect(credential)
            .change_context(InitError::Connect)?;

        let stamp = last_sync_stamp(self.clock.today());
        let range = ranges::last_sync_range();
        api.update_values(&self.target.spreadsheet_id, &range, vec![vec![stamp.clone()]])
            .await
            .change_context(InitError::StampLastSync)
            .attach_printable_lazy(|| format!("Failed to write {} to {}", stamp, range))?;

        let metadata = api
            .get_spreadsheet(&self.target.spreadsheet_id)
            .await
            .change_context(InitError::ReadMetadata)?;

        info!(
            title = metadata.title.as_deref().unwrap_or("<untitled>"),
            sheets = metadata.sheet_titles.len(),
            "Spreadsheet reachable, last sync stamped {}",
            stamp
        );

        self.api = Some(api);
        Ok(metadata)
    }

    /// Overwrites the month label cell.
    #[instrument(skip(self))]
    pub async fn set_month_label(&self, month_name: &str) -> error_stack::Result<(), WriteError> {
        let api = self.api()?;
        let range = ranges::month_label_range();

        api.update_values(
            &self.target.spreadsheet_id,
            &range,
            vec![vec![month_name.to_string()]],
        )
        .await
        .change_context(WriteError::MonthLabel)
        .attach_printable_lazy(|| format!("Failed to write {} to {}", month_name, range))
    }

    /// Overwrites the whole B..G span of the entry's day row in one request. Whatever was in
    /// the row before is replaced without being read.
    #[instrument(skip(self, entry), fields(day = entry.day(), month = %entry.month()))]
    pub async fn save_time_entry(&self, entry: &TimeEntry) -> error_stack::Result<(), WriteError> {
        let api = self.api()?;
        let (day, month) = (entry.day(), entry.month());

        let weekday = self
            .weekday_basis
            .weekday_name(self.clock.today(), month, day)
            .ok_or_else(|| report!(WriteError::InvalidDay { day, month }))?;

        let range = ranges::day_row_range(day);
        let cells = day_row_cells(entry, weekday);

        api.update_values(&self.target.spreadsheet_id, &range, vec![cells.to_vec()])
            .await
            .change_context(WriteError::TimeEntry(day))
            .attach_printable_lazy(|| format!("Failed to write {:?} to {}", cells, range))?;

        info!("Saved entry to {}", range);
        Ok(())
    }

    fn api(&self) -> error_stack::Result<&Arc<dyn SpreadsheetApi>, WriteError> {
        self.api
            .as_ref()
            .ok_or_else(|| report!(WriteError::NotInitialized))
    }
}

/// Local date as `D-M-YYYY`, without zero padding.
pub fn last_sync_stamp(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.day(), date.month(), date.year())
}

/// Columns B..G: weekday, start, end, activity type, duration, description.
pub fn day_row_cells(entry: &TimeEntry, weekday: &str) -> [String; DAY_ROW_WIDTH] {
    [
        weekday.to_string(),
        entry.start_label(),
        entry.end_label(),
        entry.activity_type().to_string(),
        entry.duration_label(),
        entry.description().to_string(),
    ]
}
