//! In-memory stand-ins for the identity provider, the spreadsheet API and the clock.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use chrono::NaiveDate;
use error_stack::report;
use tokio::sync::watch;

use super::controller::Activity;
use crate::{
    domain::{
        session::credential::Credential,
        sheets::a1_notation::A1Notation,
        timesheet::{
            month::Month,
            time_entry::{parse_time, TimeEntry},
        },
    },
    ports::{
        clock::Clock,
        identity_provider::{AuthError, IdentityProvider},
        spreadsheet_api::{
            SpreadsheetApi, SpreadsheetApiError, SpreadsheetConnector, SpreadsheetMetadata,
        },
    },
};

pub const SPREADSHEET_ID: &str = "sheet-123";

pub fn entry(day: u8, month: Month, start: &str, end: &str) -> TimeEntry {
    TimeEntry::new(
        day,
        month,
        parse_time(start).unwrap(),
        parse_time(end).unwrap(),
        "Vikar",
        "dækket time",
    )
    .unwrap()
}

pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        FixedClock(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Records the controller activity seen at the moment a remote call is made.
#[derive(Default)]
pub struct ActivityRecorder {
    receiver: Mutex<Option<watch::Receiver<Activity>>>,
    seen: Mutex<Vec<Activity>>,
}

impl ActivityRecorder {
    pub fn watch(&self, receiver: watch::Receiver<Activity>) {
        *self.receiver.lock().unwrap() = Some(receiver);
    }

    fn record(&self) {
        if let Some(receiver) = self.receiver.lock().unwrap().as_ref() {
            let activity = *receiver.borrow();
            self.seen.lock().unwrap().push(activity);
        }
    }

    pub fn seen(&self) -> Vec<Activity> {
        self.seen.lock().unwrap().clone()
    }
}

pub struct FakeIdentityProvider {
    responses: Mutex<VecDeque<Result<&'static str, AuthError>>>,
    calls: AtomicUsize,
    pub activity: ActivityRecorder,
}

impl FakeIdentityProvider {
    pub fn new(responses: Vec<Result<&'static str, AuthError>>) -> Self {
        FakeIdentityProvider {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            activity: ActivityRecorder::default(),
        }
    }

    pub fn granting(tokens: &[&'static str]) -> Self {
        Self::new(tokens.iter().map(|token| Ok(*token)).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn request_credential(&self) -> error_stack::Result<Credential, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.activity.record();
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AuthError::ProviderFailed));
        response.map(Credential::new).map_err(|error| report!(error))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Update {
        spreadsheet_id: String,
        range: String,
        rows: Vec<Vec<String>>,
    },
    Get {
        spreadsheet_id: String,
    },
}

impl RemoteCall {
    /// Single-row update against [`SPREADSHEET_ID`].
    pub fn update(range: &str, row: &[&str]) -> Self {
        RemoteCall::Update {
            spreadsheet_id: SPREADSHEET_ID.to_string(),
            range: range.to_string(),
            rows: vec![row.iter().map(|cell| cell.to_string()).collect()],
        }
    }
}

/// Remote spreadsheet kept in a map from range to the last values written there.
#[derive(Default)]
pub struct FakeSpreadsheet {
    calls: Mutex<Vec<RemoteCall>>,
    cells: Mutex<HashMap<String, Vec<Vec<String>>>>,
    fail_writes: AtomicBool,
    fail_metadata_read: AtomicBool,
    pub activity: ActivityRecorder,
}

impl FakeSpreadsheet {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_metadata_read(&self, fail: bool) {
        self.fail_metadata_read.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn cell(&self, range: &str) -> Option<Vec<Vec<String>>> {
        self.cells.lock().unwrap().get(range).cloned()
    }
}

#[async_trait::async_trait]
impl SpreadsheetApi for FakeSpreadsheet {
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &A1Notation,
        rows: Vec<Vec<String>>,
    ) -> error_stack::Result<(), SpreadsheetApiError> {
        self.activity.record();
        self.calls.lock().unwrap().push(RemoteCall::Update {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            rows: rows.clone(),
        });
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(report!(SpreadsheetApiError::FailedToWriteRange));
        }
        self.cells.lock().unwrap().insert(range.to_string(), rows);
        Ok(())
    }

    async fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
    ) -> error_stack::Result<SpreadsheetMetadata, SpreadsheetApiError> {
        self.activity.record();
        self.calls.lock().unwrap().push(RemoteCall::Get {
            spreadsheet_id: spreadsheet_id.to_string(),
        });
        if self.fail_metadata_read.load(Ordering::SeqCst) {
            return Err(report!(SpreadsheetApiError::FailedToFetchSpreadsheet));
        }
        Ok(SpreadsheetMetadata {
            title: Some("Timeseddel".to_string()),
            sheet_titles: vec!["Ark1".to_string()],
        })
    }
}

pub struct FakeConnector {
    spreadsheet: Arc<FakeSpreadsheet>,
    credentials: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl FakeConnector {
    pub fn new(spreadsheet: Arc<FakeSpreadsheet>) -> Self {
        FakeConnector {
            spreadsheet,
            credentials: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Tokens every connection was made with, oldest first.
    pub fn credentials(&self) -> Vec<String> {
        self.credentials.lock().unwrap().clone()
    }
}

impl SpreadsheetConnector for FakeConnector {
    fn connect(
        &self,
        credential: &Credential,
    ) -> error_stack::Result<Arc<dyn SpreadsheetApi>, SpreadsheetApiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(report!(SpreadsheetApiError::FailedToConnect));
        }
        self.credentials
            .lock()
            .unwrap()
            .push(credential.secret().to_string());
        Ok(self.spreadsheet.clone())
    }
}
