use error_stack::{report, ResultExt};
use strum::Display;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, instrument};

use super::{session::Session, sync_client::SyncClient};
use crate::{
    domain::timesheet::{
        month::Month,
        time_entry::{TimeEntry, TimeEntryForm, ValidationError},
    },
    ports::command_handler::{Command, CommandError, CommandHandler},
};

pub const SAVED_MESSAGE: &str = "Tid registreret!";
pub const LOGGED_IN_MESSAGE: &str = "Logget ind";

/// What the controller is doing right now. Anything but `Idle` means a remote call is in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Activity {
    Idle,
    Authenticating,
    Syncing,
}

/// User-facing failures. The display text is what the user gets to see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Der opstod en fejl under login. Prøv venligst igen.")]
    Login,
    #[error("Kunne ikke forbinde til Google Sheets. Prøv venligst igen.")]
    Connect,
    #[error("Kunne ikke gemme tidsregistrering. Prøv venligst igen.")]
    Save,
    #[error("{0}")]
    Invalid(ValidationError),
    #[error("Log venligst ind først")]
    NotLoggedIn,
    #[error("Ukendt måned: {0}")]
    UnknownMonth(usize),
}

/// Publishes `next` and falls back to `Idle` when dropped, including on early returns.
struct ActivityGuard<'a> {
    activity: &'a watch::Sender<Activity>,
}

impl<'a> ActivityGuard<'a> {
    fn enter(activity: &'a watch::Sender<Activity>, next: Activity) -> Self {
        activity.send_replace(next);
        ActivityGuard { activity }
    }

    fn advance(&self, next: Activity) {
        self.activity.send_replace(next);
    }
}

impl Drop for ActivityGuard<'_> {
    fn drop(&mut self) {
        self.activity.send_replace(Activity::Idle);
    }
}

/// Ties the session, the sync client and the registration form together.
///
/// Every operation takes `&mut self`, so at most one of them is in flight at a time; the
/// current [`Activity`] can be followed through [`TimesheetController::subscribe`].
pub struct TimesheetController {
    session: Session,
    sync_client: SyncClient,
    form: TimeEntryForm,
    activity: watch::Sender<Activity>,
}

impl std::fmt::Debug for TimesheetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimesheetController")
            .field("session", &self.session)
            .field("sync_client", &self.sync_client)
            .field("activity", &self.activity())
            .finish()
    }
}

impl TimesheetController {
    pub fn new(session: Session, sync_client: SyncClient, month: Month) -> Self {
        let (activity, _) = watch::channel(Activity::Idle);
        TimesheetController {
            session,
            sync_client,
            form: TimeEntryForm::new(month),
            activity,
        }
    }

    pub fn activity(&self) -> Activity {
        *self.activity.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Activity> {
        self.activity.subscribe()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_authenticated() && self.sync_client.is_initialized()
    }

    pub fn form(&self) -> &TimeEntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TimeEntryForm {
        &mut self.form
    }

    /// Logs in and initializes the sync client with the new credential. If initialization
    /// fails the credential is discarded and the user is back to logged out.
    #[instrument(name = "login", skip(self))]
    pub async fn login(&mut self) -> error_stack::Result<(), ControllerError> {
        let guard = ActivityGuard::enter(&self.activity, Activity::Authenticating);

        let credential = self
            .session
            .login()
            .await
            .change_context(ControllerError::Login)?;

        guard.advance(Activity::Syncing);
        if let Err(report) = self.sync_client.initialize(&credential).await {
            self.session.invalidate("spreadsheet initialization failed");
            return Err(report.change_context(ControllerError::Connect));
        }

        // B2 is written by select_month only, so logging in leaves the month label as it was.
        info!("Logged in and connected");
        Ok(())
    }

    /// Switches the form to month `index` (0-based) and writes its name to the sheet.
    /// A failed write keeps the session.
    #[instrument(name = "select_month", skip(self))]
    pub async fn select_month(&mut self, index: usize) -> error_stack::Result<Month, ControllerError> {
        let month =
            Month::from_index(index).ok_or_else(|| report!(ControllerError::UnknownMonth(index)))?;
        self.form.month = month;

        if !self.is_logged_in() {
            return Err(report!(ControllerError::NotLoggedIn));
        }

        let _guard = ActivityGuard::enter(&self.activity, Activity::Syncing);
        self.sync_client
            .set_month_label(&month.to_string())
            .await
            .change_context(ControllerError::Save)?;

        Ok(month)
    }

    /// Validates the form and writes it to its day row. The form is cleared (except for the
    /// month) only when the write succeeded, so a failed submission can simply be retried.
    #[instrument(name = "submit_entry", skip(self))]
    pub async fn submit(&mut self) -> error_stack::Result<TimeEntry, ControllerError> {
        if !self.is_logged_in() {
            return Err(report!(ControllerError::NotLoggedIn));
        }

        let entry = self
            .form
            .to_entry()
            .map_err(|error| report!(ControllerError::Invalid(error)))?;

        let _guard = ActivityGuard::enter(&self.activity, Activity::Syncing);
        self.sync_client
            .save_time_entry(&entry)
            .await
            .change_context(ControllerError::Save)?;

        self.form.reset();
        Ok(entry)
    }
}

#[async_trait::async_trait]
impl CommandHandler for TimesheetController {
    async fn handle(&mut self, command: Command) -> error_stack::Result<String, CommandError> {
        let result = match command {
            Command::Login => self.login().await.map(|_| LOGGED_IN_MESSAGE.to_string()),
            Command::SelectMonth { index } => self
                .select_month(index)
                .await
                .map(|month| format!("Måned sat til {}", month)),
            Command::SubmitEntry => self.submit().await.map(|_| SAVED_MESSAGE.to_string()),
        };

        result.map_err(|report| {
            let message = report.current_context().to_string();
            report.change_context(CommandError::Rejected { message })
        })
    }
}
