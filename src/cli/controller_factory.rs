use std::sync::Arc;

use timeseddel::{
    adapters::{
        clock::SystemClock,
        config::app_config::AppConfig,
        sheets::{
            auth::GoogleIdentityProvider, http_client, spreadsheet_manager::GoogleSheetsConnector,
        },
    },
    application::{controller::TimesheetController, session::Session, sync_client::SyncClient},
    domain::Month,
    ports::Clock,
};

pub struct ControllerFactory;

impl ControllerFactory {
    /// Wires the Google adapters into a controller. Nothing touches the network yet.
    pub fn create(config: &AppConfig) -> TimesheetController {
        let client = http_client::http_client();
        let clock = Arc::new(SystemClock);

        let identity_provider = Arc::new(GoogleIdentityProvider::new(
            config.auth.clone(),
            client.clone(),
        ));
        let sync_client = SyncClient::create(
            config.sheets.spreadsheet_id.clone(),
            Arc::new(GoogleSheetsConnector::new(client)),
            clock.clone(),
        )
        .with_weekday_basis(config.timesheet.weekday_basis);

        TimesheetController::new(
            Session::new(identity_provider),
            sync_client,
            Month::of_date(clock.today()),
        )
    }
}
