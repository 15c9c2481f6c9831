use config::Config;
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{
    auth_config::AuthStrategy, sheets_config::SpreadsheetConfig,
    timesheet_config::TimesheetConfig,
};

pub const ENV_PREFIX: &str = "TIMESEDDEL";

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    pub auth: AuthStrategy,
    #[serde(default)]
    pub timesheet: TimesheetConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error reading config file '{0}'")]
    Read(String),
    #[error("Failed to deserialize config at '{0}'")]
    Deserialize(String),
}

impl AppConfig {
    /// Reads `CONFIG_PATH` (default `Config`, any format the `config` crate knows) and lets
    /// `TIMESEDDEL__SECTION__KEY` environment variables override single values.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "Config".to_string());
        let config = Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .change_context_lazy(|| ConfigError::Read(config_path.clone()))?;

        Self::from_config(config).attach_printable_lazy(|| format!("Config file: {}", config_path))
    }

    pub fn from_config(config: Config) -> error_stack::Result<Self, ConfigError> {
        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(ConfigError::Deserialize(String::from("<root>")))?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|err| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            report!(ConfigError::Deserialize(
                path_str.trim_start_matches('.').to_string()
            ))
            .attach_printable(err.to_string())
            .attach_printable("Make sure all required fields are present in the configuration file.")
        })
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;
    use crate::domain::timesheet::weekday::WeekdayBasis;

    fn parse(toml: &str) -> error_stack::Result<AppConfig, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        AppConfig::from_config(config)
    }

    #[test]
    fn test_installed_flow_config() {
        let config = parse(
            r#"
            [sheets]
            spreadsheet_id = "1AbC"

            [auth]
            strategy = "installed_flow"
            client_id = "id.apps.googleusercontent.com"
            client_secret = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.sheets.spreadsheet_id.as_ref(), "1AbC");
        assert_eq!(
            config.auth,
            AuthStrategy::InstalledFlow {
                client_id: "id.apps.googleusercontent.com".to_string(),
                client_secret: "secret".to_string(),
            }
        );
        assert_eq!(config.timesheet.weekday_basis, WeekdayBasis::CurrentMonth);
    }

    #[test]
    fn test_service_account_with_selected_month_basis() {
        let config = parse(
            r#"
            [sheets]
            spreadsheet_id = "1AbC"

            [auth]
            strategy = "service_account"
            priv_key = "key.json"

            [timesheet]
            weekday_basis = "selected_month"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.auth,
            AuthStrategy::ServiceAccount {
                priv_key: "key.json".into()
            }
        );
        assert_eq!(config.timesheet.weekday_basis, WeekdayBasis::SelectedMonth);
    }

    #[test]
    fn test_missing_field_reports_its_path() {
        let report = parse(
            r#"
            [sheets]
            spreadsheet_id = "1AbC"

            [auth]
            strategy = "access_token"
            "#,
        )
        .unwrap_err();

        match report.current_context() {
            ConfigError::Deserialize(path) => assert!(path.starts_with("auth"), "{}", path),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = parse(
            r#"
            [sheets]
            spreadsheet_id = "1AbC"

            [auth]
            strategy = "id_token"
            "#,
        );

        assert!(result.is_err());
    }
}
