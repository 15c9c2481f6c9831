use thiserror::Error;

use crate::domain::session::credential::Credential;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Login was cancelled by the user")]
    Cancelled,
    #[error("Identity provider could not be reached or rejected the request")]
    ProviderFailed,
    #[error("Identity provider returned no access token")]
    MissingToken,
}

/// Scopes requested for the access token.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.file",
];

#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Runs the consent flow and hands back a bearer token for the spreadsheet API.
    async fn request_credential(&self) -> error_stack::Result<Credential, AuthError>;
}
