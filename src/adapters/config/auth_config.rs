/// How the login obtains its bearer credential.
#[derive(serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AuthStrategy {
    /// Interactive consent in the browser, redirected back to a local port.
    InstalledFlow {
        client_id: String,
        client_secret: String,
    },
    /// Service account key file. The spreadsheet has to be shared with the account.
    ServiceAccount { priv_key: Box<str> },
    /// A ready-made access token, used as is.
    AccessToken { token: Box<str> },
}

impl std::fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthStrategy::InstalledFlow { client_id, .. } => f
                .debug_struct("InstalledFlow")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
            AuthStrategy::ServiceAccount { priv_key } => f
                .debug_struct("ServiceAccount")
                .field("priv_key", priv_key)
                .finish(),
            AuthStrategy::AccessToken { .. } => f
                .debug_struct("AccessToken")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
