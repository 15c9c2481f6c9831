use std::{future::Future, pin::Pin};

use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{
    self, authenticator::Authenticator, authenticator_delegate::InstalledFlowDelegate,
    error::AuthErrorCode,
};
use tracing::{info, instrument, warn};

use super::http_client::{HttpClient, HttpsConnector};
use crate::{
    adapters::config::auth_config::AuthStrategy,
    domain::session::credential::Credential,
    ports::identity_provider::{AuthError, IdentityProvider, SCOPES},
};

/// Google login for the strategy picked in the config.
pub struct GoogleIdentityProvider {
    strategy: AuthStrategy,
    client: HttpClient,
}

impl std::fmt::Debug for GoogleIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoogleIdentityProvider {{ strategy: {:?} }}", self.strategy)
    }
}

impl GoogleIdentityProvider {
    pub fn new(strategy: AuthStrategy, client: HttpClient) -> Self {
        GoogleIdentityProvider { strategy, client }
    }

    async fn authenticator(
        &self,
    ) -> error_stack::Result<Option<Authenticator<HttpsConnector>>, AuthError> {
        match &self.strategy {
            AuthStrategy::InstalledFlow {
                client_id,
                client_secret,
            } => {
                let secret = oauth2::ApplicationSecret {
                    client_id: client_id.clone(),
                    client_secret: client_secret.clone(),
                    auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
                    token_uri: "https://oauth2.googleapis.com/token".to_string(),
                    redirect_uris: vec!["http://localhost".to_string()],
                    project_id: None,
                    client_email: None,
                    auth_provider_x509_cert_url: None,
                    client_x509_cert_url: None,
                };

                let auth = oauth2::InstalledFlowAuthenticator::with_client(
                    secret,
                    oauth2::InstalledFlowReturnMethod::HTTPRedirect,
                    self.client.clone(),
                )
                .flow_delegate(Box::new(BrowserFlowDelegate))
                .build()
                .await
                .change_context(AuthError::ProviderFailed)
                .attach_printable("Could not start the local redirect listener")?;
                Ok(Some(auth))
            }
            AuthStrategy::ServiceAccount { priv_key } => {
                let key = oauth2::read_service_account_key(&**priv_key)
                    .await
                    .change_context(AuthError::ProviderFailed)
                    .attach_printable_lazy(|| {
                        format!("Could not read service account key at '{}'", priv_key)
                    })?;

                let auth = oauth2::ServiceAccountAuthenticator::with_client(key, self.client.clone())
                    .build()
                    .await
                    .change_context(AuthError::ProviderFailed)?;
                Ok(Some(auth))
            }
            AuthStrategy::AccessToken { .. } => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    #[instrument(name = "GoogleIdentityProvider::request_credential", skip(self))]
    async fn request_credential(&self) -> error_stack::Result<Credential, AuthError> {
        let Some(auth) = self.authenticator().await? else {
            return match &self.strategy {
                AuthStrategy::AccessToken { token } if !token.trim().is_empty() => {
                    Ok(Credential::new(token.trim()))
                }
                _ => Err(report!(AuthError::MissingToken)
                    .attach_printable("Configured access token is empty")),
            };
        };

        let token = auth.token(SCOPES).await.map_err(|err| {
            let context = classify(&err);
            report!(err).change_context(context)
        })?;

        let secret = token
            .token()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| report!(AuthError::MissingToken))?;

        info!("Access token obtained");
        Ok(Credential::new(secret))
    }
}

fn classify(err: &oauth2::Error) -> AuthError {
    match err {
        oauth2::Error::UserError(_) => AuthError::Cancelled,
        oauth2::Error::AuthError(auth_error)
            if matches!(auth_error.error, AuthErrorCode::AccessDenied) =>
        {
            AuthError::Cancelled
        }
        _ => AuthError::ProviderFailed,
    }
}

/// Opens the consent page in the default browser and prints the link as a fallback.
struct BrowserFlowDelegate;

impl InstalledFlowDelegate for BrowserFlowDelegate {
    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        need_code: bool,
    ) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>> {
        Box::pin(async move {
            if let Err(err) = open::that(url) {
                warn!("Could not open browser: {}", err);
            }
            println!("Log ind i browseren. Åbnede den ikke, så brug dette link:\n{}", url);

            if !need_code {
                return Ok(String::new());
            }

            tokio::task::spawn_blocking(|| {
                dialoguer::Input::<String>::new()
                    .with_prompt("Indtast koden fra Google")
                    .interact_text()
                    .map_err(|err| err.to_string())
            })
            .await
            .map_err(|err| err.to_string())?
        })
    }
}
