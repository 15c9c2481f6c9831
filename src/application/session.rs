use std::sync::Arc;

use error_stack::ResultExt;
use tracing::{info, instrument, warn};

use crate::{
    domain::session::credential::Credential,
    ports::identity_provider::{AuthError, IdentityProvider},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Absent,
    Present(Credential),
}

/// Single owner of the bearer credential. There is no refresh: the credential is kept until
/// something invalidates it.
pub struct Session {
    state: SessionState,
    identity_provider: Arc<dyn IdentityProvider>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(identity_provider: Arc<dyn IdentityProvider>) -> Self {
        Session {
            state: SessionState::Absent,
            identity_provider,
        }
    }

    /// Runs the consent flow. A failed attempt leaves the session absent.
    #[instrument(name = "Session::login", skip(self))]
    pub async fn login(&mut self) -> error_stack::Result<Credential, AuthError> {
        self.state = SessionState::Absent;

        let credential = self
            .identity_provider
            .request_credential()
            .await
            .attach_printable("Login did not produce a credential")?;

        info!("Login succeeded");
        self.state = SessionState::Present(credential.clone());
        Ok(credential)
    }

    /// Drops the held credential, if any. The user has to log in again afterwards.
    pub fn invalidate(&mut self, reason: &str) {
        if self.is_authenticated() {
            warn!(reason, "Discarding credential");
        }
        self.state = SessionState::Absent;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn credential(&self) -> Option<&Credential> {
        match &self.state {
            SessionState::Present(credential) => Some(credential),
            SessionState::Absent => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Present(_))
    }
}
