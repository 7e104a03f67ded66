use backoffice_crud::{is_valid_email, Notifier, Severity};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{SessionError, SessionResult};
use crate::store::KeyValueStore;
use crate::user::{static_accounts, Account, User};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_DATA_KEY: &str = "userData";

/// Session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Simulated round trip of a login attempt.
    pub login_delay: Duration,
    pub accounts: Vec<Account>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_millis(1000),
            accounts: static_accounts(),
        }
    }
}

/// Authentication state backed by a [`KeyValueStore`].
pub struct Session {
    config: SessionConfig,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    user: Option<User>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Reads the persisted token and user once. Both must be present, and the
    /// user must parse, for the session to start signed in.
    pub fn restore(
        config: SessionConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> SessionResult<Self> {
        let token = store.get(AUTH_TOKEN_KEY)?;
        let user = match (token, store.get(USER_DATA_KEY)?) {
            (Some(_), Some(data)) => match serde_json::from_str::<User>(&data) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "ignoring unreadable stored user");
                    None
                }
            },
            _ => None,
        };
        if let Some(user) = &user {
            info!(email = %user.email, "session restored");
        }
        Ok(Self {
            config,
            store,
            notifier,
            user,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> SessionResult<Option<String>> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    fn persist(&self, user: &User) -> SessionResult<()> {
        self.store.set(AUTH_TOKEN_KEY, &user.token())?;
        self.store.set(USER_DATA_KEY, &serde_json::to_string(user)?)
    }

    /// Checks the credentials against the known accounts after the
    /// simulated delay.
    pub async fn login(&mut self, email: &str, password: &str) -> SessionResult<&User> {
        tokio::time::sleep(self.config.login_delay).await;

        let email = email.trim();
        let Some(account) = self
            .config
            .accounts
            .iter()
            .find(|a| a.user.email == email && a.password == password)
        else {
            warn!(email, "login rejected");
            self.notifier
                .notify("Invalid email or password", Severity::Error);
            return Err(SessionError::InvalidCredentials);
        };

        let user = account.user.clone();
        self.persist(&user)?;
        info!(email = %user.email, "logged in");
        self.notifier.notify("Login successful", Severity::Success);
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) -> SessionResult<()> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_DATA_KEY)?;
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "logged out");
        }
        self.notifier
            .notify("Logged out successfully", Severity::Success);
        Ok(())
    }

    /// Rewrites the signed-in user's name and email.
    pub fn update_profile(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> SessionResult<&User> {
        let Some(current) = &self.user else {
            return Err(SessionError::NotAuthenticated);
        };
        if first_name.trim().is_empty() {
            return Err(SessionError::InvalidProfile("first name is required".into()));
        }
        if !is_valid_email(email.trim()) {
            return Err(SessionError::InvalidProfile(format!(
                "{email:?} is not a valid email address"
            )));
        }

        let user = User {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_string(),
            ..current.clone()
        };
        self.store.set(USER_DATA_KEY, &serde_json::to_string(&user)?)?;
        info!(email = %user.email, "profile updated");
        self.notifier
            .notify("Profile updated successfully", Severity::Success);
        Ok(self.user.insert(user))
    }
}
