//! Session service tracking the signed-in user.
//!
//! An owned state object injected into the embedding application; interested
//! views observe changes through [`SessionService::subscribe`] rather than a
//! process-wide singleton.

use crate::document::{
    domain::{CollectionName, DocumentId},
    ports::{DocumentStore, DocumentStoreError},
};
use crate::identity::{
    domain::{EmailAddress, IdentityDomainError, UserAccount, UserId, UserPatch, UserRecord},
    ports::{AuthenticatorError, CredentialAuthenticator},
};
use mockable::Clock;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Capacity of the session event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Request payload for account registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    email: String,
    password: String,
    name: String,
}

impl SignUpRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}

/// Change notifications emitted by the session service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A user signed in or completed registration.
    SignedIn(UserId),
    /// The current user signed out.
    SignedOut(UserId),
    /// The current user's account record changed.
    Updated(UserId),
}

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// The identity provider rejected the operation.
    #[error(transparent)]
    Authenticator(#[from] AuthenticatorError),
    /// The document collaborator rejected the operation.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
    /// Credentials verified but no account document exists.
    #[error("user record missing for {0}")]
    MissingUserRecord(UserId),
    /// The stored account document could not be decoded.
    #[error("user document {id} is malformed")]
    MalformedRecord {
        /// Account whose document failed to decode.
        id: UserId,
        /// Decode failure.
        #[source]
        source: Arc<serde_json::Error>,
    },
    /// The operation requires a signed-in user.
    #[error("no user is signed in")]
    NotSignedIn,
}

/// Result type for session service operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session orchestration service.
pub struct SessionService<S, A, C>
where
    S: DocumentStore,
    A: CredentialAuthenticator,
    C: Clock + Send + Sync,
{
    documents: Arc<S>,
    authenticator: Arc<A>,
    clock: Arc<C>,
    current: RwLock<Option<UserAccount>>,
    last_error: RwLock<Option<String>>,
    events: broadcast::Sender<SessionEvent>,
}

impl<S, A, C> SessionService<S, A, C>
where
    S: DocumentStore,
    A: CredentialAuthenticator,
    C: Clock + Send + Sync,
{
    /// Creates a session service with no signed-in user.
    #[must_use]
    pub fn new(documents: Arc<S>, authenticator: Arc<A>, clock: Arc<C>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            documents,
            authenticator,
            clock,
            current: RwLock::new(None),
            last_error: RwLock::new(None),
            events,
        }
    }

    /// Registers a new account, stores its user document, and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when validation, registration, or document
    /// persistence fails; the failure message is also recorded in
    /// [`Self::last_error`].
    pub async fn sign_up(&self, request: SignUpRequest) -> SessionResult<UserAccount> {
        self.clear_failure();
        match self.try_sign_up(request).await {
            Ok(account) => Ok(account),
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Verifies credentials and loads the matching account document.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingUserRecord`] when credentials verify
    /// but no account document exists, and propagates authenticator and
    /// store failures. The failure message is recorded.
    pub async fn sign_in(
        &self,
        email: impl Into<String> + Send,
        password: &str,
    ) -> SessionResult<UserAccount> {
        self.clear_failure();
        match self.try_sign_in(email.into(), password).await {
            Ok(account) => Ok(account),
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Ends the current session.
    ///
    /// # Errors
    ///
    /// Propagates provider failures; the session is kept when revocation
    /// fails. Signing out without a session is a no-op.
    pub async fn sign_out(&self) -> SessionResult<()> {
        self.clear_failure();
        match self.try_sign_out().await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Merges patch fields into the current user's document and session
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] without a session and
    /// propagates store failures. The failure message is recorded.
    pub async fn update_user(&self, patch: UserPatch) -> SessionResult<UserAccount> {
        self.clear_failure();
        match self.try_update_user(patch).await {
            Ok(account) => Ok(account),
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserAccount> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// Returns whether a user is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .is_ok_and(|guard| guard.is_some())
    }

    /// Returns the most recent recorded failure message.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().ok().and_then(|guard| guard.clone())
    }

    /// Subscribes to session change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn try_sign_up(&self, request: SignUpRequest) -> SessionResult<UserAccount> {
        let SignUpRequest {
            email,
            password,
            name,
        } = request;
        let address = EmailAddress::new(email)?;
        let user_id = self.authenticator.register(&address, &password).await?;
        let account = UserAccount::register(user_id, address, name, &*self.clock)?;

        let payload = encode_record(user_id, account.record())?;
        self.documents
            .set(CollectionName::USERS, document_id(user_id), payload)
            .await?;

        info!(user = %user_id, "registered account");
        self.replace_current(Some(account.clone()));
        self.notify(SessionEvent::SignedIn(user_id));
        Ok(account)
    }

    async fn try_sign_in(&self, email: String, password: &str) -> SessionResult<UserAccount> {
        let address = EmailAddress::new(email)?;
        let user_id = self.authenticator.authenticate(&address, password).await?;
        let document = self
            .documents
            .get(CollectionName::USERS, document_id(user_id))
            .await?
            .ok_or(SessionError::MissingUserRecord(user_id))?;

        let record: UserRecord =
            serde_json::from_value(document.into_data()).map_err(|err| {
                SessionError::MalformedRecord {
                    id: user_id,
                    source: Arc::new(err),
                }
            })?;
        let account = UserAccount::from_persisted(user_id, record);

        info!(user = %user_id, "signed in");
        self.replace_current(Some(account.clone()));
        self.notify(SessionEvent::SignedIn(user_id));
        Ok(account)
    }

    async fn try_sign_out(&self) -> SessionResult<()> {
        let Some(account) = self.current_user() else {
            return Ok(());
        };
        self.authenticator.revoke(account.id()).await?;
        info!(user = %account.id(), "signed out");
        self.replace_current(None);
        self.notify(SessionEvent::SignedOut(account.id()));
        Ok(())
    }

    async fn try_update_user(&self, patch: UserPatch) -> SessionResult<UserAccount> {
        let mut account = self.current_user().ok_or(SessionError::NotSignedIn)?;
        let user_id = account.id();

        let mut payload = encode_patch(user_id, &patch)?;
        account.apply(patch, &*self.clock);
        if let Value::Object(fields) = &mut payload {
            fields.insert(
                "updated_at".to_owned(),
                Value::from(account.updated_at().timestamp_millis()),
            );
        }
        self.documents
            .update(CollectionName::USERS, document_id(user_id), payload)
            .await?;

        self.replace_current(Some(account.clone()));
        self.notify(SessionEvent::Updated(user_id));
        Ok(account)
    }

    fn replace_current(&self, account: Option<UserAccount>) {
        if let Ok(mut guard) = self.current.write() {
            *guard = account;
        }
    }

    fn clear_failure(&self) {
        if let Ok(mut guard) = self.last_error.write() {
            *guard = None;
        }
    }

    fn record_failure(&self, err: &SessionError) {
        warn!(error = %err, "session operation failed");
        if let Ok(mut guard) = self.last_error.write() {
            *guard = Some(err.to_string());
        }
    }

    fn notify(&self, event: SessionEvent) {
        // Send only fails when no subscriber is listening.
        drop(self.events.send(event));
    }
}

const fn document_id(user: UserId) -> DocumentId {
    DocumentId::from_uuid(user.into_inner())
}

fn encode_record(id: UserId, record: &UserRecord) -> SessionResult<Value> {
    serde_json::to_value(record).map_err(|err| SessionError::MalformedRecord {
        id,
        source: Arc::new(err),
    })
}

fn encode_patch(id: UserId, patch: &UserPatch) -> SessionResult<Value> {
    serde_json::to_value(patch).map_err(|err| SessionError::MalformedRecord {
        id,
        source: Arc::new(err),
    })
}
