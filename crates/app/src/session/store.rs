//! Client session store.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    domain::{customers::records::CustomerUuid, portal::records::SessionDescriptor},
    session::{SessionStorage, SessionStorageError},
};

/// Storage key the session is kept under.
pub const CLIENT_SESSION_KEY: &str = "client_portal_session";

/// Client-held copy of a validated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSession {
    pub customer_id: CustomerUuid,
    pub email: String,
    pub customer_name: String,
    pub expires_at: Timestamp,
}

impl ClientSession {
    #[must_use]
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

impl From<SessionDescriptor> for ClientSession {
    fn from(descriptor: SessionDescriptor) -> Self {
        Self {
            customer_id: descriptor.customer_uuid,
            email: descriptor.email,
            customer_name: descriptor.customer_name,
            expires_at: descriptor.expires_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session storage failed")]
    Storage(#[from] SessionStorageError),

    #[error("session could not be serialized")]
    Serialize(#[from] serde_json::Error),
}

/// Reads and writes the [`ClientSession`] in a [`SessionStorage`] backend.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist `session`, replacing any cached one.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self, session: &ClientSession) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(session)?;

        self.storage.set_item(CLIENT_SESSION_KEY, &json)?;

        Ok(())
    }

    /// Return the cached session if it is still valid at `now`.
    ///
    /// Expired or unreadable entries are removed and reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the storage backend itself fails.
    pub fn load(&self, now: Timestamp) -> Result<Option<ClientSession>, SessionStoreError> {
        let Some(json) = self.storage.get_item(CLIENT_SESSION_KEY)? else {
            return Ok(None);
        };

        let session = match serde_json::from_str::<ClientSession>(&json) {
            Ok(session) => session,
            Err(source) => {
                warn!("discarding unreadable client session: {source}");

                self.clear()?;

                return Ok(None);
            }
        };

        if !session.is_valid_at(now) {
            debug!(
                customer_id = %session.customer_id,
                expires_at = %session.expires_at,
                "clearing expired client session"
            );

            self.clear()?;

            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Remove the cached session.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        self.storage.remove_item(CLIENT_SESSION_KEY)?;

        Ok(())
    }

    /// Whether the portal UI should render for the cached session.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn is_authenticated(&self, now: Timestamp) -> Result<bool, SessionStoreError> {
        Ok(self.load(now)?.is_some())
    }
}
