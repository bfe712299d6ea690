//! Portal Access Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::customers::records::CustomerUuid, uuids::TypedUuid};

/// Portal Access UUID
pub type PortalAccessUuid = TypedUuid<PortalAccessRecord>;

/// Portal Access Record
///
/// Does not carry the raw token; only issuance returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalAccessRecord {
    pub uuid: PortalAccessUuid,
    pub customer_uuid: CustomerUuid,
    pub email: String,
    pub expires_at: Timestamp,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PortalAccessRecord {
    /// Whether the record still grants access at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

/// Access record joined with the owning customer's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalAccessLookup {
    pub access: PortalAccessRecord,
    pub customer_name: String,
}

/// Session descriptor handed to the client after a successful validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub customer_uuid: CustomerUuid,
    pub email: String,
    pub customer_name: String,
    pub expires_at: Timestamp,
}

impl From<PortalAccessLookup> for SessionDescriptor {
    fn from(lookup: PortalAccessLookup) -> Self {
        Self {
            customer_uuid: lookup.access.customer_uuid,
            email: lookup.access.email,
            customer_name: lookup.customer_name,
            expires_at: lookup.access.expires_at,
        }
    }
}
