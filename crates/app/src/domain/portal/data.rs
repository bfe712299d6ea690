//! Portal Access Data

use jiff::{SignedDuration, Timestamp};

use crate::domain::{
    customers::records::CustomerUuid,
    portal::{
        records::{PortalAccessRecord, PortalAccessUuid},
        token::AccessToken,
    },
};

/// How long an issued access link stays valid.
pub const PORTAL_ACCESS_TTL: SignedDuration = SignedDuration::from_hours(7 * 24);

/// New (or reissued) portal access payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPortalAccess {
    /// UUID used only when no record exists yet for the customer/email pair.
    pub uuid: PortalAccessUuid,
    pub customer_uuid: CustomerUuid,
    pub email: String,
    pub access_token: AccessToken,
    pub expires_at: Timestamp,
}

/// Issuance result carrying the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedPortalAccess {
    pub token: AccessToken,
    pub access: PortalAccessRecord,
}

/// Result of issuing and emailing an access link.
#[derive(Debug, Clone)]
pub struct SentAccessLink {
    pub access_link: String,
    pub access: PortalAccessRecord,
}

/// Builds access links from the public portal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalLinks {
    base_url: String,
}

impl PortalLinks {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Link emailed to the customer.
    #[must_use]
    pub fn access_link(&self, token: &AccessToken) -> String {
        format!("{}/client/{}", self.base_url, token.to_hex())
    }

    /// Client-only portal page.
    #[must_use]
    pub fn portal_home(&self) -> String {
        format!("{}/client/portal", self.base_url)
    }

    /// Portal page that a followed access link redirects into.
    ///
    /// The token rides in the fragment, which browsers never send to a server.
    /// The page exchanges it for a session descriptor and stores that locally.
    #[must_use]
    pub fn portal_handoff(&self, token: &AccessToken) -> String {
        format!("{}#token={}", self.portal_home(), token.to_hex())
    }
}
