//! Claims carried by access tokens.
//!
//! Session handling lives outside this system; tokens only convey who is
//! acting and in which role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ImporterId, UserId};

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: UserId,
    /// Role of the acting user: importer, reviewer, financial_institution or admin.
    pub role: String,
    /// Importer the user acts for, present for importer users only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importer: Option<ImporterId>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: UserId,
        role: &str,
        importer: Option<ImporterId>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            importer,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.sub
    }

    /// Returns the importer the user acts for, if any.
    #[must_use]
    pub const fn importer_id(&self) -> Option<ImporterId> {
        self.importer
    }
}
