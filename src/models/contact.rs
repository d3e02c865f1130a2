use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contact imported from an external service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImportedContact {
    pub id: Uuid,
    /// User who imported this contact.
    pub owner_id: Uuid,
    pub name: Option<String>,
    // Facebook does not expose friend emails, so matching may have to rely
    // on the name alone.
    pub email: Option<String>,
    pub phone: Option<String>,
    pub added: DateTime<Utc>,
}

impl ImportedContact {
    /// "email - name" when both are present, otherwise whichever exists.
    pub fn display_name(&self) -> String {
        let mut dname = String::new();
        if let Some(email) = &self.email {
            dname.push_str(email);
        }
        if let Some(name) = &self.name {
            if !dname.is_empty() {
                dname.push_str(" - ");
            }
            dname.push_str(name);
        }
        dname
    }
}

/// One parsed contact entry as produced by an external per-service importer.
///
/// All fields are optional; deduplication in the persistence layer is keyed
/// on the (owner, email, name) triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

// Column limits from the storage schema. Enforced here so over-long input
// degrades like any other malformed field instead of failing the INSERT
// and aborting the batch.
const NAME_MAX_CHARS: usize = 100;
const EMAIL_MAX_CHARS: usize = 254;

impl ContactRecord {
    /// Normalizes empty strings to `None`, drops fields that fail shape
    /// validation and caps field lengths to what the schema stores, so a
    /// malformed or over-long value never reaches storage.
    pub fn normalized(self) -> Self {
        let name = self.name.filter(|s| !s.is_empty()).map(|s| {
            if s.chars().count() > NAME_MAX_CHARS {
                tracing::debug!(chars = s.chars().count(), "truncating over-long name");
                s.chars().take(NAME_MAX_CHARS).collect()
            } else {
                s
            }
        });
        let email = self.email.filter(|s| !s.is_empty()).filter(|e| {
            if !is_valid_email(e) {
                tracing::debug!(email = %e, "dropping malformed email");
                return false;
            }
            if e.chars().count() > EMAIL_MAX_CHARS {
                tracing::debug!(chars = e.chars().count(), "dropping over-long email");
                return false;
            }
            true
        });
        let phone = self.phone.filter(|s| !s.is_empty()).filter(|p| {
            let ok = is_valid_phone(p);
            if !ok {
                tracing::debug!(phone = %p, "dropping malformed phone");
            }
            ok
        });
        Self { name, email, phone }
    }
}

/// Credentials for one import run. `user_id` identifies the owner of the
/// imported contacts; the service-specific token is opaque to this crate.
#[derive(Debug, Clone)]
pub struct ImportCredentials {
    pub user_id: Uuid,
    pub token: Option<String>,
}

impl ImportCredentials {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            token: None,
        }
    }
}

/// Phone numbers must look like '+18012345678'; up to 15 digits allowed.
pub fn is_valid_phone(phone: &str) -> bool {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE
        .get_or_init(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone regex"))
        .is_match(phone)
}

/// Loose shape check only; full address validation is the importer's job.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"))
        .is_match(email)
}
