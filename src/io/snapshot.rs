//! File-backed provider implementation.
//!
//! A tenant snapshot is a single JSON document holding the account listing
//! plus the per-account identity and usage maps, typically exported from the
//! live services ahead of time. It implements all four collaborator traits,
//! which makes it both the data source for the binary and a convenient
//! fixture for tests. The session is always considered active because the
//! data is local.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{AccountDescriptor, IdentityRecord, MailboxCategory, UsageRecord};
use crate::provider::{AccountSource, IdentityLookup, SessionProvider, UsageLookup};

/// Storage statistics for one account's stores.
#[derive(Debug, Clone, Deserialize)]
pub struct MailboxUsage {
    pub primary: UsageRecord,
    #[serde(default)]
    pub archive: Option<UsageRecord>,
}

/// In-memory view of one tenant, keyed by user principal name.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantSnapshot {
    pub accounts: Vec<AccountDescriptor>,
    #[serde(default)]
    pub identities: HashMap<String, IdentityRecord>,
    #[serde(default)]
    pub usage: HashMap<String, MailboxUsage>,
}

impl TenantSnapshot {
    /// Loads a snapshot document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl SessionProvider for TenantSnapshot {
    fn ensure_session_active(&self) -> Result<bool> {
        Ok(true)
    }
}

impl AccountSource for TenantSnapshot {
    fn list_accounts(
        &self,
        category: MailboxCategory,
    ) -> Result<Box<dyn Iterator<Item = Result<AccountDescriptor>> + '_>> {
        let accounts = self
            .accounts
            .iter()
            .filter(move |account| category.matches(&account.kind))
            .cloned()
            .map(Ok);
        Ok(Box::new(accounts))
    }
}

impl IdentityLookup for TenantSnapshot {
    fn get_identity(&self, account_id: &str) -> Result<Option<IdentityRecord>> {
        Ok(self.identities.get(account_id).cloned())
    }
}

impl UsageLookup for TenantSnapshot {
    fn get_usage(&self, account_id: &str, archive: bool) -> Result<Option<UsageRecord>> {
        let Some(usage) = self.usage.get(account_id) else {
            return Ok(None);
        };
        if archive {
            Ok(usage.archive.clone())
        } else {
            Ok(Some(usage.primary.clone()))
        }
    }
}
