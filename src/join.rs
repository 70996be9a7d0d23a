//! Record joiner: enriches one account descriptor with its identity and
//! usage records and flattens the result into the fixed export schema.

use crate::error::{AuditError, Result};
use crate::model::{AccountDescriptor, ArchiveState, IdentityRecord, NormalizedRecord, UsageRecord};
use crate::provider::{IdentityLookup, UsageLookup};

/// One account with every provider record the export needs, fetched exactly
/// once. The identity record is shared between the license filter and the
/// normalized output so the filter never issues a second lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedAccount {
    pub descriptor: AccountDescriptor,
    pub identity: IdentityRecord,
    pub usage: UsageRecord,
    pub archive_usage: Option<UsageRecord>,
}

/// Joins one descriptor's provider records into a [`NormalizedRecord`].
pub struct RecordJoiner<'a> {
    identity: &'a dyn IdentityLookup,
    usage: &'a dyn UsageLookup,
}

impl<'a> RecordJoiner<'a> {
    pub fn new(identity: &'a dyn IdentityLookup, usage: &'a dyn UsageLookup) -> Self {
        Self { identity, usage }
    }

    /// Fetches the identity record, the primary usage record and, only when
    /// the archive is active, the archive usage record. Lookup failures and
    /// missing records come back tagged with the account identifier so the
    /// driver can log and skip; session loss passes through as-is.
    pub fn enrich(&self, descriptor: AccountDescriptor) -> Result<EnrichedAccount> {
        let account = descriptor.user_principal_name.as_str();

        let identity = self
            .identity
            .get_identity(account)
            .map_err(|error| error.scoped_to(account))?
            .ok_or_else(|| missing(account, "no identity record"))?;

        let usage = self
            .usage
            .get_usage(account, false)
            .map_err(|error| error.scoped_to(account))?
            .ok_or_else(|| missing(account, "no usage statistics"))?;

        let archive_usage = if descriptor.archive_state == ArchiveState::Active {
            let record = self
                .usage
                .get_usage(account, true)
                .map_err(|error| error.scoped_to(account))?
                .ok_or_else(|| missing(account, "no archive usage statistics"))?;
            Some(record)
        } else {
            None
        };

        Ok(EnrichedAccount {
            descriptor,
            identity,
            usage,
            archive_usage,
        })
    }

    /// Flattens an enriched account into the 15-column export record. Pure:
    /// identical inputs always produce identical records.
    pub fn normalize(account: &EnrichedAccount) -> NormalizedRecord {
        let descriptor = &account.descriptor;
        NormalizedRecord {
            user_principal_name: descriptor.user_principal_name.clone(),
            display_name: descriptor.display_name.clone(),
            mailbox_type: descriptor.kind.as_str().to_string(),
            is_licensed: account.identity.is_licensed,
            licenses: account
                .identity
                .licenses
                .as_ref()
                .map(|skus| skus.join(", ")),
            hidden_from_gal: descriptor.hidden_from_address_lists,
            storage_consumed: account.usage.total_size.clone(),
            storage_limit: descriptor.storage_quota.clone(),
            archive_status: descriptor.archive_state.as_str().to_string(),
            auto_expanding_archive_enabled: descriptor.auto_expanding_archive,
            archive_storage_consumed: account
                .archive_usage
                .as_ref()
                .map(|usage| usage.total_size.clone())
                .unwrap_or_default(),
            archive_storage_quota: descriptor.archive_quota.clone(),
            retention_policy: descriptor.retention_policy.clone(),
            forwarding_smtp_address: descriptor.forwarding_smtp_address.clone(),
            forwarding_address: descriptor.forwarding_address.clone(),
        }
    }
}

fn missing(account: &str, reason: &str) -> AuditError {
    AuditError::AccountLookup {
        account: account.to_string(),
        reason: reason.to_string(),
    }
}
