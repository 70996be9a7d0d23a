//! Traits describing the external collaborators the pipeline consumes.
//!
//! The remote directory and mailbox-administration services are only
//! specified at this boundary; transports live behind these traits. The
//! crate ships one file-backed implementation in [`crate::io::snapshot`].

use crate::error::Result;
use crate::model::{AccountDescriptor, IdentityRecord, MailboxCategory, UsageRecord};

/// Authentication collaborator. The pipeline does not start until this
/// reports an active session, and treats loss of the session mid-run as an
/// aborting condition.
pub trait SessionProvider {
    fn ensure_session_active(&self) -> Result<bool>;
}

/// Enumerates mailbox accounts matching a selected category as a lazy,
/// provider-ordered sequence. Items are yielded one at a time; the pipeline
/// never materialises the whole listing.
pub trait AccountSource {
    fn list_accounts(
        &self,
        category: MailboxCategory,
    ) -> Result<Box<dyn Iterator<Item = Result<AccountDescriptor>> + '_>>;
}

/// Directory-service query returning license assignment for one account.
/// `Ok(None)` means the directory has no record for that identifier.
pub trait IdentityLookup {
    fn get_identity(&self, account_id: &str) -> Result<Option<IdentityRecord>>;
}

/// Mailbox-administration query returning storage consumption for one
/// account's primary store, or its archive store when `archive` is set.
pub trait UsageLookup {
    fn get_usage(&self, account_id: &str, archive: bool) -> Result<Option<UsageRecord>>;
}
