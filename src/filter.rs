//! License filter: pure predicate deciding whether an account's record is
//! admitted into the export.

use crate::model::{FilterMode, IdentityRecord};

/// Admits every record in [`FilterMode::AllMailboxes`]; in
/// [`FilterMode::LicensedOnly`], admits only accounts with at least one
/// assigned license. Evaluated against the identity record the joiner
/// already fetched, never through a lookup of its own.
pub fn admits(mode: FilterMode, identity: &IdentityRecord) -> bool {
    match mode {
        FilterMode::AllMailboxes => true,
        FilterMode::LicensedOnly => identity.is_licensed,
    }
}
