use serde::{Deserialize, Serialize};

/// Column headers of the export, in the order rows are written.
pub const COLUMNS: [&str; 15] = [
    "UserPrincipalName",
    "DisplayName",
    "Type",
    "IsLicensed",
    "Licenses",
    "HiddenFromGAL",
    "StorageConsumed",
    "StorageLimit",
    "ArchiveStatus",
    "AutoExpandingArchiveEnabled",
    "ArchiveStorageConsumed",
    "ArchiveStorageQuota",
    "RetentionPolicy",
    "ForwardingSMTPAddress",
    "ForwardingAddress",
];

/// Category tag the mailbox-administration provider assigns to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MailboxKind {
    Shared,
    User,
    /// Any other provider-defined tag, kept verbatim.
    Other(String),
}

impl MailboxKind {
    pub fn as_str(&self) -> &str {
        match self {
            MailboxKind::Shared => "Shared",
            MailboxKind::User => "User",
            MailboxKind::Other(tag) => tag,
        }
    }
}

impl From<String> for MailboxKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Shared" | "SharedMailbox" => MailboxKind::Shared,
            "User" | "UserMailbox" => MailboxKind::User,
            _ => MailboxKind::Other(tag),
        }
    }
}

impl From<MailboxKind> for String {
    fn from(kind: MailboxKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Which account category the operator asked the source to enumerate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MailboxCategory {
    Shared,
    User,
    All,
}

impl MailboxCategory {
    /// Whether an account with the given category tag belongs to this
    /// selection.
    pub fn matches(&self, kind: &MailboxKind) -> bool {
        match self {
            MailboxCategory::All => true,
            MailboxCategory::Shared => *kind == MailboxKind::Shared,
            MailboxCategory::User => *kind == MailboxKind::User,
        }
    }
}

/// Archive provisioning state reported for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArchiveState {
    Active,
    NotActive,
    Other(String),
}

impl ArchiveState {
    pub fn as_str(&self) -> &str {
        match self {
            ArchiveState::Active => "Active",
            ArchiveState::NotActive => "None",
            ArchiveState::Other(tag) => tag,
        }
    }
}

impl From<String> for ArchiveState {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Active" => ArchiveState::Active,
            "None" => ArchiveState::NotActive,
            _ => ArchiveState::Other(tag),
        }
    }
}

impl From<ArchiveState> for String {
    fn from(state: ArchiveState) -> Self {
        state.as_str().to_string()
    }
}

/// Which records the license filter admits into the export.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterMode {
    AllMailboxes,
    LicensedOnly,
}

/// Base attributes of one account as enumerated by the account source.
/// Immutable once fetched; owned by the current pipeline iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDescriptor {
    pub user_principal_name: String,
    pub display_name: String,
    pub kind: MailboxKind,
    pub hidden_from_address_lists: bool,
    pub archive_state: ArchiveState,
    pub auto_expanding_archive: bool,
    /// Send/receive quota of the primary mailbox, as reported (display
    /// string, not parsed).
    pub storage_quota: String,
    pub archive_quota: String,
    pub retention_policy: Option<String>,
    pub forwarding_smtp_address: Option<String>,
    pub forwarding_address: Option<String>,
}

/// Per-account identity record from the directory provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub is_licensed: bool,
    /// License SKU identifiers in provider order. `None` means the directory
    /// returned no SKU collection at all, as opposed to an empty one.
    #[serde(default)]
    pub licenses: Option<Vec<String>>,
}

/// Storage consumption of one mailbox store (primary or archive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub total_size: String,
}

/// The flat fixed-schema record exported per account. Created once by the
/// joiner and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    #[serde(rename = "UserPrincipalName")]
    pub user_principal_name: String,
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "Type")]
    pub mailbox_type: String,
    #[serde(rename = "IsLicensed")]
    pub is_licensed: bool,
    /// Joined SKU list; `None` when the directory returned no collection.
    #[serde(rename = "Licenses")]
    pub licenses: Option<String>,
    #[serde(rename = "HiddenFromGAL")]
    pub hidden_from_gal: bool,
    #[serde(rename = "StorageConsumed")]
    pub storage_consumed: String,
    #[serde(rename = "StorageLimit")]
    pub storage_limit: String,
    #[serde(rename = "ArchiveStatus")]
    pub archive_status: String,
    #[serde(rename = "AutoExpandingArchiveEnabled")]
    pub auto_expanding_archive_enabled: bool,
    /// Empty string when the archive is not active. The sentinel means
    /// "inapplicable", not "unknown".
    #[serde(rename = "ArchiveStorageConsumed")]
    pub archive_storage_consumed: String,
    #[serde(rename = "ArchiveStorageQuota")]
    pub archive_storage_quota: String,
    #[serde(rename = "RetentionPolicy")]
    pub retention_policy: Option<String>,
    #[serde(rename = "ForwardingSMTPAddress")]
    pub forwarding_smtp_address: Option<String>,
    #[serde(rename = "ForwardingAddress")]
    pub forwarding_address: Option<String>,
}
