use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Points granted exactly once when a member registers.
pub const WELCOME_BONUS: u64 = 100;

/// Externally-verified caller identity
///
/// The identity collaborator authenticates callers before any request
/// reaches this crate; we only ever see the resulting opaque token and use
/// it as the ledger's primary key. It is never parsed or validated here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// A registered member of the rewards program
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    /// Unique identifier, equal to the caller's verified identity.
    ///
    /// Immutable once created.
    pub id: Identity,
    /// Display name; not required to be unique.
    pub name: String,
    /// Current point balance.
    ///
    /// Unsigned on purpose: a negative balance is unrepresentable, and every
    /// debit goes through an overdraft check before subtracting.
    pub points: u64,
    /// Reference to the member's avatar in the external content store.
    ///
    /// Absent until the first avatar upload.
    pub avatar: Option<BlobRef>,
    /// When the member registered.
    pub registered_at: DateTime<Utc>,
}

impl Member {
    pub fn new(id: Identity, name: String) -> Self {
        Self {
            id,
            name,
            points: WELCOME_BONUS,
            avatar: None,
            registered_at: Utc::now(),
        }
    }
}

/// A product in the marketplace catalog
///
/// Products are immutable after creation; there is no stock field, so
/// purchases never affect availability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in points.
    pub cost: u64,
}

/// Opaque handle to binary content held by the external content store
///
/// The ledger stores only this reference, never raw bytes. A ref is either
/// a key into the store (content uploaded through it) or an external URL
/// that was never uploaded at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlobRef {
    /// Content held by the store under a store-allocated key.
    Stored(Uuid),
    /// Content living at an external URL; no bytes pass through the store.
    External(String),
}

impl BlobRef {
    /// Reference existing external content without uploading anything.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::External(url.into())
    }
}
