use crate::domain::{BlobRef, Identity, Member};

/// Authoritative mapping from identity to [`Member`]
///
/// The ledger is the single source of truth for point balances. All
/// mutations are atomic per identity: concurrent operations on the same
/// member are linearized, while operations on different members proceed
/// independently.
#[mockall::automock]
#[async_trait::async_trait]
pub trait LedgerPort {
    /// Look up a member. Absence is a normal result for unregistered
    /// identities, not an error.
    async fn get(&self, identity: &Identity) -> Result<Option<Member>, Error>;

    /// Create a member record with the welcome bonus.
    ///
    /// At most one concurrent `create` for a given identity succeeds; all
    /// others observe [`Error::AlreadyExists`] and the winner's record is
    /// left untouched.
    async fn create(&self, identity: Identity, name: String) -> Result<Member, Error>;

    /// Atomically check and decrement a member's balance.
    ///
    /// The overdraft check and the subtraction are one indivisible step
    /// relative to other operations on the same identity, so the balance
    /// can never go negative under any interleaving.
    async fn debit(&self, identity: &Identity, amount: u64) -> Result<Member, Error>;

    /// Replace the member's avatar reference wholesale.
    async fn set_avatar(&self, identity: &Identity, avatar: BlobRef) -> Result<(), Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record already exists for this identity
    ///
    /// Registration is not an upsert: the existing record is never touched.
    #[error("member {0} is already registered")]
    AlreadyExists(Identity),

    /// No record exists for this identity
    #[error("member {0} does not exist")]
    NotFound(Identity),

    /// Debiting would overdraw the balance
    #[error("insufficient balance: {balance} points held, {amount} required")]
    InsufficientBalance { balance: u64, amount: u64 },

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not
    /// part of the domain model, such as connectivity, configuration, or
    /// permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
