use crate::{
    adapters::ErasedPoisonError,
    domain::{BlobRef, Identity, Member},
    ports::ledger::{Error, LedgerPort},
};
use std::{
    collections::{hash_map::Entry, HashMap},
    sync::{Arc, Mutex, PoisonError, RwLock},
};

/// In-memory ledger with per-identity mutual exclusion
///
/// Each member record sits behind its own mutex, keyed by identity in an
/// outer map. Balance mutations lock only the one record they touch, so
/// unrelated members are never serialized behind one another; the outer
/// lock is held only long enough to find or insert a record's slot.
#[derive(Clone, Debug)]
pub struct MemoryLedger {
    members: Arc<RwLock<HashMap<Identity, Arc<Mutex<Member>>>>>,
}

impl MemoryLedger {
    /// Fetch the lock slot for one identity without holding the outer lock
    /// afterwards.
    fn slot(&self, identity: &Identity) -> Result<Option<Arc<Mutex<Member>>>, Error> {
        Ok(self.members.read()?.get(identity).cloned())
    }
}

#[async_trait::async_trait]
impl LedgerPort for MemoryLedger {
    async fn get(&self, identity: &Identity) -> Result<Option<Member>, Error> {
        match self.slot(identity)? {
            Some(slot) => Ok(Some(slot.lock()?.clone())),
            None => Ok(None),
        }
    }

    async fn create(&self, identity: Identity, name: String) -> Result<Member, Error> {
        match self.members.write()?.entry(identity.clone()) {
            // At most one concurrent create wins; everyone else sees the
            // winner's record already in place.
            Entry::Occupied(_) => Err(Error::AlreadyExists(identity)),
            Entry::Vacant(entry) => {
                let member = Member::new(identity.clone(), name);
                entry.insert(Arc::new(Mutex::new(member.clone())));
                tracing::debug!(%identity, points = member.points, "member registered");
                Ok(member)
            }
        }
    }

    async fn debit(&self, identity: &Identity, amount: u64) -> Result<Member, Error> {
        let slot = self
            .slot(identity)?
            .ok_or_else(|| Error::NotFound(identity.clone()))?;

        // Check and subtract under the record's own lock: no interleaving
        // can observe the balance between the two steps.
        let mut member = slot.lock()?;
        match member.points.checked_sub(amount) {
            Some(remaining) => {
                member.points = remaining;
                tracing::debug!(%identity, amount, remaining, "balance debited");
                Ok(member.clone())
            }
            None => Err(Error::InsufficientBalance {
                balance: member.points,
                amount,
            }),
        }
    }

    async fn set_avatar(&self, identity: &Identity, avatar: BlobRef) -> Result<(), Error> {
        let slot = self
            .slot(identity)?
            .ok_or_else(|| Error::NotFound(identity.clone()))?;

        slot.lock()?.avatar = Some(avatar);
        tracing::debug!(%identity, "avatar replaced");
        Ok(())
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self {
            members: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// We need to create a custom `From` implementation here for an error that's
/// specific to the in-memory adapters.
impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError::from(err)))
    }
}
