use crate::{
    adapters::ErasedPoisonError,
    domain::Product,
    ports::catalog::{CatalogPort, Error},
};
use std::{
    collections::{hash_map::Entry, HashMap},
    sync::{Arc, Mutex, PoisonError},
};

/// In-memory product catalog
///
/// Writes only ever append, so a single mutex around the map is plenty:
/// no reader can block long enough to matter.
#[derive(Clone, Debug)]
pub struct MemoryCatalog {
    products: Arc<Mutex<HashMap<String, Product>>>,
}

#[async_trait::async_trait]
impl CatalogPort for MemoryCatalog {
    async fn add(&self, product: Product) -> Result<(), Error> {
        match self.products.lock()?.entry(product.id.clone()) {
            // Reject rather than overwrite: a price must never change out
            // from under a purchaser.
            Entry::Occupied(entry) => Err(Error::DuplicateId(entry.key().clone())),
            Entry::Vacant(entry) => {
                tracing::debug!(id = %product.id, cost = product.cost, "product added");
                entry.insert(product);
                Ok(())
            }
        }
    }

    async fn list(&self) -> Result<Vec<Product>, Error> {
        Ok(self.products.lock()?.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Product>, Error> {
        Ok(self.products.lock()?.get(id).cloned())
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self {
            products: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError::from(err)))
    }
}
