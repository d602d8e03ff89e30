use crate::{
    adapters::ErasedPoisonError,
    domain::BlobRef,
    ports::content::{ContentStorePort, Error, ProgressCallback},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use uuid::Uuid;

/// Transfer unit for progress reporting.
const CHUNK_SIZE: usize = 8 * 1024;

/// In-memory content store
///
/// Stands in for the real external store in tests and local runs. Uploads
/// are chunked only so that progress callbacks fire the way they would
/// against a remote store.
#[derive(Clone, Debug)]
pub struct MemoryContentStore {
    blobs: Arc<Mutex<HashMap<Uuid, Vec<u8>>>>,
}

#[async_trait::async_trait]
impl ContentStorePort for MemoryContentStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        mut on_progress: ProgressCallback,
    ) -> Result<BlobRef, Error> {
        let total = bytes.len();
        on_progress(0);
        if total > 0 {
            let mut transferred = 0usize;
            for chunk in bytes.chunks(CHUNK_SIZE) {
                transferred += chunk.len();
                // Integer division keeps this monotonic and caps it at 100
                // on the final chunk.
                on_progress((transferred * 100 / total) as u8);
            }
        } else {
            on_progress(100);
        }

        let id = Uuid::new_v4();
        self.blobs.lock()?.insert(id, bytes);
        tracing::debug!(%id, size = total, "content uploaded");
        Ok(BlobRef::Stored(id))
    }

    async fn fetch_bytes(&self, blob: &BlobRef) -> Result<Vec<u8>, Error> {
        match blob {
            BlobRef::Stored(id) => self
                .blobs
                .lock()?
                .get(id)
                .cloned()
                .ok_or_else(|| Error::UnknownRef(blob.clone())),
            // External content never passed through this store
            BlobRef::External(_) => Err(Error::UnknownRef(blob.clone())),
        }
    }

    fn direct_url(&self, blob: &BlobRef) -> String {
        match blob {
            BlobRef::Stored(id) => format!("memory://blobs/{id}"),
            BlobRef::External(url) => url.clone(),
        }
    }
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self {
            blobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError::from(err)))
    }
}
