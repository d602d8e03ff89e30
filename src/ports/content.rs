use crate::domain::BlobRef;

/// Callback invoked as upload bytes transfer
///
/// Called with a percentage in `0..=100` that never decreases across calls,
/// ending at 100 once the transfer completes.
pub type ProgressCallback = Box<dyn FnMut(u8) + Send>;

/// The external content store
///
/// Holds the actual bytes behind every [`BlobRef`]. The ledger never talks
/// to this port: byte transfer happens before a reference is handed to the
/// ledger, so an abandoned or failed upload leaves no trace in any member
/// record.
#[mockall::automock]
#[async_trait::async_trait]
pub trait ContentStorePort {
    /// Transfer raw bytes into the store, reporting progress along the way,
    /// and return a reference to the stored content.
    async fn upload(&self, bytes: Vec<u8>, on_progress: ProgressCallback)
        -> Result<BlobRef, Error>;

    /// Resolve a reference to its raw bytes.
    async fn fetch_bytes(&self, blob: &BlobRef) -> Result<Vec<u8>, Error>;

    /// Resolve a reference to a URL the content can be fetched from
    /// directly, bypassing this port.
    fn direct_url(&self, blob: &BlobRef) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reference does not resolve to any stored content
    #[error("no content stored for {0:?}")]
    UnknownRef(BlobRef),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not
    /// part of the domain model, such as connectivity, configuration, or
    /// permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
