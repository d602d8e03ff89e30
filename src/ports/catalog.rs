use crate::domain::Product;

/// The product catalog
///
/// Read-mostly: products are appended by the administrative path and never
/// updated or deleted afterwards, so readers need no coordination with
/// writers beyond safe publication.
#[mockall::automock]
#[async_trait::async_trait]
pub trait CatalogPort {
    /// Add a product. Duplicate ids are rejected, never overwritten, so a
    /// product's price cannot change out from under a purchaser.
    async fn add(&self, product: Product) -> Result<(), Error>;

    /// Enumerate every product. Order carries no meaning.
    async fn list(&self) -> Result<Vec<Product>, Error>;

    /// Look up one product by id.
    async fn get(&self, id: &str) -> Result<Option<Product>, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A product with this id already exists
    #[error("product id {0:?} is already taken")]
    DuplicateId(String),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not
    /// part of the domain model, such as connectivity, configuration, or
    /// permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
