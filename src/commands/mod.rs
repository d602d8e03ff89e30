use std::{borrow::Cow, sync::Arc};

pub mod add_product;
pub mod purchase_product;
pub mod register_member;
pub mod update_avatar;

/// Shared service state for all commands and queries
///
/// Each operation is a [`tower::Service`] implementation on this struct,
/// keyed by its request type.
pub struct DomainLogic<L, C> {
    pub(crate) ledger: Arc<L>,
    pub(crate) catalog: Arc<C>,
}

impl<L, C> DomainLogic<L, C> {
    pub fn new(ledger: Arc<L>, catalog: Arc<C>) -> Self {
        Self { ledger, catalog }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("ledger port error: {0:?}")]
    Ledger(#[from] crate::ports::ledger::Error),
    #[error("catalog port error: {0:?}")]
    Catalog(#[from] crate::ports::catalog::Error),

    /// The requested product id resolves to nothing
    #[error("no product with id {0:?}")]
    ProductNotFound(String),

    /// Caller-supplied input rejected before reaching any store
    #[error("invalid input: {0}")]
    InvalidInput(Cow<'static, str>),
}
