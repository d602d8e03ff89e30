use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::Product,
    ports::{catalog::CatalogPort, ledger::LedgerPort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Administrative path: publish a new product to the catalog.
///
/// Products are immutable once added; duplicate ids are rejected.
pub struct AddProductRequest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u64,
}

impl<L, C> Service<AddProductRequest> for DomainLogic<L, C>
where
    L: LedgerPort + 'static,
    C: CatalogPort + 'static,
{
    type Response = ();
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: AddProductRequest) -> Self::Future {
        let catalog = self.catalog.clone();
        Box::pin(async move {
            if req.id.trim().is_empty() {
                return Err(Error::InvalidInput("product id must not be empty".into()));
            }
            if req.name.trim().is_empty() {
                return Err(Error::InvalidInput("product name must not be empty".into()));
            }

            catalog
                .add(Product {
                    id: req.id,
                    name: req.name,
                    description: req.description,
                    cost: req.cost,
                })
                .await?;

            Ok(())
        })
    }
}
