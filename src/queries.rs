//! Read path for the presentation layer.
//!
//! Queries read committed state directly and never touch the mutation
//! machinery; repeated calls with no intervening writes return identical
//! results.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    commands::{DomainLogic, Error},
    domain::{Identity, Member, Product},
    ports::{catalog::CatalogPort, ledger::LedgerPort},
};
use tower::Service;

/// Fetch one member record. Absence means the identity never registered.
pub struct GetMemberRequest {
    pub identity: Identity,
}

impl<L, C> Service<GetMemberRequest> for DomainLogic<L, C>
where
    L: LedgerPort + 'static,
    C: CatalogPort + 'static,
{
    type Response = Option<Member>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: GetMemberRequest) -> Self::Future {
        let ledger = self.ledger.clone();
        Box::pin(async move { Ok(ledger.get(&req.identity).await?) })
    }
}

/// Fetch one product by id.
pub struct GetProductRequest {
    pub id: String,
}

impl<L, C> Service<GetProductRequest> for DomainLogic<L, C>
where
    L: LedgerPort + 'static,
    C: CatalogPort + 'static,
{
    type Response = Option<Product>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: GetProductRequest) -> Self::Future {
        let catalog = self.catalog.clone();
        Box::pin(async move { Ok(catalog.get(&req.id).await?) })
    }
}

/// Enumerate the whole catalog. Order carries no meaning.
pub struct ListProductsRequest;

impl<L, C> Service<ListProductsRequest> for DomainLogic<L, C>
where
    L: LedgerPort + 'static,
    C: CatalogPort + 'static,
{
    type Response = Vec<Product>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: ListProductsRequest) -> Self::Future {
        let catalog = self.catalog.clone();
        Box::pin(async move { Ok(catalog.list().await?) })
    }
}
