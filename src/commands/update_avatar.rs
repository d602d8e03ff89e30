use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{BlobRef, Identity},
    ports::{catalog::CatalogPort, ledger::LedgerPort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Attach or replace the caller's avatar.
///
/// The byte transfer already happened: the external content store hands the
/// caller a completed [`BlobRef`] before this command runs, so the ledger
/// never waits on I/O and an abandoned upload never reaches it.
pub struct UpdateAvatarRequest {
    pub identity: Identity,
    pub avatar: BlobRef,
}

impl<L, C> Service<UpdateAvatarRequest> for DomainLogic<L, C>
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

    fn call(&mut self, req: UpdateAvatarRequest) -> Self::Future {
        let ledger = self.ledger.clone();
        Box::pin(async move {
            ledger.set_avatar(&req.identity, req.avatar).await?;
            Ok(())
        })
    }
}
