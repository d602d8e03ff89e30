use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{Identity, Member},
    ports::{catalog::CatalogPort, ledger::LedgerPort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Onboard a new member under the caller's verified identity.
pub struct RegisterMemberRequest {
    pub identity: Identity,
    pub name: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RegisterMemberResponse {
    /// The freshly created record, welcome bonus included.
    pub member: Member,
}

impl<L, C> Service<RegisterMemberRequest> for DomainLogic<L, C>
where
    L: LedgerPort + 'static,
    C: CatalogPort + 'static,
{
    type Response = RegisterMemberResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: RegisterMemberRequest) -> Self::Future {
        let ledger = self.ledger.clone();
        Box::pin(async move {
            // Validate before touching the ledger: a failed registration
            // must have no side effect.
            let name = req.name.trim();
            if name.is_empty() {
                return Err(Error::InvalidInput("display name must not be empty".into()));
            }

            let member = ledger.create(req.identity, name.to_string()).await?;
            tracing::info!(identity = %member.id, "new member registered");

            Ok(RegisterMemberResponse { member })
        })
    }
}
