use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::Identity,
    ports::{catalog::CatalogPort, ledger::LedgerPort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Exchange points for a catalog product.
pub struct PurchaseProductRequest {
    pub identity: Identity,
    pub product_id: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PurchaseProductResponse {
    pub product_id: String,
    /// Points the product cost.
    pub cost: u64,
    /// Balance before the debit
    pub old_points: u64,
    /// Balance after the debit
    pub new_points: u64,
}

impl<L, C> Service<PurchaseProductRequest> for DomainLogic<L, C>
where
    L: LedgerPort + 'static,
    C: CatalogPort + 'static,
{
    type Response = PurchaseProductResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: PurchaseProductRequest) -> Self::Future {
        let ledger = self.ledger.clone();
        let catalog = self.catalog.clone();
        Box::pin(async move {
            // Products are immutable, so this lookup does not need to be
            // transactional with the debit below.
            let product = catalog
                .get(&req.product_id)
                .await?
                .ok_or_else(|| Error::ProductNotFound(req.product_id.clone()))?;

            // The overdraft check lives inside the ledger's atomic debit;
            // membership is checked there as well.
            let member = ledger.debit(&req.identity, product.cost).await?;
            tracing::info!(
                identity = %member.id,
                product_id = %product.id,
                cost = product.cost,
                "product purchased"
            );

            Ok(PurchaseProductResponse {
                product_id: product.id,
                cost: product.cost,
                old_points: member.points + product.cost,
                new_points: member.points,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{catalog::memory::MemoryCatalog, ledger::memory::MemoryLedger},
        domain::Product,
        ports::ledger,
    };
    use rstest::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, Service};

    #[fixture]
    fn identity() -> Identity {
        Identity::from("alice")
    }

    fn mug(cost: u64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Mug".to_string(),
            description: "A mug".to_string(),
            cost,
        }
    }

    async fn registered_setup(
        identity: &Identity,
        product: Product,
    ) -> Result<(MemoryLedger, DomainLogic<MemoryLedger, MemoryCatalog>), BoxError> {
        let ledger = MemoryLedger::default();
        ledger.create(identity.clone(), "Alice".to_string()).await?;
        let catalog = MemoryCatalog::default();
        catalog.add(product).await?;
        let domain = DomainLogic::new(Arc::new(ledger.clone()), Arc::new(catalog));
        Ok((ledger, domain))
    }

    #[rstest]
    #[tokio::test]
    async fn test_purchase_debits_balance(identity: Identity) -> Result<(), BoxError> {
        // GIVEN a registered member with 100 points and a 50-point mug
        let (ledger, mut domain) = registered_setup(&identity, mug(50)).await?;

        // WHEN purchasing the mug
        let req = PurchaseProductRequest {
            identity: identity.clone(),
            product_id: "p1".to_string(),
        };
        let res = domain.call(req).await;

        // THEN the balance drops by the cost
        assert_that!(res).is_ok().is_equal_to(PurchaseProductResponse {
            product_id: "p1".to_string(),
            cost: 50,
            old_points: 100,
            new_points: 50,
        });
        let member = ledger.get(&identity).await?.unwrap();
        assert_that!(member.points).is_equal_to(50);

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_purchase_down_to_zero_then_rejected(identity: Identity) -> Result<(), BoxError> {
        // GIVEN a member with 100 points and a 50-point mug
        let (ledger, mut domain) = registered_setup(&identity, mug(50)).await?;

        // WHEN buying it twice
        for _ in 0..2 {
            let req = PurchaseProductRequest {
                identity: identity.clone(),
                product_id: "p1".to_string(),
            };
            let res = domain.call(req).await;
            assert_that!(res).is_ok();
        }

        // THEN the balance is exactly zero and a third attempt overdrafts
        let member = ledger.get(&identity).await?.unwrap();
        assert_that!(member.points).is_equal_to(0);

        let req = PurchaseProductRequest {
            identity: identity.clone(),
            product_id: "p1".to_string(),
        };
        let res = domain.call(req).await;
        assert_that!(res).is_err().matches(|err| {
            matches!(
                err,
                Error::Ledger(ledger::Error::InsufficientBalance { balance: 0, amount: 50 })
            )
        });
        let member = ledger.get(&identity).await?.unwrap();
        assert_that!(member.points).is_equal_to(0);

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_product(identity: Identity) -> Result<(), BoxError> {
        // GIVEN a registered member and an empty-ish catalog
        let (ledger, mut domain) = registered_setup(&identity, mug(50)).await?;

        // WHEN purchasing a product that does not exist
        let req = PurchaseProductRequest {
            identity: identity.clone(),
            product_id: "does-not-exist".to_string(),
        };
        let res = domain.call(req).await;

        // THEN the purchase fails and no points move
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::ProductNotFound(_)));
        let member = ledger.get(&identity).await?.unwrap();
        assert_that!(member.points).is_equal_to(100);

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_unregistered_purchaser(identity: Identity) -> Result<(), BoxError> {
        // GIVEN a catalog with a mug but no registered member
        let catalog = MemoryCatalog::default();
        catalog.add(mug(50)).await?;
        let mut domain = DomainLogic::new(Arc::new(MemoryLedger::default()), Arc::new(catalog));

        // WHEN an unregistered identity tries to purchase
        let req = PurchaseProductRequest {
            identity,
            product_id: "p1".to_string(),
        };
        let res = domain.call(req).await;

        // THEN the purchase fails with a membership error
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::Ledger(ledger::Error::NotFound(_))));

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_concurrent_purchases_never_overdraft(identity: Identity) -> Result<(), BoxError> {
        // GIVEN a member with 100 points and an 80-point product
        let ledger = MemoryLedger::default();
        ledger.create(identity.clone(), "Alice".to_string()).await?;
        let catalog = MemoryCatalog::default();
        catalog.add(mug(80)).await?;
        let mut domain_a =
            DomainLogic::new(Arc::new(ledger.clone()), Arc::new(catalog.clone()));
        let mut domain_b = DomainLogic::new(Arc::new(ledger.clone()), Arc::new(catalog));

        // WHEN two purchases race
        let req = || PurchaseProductRequest {
            identity: identity.clone(),
            product_id: "p1".to_string(),
        };
        let (res_a, res_b) = tokio::join!(
            async { domain_a.call(req()).await },
            async { domain_b.call(req()).await },
        );

        // THEN exactly one wins and the final balance is 20
        let successes = [&res_a, &res_b].iter().filter(|res| res.is_ok()).count();
        assert_that!(successes).is_equal_to(1);
        assert_that!([res_a, res_b].iter().any(|res| {
            matches!(
                res,
                Err(Error::Ledger(ledger::Error::InsufficientBalance { .. }))
            )
        }))
        .is_true();
        let member = ledger.get(&identity).await?.unwrap();
        assert_that!(member.points).is_equal_to(20);

        Ok(())
    }
}
