//! Membership rewards core: the authoritative ledger of members and point
//! balances, the product catalog, and the rules for registration, purchases,
//! and avatar attachment.
//!
//! Laid out hexagonally:
//! - [`domain`] holds the value types ([`domain::Member`],
//!   [`domain::Product`], [`domain::BlobRef`]).
//! - [`ports`] defines the trait boundaries to the ledger, the catalog, and
//!   the external content store.
//! - [`adapters`] provides in-memory implementations, including the
//!   per-identity-locked [`adapters::ledger::memory::MemoryLedger`].
//! - [`commands`] and [`queries`] expose one [`tower::Service`] per
//!   operation on a shared [`commands::DomainLogic`].
//!
//! Caller identity is externally verified and arrives as an opaque
//! [`domain::Identity`] on every request; this crate never authenticates.

pub mod adapters;
pub mod commands;
pub mod domain;
pub mod ports;
pub mod queries;
