pub mod catalog;
pub mod content;
pub mod ledger;
