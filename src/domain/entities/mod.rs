pub mod ledger;
pub mod listing;
pub mod record;
