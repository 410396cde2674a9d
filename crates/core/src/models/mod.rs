pub mod group;
pub mod ledger;
pub mod line;
pub mod order;
pub mod settings;
