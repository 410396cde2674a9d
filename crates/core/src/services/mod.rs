pub mod checkout_service;
pub mod grouping_service;
