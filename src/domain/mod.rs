pub mod completion;
pub mod currency;
pub mod ledger;
pub mod models;
pub mod pages;
pub mod summary;
