pub mod loan_book;
pub mod records;
pub mod store;
pub mod workflow;
