pub mod application;
pub mod catalog;
pub mod installment;
pub mod matcher;
pub mod recommendation;
