pub mod book;
pub mod catalog;
pub mod date_serde;
pub mod extract;
pub mod keyword;
pub mod reading;

pub use book::BookRecord;
