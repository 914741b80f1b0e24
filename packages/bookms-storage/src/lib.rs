pub mod db;
pub mod models;
pub mod queries;
pub mod schema;
pub mod seed;

mod error;

pub use error::{Error, Result};
