pub mod db;

pub mod budgets;
pub mod categories;
pub mod charts;
pub mod demo;
pub mod entities;
pub mod errors;
pub mod periods;
pub mod predictions;
pub mod schema;
pub mod transfers;
pub mod users;

pub use errors::{Error, Result};
