//! Copies credit card figures from a YNAB budget into a Google sheet.
//!
//! A sync reads the open credit card accounts of a budget and their transactions, then writes,
//! for every card, the cleared balance, the date of the latest charge and the total of cleared
//! charges into a worksheet. Cells are located by label: a header cell names the column and a cell
//! holding the YNAB account id names the row.

pub mod aggregate;
mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod update;
mod utils;


pub use api::{Budget, Mode, Sheet};
pub use config::Config;
pub use error::Error;
pub use error::Result;
