//! Types for the YNAB data that is read and the sheet cells that are written.

mod account;
mod amount;
mod cell;
mod grid;
mod transaction;

pub use account::{Account, AccountType};
pub use amount::{format_amount, Amount, Milliunits};
pub use cell::Cell;
pub use grid::Grid;
pub use transaction::{ClearedStatus, Transaction, TransactionRecord};

use std::collections::BTreeMap;

/// Credit card transactions keyed by account id. Each list is in the order YNAB returned it.
pub type GroupedTransactions = BTreeMap<String, Vec<Transaction>>;
