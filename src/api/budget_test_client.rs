//! Implements the `Budget` trait using in-memory data for testing purposes.
//!
//! Like the test sheet, this is compiled into the production binary so the whole sync can be run
//! without a YNAB account.

use crate::api::Budget;
use crate::model::{Account, TransactionRecord};
use crate::Result;
use anyhow::Context;

/// An implementation of the `Budget` trait that serves fixed accounts and transactions and counts
/// how often each was requested.
#[derive(Debug, Clone, Default)]
pub(crate) struct TestBudget {
    accounts: Vec<Account>,
    transactions: Vec<TransactionRecord>,
    account_fetches: usize,
    transaction_fetches: usize,
}

impl TestBudget {
    pub(crate) fn new(accounts: Vec<Account>, transactions: Vec<TransactionRecord>) -> Self {
        Self {
            accounts,
            transactions,
            ..Default::default()
        }
    }

    /// Create a `TestBudget` from the seed data in this module.
    pub(crate) fn seeded() -> Result<Self> {
        let accounts =
            serde_json::from_str(ACCOUNT_DATA).context("Invalid seed account data")?;
        let transactions =
            serde_json::from_str(TRANSACTION_DATA).context("Invalid seed transaction data")?;
        Ok(Self::new(accounts, transactions))
    }

    #[cfg(test)]
    pub(crate) fn account_fetches(&self) -> usize {
        self.account_fetches
    }

    #[cfg(test)]
    pub(crate) fn transaction_fetches(&self) -> usize {
        self.transaction_fetches
    }
}

#[async_trait::async_trait]
impl Budget for TestBudget {
    async fn accounts(&mut self) -> Result<Vec<Account>> {
        self.account_fetches += 1;
        Ok(self.accounts.clone())
    }

    async fn transactions(&mut self) -> Result<Vec<TransactionRecord>> {
        self.transaction_fetches += 1;
        Ok(self.transactions.clone())
    }
}

/// Seed account data, in the shape the YNAB API returns it.
const ACCOUNT_DATA: &str = r#"[
    {"id": "acct-cc-sapphire", "name": "Sapphire Preferred", "type": "creditCard", "closed": false, "cleared_balance": -152340},
    {"id": "acct-cc-gold", "name": "Gold Card", "type": "creditCard", "closed": false, "cleared_balance": -48005},
    {"id": "acct-cc-closed", "name": "Old Store Card", "type": "creditCard", "closed": true, "cleared_balance": 0},
    {"id": "acct-checking", "name": "Checking", "type": "checking", "closed": false, "cleared_balance": 2450000}
]"#;

/// Seed transaction data, in the shape the YNAB API returns it.
const TRANSACTION_DATA: &str = r#"[
    {"id": "tx-001", "account_id": "acct-cc-sapphire", "date": "2025-10-02", "amount": -87430, "cleared": "cleared", "deleted": false},
    {"id": "tx-002", "account_id": "acct-cc-sapphire", "date": "2025-10-19", "amount": -6750, "cleared": "cleared", "deleted": false},
    {"id": "tx-003", "account_id": "acct-cc-sapphire", "date": "2025-10-20", "amount": -52300, "cleared": "uncleared", "deleted": false},
    {"id": "tx-004", "account_id": "acct-cc-sapphire", "date": "2025-10-05", "amount": 100000, "cleared": "reconciled", "deleted": false},
    {"id": "tx-005", "account_id": "acct-cc-gold", "date": "2025-10-11", "amount": -14855, "cleared": "cleared", "deleted": false},
    {"id": "tx-006", "account_id": "acct-cc-gold", "date": "2025-10-14", "amount": -33150, "cleared": "cleared", "deleted": true},
    {"id": "tx-007", "account_id": "acct-cc-closed", "date": "2024-01-09", "amount": -9990, "cleared": "reconciled", "deleted": false},
    {"id": "tx-008", "account_id": "acct-checking", "date": "2025-10-16", "amount": -142670, "cleared": "cleared", "deleted": false}
]"#;
