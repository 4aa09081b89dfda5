use crate::model::Milliunits;
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The date format YNAB uses for transaction dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction has cleared the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    Cleared,
    Uncleared,
    Reconciled,
}

serde_plain::derive_display_from_serialize!(ClearedStatus);

/// A transaction as reported by the YNAB API, with its date still in string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub account_id: String,
    pub date: String,
    pub amount: Milliunits,
    pub cleared: ClearedStatus,
    #[serde(default)]
    pub deleted: bool,
}

/// A transaction with a parsed date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: Milliunits,
    pub cleared: ClearedStatus,
    pub deleted: bool,
}

impl Transaction {
    /// True when the transaction is a cleared, non-deleted charge.
    pub fn is_cleared_charge(&self) -> bool {
        self.amount.is_negative() && !self.deleted && self.cleared == ClearedStatus::Cleared
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = anyhow::Error;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        let date = parse_date(&record.date)
            .with_context(|| format!("Transaction {} has an invalid date", record.id))?;
        Ok(Self {
            id: record.id,
            account_id: record.account_id,
            date,
            amount: record.amount,
            cleared: record.cleared,
            deleted: record.deleted,
        })
    }
}

/// Parses a `YYYY-MM-DD` date.
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("Unable to parse '{s}' as a {DATE_FORMAT} date"))
}
