use crate::model::Milliunits;
use serde::{Deserialize, Serialize};

/// The kind of account in a YNAB budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Checking,
    Savings,
    Cash,
    CreditCard,
    LineOfCredit,
    OtherAsset,
    OtherLiability,
    Mortgage,
    AutoLoan,
    StudentLoan,
    PersonalLoan,
    MedicalDebt,
    OtherDebt,
    /// Any account type this program does not know about.
    #[serde(other)]
    Other,
}

serde_plain::derive_display_from_serialize!(AccountType);

/// An account as reported by the YNAB API. Fields this program does not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub closed: bool,
    pub cleared_balance: Milliunits,
}

impl Account {
    /// True for credit card accounts that have not been closed.
    pub fn is_open_credit_card(&self) -> bool {
        self.account_type == AccountType::CreditCard && !self.closed
    }
}
