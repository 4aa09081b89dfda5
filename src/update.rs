//! The three procedures that write credit card figures into the sheet.
//!
//! Each procedure reads the worksheet once, finds the column whose header holds its label, then for
//! every card finds the row holding the card's account id and writes one cell. A missing label or
//! account id fails the procedure; cells already written stay written.

use crate::aggregate::fetch_credit_card_account_ids;
use crate::api::{Budget, Sheet};
use crate::model::{format_amount, Cell, Grid, GroupedTransactions, Milliunits, Transaction};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, trace};

/// Header of the column that receives each card's cleared balance.
pub const BALANCE: &str = "Balance";

/// Header of the column that receives the date of each card's latest transaction.
pub const LAST_CHARGE: &str = "Last Charge";

/// Header of the column that receives each card's total cleared spending.
pub const TOTAL_SPEND: &str = "Total Spend";

/// How last charge dates are written, e.g. `05 Mar 2024`.
const LAST_CHARGE_FORMAT: &str = "%d %b %Y";

/// A record of one value written to the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellUpdate {
    pub account_id: String,
    pub column: &'static str,
    pub cell: Cell,
    pub value: String,
}

/// Writes the cleared balance of every open credit card account.
///
/// The account list is fetched here again rather than shared with the transaction aggregation.
pub async fn update_balance(
    budget: &mut (dyn Budget + Send),
    sheet: &mut (dyn Sheet + Send),
) -> Result<Vec<CellUpdate>> {
    let credit_card_ids = fetch_credit_card_account_ids(budget).await?;
    let accounts = budget.accounts().await?;
    let credit_card_accounts = accounts
        .into_iter()
        .filter(|account| credit_card_ids.contains(&account.id) && !account.closed);

    let grid = sheet.get().await?;
    let column = find_column(&grid, BALANCE)?;

    let mut updates = Vec::new();
    for account in credit_card_accounts {
        let balance = format_amount(account.cleared_balance).to_string();
        info!("Updating balance for account {}: {balance}", account.id);
        updates.push(write(sheet, &grid, BALANCE, column, &account.id, balance).await?);
    }
    Ok(updates)
}

/// Writes the date of the most recent transaction of every card.
pub async fn update_last_charge(
    sheet: &mut (dyn Sheet + Send),
    transactions_by_account: &GroupedTransactions,
) -> Result<Vec<CellUpdate>> {
    let grid = sheet.get().await?;
    let column = find_column(&grid, LAST_CHARGE)?;

    let mut updates = Vec::new();
    for (account_id, transactions) in transactions_by_account {
        let Some(latest) = last_charge(transactions) else {
            continue;
        };
        let latest = format_date(latest);
        info!("Updating card {account_id} latest charge: {latest}");
        updates.push(write(sheet, &grid, LAST_CHARGE, column, account_id, latest).await?);
    }
    Ok(updates)
}

/// Writes the total of the cleared charges of every card.
pub async fn update_total_spend(
    sheet: &mut (dyn Sheet + Send),
    transactions_by_account: &GroupedTransactions,
) -> Result<Vec<CellUpdate>> {
    let grid = sheet.get().await?;
    let column = find_column(&grid, TOTAL_SPEND)?;

    let mut updates = Vec::new();
    for (account_id, transactions) in transactions_by_account {
        let spend = total_spend(transactions)
            .with_context(|| format!("Unable to total the spending of card {account_id}"))?;
        let spend = format_amount(spend).to_string();
        info!("Updating card {account_id} total spend: {spend}");
        updates.push(write(sheet, &grid, TOTAL_SPEND, column, account_id, spend).await?);
    }
    Ok(updates)
}

/// The date of the latest transaction. When several share the latest date, the last one wins.
pub fn last_charge(transactions: &[Transaction]) -> Option<NaiveDate> {
    transactions
        .iter()
        .max_by_key(|transaction| transaction.date)
        .map(|transaction| transaction.date)
}

/// The sum of every cleared, non-deleted charge. Refunds, payments, uncleared, reconciled and
/// deleted transactions are left out. Fails if the sum overflows.
pub fn total_spend(transactions: &[Transaction]) -> Result<Milliunits> {
    transactions
        .iter()
        .filter(|transaction| {
            let counted = transaction.is_cleared_charge();
            if !counted {
                trace!(
                    "Not counting transaction {} ({}, {}, deleted: {})",
                    transaction.id,
                    transaction.amount,
                    transaction.cleared,
                    transaction.deleted
                );
            }
            counted
        })
        .try_fold(Milliunits::default(), |total, transaction| {
            total
                .checked_add(transaction.amount)
                .with_context(|| format!("Total spend overflowed at transaction {}", transaction.id))
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(LAST_CHARGE_FORMAT).to_string()
}

fn find_column(grid: &Grid, label: &str) -> Result<usize> {
    grid.find(label)
        .map(|cell| cell.col())
        .with_context(|| format!("The sheet has no '{label}' column"))
}

async fn write(
    sheet: &mut (dyn Sheet + Send),
    grid: &Grid,
    label: &'static str,
    column: usize,
    account_id: &str,
    value: String,
) -> Result<CellUpdate> {
    let row = grid
        .find(account_id)
        .with_context(|| format!("The sheet has no row for account {account_id}"))?
        .row();
    let cell = Cell::new(row, column);
    sheet.update_cell(cell, &value).await?;
    Ok(CellUpdate {
        account_id: account_id.to_string(),
        column: label,
        cell,
        value,
    })
}
