//! Runs one complete sync: aggregate the YNAB transactions, then update the last charge, total
//! spend and balance columns, in that order. Nothing is rolled back if a later step fails.

use crate::aggregate::collect_transactions_by_account;
use crate::api::{self, Budget, Mode, Sheet};
use crate::commands::Out;
use crate::update::{update_balance, update_last_charge, update_total_spend, CellUpdate};
use crate::{Config, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Everything a sync wrote to the sheet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// The number of credit card accounts that had transactions.
    pub cards_with_transactions: usize,
    /// Every cell written, in the order it was written.
    pub updates: Vec<CellUpdate>,
}

/// Creates the YNAB and Google clients for `mode` and runs a sync with them.
pub async fn sync(config: Config, mode: Mode) -> Result<Out<SyncReport>> {
    debug!("{config:?}");
    let mut budget = api::budget(&config, mode)?;
    let mut sheet = api::sheet(&config, mode).await?;

    let report = run(budget.as_mut(), sheet.as_mut()).await?;
    Ok(Out::new(
        format!(
            "Sync complete: wrote {} cells for budget {}",
            report.updates.len(),
            config.budget_id()
        ),
        report,
    ))
}

pub(crate) async fn run(
    budget: &mut (dyn Budget + Send),
    sheet: &mut (dyn Sheet + Send),
) -> Result<SyncReport> {
    info!("Fetching credit card transactions");
    let transactions_by_account = collect_transactions_by_account(budget).await?;

    let mut report = SyncReport {
        cards_with_transactions: transactions_by_account.len(),
        updates: Vec::new(),
    };

    report
        .updates
        .extend(update_last_charge(sheet, &transactions_by_account).await?);
    report
        .updates
        .extend(update_total_spend(sheet, &transactions_by_account).await?);
    report.updates.extend(update_balance(budget, sheet).await?);

    Ok(report)
}
