//! Reads credit card data out of the budget and groups it by account.

use crate::api::Budget;
use crate::model::{GroupedTransactions, Transaction};
use crate::Result;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Returns the ids of every credit card account in the budget that has not been closed.
pub async fn fetch_credit_card_account_ids(
    budget: &mut (dyn Budget + Send),
) -> Result<HashSet<String>> {
    let accounts = budget.accounts().await?;
    let ids: HashSet<String> = accounts
        .into_iter()
        .filter(|account| {
            let keep = account.is_open_credit_card();
            if !keep {
                trace!(
                    "Skipping account {} ({}, closed: {})",
                    account.id,
                    account.account_type,
                    account.closed
                );
            }
            keep
        })
        .map(|account| account.id)
        .collect();
    debug!("Found {} open credit card accounts", ids.len());
    Ok(ids)
}

/// Fetches every transaction in the budget, keeps those that belong to open credit card accounts,
/// parses their dates and groups them by account id. Within each group the transactions keep the
/// order the budget returned them in.
///
/// # Errors
/// Fails if either request fails, or if any kept transaction has a date that is not `YYYY-MM-DD`.
pub async fn collect_transactions_by_account(
    budget: &mut (dyn Budget + Send),
) -> Result<GroupedTransactions> {
    let credit_card_ids = fetch_credit_card_account_ids(budget).await?;
    let records = budget.transactions().await?;
    debug!("Received {} transactions", records.len());

    let mut grouped = GroupedTransactions::new();
    for record in records
        .into_iter()
        .filter(|record| credit_card_ids.contains(&record.account_id))
    {
        let transaction = Transaction::try_from(record)?;
        grouped
            .entry(transaction.account_id.clone())
            .or_default()
            .push(transaction);
    }

    debug!(
        "Grouped credit card transactions for {} accounts",
        grouped.len()
    );
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestBudget;
    use crate::model::{AccountType, ClearedStatus};
    use crate::test::{account, record};
    use chrono::NaiveDate;

    fn budget() -> TestBudget {
        TestBudget::new(
            vec![
                account("cc-open", AccountType::CreditCard, false, -1000),
                account("cc-closed", AccountType::CreditCard, true, 0),
                account("checking", AccountType::Checking, false, 5000),
                account("loc", AccountType::LineOfCredit, false, -200),
                account("cc-other", AccountType::CreditCard, false, 0),
            ],
            vec![
                record("t1", "cc-open", "2024-03-05", -100, ClearedStatus::Cleared),
                record("t2", "checking", "2024-03-06", -200, ClearedStatus::Cleared),
                record("t3", "cc-closed", "2024-03-07", -300, ClearedStatus::Cleared),
                record("t4", "cc-other", "2024-03-01", -400, ClearedStatus::Uncleared),
                record("t5", "cc-open", "2024-02-01", 500, ClearedStatus::Reconciled),
                record("t6", "unknown", "2024-02-02", -600, ClearedStatus::Cleared),
            ],
        )
    }

    #[tokio::test]
    async fn test_fetch_credit_card_account_ids() {
        let mut budget = budget();
        let ids = fetch_credit_card_account_ids(&mut budget).await.unwrap();
        let expected: HashSet<String> = ["cc-open", "cc-other"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(ids, expected);
        assert_eq!(budget.account_fetches(), 1);
    }

    #[tokio::test]
    async fn test_fetch_credit_card_account_ids_none() {
        let mut budget = TestBudget::new(
            vec![account("checking", AccountType::Checking, false, 0)],
            Vec::new(),
        );
        let ids = fetch_credit_card_account_ids(&mut budget).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_collect_keeps_only_open_credit_cards() {
        let mut budget = budget();
        let grouped = collect_transactions_by_account(&mut budget).await.unwrap();

        let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["cc-open", "cc-other"]);

        let ids: Vec<&str> = grouped["cc-open"].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t5"]);
        assert_eq!(grouped["cc-other"].len(), 1);
        assert_eq!(budget.transaction_fetches(), 1);
    }

    #[tokio::test]
    async fn test_collect_is_a_partition() {
        let mut budget = budget();
        let grouped = collect_transactions_by_account(&mut budget).await.unwrap();
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 3);
        for (account_id, transactions) in &grouped {
            assert!(transactions.iter().all(|t| &t.account_id == account_id));
        }
    }

    #[tokio::test]
    async fn test_collect_parses_dates() {
        let mut budget = budget();
        let grouped = collect_transactions_by_account(&mut budget).await.unwrap();
        assert_eq!(
            grouped["cc-open"][0].date,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }

    #[tokio::test]
    async fn test_collect_bad_date_fails() {
        let mut budget = TestBudget::new(
            vec![account("cc", AccountType::CreditCard, false, 0)],
            vec![record("t1", "cc", "5 March 2024", -1, ClearedStatus::Cleared)],
        );
        let err = collect_transactions_by_account(&mut budget)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("5 March 2024"));
    }

    #[tokio::test]
    async fn test_collect_ignores_bad_dates_of_other_accounts() {
        let mut budget = TestBudget::new(
            vec![
                account("cc", AccountType::CreditCard, false, 0),
                account("cash", AccountType::Cash, false, 0),
            ],
            vec![
                record("t1", "cc", "2024-03-05", -1, ClearedStatus::Cleared),
                record("t2", "cash", "not a date", -1, ClearedStatus::Cleared),
            ],
        );
        let grouped = collect_transactions_by_account(&mut budget).await.unwrap();
        assert_eq!(grouped.len(), 1);
    }
}
