//! Implements the `Budget` trait against the YNAB REST API.
//!
//! See https://api.ynab.com for the API reference. Every response wraps its payload in a `data`
//! object, and every error response carries an `error` object with a short name and a detail
//! message.

use crate::api::Budget;
use crate::model::{Account, TransactionRecord};
use crate::{Config, Result};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Talks to the YNAB API for a single budget, authenticating with a personal access token.
pub(super) struct YnabBudget {
    client: reqwest::Client,
    base_url: Url,
    budget_id: String,
    api_key: String,
}

impl YnabBudget {
    pub(super) fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create the HTTP client")?;
        Ok(Self {
            client,
            base_url: config.ynab_url().clone(),
            budget_id: config.budget_id().to_string(),
            api_key: config.ynab_key().to_string(),
        })
    }

    /// Sends a GET for `resource` of the budget and unwraps the `data` object of the response.
    async fn get<T>(&self, resource: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = budget_url(&self.base_url, &self.budget_id, resource)?;
        trace!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            bail!(
                "YNAB API request for {resource} failed with status {status}: {}",
                error_detail(&body)
            );
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse YNAB {resource} response"))?;
        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl Budget for YnabBudget {
    async fn accounts(&mut self) -> Result<Vec<Account>> {
        let data: AccountsData = self.get("accounts").await?;
        debug!("Received {} accounts from YNAB", data.accounts.len());
        Ok(data.accounts)
    }

    async fn transactions(&mut self) -> Result<Vec<TransactionRecord>> {
        let data: TransactionsData = self.get("transactions").await?;
        debug!("Received {} transactions from YNAB", data.transactions.len());
        Ok(data.transactions)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct AccountsData {
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct TransactionsData {
    transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    name: String,
    detail: String,
}

/// Builds `{base_url}budgets/{budget_id}/{resource}`. `base_url` must end with a slash.
fn budget_url(base_url: &Url, budget_id: &str, resource: &str) -> Result<Url> {
    base_url
        .join(&format!("budgets/{budget_id}/{resource}"))
        .with_context(|| format!("Unable to build a YNAB URL for budget '{budget_id}'"))
}

/// Pulls the name and detail out of a YNAB error body, falling back to the raw body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("{}: {}", envelope.error.name, envelope.error.detail),
        Err(_) => body.to_string(),
    }
}
