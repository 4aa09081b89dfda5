//! The two external services this program talks to: the YNAB budget it reads from and the Google
//! sheet it writes to. Each is hidden behind a small trait so the rest of the program can run
//! against in-memory implementations.

mod budget_test_client;
mod google_sheet;
mod sheet_test_client;
mod token;
mod ynab;

use crate::model::{Account, Cell, Grid, TransactionRecord};
use crate::{Config, Result};
use google_sheet::GoogleSheet;
use tracing::debug;
use ynab::YnabBudget;

pub(crate) use budget_test_client::TestBudget;
pub(crate) use sheet_test_client::TestSheet;

/// OAuth scopes required to read and write spreadsheet values.
const SHEETS_SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

/// When this environment variable is set and non-empty, both services are replaced with seeded
/// in-memory implementations.
const TEST_MODE_ENV: &str = "YNAB_SHEET_SYNC_IN_TEST_MODE";

/// The source of budget data.
#[async_trait::async_trait]
pub trait Budget {
    /// Lists every account in the budget.
    async fn accounts(&mut self) -> Result<Vec<Account>>;

    /// Lists every transaction in the budget.
    async fn transactions(&mut self) -> Result<Vec<TransactionRecord>>;
}

/// The worksheet that balances and spending are written to.
#[async_trait::async_trait]
pub trait Sheet {
    /// Reads the values of every populated cell in the worksheet.
    async fn get(&mut self) -> Result<Grid>;

    /// Overwrites the value of a single cell. The value is interpreted the way it would be if a
    /// user typed it, so numbers become numbers.
    async fn update_cell(&mut self, cell: Cell, value: &str) -> Result<()>;
}

/// Selects whether the real services or in-memory stand-ins are used.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Talk to YNAB and Google Sheets.
    #[default]
    Live,
    /// Use seeded in-memory data for both services.
    Testing,
}

impl Mode {
    /// Returns `Mode::Testing` if the test mode environment variable is set to a non-empty value.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Testing,
            _ => Mode::Live,
        }
    }
}

/// Creates the budget data source for `mode`.
pub(crate) fn budget(config: &Config, mode: Mode) -> Result<Box<dyn Budget + Send>> {
    debug!("Creating budget client in {mode:?} mode");
    Ok(match mode {
        Mode::Live => Box::new(YnabBudget::new(config)?),
        Mode::Testing => Box::new(TestBudget::seeded()?),
    })
}

/// Creates the worksheet client for `mode`. In live mode this obtains a service account token.
pub(crate) async fn sheet(config: &Config, mode: Mode) -> Result<Box<dyn Sheet + Send>> {
    debug!("Creating sheet client in {mode:?} mode");
    Ok(match mode {
        Mode::Live => Box::new(GoogleSheet::new(config).await?),
        Mode::Testing => Box::new(TestSheet::seeded()?),
    })
}
