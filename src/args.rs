//! These structs provide the CLI interface for the ynab-sheet-sync program.

use clap::Parser;
use std::convert::Infallible;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// ynab-sheet-sync: Copies credit card balances and spending from YNAB into a Google sheet.
///
/// Each run reads every open credit card account in a YNAB budget and writes three values for
/// each card into a worksheet: the cleared balance, the date of the most recent charge, and the
/// total of all cleared charges. The worksheet needs header cells reading "Balance",
/// "Last Charge" and "Total Spend", and a cell holding each card's YNAB account id. Values are
/// written where an account id's row meets a header's column.
///
/// Google access uses a service account. Download its JSON key and share the spreadsheet with the
/// service account's email address.
///
/// This is meant to be run on a schedule. Trailing positional arguments, such as the event and
/// context passed by a scheduled function runner, are accepted and ignored.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[clap(flatten)]
    ynab: YnabArgs,

    #[clap(flatten)]
    google: GoogleArgs,

    /// Ignored trigger arguments (event, context).
    #[arg(hide = true, num_args = 0..=2)]
    trigger: Vec<String>,
}

impl Args {
    pub fn new(common: Common, ynab: YnabArgs, google: GoogleArgs) -> Self {
        Self {
            common,
            ynab,
            google,
            trigger: Vec::new(),
        }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn ynab(&self) -> &YnabArgs {
        &self.ynab
    }

    pub fn google(&self) -> &GoogleArgs {
        &self.google
    }

    pub fn trigger(&self) -> &[String] {
        &self.trigger
    }
}

/// Arguments that control the program rather than what it syncs.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Common {
    pub fn new(log_level: LevelFilter) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

/// Where to read budget data from.
#[derive(Debug, Parser, Clone)]
pub struct YnabArgs {
    /// A YNAB personal access token.
    #[arg(long, env = "YNAB_KEY", hide_env_values = true)]
    ynab_key: Secret,

    /// The id of the YNAB budget to read. `last-used` selects the most recently used budget.
    #[arg(long, env = "BUDGET_ID")]
    budget_id: String,

    /// The base URL of the YNAB API.
    #[arg(long, env = "YNAB_API_URL", default_value = crate::config::DEFAULT_YNAB_URL)]
    ynab_url: String,
}

impl YnabArgs {
    pub fn new(ynab_key: impl Into<String>, budget_id: impl Into<String>) -> Self {
        Self {
            ynab_key: Secret::from(ynab_key.into()),
            budget_id: budget_id.into(),
            ynab_url: crate::config::DEFAULT_YNAB_URL.to_string(),
        }
    }

    pub fn ynab_key(&self) -> &Secret {
        &self.ynab_key
    }

    pub fn budget_id(&self) -> &str {
        &self.budget_id
    }

    pub fn ynab_url(&self) -> &str {
        &self.ynab_url
    }
}

/// Where to write the results.
#[derive(Debug, Parser, Clone)]
pub struct GoogleArgs {
    /// The id of the Google spreadsheet, or its full URL. The URL looks like this:
    /// https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX
    #[arg(long, env = "GOOGLE_SHEET_ID")]
    sheet_id: String,

    /// The name of the worksheet (tab) to update. Defaults to the first worksheet.
    #[arg(long, env = "GOOGLE_WORKSHEET")]
    worksheet: Option<String>,

    /// The path to the Google service account key file.
    #[arg(long, env = "GOOGLE_CREDENTIALS", default_value = "credentials.json")]
    credentials: PathBuf,
}

impl GoogleArgs {
    pub fn new(sheet_id: impl Into<String>, credentials: impl Into<PathBuf>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            worksheet: None,
            credentials: credentials.into(),
        }
    }

    pub fn with_worksheet(mut self, worksheet: impl Into<String>) -> Self {
        self.worksheet = Some(worksheet.into());
        self
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    pub fn worksheet(&self) -> Option<&str> {
        self.worksheet.as_deref()
    }

    pub fn credentials(&self) -> &Path {
        &self.credentials
    }
}

/// A string that must not show up in logs. `Debug` prints a placeholder.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for Secret {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
