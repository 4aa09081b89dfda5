//! Run configuration.
//!
//! Everything the program needs to know is read once at startup, from command line arguments or
//! their environment variable equivalents, and validated here before any network call is made.

use crate::args::{Args, Secret};
use crate::Result;
use anyhow::{bail, Context};
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use url::Url;

/// The YNAB API base URL used when none is configured.
pub(crate) const DEFAULT_YNAB_URL: &str = "https://api.ynab.com/v1/";

/// The `Config` object holds the validated settings for a sync run: which YNAB budget to read,
/// which spreadsheet to write, and how to authenticate with each service.
#[derive(Clone)]
pub struct Config {
    ynab_key: Secret,
    budget_id: String,
    ynab_url: Url,
    spreadsheet_id: String,
    worksheet: Option<String>,
    credentials_path: PathBuf,
}

impl Config {
    /// Creates a `Config` that uses the default YNAB URL and the first worksheet.
    ///
    /// # Arguments
    /// - `ynab_key` - A YNAB personal access token
    /// - `budget_id` - The YNAB budget to read
    /// - `sheet` - The spreadsheet id, or the full URL of the spreadsheet
    /// - `credentials_path` - The Google service account key file
    pub fn new(
        ynab_key: impl Into<String>,
        budget_id: impl Into<String>,
        sheet: &str,
        credentials_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let ynab_key = ynab_key.into();
        if ynab_key.trim().is_empty() {
            bail!("A YNAB access token is required");
        }

        let budget_id = budget_id.into();
        if budget_id.trim().is_empty() {
            bail!("A YNAB budget id is required");
        }

        let spreadsheet_id = extract_spreadsheet_id(sheet.trim())?;
        if spreadsheet_id.is_empty() {
            bail!("A Google spreadsheet id is required");
        }

        Ok(Self {
            ynab_key: Secret::from(ynab_key),
            budget_id,
            ynab_url: parse_base_url(DEFAULT_YNAB_URL)?,
            spreadsheet_id: spreadsheet_id.to_string(),
            worksheet: None,
            credentials_path: credentials_path.into(),
        })
    }

    /// Builds and validates a `Config` from parsed command line arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        let ynab = args.ynab();
        let google = args.google();
        let config = Self::new(
            ynab.ynab_key().expose(),
            ynab.budget_id(),
            google.sheet_id(),
            google.credentials(),
        )?
        .with_ynab_url(ynab.ynab_url())?;

        Ok(match google.worksheet() {
            Some(worksheet) => config.with_worksheet(worksheet)?,
            None => config,
        })
    }

    /// Selects a worksheet by name instead of the first one.
    pub fn with_worksheet(mut self, worksheet: impl Into<String>) -> Result<Self> {
        let worksheet = worksheet.into();
        if worksheet.trim().is_empty() {
            bail!("The worksheet name cannot be empty");
        }
        self.worksheet = Some(worksheet);
        Ok(self)
    }

    /// Points the YNAB client at a different base URL.
    pub fn with_ynab_url(mut self, url: &str) -> Result<Self> {
        self.ynab_url = parse_base_url(url)?;
        Ok(self)
    }

    pub(crate) fn ynab_key(&self) -> &str {
        self.ynab_key.expose()
    }

    pub fn budget_id(&self) -> &str {
        &self.budget_id
    }

    pub fn ynab_url(&self) -> &Url {
        &self.ynab_url
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn worksheet(&self) -> Option<&str> {
        self.worksheet.as_deref()
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("ynab_key", &self.ynab_key)
            .field("budget_id", &self.budget_id)
            .field("ynab_url", &self.ynab_url.as_str())
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet", &self.worksheet)
            .field("credentials_path", &self.credentials_path)
            .finish()
    }
}

/// Parses a base URL, adding the trailing slash that `Url::join` needs to keep the last segment.
fn parse_base_url(url: &str) -> Result<Url> {
    let url = url.trim();
    let with_slash = if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    };
    Url::parse(&with_slash).with_context(|| format!("Invalid YNAB API URL: {url}"))
}

/// Extracts the spreadsheet ID from a Google Sheets URL. Anything that does not look like a URL is
/// taken to be the ID itself.
///
/// # Arguments
/// * `sheet` - The spreadsheet ID, or a Google Sheets URL
///   (e.g., "https://docs.google.com/spreadsheets/d/SPREADSHEET_ID/...")
fn extract_spreadsheet_id(sheet: &str) -> Result<&str> {
    if !sheet.contains('/') {
        return Ok(sheet);
    }

    // URL format: https://docs.google.com/spreadsheets/d/SPREADSHEET_ID/...
    // or: https://docs.google.com/spreadsheets/d/SPREADSHEET_ID?foo=bar
    let parts: Vec<&str> = sheet.split('/').collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == "d" && i + 1 < parts.len() {
            // Extract the ID and remove any query parameters or fragments
            let id_part = parts[i + 1];
            let id = id_part
                .split(['?', '#'])
                .next()
                .unwrap_or(id_part);
            return Ok(id);
        }
    }
    Err(anyhow::anyhow!(
        "Invalid Google Sheets URL format. Expected: https://docs.google.com/spreadsheets/d/SPREADSHEET_ID"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Common, GoogleArgs, YnabArgs};
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_config_new() {
        let config = Config::new("key", "budget-1", "sheet-1", "credentials.json").unwrap();
        assert_eq!(config.ynab_key(), "key");
        assert_eq!(config.budget_id(), "budget-1");
        assert_eq!(config.spreadsheet_id(), "sheet-1");
        assert_eq!(config.worksheet(), None);
        assert_eq!(config.ynab_url().as_str(), DEFAULT_YNAB_URL);
        assert_eq!(config.credentials_path(), Path::new("credentials.json"));
    }

    #[test]
    fn test_config_from_args() {
        let args = Args::new(
            Common::new(LevelFilter::INFO),
            YnabArgs::new("key", "budget-1"),
            GoogleArgs::new(
                "https://docs.google.com/spreadsheets/d/7KpXm2RfZwNJgs84QhVYno5DU6iM9Wlr3bCzAv1txRpL/edit#gid=0",
                "/etc/sync/credentials.json",
            )
            .with_worksheet("Cards"),
        );
        let config = Config::from_args(&args).unwrap();
        assert_eq!(
            config.spreadsheet_id(),
            "7KpXm2RfZwNJgs84QhVYno5DU6iM9Wlr3bCzAv1txRpL"
        );
        assert_eq!(config.worksheet(), Some("Cards"));
        assert_eq!(
            config.credentials_path(),
            Path::new("/etc/sync/credentials.json")
        );
    }

    #[test]
    fn test_config_requires_values() {
        assert!(Config::new("", "b", "s", "c.json").is_err());
        assert!(Config::new("k", "  ", "s", "c.json").is_err());
        assert!(Config::new("k", "b", "", "c.json").is_err());
        let config = Config::new("k", "b", "s", "c.json").unwrap();
        assert!(config.with_worksheet("").is_err());
    }

    #[test]
    fn test_config_ynab_url_gets_trailing_slash() {
        let config = Config::new("k", "b", "s", "c.json")
            .unwrap()
            .with_ynab_url("http://localhost:8080/v1")
            .unwrap();
        assert_eq!(config.ynab_url().as_str(), "http://localhost:8080/v1/");
    }

    #[test]
    fn test_config_invalid_ynab_url() {
        let config = Config::new("k", "b", "s", "c.json").unwrap();
        assert!(config.with_ynab_url("not a url").is_err());
    }

    #[test]
    fn test_config_debug_hides_key() {
        let config = Config::new("super-secret", "b", "s", "c.json").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_extract_spreadsheet_id() {
        assert_eq!(extract_spreadsheet_id("abc123").unwrap(), "abc123");
        assert_eq!(
            extract_spreadsheet_id("https://docs.google.com/spreadsheets/d/abc123/edit").unwrap(),
            "abc123"
        );
        assert_eq!(
            extract_spreadsheet_id("https://docs.google.com/spreadsheets/d/abc123?usp=sharing")
                .unwrap(),
            "abc123"
        );
        assert!(extract_spreadsheet_id("https://example.com/spreadsheets/abc123").is_err());
    }
}
