//! Implements the `Sheet` trait using the `sheets::Client` to interact with a Google sheet.

use crate::api::{token, Sheet};
use crate::model::{Cell, Grid};
use crate::{Config, Result};
use anyhow::Context;
use sheets::types::{
    BatchUpdateValuesRequest, DateTimeRenderOption, Dimension, ValueInputOption, ValueRange,
    ValueRenderOption,
};
use sheets::ClientError;
use tracing::trace;

/// All columns that are read when looking for labels and account ids.
const ALL_COLUMNS: &str = "A:ZZ";

/// Implements the `Sheet` trait using the `sheets::Client`. The client is authenticated once, with a
/// service account token, when it is created.
pub(super) struct GoogleSheet {
    spreadsheet_id: String,
    worksheet: Option<String>,
    client: sheets::Client,
}

impl GoogleSheet {
    pub(super) async fn new(config: &Config) -> Result<Self> {
        let token = token::service_account_token(config.credentials_path()).await?;

        // The sheets crate wants OAuth client details, but they are only needed to refresh a token,
        // which the service account flow does not use.
        let client = sheets::Client::new(
            String::new(), // client_id
            String::new(), // client_secret
            String::new(), // redirect_uri
            token.secret().to_string(),
            String::new(), // refresh_token
        );

        Ok(Self {
            spreadsheet_id: config.spreadsheet_id().to_string(),
            worksheet: config.worksheet().map(str::to_string),
            client,
        })
    }

    /// Qualifies an A1 range with the worksheet name, if one is configured. Without a worksheet
    /// name the API uses the first worksheet.
    fn range(&self, a1: &str) -> String {
        qualify_range(self.worksheet.as_deref(), a1)
    }
}

#[async_trait::async_trait]
impl Sheet for GoogleSheet {
    async fn get(&mut self) -> Result<Grid> {
        let range = self.range(ALL_COLUMNS);
        trace!("get for {range}");
        let response = self
            .client
            .spreadsheets()
            .values_get(
                &self.spreadsheet_id,
                &range,
                DateTimeRenderOption::FormattedString,
                Dimension::Rows,
                ValueRenderOption::FormattedValue,
            )
            .await
            .map_err(map_client_error)
            .with_context(|| format!("Failed to fetch sheet data for {range}"))?;
        Ok(Grid::new(response.body.values))
    }

    async fn update_cell(&mut self, cell: Cell, value: &str) -> Result<()> {
        let range = self.range(&cell.to_string());
        trace!("update_cell {range} = {value}");
        let request = BatchUpdateValuesRequest {
            data: vec![ValueRange {
                major_dimension: Some(Dimension::Rows),
                range: range.clone(),
                values: vec![vec![value.to_string()]],
            }],
            include_values_in_response: Some(false),
            response_date_time_render_option: None,
            response_value_render_option: None,
            value_input_option: Some(ValueInputOption::UserEntered),
        };

        self.client
            .spreadsheets()
            .values_batch_update(&self.spreadsheet_id, &request)
            .await
            .map_err(map_client_error)
            .with_context(|| format!("Failed to write '{value}' to {range}"))?;
        Ok(())
    }
}

fn qualify_range(worksheet: Option<&str>, a1: &str) -> String {
    match worksheet {
        Some(name) => format!("'{}'!{a1}", name.replace('\'', "''")),
        None => a1.to_string(),
    }
}

fn map_client_error(e: ClientError) -> anyhow::Error {
    let error_name = match &e {
        ClientError::EmptyRefreshToken => "EmptyRefreshToken".to_string(),
        ClientError::FromUtf8Error(inner) => format!("FromUtf8Error {inner}"),
        ClientError::UrlParserError(inner) => format!("UrlParserError {inner}"),
        ClientError::SerdeJsonError(inner) => format!("SerdeJsonError {inner}"),
        ClientError::ReqwestError(inner) => format!("ReqwestError {inner}"),
        ClientError::InvalidHeaderValue(inner) => format!("InvalidHeaderValue {inner}"),
        ClientError::ReqwestMiddleWareError(inner) => format!("ReqwestMiddleWareError {inner}"),
        ClientError::HttpError { .. } => "HttpError".to_string(),
        ClientError::Other(_) => "Other".to_string(),
    };
    anyhow::Error::new(e).context(error_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_range_first_worksheet() {
        assert_eq!(qualify_range(None, "C7"), "C7");
    }

    #[test]
    fn test_qualify_range_named_worksheet() {
        assert_eq!(qualify_range(Some("Cards"), "A:ZZ"), "'Cards'!A:ZZ");
        assert_eq!(qualify_range(Some("Bob's Cards"), "B2"), "'Bob''s Cards'!B2");
    }
}
