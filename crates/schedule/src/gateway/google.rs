use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{SheetGateway, Table};
use crate::StoreError;

pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/v4";

const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: u64 = 3600;
/// Renew the cached token this long before Google expires it.
const TOKEN_RENEW_MARGIN: Duration = Duration::from_secs(60);

/// The fields of a Google service-account JSON key we need.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_owned()
}

impl ServiceAccountKey {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Auth(format!("{}: {e}", path.display())))?;

        serde_json::from_str(&content)
            .map_err(|e| StoreError::Auth(format!("{}: {e}", path.display())))
    }
}

#[derive(Serialize)]
struct GrantClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<Vec<String>>,
}

struct AccessToken {
    value: String,
    renew_at: Instant,
}

/// Google Sheets v4 values API, authenticated as a service account.
pub struct GoogleSheetsGateway {
    http: reqwest::Client,
    api_base_url: String,
    spreadsheet_id: String,
    key: ServiceAccountKey,
    token: Mutex<Option<AccessToken>>,
}

impl GoogleSheetsGateway {
    pub fn new(
        spreadsheet_id: impl Into<String>,
        key: ServiceAccountKey,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_owned(),
            spreadsheet_id: spreadsheet_id.into(),
            key,
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, StoreError> {
        let mut token = self.token.lock().await;

        if let Some(cached) = token.as_ref().filter(|t| t.renew_at > Instant::now()) {
            return Ok(cached.value.clone());
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| StoreError::Auth(e.to_string()))?
            .as_secs();

        let claims = GrantClaims {
            iss: &self.key.client_email,
            scope: SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(e.to_string()))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| StoreError::Auth(e.to_string()))?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;

        let granted: TokenResponse = check_status(response)
            .await
            .map_err(|e| match e {
                StoreError::Http { body, .. } => StoreError::Auth(body),
                e => e,
            })?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let lifetime = Duration::from_secs(granted.expires_in.unwrap_or(TOKEN_LIFETIME_SECS));
        let renew_at = Instant::now() + lifetime.saturating_sub(TOKEN_RENEW_MARGIN);

        tracing::debug!(account = self.key.client_email, "sheet store access token granted");

        *token = Some(AccessToken {
            value: granted.access_token.clone(),
            renew_at,
        });

        Ok(granted.access_token)
    }

    /// Drops a token the API refused so the next call requests a fresh one.
    async fn forget_token_on_auth_error<T>(
        &self,
        result: Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        if let Err(StoreError::Auth(_)) = &result {
            *self.token.lock().await = None;
        }

        result
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}{}",
            self.api_base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(range),
            suffix
        )
    }

    async fn fetch(&self, range: &str) -> Result<Table, StoreError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(self.values_url(range, ""))
            .query(&[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "FORMATTED_VALUE"),
            ])
            .bearer_auth(token)
            .send()
            .await?;

        let values: ValueRange = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(Table::from_values(values.values))
    }

    fn batch_clear_url(&self) -> String {
        format!(
            "{}/spreadsheets/{}/values:batchClear",
            self.api_base_url,
            urlencoding::encode(&self.spreadsheet_id),
        )
    }

    /// Overwrites the worksheet from A1, then clears whatever lies below or
    /// right of the new extent. A failed update leaves the sheet untouched.
    /// Once the update lands the write counts as done, a failed tail clear
    /// only leaves stale cells past the table.
    async fn replace(&self, worksheet: &str, table: &Table) -> Result<(), StoreError> {
        let token = self.access_token().await?;
        let range = sheet_range(worksheet);
        let values = table.to_values();

        let response = self
            .http
            .put(self.values_url(&range, ""))
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(&token)
            .json(&ValueRangeBody {
                range: &range,
                major_dimension: "ROWS",
                values,
            })
            .send()
            .await?;
        check_status(response).await?;

        let response = self
            .http
            .post(self.batch_clear_url())
            .bearer_auth(&token)
            .json(&serde_json::json!({ "ranges": tail_ranges(worksheet, table) }))
            .send()
            .await;

        let cleared = match response {
            Ok(response) => check_status(response).await.map(drop),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = cleared {
            tracing::warn!(error = %e, "worksheet updated but tail clear failed");
        }

        Ok(())
    }
}

/// The rows below and the columns right of a written table.
fn tail_ranges(worksheet: &str, table: &Table) -> [String; 2] {
    let range = sheet_range(worksheet);
    let height = table.rows.len() + 1;
    let width = table
        .rows
        .iter()
        .map(Vec::len)
        .fold(table.columns.len(), usize::max);

    [
        format!("{range}!A{}:ZZZ", height + 1),
        format!("{range}!{}1:ZZZ", column_letters(width + 1)),
    ]
}

/// A1 column name of a 1-based column index.
fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push(b'A' + rem as u8);
        index = (index - 1) / 26;
    }
    letters.reverse();

    String::from_utf8(letters).unwrap_or_default()
}

/// A1 range covering a whole worksheet.
fn sheet_range(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Auth(body),
        StatusCode::TOO_MANY_REQUESTS => StoreError::RateLimited,
        status => StoreError::Http {
            status: status.as_u16(),
            body,
        },
    })
}

#[async_trait]
impl SheetGateway for GoogleSheetsGateway {
    #[tracing::instrument(skip(self))]
    async fn read(&self, worksheet: &str) -> Result<Table, StoreError> {
        let result = self.fetch(&sheet_range(worksheet)).await;
        let table = self.forget_token_on_auth_error(result).await?;

        tracing::debug!(rows = table.rows.len(), "worksheet read");

        Ok(table)
    }

    #[tracing::instrument(skip(self, table), fields(rows = table.rows.len()))]
    async fn write(&self, worksheet: &str, table: &Table) -> Result<(), StoreError> {
        let result = self.replace(worksheet, table).await;
        self.forget_token_on_auth_error(result).await?;

        tracing::info!("worksheet replaced");

        Ok(())
    }
}
