//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{FloorLayoutResponse, FloorSummary, TableLayoutUpdate, TableRecord};
use shared::util::collect_valid;

use crate::{ClientConfig, ClientError, ClientResult, FloorApi, FloorEndpoints};

/// HTTP client for the floor plan endpoints
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    endpoints: FloorEndpoints,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let mut request = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let mut request = self.client.put(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::status_error(status, text));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }

    fn status_error(status: StatusCode, text: String) -> ClientError {
        // Prefer the envelope's code/message when the body carries one
        if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
            && let Err(err) = envelope.into_result()
        {
            return ClientError::Api(err);
        }
        match ErrorCode::from_http_status(status) {
            ErrorCode::NotAuthenticated => ClientError::Unauthorized,
            ErrorCode::PermissionDenied => ClientError::Forbidden(text),
            ErrorCode::NotFound => ClientError::NotFound(text),
            ErrorCode::ValidationFailed => ClientError::Validation(text),
            ErrorCode::InternalError | ErrorCode::Success => ClientError::Internal(text),
            code => ClientError::Api(AppError::with_message(code, text)),
        }
    }

    /// Unwrap the `{code, message, data}` envelope
    fn unwrap_data<T>(response: ApiResponse<T>, what: &str) -> ClientResult<T> {
        response
            .into_result()?
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
    }

    /// Keep the list entries that decode, logging how many did not
    fn valid_records<T: DeserializeOwned>(values: Vec<serde_json::Value>, what: &str) -> Vec<T> {
        let (records, dropped) = collect_valid(values);
        if dropped > 0 {
            tracing::warn!(dropped, kept = records.len(), "Skipped unreadable {} records", what);
        }
        records
    }
}

#[async_trait]
impl FloorApi for HttpClient {
    async fn list_floors(&self) -> ClientResult<Vec<FloorSummary>> {
        let response = self
            .get::<ApiResponse<Vec<serde_json::Value>>>(&self.endpoints.floors)
            .await?;
        Ok(Self::valid_records(Self::unwrap_data(response, "floor list")?, "floor"))
    }

    async fn get_floor_layout(&self, floor_id: &str) -> ClientResult<FloorLayoutResponse> {
        let response = self
            .get::<ApiResponse<FloorLayoutResponse>>(&self.endpoints.floor_layout(floor_id))
            .await?;
        Self::unwrap_data(response, "floor layout")
    }

    async fn list_all_tables(&self) -> ClientResult<Vec<TableRecord>> {
        let response = self
            .get::<ApiResponse<Vec<serde_json::Value>>>(&self.endpoints.tables)
            .await?;
        Ok(Self::valid_records(Self::unwrap_data(response, "table list")?, "table"))
    }

    async fn save_table_layout(
        &self,
        table_id: &str,
        update: &TableLayoutUpdate,
    ) -> ClientResult<()> {
        let response = self
            .put::<ApiResponse<serde_json::Value>, _>(&self.endpoints.table_layout(table_id), update)
            .await?;
        response.into_result()?;
        tracing::debug!(table_id, "Table layout saved");
        Ok(())
    }
}
