//! Invoice backend HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use urlencoding::encode;

use crate::config::Config;
use crate::domain::entities::{
    AccountInfo, ConnectionStatus, ExportOptions, Invoice, InvoiceFilters, InvoiceId,
    InvoiceUpdate, SenderSummary, SyncOptions, SyncResponse,
};
use crate::domain::ports::InvoiceApi;
use crate::error::ApiError;

/// Implementation of the invoice backend client
#[derive(Clone)]
pub struct HttpInvoiceApi {
    http: Client,
    base_url: String,
    status_timeout: Duration,
    sync_timeout: Duration,
}

impl HttpInvoiceApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.api_base_url, config.dev_mode)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            status_timeout: config.status_timeout,
            sync_timeout: config.sync_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response, ApiError> {
        tracing::debug!("invoice api: {}", path);
        request.send().await.map_err(|e| {
            tracing::warn!("invoice api request to {} failed: {}", path, e);
            map_send_error(e)
        })
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::Deserialization(e.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(error_for_status(status.as_u16(), extract_detail(&body)))
        }
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(error_for_status(status.as_u16(), extract_detail(&body)))
        }
    }
}

#[async_trait]
impl InvoiceApi for HttpInvoiceApi {
    async fn status(&self) -> Result<ConnectionStatus, ApiError> {
        let path = "/auth/status";
        let request = self
            .http
            .get(self.api_url(path))
            .timeout(self.status_timeout);
        let response = self.send(request, path).await?;
        self.handle_response(response).await
    }

    async fn accounts(&self) -> Result<Vec<AccountInfo>, ApiError> {
        let path = "/auth/accounts";
        let response = self.send(self.http.get(self.api_url(path)), path).await?;
        self.handle_response(response).await
    }

    async fn remove_account(&self, user_id: i64) -> Result<(), ApiError> {
        let path = format!("/auth/accounts/{}", user_id);
        let response = self
            .send(self.http.delete(self.api_url(&path)), &path)
            .await?;
        self.handle_empty_response(response).await
    }

    async fn sync(&self, options: &SyncOptions) -> Result<SyncResponse, ApiError> {
        let path = "/invoices/sync";
        let request = self
            .http
            .post(self.api_url(path))
            .query(&options.to_query())
            .json(&serde_json::json!({}))
            .timeout(self.sync_timeout);
        let response = self.send(request, path).await?;
        self.handle_response(response).await
    }

    async fn list(&self, filters: &InvoiceFilters) -> Result<Vec<Invoice>, ApiError> {
        let path = "/invoices";
        let request = self.http.get(self.api_url(path)).query(&filters.to_query());
        let response = self.send(request, path).await?;
        self.handle_response(response).await
    }

    async fn get(&self, id: InvoiceId) -> Result<Invoice, ApiError> {
        let path = format!("/invoices/{}", id);
        let response = self.send(self.http.get(self.api_url(&path)), &path).await?;
        self.handle_response(response).await
    }

    async fn update(&self, id: InvoiceId, update: &InvoiceUpdate) -> Result<Invoice, ApiError> {
        let path = format!("/invoices/{}", id);
        let request = self.http.patch(self.api_url(&path)).json(update);
        let response = self.send(request, &path).await?;
        self.handle_response(response).await
    }

    async fn delete(&self, id: InvoiceId) -> Result<(), ApiError> {
        let path = format!("/invoices/{}", id);
        let response = self
            .send(self.http.delete(self.api_url(&path)), &path)
            .await?;
        self.handle_empty_response(response).await
    }

    async fn senders(&self) -> Result<Vec<SenderSummary>, ApiError> {
        let path = "/invoices/senders/list";
        let response = self.send(self.http.get(self.api_url(path)), path).await?;
        self.handle_response(response).await
    }

    fn export_url(&self, options: &ExportOptions) -> String {
        format!(
            "{}?{}",
            self.api_url("/export/zip"),
            encode_query(&options.to_query())
        )
    }
}

/// Trim the trailing slash and, outside dev mode, upgrade `http://` to `https://`
fn normalize_base_url(raw: &str, dev_mode: bool) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with("https://") {
        Ok(trimmed.to_string())
    } else if lower.starts_with("http://") {
        if dev_mode {
            Ok(trimmed.to_string())
        } else {
            Ok(format!("https://{}", &trimmed["http://".len()..]))
        }
    } else {
        Err(ApiError::InvalidBaseUrl(raw.to_string()))
    }
}

fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() {
        ApiError::Network(e.to_string())
    } else {
        ApiError::Request(e)
    }
}

/// Pull the backend's `detail` out of an error body.
///
/// Non-string details (validation errors) are kept as JSON; bodies that are
/// not JSON are returned as-is.
fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(detail) => detail.to_string(),
            None => body.to_string(),
        },
        _ => body.trim().to_string(),
    }
}

fn error_for_status(status: u16, message: String) -> ApiError {
    match status {
        401 | 403 => ApiError::Unauthorized(message),
        404 => ApiError::NotFound(message),
        500..=599 => {
            tracing::error!("invoice backend error {}: {}", status, message);
            ApiError::Server { status, message }
        }
        _ => ApiError::Api { status, message },
    }
}
