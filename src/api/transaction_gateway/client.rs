use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ApiError, TransactionPage, TransactionQuery};

/// Source of transaction pages, one query per request.
///
/// The pagination loop only talks to this trait, so tests can drive it with
/// scripted pages instead of a live gateway.
#[async_trait]
pub trait TransactionPageSource {
    async fn fetch_page(&self, query: &TransactionQuery) -> Result<TransactionPage, ApiError>;
}

/// Transaction gateway client for pulling customer transaction history
pub struct TransactionGatewayClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl TransactionGatewayClient {
    const API_PATH: &'static str = "v1/transaction_gateway/cxcore/v2/transactionsByCustomer";

    /// Create a new gateway client for the given host
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url,
        }
    }

    fn endpoint_url(&self, query: &TransactionQuery) -> String {
        format!(
            "{}/{}?{}",
            self.base_url,
            Self::API_PATH,
            query.to_query_string(&self.api_key)
        )
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                // Try to parse JSON error
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .get("message")
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    ApiError::BadRequest(message.to_string())
                } else {
                    ApiError::BadRequest(body_text)
                }
            }
            401 => ApiError::Unauthorized(body_text),
            403 => ApiError::Forbidden(body_text),
            404 => ApiError::NotFound(body_text),
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /v1/transaction_gateway/cxcore/v2/transactionsByCustomer
    ///
    /// Retrieves one page of transactions for a customer. The query carries
    /// the offset cursor; the first request leaves it unset.
    ///
    /// # Returns
    /// * `Ok(TransactionPage)` - Decoded page with records and an optional
    ///   continuation token
    /// * `Err(ApiError)` - Network, HTTP status, or decode error
    pub async fn get_transactions_page(
        &self,
        query: &TransactionQuery,
    ) -> Result<TransactionPage, ApiError> {
        let url = self.endpoint_url(query);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<TransactionPage>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl TransactionPageSource for TransactionGatewayClient {
    async fn fetch_page(&self, query: &TransactionQuery) -> Result<TransactionPage, ApiError> {
        self.get_transactions_page(query).await
    }
}
