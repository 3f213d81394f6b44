use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One page of the transactionsByCustomer response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPage {
    pub page_content: Vec<TransactionRecord>,
    pub offset_identifier: Option<Value>,
}

/// A single transaction record; fields beyond the status block are ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub order_statuses: OrderStatuses,
}

/// Status block nested in every transaction record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatuses {
    pub risk_status: String,
}

impl TransactionPage {
    /// Continuation token for the next request, if the server sent one.
    ///
    /// The gateway emits the token as an arbitrary JSON scalar. It is reused
    /// stringified: strings as-is (no surrounding quotes), anything else via
    /// its JSON rendering. A missing or null token means this was the last
    /// page.
    pub fn next_offset(&self) -> Option<String> {
        match &self.offset_identifier {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Sort order accepted by the transactionsByCustomer endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    OldestFirst,
    NewestFirst,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::OldestFirst => "OLDEST_FIRST",
            SortOrder::NewestFirst => "NEWEST_FIRST",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OLDEST_FIRST" => Ok(SortOrder::OldestFirst),
            "NEWEST_FIRST" => Ok(SortOrder::NewestFirst),
            other => Err(format!(
                "expected OLDEST_FIRST or NEWEST_FIRST, got '{}'",
                other
            )),
        }
    }
}

/// Query for one page of a customer's transactions.
///
/// `offset_identifier` is unset for the first request; the pagination loop
/// installs each page's continuation token before the next request.
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub customer_public_id: String,
    pub risk_statuses: Vec<String>,
    pub sort_order: Option<SortOrder>,
    pub offset_identifier: Option<String>,
}

impl TransactionQuery {
    pub fn new(
        customer_public_id: impl Into<String>,
        risk_status_filter: &str,
        sort_order: Option<SortOrder>,
    ) -> Self {
        Self {
            customer_public_id: customer_public_id.into(),
            risk_statuses: split_status_filter(risk_status_filter),
            sort_order,
            offset_identifier: None,
        }
    }

    /// Build the query string in the order the gateway expects: api_key,
    /// customer_public_id, repeated risk_status, sort_order,
    /// offset_identifier. Values are passed through verbatim.
    pub fn to_query_string(&self, api_key: &str) -> String {
        let mut params = Vec::with_capacity(4 + self.risk_statuses.len());
        params.push(format!("api_key={}", api_key));
        params.push(format!("customer_public_id={}", self.customer_public_id));
        for status in &self.risk_statuses {
            params.push(format!("risk_status={}", status));
        }
        if let Some(order) = self.sort_order {
            params.push(format!("sort_order={}", order.as_param()));
        }
        if let Some(offset) = &self.offset_identifier {
            params.push(format!("offset_identifier={}", offset));
        }
        params.join("&")
    }
}

/// Split a comma separated `--risk_statuses` value into filter entries.
/// Empty segments and repeats are dropped, input order is preserved.
pub fn split_status_filter(raw: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for entry in raw.split(',') {
        if entry.is_empty() || entries.iter().any(|e| e == entry) {
            continue;
        }
        entries.push(entry.to_string());
    }
    entries
}

/// Comprehensive error type for gateway operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_drops_empty_segments() {
        assert_eq!(split_status_filter("A,,B"), vec!["A", "B"]);
        assert_eq!(split_status_filter(",FAILED,"), vec!["FAILED"]);
    }

    #[test]
    fn test_status_filter_empty_input_yields_no_entries() {
        assert!(split_status_filter("").is_empty());
        assert!(split_status_filter(",,").is_empty());
    }

    #[test]
    fn test_status_filter_drops_duplicates_keeps_order() {
        assert_eq!(
            split_status_filter("FAILED,SUCCESS,FAILED"),
            vec!["FAILED", "SUCCESS"]
        );
    }

    #[test]
    fn test_query_string_fixed_param_order() {
        let mut query = TransactionQuery::new(
            "cust-1",
            "FAILED,SUCCESS",
            Some(SortOrder::NewestFirst),
        );
        query.offset_identifier = Some("tok".to_string());

        assert_eq!(
            query.to_query_string("k"),
            "api_key=k&customer_public_id=cust-1&risk_status=FAILED\
             &risk_status=SUCCESS&sort_order=NEWEST_FIRST&offset_identifier=tok"
        );
    }

    #[test]
    fn test_query_string_first_call_omits_optional_params() {
        let query = TransactionQuery::new("cust-1", "", None);
        let qs = query.to_query_string("k");

        assert_eq!(qs, "api_key=k&customer_public_id=cust-1");
        assert!(!qs.contains("risk_status"));
        assert!(!qs.contains("sort_order"));
        assert!(!qs.contains("offset_identifier"));
        assert!(!qs.ends_with('&'));
    }

    #[test]
    fn test_offset_token_stringified_for_reuse() {
        let page: TransactionPage =
            serde_json::from_str(r#"{"page_content": [], "offset_identifier": "abc123"}"#).unwrap();
        assert_eq!(page.next_offset(), Some("abc123".to_string()));

        let page: TransactionPage =
            serde_json::from_str(r#"{"page_content": [], "offset_identifier": 42}"#).unwrap();
        assert_eq!(page.next_offset(), Some("42".to_string()));
    }

    #[test]
    fn test_missing_or_null_offset_token_means_last_page() {
        let page: TransactionPage = serde_json::from_str(r#"{"page_content": []}"#).unwrap();
        assert_eq!(page.next_offset(), None);

        let page: TransactionPage =
            serde_json::from_str(r#"{"page_content": [], "offset_identifier": null}"#).unwrap();
        assert_eq!(page.next_offset(), None);
    }

    #[test]
    fn test_page_decode_requires_page_content() {
        let result = serde_json::from_str::<TransactionPage>("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_record_decode_requires_nested_status() {
        let result = serde_json::from_str::<TransactionPage>(
            r#"{"page_content": [{"amount": 12}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_record_decode_ignores_unknown_fields() {
        let page: TransactionPage = serde_json::from_str(
            r#"{
                "page_content": [
                    {
                        "transaction_public_id": "t-1",
                        "amount": 12,
                        "order_statuses": {"risk_status": "SUCCESS", "fulfillment_status": "SHIPPED"}
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(page.page_content.len(), 1);
        assert_eq!(page.page_content[0].order_statuses.risk_status, "SUCCESS");
    }

    #[test]
    fn test_sort_order_parses_exact_values_only() {
        assert_eq!("OLDEST_FIRST".parse(), Ok(SortOrder::OldestFirst));
        assert_eq!("NEWEST_FIRST".parse(), Ok(SortOrder::NewestFirst));
        assert!("newest_first".parse::<SortOrder>().is_err());
    }
}
