use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::shared::errors::{AppError, QuoteError};
use crate::shared::types::PairId;
use super::QuoteApiClient;

/// Public sandbox endpoint of the Uphold ticker API
pub const DEFAULT_BASE_URL: &str = "https://api-sandbox.uphold.com";

/// Ticker response body. Only `ask` is used; the service sends it as a string
/// but numbers are accepted as well.
#[derive(Debug, Deserialize)]
struct TickerResponse {
    ask: Option<AskValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AskValue {
    Text(String),
    Number(f64),
}

/// Uphold ticker API client
pub struct UpholdQuoteClient {
    http_client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl UpholdQuoteClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    pub fn ticker_url(&self, pair: &PairId) -> String {
        format!("{}/v0/ticker/{}", self.base_url, pair)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QuoteApiClient for UpholdQuoteClient {
    async fn get_ask(&self, pair: &PairId) -> Result<f64, QuoteError> {
        let url = self.ticker_url(pair);
        debug!("Fetching ticker from: {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if !response.status().is_success() {
            return Err(QuoteError::Status {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        parse_ask(&body)
    }

    fn name(&self) -> &str {
        "uphold"
    }
}

impl UpholdQuoteClient {
    fn map_reqwest_error(&self, err: reqwest::Error) -> QuoteError {
        if err.is_timeout() {
            QuoteError::Timeout(self.timeout_ms)
        } else {
            err.into()
        }
    }
}

/// Extract the ask price from a ticker body
pub fn parse_ask(body: &str) -> Result<f64, QuoteError> {
    let ticker: TickerResponse =
        serde_json::from_str(body).map_err(|e| QuoteError::Decode(e.to_string()))?;

    let ask = match ticker.ask.ok_or(QuoteError::MissingAsk)? {
        AskValue::Number(value) => value,
        AskValue::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| QuoteError::InvalidAsk(raw.clone()))?,
    };

    if !ask.is_finite() {
        return Err(QuoteError::InvalidAsk(ask.to_string()));
    }

    Ok(ask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_url() {
        let client = UpholdQuoteClient::new(DEFAULT_BASE_URL, 4000).unwrap();
        assert_eq!(
            client.ticker_url(&PairId::new("BTC-USD")),
            "https://api-sandbox.uphold.com/v0/ticker/BTC-USD"
        );

        let client = UpholdQuoteClient::new("http://localhost:8080/", 4000).unwrap();
        assert_eq!(
            client.ticker_url(&PairId::new("ETH-USD")),
            "http://localhost:8080/v0/ticker/ETH-USD"
        );
    }

    #[test]
    fn test_parse_ask_string_and_number() {
        let ask = parse_ask(r#"{"ask":"50000.01","bid":"49999.50","currency":"USD"}"#).unwrap();
        assert_eq!(ask, 50000.01);

        let ask = parse_ask(r#"{"ask":1875.5}"#).unwrap();
        assert_eq!(ask, 1875.5);
    }

    #[test]
    fn test_parse_ask_failures() {
        assert!(matches!(parse_ask(r#"{"bid":"1.0"}"#), Err(QuoteError::MissingAsk)));
        assert!(matches!(parse_ask(r#"{"ask":null}"#), Err(QuoteError::MissingAsk)));
        assert!(matches!(parse_ask(r#"{"ask":"n/a"}"#), Err(QuoteError::InvalidAsk(_))));
        assert!(matches!(parse_ask(r#"{"ask":"NaN"}"#), Err(QuoteError::InvalidAsk(_))));
        assert!(matches!(parse_ask(r#"{"ask":true}"#), Err(QuoteError::Decode(_))));
        assert!(matches!(parse_ask("<html>busy</html>"), Err(QuoteError::Decode(_))));
    }

    /// Serves one canned HTTP response on a local port and returns its base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_get_ask_success() {
        let base_url = serve_once("200 OK", r#"{"ask":"50000.02","bid":"49999.90"}"#).await;
        let client = UpholdQuoteClient::new(base_url, 2000).unwrap();

        let ask = client.get_ask(&PairId::new("BTC-USD")).await.unwrap();
        assert_eq!(ask, 50000.02);
    }

    #[tokio::test]
    async fn test_get_ask_non_success_status() {
        let base_url = serve_once("503 Service Unavailable", r#"{"error":"down"}"#).await;
        let client = UpholdQuoteClient::new(base_url, 2000).unwrap();

        let result = client.get_ask(&PairId::new("BTC-USD")).await;
        assert!(matches!(result, Err(QuoteError::Status { status: 503 })));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is closed in CI containers
        let client = UpholdQuoteClient::new("http://127.0.0.1:9", 1000).unwrap();
        let result = client.get_ask(&PairId::new("BTC-USD")).await;
        assert!(matches!(
            result,
            Err(QuoteError::Transport(_)) | Err(QuoteError::Timeout(_))
        ));
    }
}
