//! reqwest-backed implementation of the remote API

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::debug;

use super::TrackerApi;
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{NewRecord, Record, RecordId, RecordKind};

/// HTTP client for the expense service
///
/// One `reqwest::Client` is shared by every request so connections are pooled.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    /// Build a client rooted at `base_url` (which should end with `/`)
    pub fn new(base_url: Url, timeout: Duration) -> TrackerResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrackerError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Use a preconfigured `reqwest::Client`
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn from_settings(settings: &Settings) -> TrackerResult<Self> {
        Self::new(settings.parsed_base_url()?, settings.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint name against the base URL
    pub fn endpoint(&self, name: &str) -> TrackerResult<Url> {
        self.base_url
            .join(name)
            .map_err(|e| TrackerError::InvalidUrl(format!("{}{}: {}", self.base_url, name, e)))
    }

    /// URL for deleting one record; the id is percent-encoded as its own segment
    pub fn delete_url(&self, kind: RecordKind, id: &RecordId) -> TrackerResult<Url> {
        let mut url = self.endpoint(kind.delete_endpoint())?;
        url.path_segments_mut()
            .map_err(|_| TrackerError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .push(id.as_str());
        Ok(url)
    }
}

impl TrackerApi for HttpApi {
    async fn add(&self, kind: RecordKind, record: &NewRecord) -> TrackerResult<Value> {
        let url = self.endpoint(kind.add_endpoint())?;
        debug!(%url, title = %record.title, "adding {}", kind.as_str());

        let response = self.client.post(url).json(record).send().await?;
        read_echo(check_status(response).await?).await
    }

    async fn list(&self, kind: RecordKind) -> TrackerResult<Vec<Record>> {
        let url = self.endpoint(kind.list_endpoint())?;
        debug!(%url, "fetching {} records", kind.as_str());

        let response = check_status(self.client.get(url).send().await?).await?;
        let body = response.text().await?;
        let records: Vec<Record> = serde_json::from_str(&body).map_err(|e| {
            TrackerError::Json(format!("Failed to decode {} list: {}", kind.as_str(), e))
        })?;

        debug!(count = records.len(), "fetched {} records", kind.as_str());
        Ok(records)
    }

    async fn delete(&self, kind: RecordKind, id: &RecordId) -> TrackerResult<Value> {
        let url = self.delete_url(kind, id)?;
        debug!(%url, "deleting {}", kind.as_str());

        let response = self.client.delete(url).send().await?;
        read_echo(check_status(response).await?).await
    }
}

/// Turn a non-success response into `TrackerError::Api`
async fn check_status(response: Response) -> TrackerResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    Err(TrackerError::api(status.as_u16(), message))
}

/// Read the echoed object of a POST/DELETE without interpreting it
async fn read_echo(response: Response) -> TrackerResult<Value> {
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies yield their `message` (or `error`) string; any other non-empty
/// body is returned as-is.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::parse_base_url;
    use crate::models::Money;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn api(base: &str) -> HttpApi {
        HttpApi::new(parse_base_url(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    /// Answer exactly one request with a canned response.
    ///
    /// The handle resolves to the request head so tests can check method and path.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (HttpApi, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];

            let head = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break String::from_utf8_lossy(&request).to_string();
                }
                request.extend_from_slice(&chunk[..n]);

                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_string();
                    let body_len = head
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + body_len {
                        break head;
                    }
                }
            };

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            head
        });

        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let base = parse_base_url(&format!("http://{}/api/v1/", addr)).unwrap();
        (HttpApi::with_client(client, base), handle)
    }

    #[test]
    fn test_endpoints_join_under_base_path() {
        let api = api("https://expensetracker.example.com/api/v1");

        assert_eq!(
            api.endpoint(RecordKind::Income.add_endpoint()).unwrap().as_str(),
            "https://expensetracker.example.com/api/v1/add-income"
        );
        assert_eq!(
            api.endpoint(RecordKind::Expense.list_endpoint()).unwrap().as_str(),
            "https://expensetracker.example.com/api/v1/get-expenses"
        );
    }

    #[test]
    fn test_delete_url_appends_id_segment() {
        let api = api("http://localhost:5000/api/v1/");
        let id = RecordId::parse("64f1c2a9e4b0a1b2c3d4e5f6").unwrap();

        assert_eq!(
            api.delete_url(RecordKind::Income, &id).unwrap().as_str(),
            "http://localhost:5000/api/v1/delete-income/64f1c2a9e4b0a1b2c3d4e5f6"
        );
        assert_eq!(
            api.delete_url(RecordKind::Expense, &id).unwrap().as_str(),
            "http://localhost:5000/api/v1/delete-expense/64f1c2a9e4b0a1b2c3d4e5f6"
        );
    }

    #[test]
    fn test_from_settings_uses_configured_url() {
        let mut settings = Settings::default();
        settings.set_base_url("http://127.0.0.1:9/api").unwrap();

        let api = HttpApi::from_settings(&settings).unwrap();
        assert_eq!(api.base_url().as_str(), "http://127.0.0.1:9/api/");
    }

    #[test]
    fn test_extract_message_from_json() {
        assert_eq!(
            extract_message(r#"{"message": "All fields are required!"}"#).as_deref(),
            Some("All fields are required!")
        );
        assert_eq!(
            extract_message(r#"{"error": "boom"}"#).as_deref(),
            Some("boom")
        );
        assert_eq!(extract_message(r#"{"status": 400}"#), None);
    }

    #[test]
    fn test_extract_message_from_plain_body() {
        assert_eq!(
            extract_message("Bad Gateway\n").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(extract_message("   "), None);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Port 9 (discard) on loopback is closed on any sane test host
        let api = api("http://127.0.0.1:9/api/v1/");
        let err = api.list(RecordKind::Income).await.unwrap_err();
        assert!(matches!(err, TrackerError::Http(_)));
    }

    #[tokio::test]
    async fn test_rejected_add_carries_server_message() {
        let (api, request) =
            serve_once("400 Bad Request", r#"{"message":"All fields are required!"}"#).await;
        let body = NewRecord::new(RecordKind::Income, "Salary", Money::from_cents(100));

        let err = api.add(RecordKind::Income, &body).await.unwrap_err();

        match err {
            TrackerError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "All fields are required!");
            }
            other => panic!("expected API error, got {:?}", other),
        }
        assert!(request.await.unwrap().starts_with("POST /api/v1/add-income "));
    }

    #[tokio::test]
    async fn test_empty_error_body_falls_back_to_status_reason() {
        let (api, request) = serve_once("500 Internal Server Error", "").await;

        let err = api.list(RecordKind::Expense).await.unwrap_err();

        match err {
            TrackerError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected API error, got {:?}", other),
        }
        assert!(request.await.unwrap().starts_with("GET /api/v1/get-expenses "));
    }

    #[tokio::test]
    async fn test_empty_echo_is_null() {
        let (api, request) = serve_once("200 OK", "").await;
        let id = RecordId::parse("64f1c2a9").unwrap();

        let echo = api.delete(RecordKind::Income, &id).await.unwrap();

        assert_eq!(echo, Value::Null);
        assert!(request
            .await
            .unwrap()
            .starts_with("DELETE /api/v1/delete-income/64f1c2a9 "));
    }

    #[tokio::test]
    async fn test_list_decodes_records() {
        let (api, _request) = serve_once(
            "200 OK",
            r#"[{"_id":"a1","title":"Salary","amount":2500,"createdAt":"2024-03-02T09:15:00.000Z"}]"#,
        )
        .await;

        let records = api.list(RecordKind::Income).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount.cents(), 250_000);
    }

    #[tokio::test]
    async fn test_malformed_list_amount_is_json_error() {
        let (api, _request) = serve_once("200 OK", r#"[{"_id":"a1","amount":"1.aé"}]"#).await;

        let err = api.list(RecordKind::Income).await.unwrap_err();

        assert!(matches!(err, TrackerError::Json(_)));
    }
}
