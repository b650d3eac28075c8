use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::StatusCode;

use crate::config::AppConfig;
use crate::domain::EventCategory;
use crate::error::FetchError;

use super::event::{DateWindow, Event};

/// Upper bound on one DONKI request, connect to last byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Boxed future returned by [`EventSource`] so the trait stays object safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Anything that can return the events of one category over a date window.
pub trait EventSource: Send + Sync {
    fn fetch(
        &self,
        category: EventCategory,
        window: DateWindow,
    ) -> BoxFuture<'_, Result<Vec<Event>, FetchError>>;
}

/// HTTP client for NASA's DONKI notification API.
#[derive(Debug, Clone)]
pub struct DonkiClient {
    base_url: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl DonkiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, api_key, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        if config.api_key.is_none() {
            tracing::warn!("NASA_API_KEY is not set; DONKI requests will likely be rejected");
        }
        Self::new(
            config.donki_base_url.clone(),
            config.api_key.clone().unwrap_or_default(),
        )
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full request URL, e.g. `<base>FLR?startDate=..&endDate=..&api_key=..`.
    pub fn request_url(&self, category: EventCategory, window: DateWindow) -> String {
        format!(
            "{}{}?startDate={}&endDate={}&api_key={}",
            self.base_url,
            category.code(),
            window.start.format("%Y-%m-%d"),
            window.end.format("%Y-%m-%d"),
            self.api_key
        )
    }
}

impl EventSource for DonkiClient {
    fn fetch(
        &self,
        category: EventCategory,
        window: DateWindow,
    ) -> BoxFuture<'_, Result<Vec<Event>, FetchError>> {
        let url = self.request_url(category, window);
        Box::pin(async move {
            tracing::debug!(%category, %window, "requesting DONKI events");
            let resp = self.client.get(&url).send().await?;

            if resp.status() != StatusCode::OK {
                return Err(FetchError::Status(resp.status()));
            }

            let body = resp.text().await?;
            Ok(Event::parse_list(category, &body)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn window() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        )
    }

    /// Answers a single request with `status` and `body`.
    async fn serve_once(status: &'static str, body: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0_u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        addr
    }

    #[test]
    fn request_url_matches_donki_layout() {
        let client = DonkiClient::new("https://api.nasa.gov/DONKI/", "KEY").unwrap();

        assert_eq!(
            client.request_url(EventCategory::GeomagneticStorm, window()),
            "https://api.nasa.gov/DONKI/GST?startDate=2024-05-01&endDate=2024-05-31&api_key=KEY"
        );
        assert_eq!(
            client.request_url(EventCategory::CoronalMassEjection, window()),
            "https://api.nasa.gov/DONKI/CME?startDate=2024-05-01&endDate=2024-05-31&api_key=KEY"
        );
    }

    #[test]
    fn configured_client_uses_request_timeout() {
        let client = DonkiClient::from_config(&AppConfig::default()).unwrap();
        assert_eq!(client.timeout(), REQUEST_TIMEOUT);
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(20));
    }

    #[tokio::test]
    async fn fetch_decodes_and_tags_response_records() {
        let addr = serve_once(
            "200 OK",
            r#"[{"flrID":"2024-05-10T06:27:00-FLR-001","beginTime":"2024-05-10T06:27Z","sourceLocation":"S17W26","classType":"X3.9"}]"#,
        )
        .await;
        let client = DonkiClient::new(format!("http://{addr}/"), "KEY").unwrap();

        let events = client.fetch(EventCategory::SolarFlare, window()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, EventCategory::SolarFlare);
        assert_eq!(events[0].source_location.as_deref(), Some("S17W26"));
        assert_eq!(events[0].id(), Some("2024-05-10T06:27:00-FLR-001"));
        assert_eq!(
            events[0].fields.get("classType").and_then(serde_json::Value::as_str),
            Some("X3.9")
        );
    }

    #[tokio::test]
    async fn non_ok_status_is_an_error() {
        let addr = serve_once("503 Service Unavailable", "[]").await;
        let client = DonkiClient::new(format!("http://{addr}/"), "KEY").unwrap();

        let result = client.fetch(EventCategory::GeomagneticStorm, window()).await;
        assert!(matches!(
            result,
            Err(FetchError::Status(StatusCode::SERVICE_UNAVAILABLE))
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let addr = serve_once("200 OK", r#"{"error":"not a list"}"#).await;
        let client = DonkiClient::new(format!("http://{addr}/"), "KEY").unwrap();

        let result = client.fetch(EventCategory::CoronalMassEjection, window()).await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn stalled_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });
        let client =
            DonkiClient::with_timeout(format!("http://{addr}/"), "KEY", Duration::from_millis(200))
                .unwrap();

        let result = client.fetch(EventCategory::SolarFlare, window()).await;
        assert!(matches!(result, Err(FetchError::Http(ref e)) if e.is_timeout()));
        server.abort();
    }
}
