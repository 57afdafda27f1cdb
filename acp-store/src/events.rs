use acp_core::events::{EventError, EventSink};
use acp_shared::models::OrderEvent;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::app_config::EventsConfig;

/// Posts events as JSON to a webhook endpoint. One attempt, bounded by the
/// client timeout.
#[derive(Clone)]
pub struct WebhookEmitter {
    client: reqwest::Client,
    url: String,
}

impl WebhookEmitter {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, EventError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EventError::Delivery(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl EventSink for WebhookEmitter {
    async fn emit(&self, event: &OrderEvent) -> Result<(), EventError> {
        let response = self
            .client
            .post(&self.url)
            .json(event)
            .send()
            .await
            .map_err(|e| EventError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EventError::Delivery(format!(
                "{} answered {}",
                self.url, status
            )));
        }

        info!("Posted {} to {} ({})", event.event_type(), self.url, status);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

/// Fallback used when no webhook is configured: the event is only logged.
#[derive(Debug, Clone, Default)]
pub struct LogEmitter;

#[async_trait]
impl EventSink for LogEmitter {
    async fn emit(&self, event: &OrderEvent) -> Result<(), EventError> {
        let payload =
            serde_json::to_string(event).map_err(|e| EventError::Serialization(e.to_string()))?;
        info!("[webhook simulation] {}", payload);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Pick the event destination from configuration.
pub fn sink_from_config(config: &EventsConfig) -> Result<Arc<dyn EventSink>, EventError> {
    match config.webhook_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => Ok(Arc::new(WebhookEmitter::new(url, config.timeout())?)),
        None => Ok(Arc::new(LogEmitter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acp_shared::models::OrderCreatedEvent;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn event() -> OrderEvent {
        OrderEvent::Created(OrderCreatedEvent {
            id: "ord_1".to_string(),
            checkout_session_id: "cs_1".to_string(),
            total: 2769,
            currency: "usd".to_string(),
            status: "paid".to_string(),
        })
    }

    /// Accept one HTTP request, answer with `status_line`, return the body.
    async fn serve_once(listener: TcpListener, status_line: &'static str) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return String::new();
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    let response = format!("HTTP/1.1 {}\r\ncontent-length: 0\r\n\r\n", status_line);
                    socket.write_all(response.as_bytes()).await.unwrap();
                    return text[end + 4..].to_string();
                }
            }
        }
    }

    #[tokio::test]
    async fn test_webhook_posts_json_envelope() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/orders", listener.local_addr().unwrap());
        let server = tokio::spawn(serve_once(listener, "204 No Content"));

        let emitter = WebhookEmitter::new(&url, Duration::from_secs(5)).unwrap();
        emitter.emit(&event()).await.unwrap();

        let body = server.await.unwrap();
        let posted: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(posted, serde_json::to_value(event()).unwrap());
    }

    #[tokio::test]
    async fn test_webhook_error_status_is_delivery_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/orders", listener.local_addr().unwrap());
        let server = tokio::spawn(serve_once(listener, "500 Internal Server Error"));

        let emitter = WebhookEmitter::new(&url, Duration::from_secs(5)).unwrap();
        let result = emitter.emit(&event()).await;
        server.await.unwrap();

        assert!(matches!(result, Err(EventError::Delivery(_))));
    }

    #[tokio::test]
    async fn test_log_emitter_never_fails() {
        assert!(LogEmitter.emit(&event()).await.is_ok());
    }

    #[test]
    fn test_sink_selection() {
        let mut config = EventsConfig {
            webhook_url: None,
            timeout_seconds: 10,
        };
        assert_eq!(sink_from_config(&config).unwrap().name(), "log");

        config.webhook_url = Some(String::new());
        assert_eq!(sink_from_config(&config).unwrap().name(), "log");

        config.webhook_url = Some("http://127.0.0.1:9/hook".to_string());
        assert_eq!(sink_from_config(&config).unwrap().name(), "webhook");
    }
}
