use crate::error::FlowError;
use crate::types::{MediaKind, Selection};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("ytgrab/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct FormatRequest<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct DownloadRequest<'a> {
    url: &'a str,
    format: &'a str,
    quality: &'a str,
}

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base: String,
}

impl HttpBackend {
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn formats(&self, url: &str) -> Result<Value, FlowError> {
        self.post("formats", &FormatRequest { url })
    }

    pub fn download(
        &self,
        kind: MediaKind,
        url: &str,
        selection: &Selection,
    ) -> Result<Value, FlowError> {
        let path = format!("download/{}", kind.endpoint());
        self.post(
            &path,
            &DownloadRequest {
                url,
                format: &selection.format,
                quality: &selection.quality,
            },
        )
    }

    fn post(&self, path: &str, body: &impl Serialize) -> Result<Value, FlowError> {
        let endpoint = format!("{}/{path}", self.base);
        let resp = self.client.post(&endpoint).json(body).send()?;
        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| FlowError::Protocol(format!("Invalid JSON from server: {e}")))
    }
}

/// Non-2xx bodies may carry `message`, or FastAPI's `detail` string.
fn error_from_body(status: u16, text: &str) -> FlowError {
    let message = serde_json::from_str::<Value>(text).ok().and_then(|v| {
        ["message", "detail"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
    });

    match message {
        Some(message) if !message.is_empty() => FlowError::Server { status, message },
        _ => FlowError::Network {
            status: Some(status),
            detail: format!("HTTP {status}"),
        },
    }
}
