//! Infrastructure implementation of the `RunTransport` port over HTTP.

use std::error::Error as _;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, HeaderValue};
use studio_common::RunRequest;

use crate::application::ports::{ChunkStream, RunTransport};
use crate::domain::StudioConfig;
use crate::domain::error::StreamError;

/// Streams runs from `POST {base_url}/runs/stream`.
pub struct HttpRunClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRunClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, connect_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &StudioConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/runs/stream", self.base_url)
    }
}

impl RunTransport for HttpRunClient {
    async fn open_stream(&self, request: &RunRequest) -> Result<ChunkStream, StreamError> {
        let url = self.endpoint();
        tracing::debug!(%url, assistant_id = %request.assistant_id, "opening run stream");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StreamError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(transport_error))
            .boxed())
    }
}

/// Message with the full source chain, e.g. "... : Connection refused".
fn transport_error(err: reqwest::Error) -> StreamError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    StreamError::Transport(message)
}
