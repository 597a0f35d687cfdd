//! Rate-limited retrying stream adapter.
//!
//! Wraps one logical "generate a reply to this conversation" operation:
//! open the streaming request under the retry policy, with the minimum
//! inter-request spacing enforced before every attempt (a retried attempt
//! is a new provider request and re-waits like any other), and hand back a
//! lazy [`GenerationStream`] of normalized events. Retries cover opening
//! the request; once the stream is handed to the caller, the only restart
//! path is reissuing the call.

use std::time::Duration;

use reqwest::{header, Client as ReqwestClient, Response};
use tracing::{debug, info, instrument, warn};

use super::error::ProviderError;
use super::models::{resolve_model, ModelDescriptor};
use super::rate_limiter::RequestSpacer;
use super::retry::RetryPolicy;
use super::streaming::GenerationStream;
use super::types::{ChatMessage, ChatRequest};
use crate::domain::models::Config;

/// Streaming LLM provider adapter.
///
/// One instance holds one spacing clock: requests issued through the same
/// adapter are spaced at least 30 seconds apart, independent of any other
/// adapter instance in the process.
pub struct StreamAdapter {
    http_client: ReqwestClient,
    base_url: String,
    model: Option<String>,
    temperature: f32,
    spacer: RequestSpacer,
    retry_policy: RetryPolicy,
}

impl StreamAdapter {
    /// Build an adapter from the configuration tree.
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let provider = &config.provider;

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", provider.api_key))
            .map_err(|e| ProviderError::InvalidRequest(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(provider.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()?;

        info!(
            base_url = %provider.base_url,
            model = resolve_model(provider.model.as_deref()).id,
            timeout_secs = provider.timeout_secs,
            "initialized provider adapter"
        );

        Ok(Self {
            http_client,
            base_url: provider.base_url.clone(),
            model: provider.model.clone(),
            temperature: provider.temperature,
            spacer: RequestSpacer::new(),
            retry_policy: RetryPolicy::from(&config.retry),
        })
    }

    /// The model this adapter generates with.
    ///
    /// Pure catalog lookup: a configured id absent from the catalog falls
    /// back to the default descriptor.
    pub fn model(&self) -> &'static ModelDescriptor {
        resolve_model(self.model.as_deref())
    }

    /// Generate a streaming reply to the given conversation.
    ///
    /// Opens the request under the retry policy and returns the lazy event
    /// stream. Every attempt, including retries, first suspends for the
    /// rate-limit gap. Dropping the stream early releases the underlying
    /// connection.
    #[instrument(skip(self, system_prompt, messages), fields(model = self.model().id))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<GenerationStream, ProviderError> {
        let mut conversation = Vec::with_capacity(messages.len() + 1);
        conversation.push(ChatMessage::system(system_prompt));
        conversation.extend_from_slice(messages);

        let request = ChatRequest {
            model: self.model().id.to_string(),
            messages: conversation,
            temperature: self.temperature,
            stream: true,
        };

        let response = self
            .retry_policy
            .execute(|| self.open_stream(&request))
            .await?;

        Ok(GenerationStream::new(response.bytes_stream()))
    }

    /// Issue one streaming request attempt and check its status.
    ///
    /// Waits out the inter-request gap first, so a retried attempt is
    /// spaced from the previous dispatch like any fresh request.
    async fn open_stream(&self, request: &ChatRequest) -> Result<Response, ProviderError> {
        self.spacer.wait_turn().await;

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(%url, "opening generation stream");

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::NetworkError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            warn!(%status, "provider rejected generation request");
            return Err(ProviderError::from_status(status, body));
        }

        Ok(response)
    }
}
