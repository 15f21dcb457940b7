//! Client for the text generation API.

use super::parse::extract_output_text;
use super::prompt::{Prompt, SCHEMA_NAME, quote_schema};
use crate::server::config::ServerConfig;
use crate::server::error::{Error, Result};
use crate::server::telemetry::{increment_upstream_errors, record_upstream_duration};
use serde_json::{Value, json};
use std::time::Instant;

/// Something that turns a prompt into the model's raw text output.
///
/// [`OpenAiUpstream`] is the production implementation; tests substitute
/// canned answers.
pub trait Upstream: Send + Sync + 'static {
    fn complete(
        &self,
        api_key: &str,
        prompt: &Prompt,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Calls the OpenAI Responses API with a strict JSON schema output format.
#[derive(Clone, Debug)]
pub struct OpenAiUpstream {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OpenAiUpstream {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &ServerConfig) -> Self {
        Self {
            client,
            url: config.upstream_url.clone(),
            model: config.model.clone(),
        }
    }

    /// Request body for `prompt`.
    pub fn request_body(&self, prompt: &Prompt) -> Value {
        json!({
            "model": self.model,
            "input": prompt.text,
            "text": {
                "format": {
                    "type": "json_schema",
                    "name": SCHEMA_NAME,
                    "schema": quote_schema(),
                    "strict": true
                }
            }
        })
    }
}

impl Upstream for OpenAiUpstream {
    #[tracing::instrument(skip_all, fields(model = %self.model, ts = prompt.ts))]
    async fn complete(&self, api_key: &str, prompt: &Prompt) -> Result<String> {
        tracing::debug!("Prompt: {}", prompt.text);

        let start = Instant::now();
        let sent = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await;
        record_upstream_duration(start.elapsed().as_millis() as f64);

        let resp = sent.inspect_err(|e| {
            increment_upstream_errors();
            tracing::error!("Generation API unreachable: {e}");
        })?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            increment_upstream_errors();
            tracing::error!("Generation API answered {status}: {body}");
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = serde_json::from_str(&body).inspect_err(|e| {
            tracing::error!("Generation API body is not JSON: {e}");
        })?;
        Ok(extract_output_text(&data).to_string())
    }
}
