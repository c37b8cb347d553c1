//! OpenAI chat-completion query expander.
//!
//! # Examples
//!
//! ```no_run
//! use newsrank::config::Config;
//! use newsrank::expansion::{OpenAiExpander, QueryExpander};
//!
//! # fn example() -> Result<(), newsrank::expansion::ExpansionError> {
//! let config = Config::default();
//! let expander = OpenAiExpander::from_credential(&config.credential_source, &config.expansion)?;
//! let expanded = expander.expand("elections")?;
//! println!("{expanded}");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::{CredentialSource, ExpansionConfig};
use crate::expansion::{ExpansionError, QueryExpander, SYSTEM_PROMPT, user_prompt};

/// Request body of the chat completions API.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response structure from the chat completions API.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Query expander backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiExpander {
    /// HTTP client for making API requests.
    client: Client,
    /// Bearer token.
    api_key: String,
    /// Model name (e.g., "gpt-4o").
    model: String,
    /// Full URL of the chat completions endpoint.
    endpoint: String,
}

impl OpenAiExpander {
    /// Create an expander with an explicit key.
    pub fn new<S: Into<String>>(api_key: S, config: &ExpansionConfig) -> Result<Self, ExpansionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    /// Create an expander reading the key from the configured environment
    /// variable.
    pub fn from_credential(
        source: &CredentialSource,
        config: &ExpansionConfig,
    ) -> Result<Self, ExpansionError> {
        let api_key = source
            .read()
            .ok_or_else(|| ExpansionError::MissingCredential(source.env_var.clone()))?;
        Self::new(api_key, config)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QueryExpander for OpenAiExpander {
    fn expand(&self, query: &str) -> Result<String, ExpansionError> {
        let user_content = user_prompt(query);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_content,
                },
            ],
        };

        debug!("Requesting query expansion from {} ({})", self.endpoint, self.model);
        let http_response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = http_response.status();
        let response_text = http_response.text()?;

        if !status.is_success() {
            return Err(ExpansionError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        parse_completion(&response_text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Extract `choices[0].message.content` from a response body.
fn parse_completion(body: &str) -> Result<String, ExpansionError> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        ExpansionError::MalformedResponse(format!("{e}. Response text: {body}"))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ExpansionError::MalformedResponse("no choices in response".to_string()))?
        .message
        .content
        .ok_or_else(|| ExpansionError::MalformedResponse("completion has no content".to_string()))
}
