use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    config::{ClientConfig, ConfigError},
    consultation::{consultation_error::ConsultationError, provider::Provider},
    http_client::http_client::HttpClient,
    json_client::{JsonRequest, TimedJsonClient},
    session::Session,
};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Sends sessions to one chat-completion provider and returns its free text.
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: TimedJsonClient,
    provider: Provider,
}

impl ChatCompletionClient {
    pub fn new(client: TimedJsonClient, provider: Provider) -> Self {
        Self { client, provider }
    }

    /// Client for `provider` at `base_url`, authenticated with a bearer key.
    pub fn connect(
        http_client: Arc<dyn HttpClient>,
        provider: Provider,
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let config = ClientConfig::new(base_url, timeout)?.with_bearer_token(api_key);
        Ok(Self::new(TimedJsonClient::new(http_client, config), provider))
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub async fn consult(&self, session: &Session) -> Result<String, ConsultationError> {
        let user_prompt = self.provider.user_prompt(&session.kpis);
        let request = ChatCompletionRequest {
            model: self.provider.model(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.provider.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let body = serde_json::to_value(&request)?;

        let response: ChatCompletionResponse = self
            .client
            .send_as(JsonRequest::post(COMPLETIONS_PATH, body))
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty());

        match content {
            Some(text) => {
                info!("{} answered ({} chars)", self.provider.label(), text.len());
                Ok(text)
            }
            None => {
                warn!("{} returned no content", self.provider.label());
                Err(ConsultationError::EmptyReply)
            }
        }
    }
}
