//! HTTP client for the OpenAI chat completion and speech endpoints.

use std::io::Write;

use async_trait::async_trait;
use newscast_core::BroadcastScript;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, ClientError, ScriptWriter, SpeechSynthesizer, USER_AGENT};
use crate::config::OpenAiConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

/// OpenAI client used for both script generation and synthesis.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    chat_model: String,
    speech_model: String,
    voice: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            chat_model: config.chat_model.clone(),
            speech_model: config.speech_model.clone(),
            voice: config.voice.clone(),
            client,
        })
    }

    /// Build an authenticated POST to `path`.
    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(&url).bearer_auth(&self.api_key)
    }
}

#[async_trait]
impl ScriptWriter for OpenAiClient {
    async fn write_script(&self, prompt: &str) -> Result<BroadcastScript, ClientError> {
        let request = ChatRequest {
            model: &self.chat_model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self.post("/chat/completions").json(&request).send().await?;
        let body: ChatResponse = check_status(response).await?.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(BroadcastScript::new)
            .ok_or(ClientError::EmptyCompletion)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiClient {
    async fn synthesize(
        &self,
        input: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ClientError> {
        let request = SpeechRequest {
            model: &self.speech_model,
            voice: &self.voice,
            input,
        };

        let response = self.post("/audio/speech").json(&request).send().await?;
        let mut response = check_status(response).await?;

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        sink.flush()?;
        Ok(written)
    }
}
