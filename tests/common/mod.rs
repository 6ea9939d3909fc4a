//! In-memory test doubles for the three remote capabilities.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use newscast::clients::{ClientError, HeadlineSource, ScriptWriter, SpeechSynthesizer};
use newscast_core::{Article, BroadcastScript};

pub const FAKE_MP3: &[u8] = b"ID3\x03\x00fake-mp3-frames";

pub fn articles(count: usize) -> Vec<Article> {
    (1..=count)
        .map(|i| Article::new(format!("Headline {}", i), format!("Summary {}", i)))
        .collect()
}

/// Headline source returning a fixed batch, or failing.
pub struct StubHeadlines {
    articles: Option<Vec<Article>>,
}

impl StubHeadlines {
    pub fn returning(articles: Vec<Article>) -> Self {
        Self {
            articles: Some(articles),
        }
    }

    pub fn failing() -> Self {
        Self { articles: None }
    }
}

#[async_trait]
impl HeadlineSource for StubHeadlines {
    async fn top_headlines(&self) -> Result<Vec<Article>, ClientError> {
        self.articles
            .clone()
            .ok_or_else(|| ClientError::Server("503 Service Unavailable: down".to_string()))
    }
}

/// Script writer returning a fixed script and recording prompts.
#[derive(Clone)]
pub struct StubWriter {
    script: Option<String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl StubWriter {
    pub fn returning(script: impl Into<String>) -> Self {
        Self {
            script: Some(script.into()),
            prompts: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            script: None,
            prompts: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ScriptWriter for StubWriter {
    async fn write_script(&self, prompt: &str) -> Result<BroadcastScript, ClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .clone()
            .map(BroadcastScript::new)
            .ok_or_else(|| ClientError::Unauthorized("401 Unauthorized: bad key".to_string()))
    }
}

/// Synthesizer recording its input and writing fake audio.
#[derive(Clone)]
pub struct RecordingSpeech {
    fail_after_partial_write: bool,
    pub inputs: Arc<Mutex<Vec<String>>>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self {
            fail_after_partial_write: false,
            inputs: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_after_partial_write: true,
            inputs: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn last_input(&self) -> Option<String> {
        self.inputs.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSpeech {
    async fn synthesize(
        &self,
        input: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ClientError> {
        self.inputs.lock().unwrap().push(input.to_string());
        if self.fail_after_partial_write {
            sink.write_all(&FAKE_MP3[..4])?;
            return Err(ClientError::Server("500 Internal Server Error: tts".to_string()));
        }
        sink.write_all(FAKE_MP3)?;
        Ok(FAKE_MP3.len() as u64)
    }
}
