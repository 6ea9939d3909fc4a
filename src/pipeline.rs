//! Run driver.
//!
//! ```text
//! FETCHING -> (digest empty?) -> NO_DATA -> DONE
//!          -> COMPOSING -> SYNTHESIZING -> PUBLISHING -> DONE
//! ```
//!
//! A fetch failure degrades to an empty digest. A failure in any later
//! stage is returned as a [`PipelineError`] and ends the run.

use std::fmt;

use chrono::{Local, NaiveDate};
use newscast_core::{render_prompt, BroadcastScript, EpisodeManifest, NewsDigest};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::clients::{
    ClientError, HeadlineSource, NewsApiClient, OpenAiClient, ScriptWriter, SpeechSynthesizer,
};
use crate::config::Config;
use crate::publish::{PublishError, Publisher};

/// Fatal pipeline errors, one per stage that is allowed to fail.
///
/// Every file system failure is a [`PipelineError::Publish`], including
/// failing to open the audio staging file at the start of synthesis;
/// `Synthesize` only carries errors from the speech service itself.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Script composition failed: {0}")]
    Compose(#[source] ClientError),

    #[error("Speech synthesis failed: {0}")]
    Synthesize(#[source] ClientError),

    #[error("Publishing failed: {0}")]
    Publish(#[from] PublishError),
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Composing,
    Synthesizing,
    Publishing,
}

impl Stage {
    /// Progress line printed when the stage starts.
    pub fn banner(&self) -> &'static str {
        match self {
            Stage::Fetching => "Fetching news...",
            Stage::Composing => "Writing the broadcast script...",
            Stage::Synthesizing => "Synthesizing speech (MP3)...",
            Stage::Publishing => "Publishing episode manifest...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Composing => "composing",
            Stage::Synthesizing => "synthesizing",
            Stage::Publishing => "publishing",
        };
        f.write_str(name)
    }
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Published(EpisodeManifest),
    NoData,
}

type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// The four-stage driver, holding one provider per remote capability.
pub struct Pipeline {
    headlines: Box<dyn HeadlineSource>,
    writer: Box<dyn ScriptWriter>,
    speech: Box<dyn SpeechSynthesizer>,
    publisher: Publisher,
    today: Clock,
}

impl Pipeline {
    pub fn new(
        headlines: Box<dyn HeadlineSource>,
        writer: Box<dyn ScriptWriter>,
        speech: Box<dyn SpeechSynthesizer>,
        publisher: Publisher,
    ) -> Self {
        Self {
            headlines,
            writer,
            speech,
            publisher,
            today: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Wire the HTTP providers described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let openai = OpenAiClient::new(&config.openai)?;
        Ok(Self::new(
            Box::new(NewsApiClient::new(&config.news)?),
            Box::new(openai.clone()),
            Box::new(openai),
            Publisher::new(&config.output_dir, config.repo.clone()),
        ))
    }

    /// Replace the local-date clock used to stamp the manifest.
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    /// Execute every stage in order.
    pub async fn run(&self) -> Result<RunOutcome, PipelineError> {
        let digest = self.fetch_digest().await;
        if digest.is_empty() {
            println!("No news data retrieved.");
            tracing::info!("Empty digest, skipping remaining stages");
            return Ok(RunOutcome::NoData);
        }

        let script = self.compose(&digest).await?;
        let audio = self.synthesize(&script).await?;
        let manifest = self.publish(audio)?;

        println!("Done!");
        Ok(RunOutcome::Published(manifest))
    }

    /// Fetch headlines; any failure yields an empty digest.
    pub async fn fetch_digest(&self) -> NewsDigest {
        enter(Stage::Fetching);
        match self.headlines.top_headlines().await {
            Ok(articles) => {
                let digest = NewsDigest::from_articles(articles);
                tracing::info!(articles = digest.len(), "Digest ready");
                digest
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching news");
                NewsDigest::empty()
            }
        }
    }

    pub async fn compose(&self, digest: &NewsDigest) -> Result<BroadcastScript, PipelineError> {
        enter(Stage::Composing);
        let prompt = render_prompt(&digest.render());
        let script = self
            .writer
            .write_script(&prompt)
            .await
            .map_err(PipelineError::Compose)?;
        tracing::info!(chars = script.char_count(), "Script composed");
        Ok(script)
    }

    /// Stream the synthesized script into a staged audio file.
    pub async fn synthesize(
        &self,
        script: &BroadcastScript,
    ) -> Result<NamedTempFile, PipelineError> {
        enter(Stage::Synthesizing);
        if script.is_truncated() {
            tracing::warn!(
                chars = script.char_count(),
                "Script exceeds synthesis limit, sending truncated prefix"
            );
        }

        let mut audio = self.publisher.stage_audio()?;
        let bytes = self
            .speech
            .synthesize(script.synthesis_input(), &mut audio)
            .await
            .map_err(PipelineError::Synthesize)?;
        tracing::info!(bytes, "Audio synthesized");
        Ok(audio)
    }

    pub fn publish(&self, audio: NamedTempFile) -> Result<EpisodeManifest, PipelineError> {
        enter(Stage::Publishing);
        Ok(self.publisher.publish(audio, (self.today)())?)
    }
}

fn enter(stage: Stage) {
    println!("{}", stage.banner());
    tracing::debug!(%stage, "Entering stage");
}
