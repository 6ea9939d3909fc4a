//! Daily news podcast generator.
//!
//! A run is four strictly sequential stages:
//!
//! 1. fetch top headlines and render them into a [`newscast_core::NewsDigest`],
//! 2. ask a language model to turn the digest into a broadcast script,
//! 3. synthesize the first 4096 characters of the script to MP3,
//! 4. publish the audio and a [`newscast_core::EpisodeManifest`] pointing at it.
//!
//! # Example
//! ```no_run
//! use newscast::{config::Config, pipeline::Pipeline};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let outcome = Pipeline::from_config(&config)?.run().await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod config;
pub mod pipeline;
pub mod publish;
