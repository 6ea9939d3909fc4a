//! Core models for newscast.
//!
//! # Core Concepts
//!
//! Every value here is transient and handed from one pipeline stage to
//! the next; nothing in this crate touches the network or the disk.
//!
//! - [`NewsDigest`]: up to ten [`Article`]s in API order, rendered as a
//!   numbered plain-text block for the script prompt.
//! - [`BroadcastScript`]: the generated anchor script and the prefix of
//!   it that fits the speech service's input ceiling.
//! - [`EpisodeManifest`]: the small JSON descriptor clients poll to find
//!   the latest episode, addressed through [`RepoCoordinates`].

mod digest;
mod episode;
mod script;

pub use digest::*;
pub use episode::*;
pub use script::*;
