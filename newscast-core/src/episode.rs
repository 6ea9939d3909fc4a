use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed name of the published audio file.
pub const AUDIO_FILE_NAME: &str = "daily_news.mp3";

/// Fixed name of the published manifest.
pub const MANIFEST_FILE_NAME: &str = "latest_episode.json";

/// Nominal episode length advertised to clients.
pub const NOMINAL_DURATION: &str = "20:00";

pub const DEFAULT_BRANCH: &str = "main";

const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Static location of the repository that hosts published episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl RepoCoordinates {
    /// Coordinates on the default `main` branch.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Raw download URL of `file` at the tip of the branch.
    pub fn raw_url(&self, file: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            RAW_CONTENT_BASE, self.owner, self.name, self.branch, file
        )
    }

    pub fn audio_url(&self) -> String {
        self.raw_url(AUDIO_FILE_NAME)
    }
}

/// Descriptor of the latest episode, polled by podcast clients.
///
/// Serializes as `{"date", "title", "audio_url", "duration"}` in that
/// order, with `date` as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeManifest {
    pub date: NaiveDate,
    pub title: String,
    pub audio_url: String,
    pub duration: String,
}

impl EpisodeManifest {
    pub fn new(date: NaiveDate, repo: &RepoCoordinates) -> Self {
        Self {
            date,
            title: episode_title(date),
            audio_url: repo.audio_url(),
            duration: NOMINAL_DURATION.to_string(),
        }
    }

    /// Compact JSON with non-ASCII characters left unescaped.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Date-stamped episode title.
pub fn episode_title(date: NaiveDate) -> String {
    format!("全球新闻简报 ({})", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_url_uses_branch() {
        let mut repo = RepoCoordinates::new("acme", "podcast");
        repo.branch = "gh-pages".to_string();
        assert_eq!(
            repo.raw_url("x.json"),
            "https://raw.githubusercontent.com/acme/podcast/gh-pages/x.json"
        );
    }

    #[test]
    fn test_title_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(episode_title(date), "全球新闻简报 (2024-01-09)");
    }
}
