//! Artifact publication.
//!
//! Audio and manifest are both staged in temporary files inside the
//! output directory and only renamed into place once both are complete,
//! audio first. A run that fails before [`Publisher::commit`] leaves the
//! previously published pair untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use newscast_core::{EpisodeManifest, RepoCoordinates, AUDIO_FILE_NAME, MANIFEST_FILE_NAME};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Publication errors.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to stage {file}: {source}")]
    Stage {
        file: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to persist {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes episodes into a fixed output directory.
#[derive(Debug, Clone)]
pub struct Publisher {
    output_dir: PathBuf,
    repo: RepoCoordinates,
}

impl Publisher {
    pub fn new(output_dir: impl Into<PathBuf>, repo: RepoCoordinates) -> Self {
        Self {
            output_dir: output_dir.into(),
            repo,
        }
    }

    pub fn audio_path(&self) -> PathBuf {
        self.output_dir.join(AUDIO_FILE_NAME)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE_NAME)
    }

    /// Open an empty staging file for the audio stream.
    ///
    /// The file is deleted if it is dropped without being committed.
    pub fn stage_audio(&self) -> Result<NamedTempFile, PublishError> {
        self.staging_file(AUDIO_FILE_NAME)
    }

    /// Serialize the manifest for `date` into a staging file.
    pub fn stage_manifest(
        &self,
        date: NaiveDate,
    ) -> Result<(EpisodeManifest, NamedTempFile), PublishError> {
        let manifest = EpisodeManifest::new(date, &self.repo);
        let mut file = self.staging_file(MANIFEST_FILE_NAME)?;
        serde_json::to_writer(&mut file, &manifest)?;
        file.flush().map_err(|source| PublishError::Stage {
            file: MANIFEST_FILE_NAME,
            source,
        })?;
        Ok((manifest, file))
    }

    /// Move both staged files into place, audio before manifest.
    pub fn commit(
        &self,
        audio: NamedTempFile,
        manifest: NamedTempFile,
    ) -> Result<(), PublishError> {
        self.persist(audio, AUDIO_FILE_NAME)?;
        self.persist(manifest, MANIFEST_FILE_NAME)
    }

    /// Stage the manifest for `date` and commit it together with `audio`.
    pub fn publish(
        &self,
        audio: NamedTempFile,
        date: NaiveDate,
    ) -> Result<EpisodeManifest, PublishError> {
        let (manifest, manifest_file) = self.stage_manifest(date)?;
        self.commit(audio, manifest_file)?;
        tracing::info!(
            audio = %self.audio_path().display(),
            manifest = %self.manifest_path().display(),
            "Episode published"
        );
        Ok(manifest)
    }

    fn staging_file(&self, file: &'static str) -> Result<NamedTempFile, PublishError> {
        let stage_err = |source| PublishError::Stage { file, source };
        fs::create_dir_all(&self.output_dir).map_err(stage_err)?;
        tempfile::Builder::new()
            .prefix(&format!(".{}.", file))
            .suffix(".tmp")
            .tempfile_in(&self.output_dir)
            .map_err(stage_err)
    }

    fn persist(&self, staged: NamedTempFile, file: &'static str) -> Result<(), PublishError> {
        let path = self.output_dir.join(file);
        let persist_err = |source| PublishError::Persist {
            path: path.clone(),
            source,
        };
        staged.as_file().sync_all().map_err(persist_err)?;
        make_world_readable(staged.path()).map_err(persist_err)?;
        staged.persist(&path).map_err(|e| persist_err(e.error))?;
        Ok(())
    }
}

/// Staging files are created owner-only; published files are served.
#[cfg(unix)]
fn make_world_readable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn make_world_readable(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher(dir: &Path) -> Publisher {
        Publisher::new(dir, RepoCoordinates::new("acme", "podcast"))
    }

    fn may_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn dropped_staging_files_leave_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = publisher(dir.path());

        let mut audio = publisher.stage_audio().unwrap();
        audio.write_all(b"partial").unwrap();
        let _ = publisher.stage_manifest(may_day()).unwrap();
        drop(audio);

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn publish_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = publisher(dir.path());

        let mut audio = publisher.stage_audio().unwrap();
        audio.write_all(b"ID3 fake mp3").unwrap();
        let manifest = publisher.publish(audio, may_day()).unwrap();

        assert_eq!(fs::read(publisher.audio_path()).unwrap(), b"ID3 fake mp3");
        let written = fs::read_to_string(publisher.manifest_path()).unwrap();
        assert_eq!(written, manifest.to_json().unwrap());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn publish_overwrites_previous_episode() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = publisher(dir.path());
        fs::write(publisher.audio_path(), b"yesterday").unwrap();
        fs::write(publisher.manifest_path(), b"{}").unwrap();

        let mut audio = publisher.stage_audio().unwrap();
        audio.write_all(b"today").unwrap();
        publisher.publish(audio, may_day()).unwrap();

        assert_eq!(fs::read(publisher.audio_path()).unwrap(), b"today");
        assert!(fs::read_to_string(publisher.manifest_path())
            .unwrap()
            .contains("2024-05-01"));
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = publisher(&dir.path().join("site").join("feed"));

        let audio = publisher.stage_audio().unwrap();
        publisher.publish(audio, may_day()).unwrap();

        assert!(publisher.manifest_path().exists());
    }
}
