use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, ServiceError};
use crate::predictor::{KnnRegressor, ModelRegistry, Target};
use crate::utils::{ARTIFACT_FORMAT_VERSION, MODEL_FILE_EXTENSION, MODEL_FILE_PREFIX};

/// Versioned envelope wrapped around every persisted model.
#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    format_version: u32,
    target: Target,
    model: KnnRegressor,
}

/// Summary of one artifact on disk, for the `info` command.
#[derive(Debug)]
pub struct ArtifactInfo {
    pub target: Target,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub point_count: usize,
    pub neighbours: usize,
}

/// Persists models under one directory, one `model_<target>.json` file
/// per target.
pub struct ModelStore {
    directory: PathBuf,
}

impl ModelStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn artifact_path(&self, target: Target) -> PathBuf {
        self.directory.join(format!(
            "{}{}.{}",
            MODEL_FILE_PREFIX,
            target.as_str(),
            MODEL_FILE_EXTENSION
        ))
    }

    /// Saves one model. The artifact is written to a temporary file in the
    /// same directory and renamed into place, so a concurrent reader never
    /// observes a half-written file.
    pub fn save(&self, target: Target, model: &KnnRegressor) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;

        let artifact = ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            target,
            model: model.clone(),
        };

        let mut temp = NamedTempFile::new_in(&self.directory)?;
        serde_json::to_writer(temp.as_file_mut(), &artifact)?;

        let path = self.artifact_path(target);
        temp.persist(&path).map_err(|e| ServiceError::Io(e.error))?;

        debug!(model = %target, path = %path.display(), "saved model artifact");
        Ok(path)
    }

    /// Loads the artifact for one target, verifying the envelope.
    pub fn load(&self, target: Target) -> Result<KnnRegressor> {
        let path = self.artifact_path(target);
        if !path.exists() {
            return Err(ServiceError::ModelNotFound(target.as_str().to_string()));
        }

        let file = fs::File::open(&path)?;
        let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))?;

        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ServiceError::InvalidFormat(format!(
                "artifact {} has format version {}, expected {}",
                path.display(),
                artifact.format_version,
                ARTIFACT_FORMAT_VERSION
            )));
        }

        if artifact.target != target {
            return Err(ServiceError::InvalidFormat(format!(
                "artifact {} claims target '{}', expected '{}'",
                path.display(),
                artifact.target,
                target
            )));
        }

        Ok(artifact.model)
    }

    /// Builds a registry from every artifact present in the directory.
    /// Absent targets are skipped; corrupt artifacts are errors.
    pub fn load_registry(&self) -> Result<ModelRegistry> {
        let mut registry = ModelRegistry::new();

        for target in Target::ALL {
            match self.load(target) {
                Ok(model) => registry.insert(target, Box::new(model)),
                Err(ServiceError::ModelNotFound(_)) => continue,
                Err(error) => return Err(error),
            }
        }

        Ok(registry)
    }

    /// Describes every artifact present, in reporting order.
    pub fn list(&self) -> Result<Vec<ArtifactInfo>> {
        let mut infos = Vec::new();

        for target in Target::ALL {
            let path = self.artifact_path(target);
            if !path.exists() {
                continue;
            }

            let size_bytes = fs::metadata(&path)?.len();
            let model = self.load(target)?;

            infos.push(ArtifactInfo {
                target,
                path,
                size_bytes,
                point_count: model.point_count(),
                neighbours: model.neighbours(),
            });
        }

        Ok(infos)
    }
}
