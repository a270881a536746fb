use crate::domain::ports::ArtifactSource;
use crate::utils::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of serialized artifacts.
pub const ARTIFACT_EXTENSION: &str = "json";

/// Artifacts stored as `<base_path>/<name>.json` on the local disk.
#[derive(Debug, Clone)]
pub struct LocalArtifacts {
    base_path: PathBuf,
}

impl LocalArtifacts {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", name, ARTIFACT_EXTENSION))
    }
}

impl ArtifactSource for LocalArtifacts {
    fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.path_for(name);
        fs::read(&full_path).map_err(|e| {
            AppError::artifact_load(name, format!("{} ({})", e, full_path.display()))
        })
    }

    fn describe(&self, name: &str) -> String {
        self.path_for(name).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_named_artifact() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("y_test.json"), b"{}").unwrap();

        let source = LocalArtifacts::new(dir.path());
        assert_eq!(source.read_artifact("y_test").unwrap(), b"{}");
        assert!(source.describe("y_test").ends_with("y_test.json"));
    }

    #[test]
    fn test_missing_artifact_is_load_error() {
        let dir = TempDir::new().unwrap();
        let source = LocalArtifacts::new(dir.path());

        let err = source.read_artifact("preprocessor").unwrap_err();
        assert!(matches!(err, AppError::ArtifactLoadError { ref name, .. } if name == "preprocessor"));
    }
}
