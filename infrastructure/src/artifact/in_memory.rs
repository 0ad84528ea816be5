//! Process-local artifact store.

use async_trait::async_trait;
use conclave_application::{ArtifactStore, StoreError};
use conclave_domain::Artifact;
use std::collections::HashMap;
use std::sync::Mutex;

/// Keeps artifacts in a map keyed by id; paths look like `mem://<kind>/<id>`.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    artifacts: Mutex<HashMap<String, Artifact>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_for(artifact: &Artifact) -> String {
        format!("mem://{}/{}", artifact.kind, artifact.id)
    }

    pub fn get(&self, id: &str) -> Option<Artifact> {
        self.artifacts.lock().ok()?.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.artifacts.lock().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn save(&self, artifact: &Artifact) -> Result<String, StoreError> {
        let path = Self::path_for(artifact);
        let mut artifacts = self
            .artifacts
            .lock()
            .map_err(|_| StoreError::Io("artifact map poisoned".to_string()))?;
        artifacts.insert(artifact.id.clone(), artifact.with_path(path.clone()));
        Ok(path)
    }
}
