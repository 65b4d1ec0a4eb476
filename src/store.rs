//! Persistence of container records, keyed by container id, plus the
//! image-name index. Storage failures propagate unchanged; retries, if any,
//! belong to the storage backend.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::container::Container;
use crate::error::DockhandError;

pub trait ContainerStore: Send + Sync + 'static + Clone {
    fn find_by_name(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Container, DockhandError>> + Send;

    /// All containers of an app, in insertion order.
    fn find_all_by_app(
        &self,
        app_name: &str,
    ) -> impl Future<Output = Result<Vec<Container>, DockhandError>> + Send;

    fn insert(&self, container: Container) -> impl Future<Output = Result<(), DockhandError>> + Send;

    fn remove(&self, id: &str) -> impl Future<Output = Result<(), DockhandError>> + Send;

    /// Record a deployed image name. Names are unique; saving an already
    /// known name is a no-op.
    fn save_image(&self, name: &str) -> impl Future<Output = Result<(), DockhandError>> + Send;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Records {
    containers: Vec<Container>,
    images: Vec<String>,
}

impl Records {
    fn find(&self, id: &str) -> Result<Container, DockhandError> {
        self.containers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| DockhandError::ContainerNotFound(id.to_string()))
    }

    fn by_app(&self, app_name: &str) -> Vec<Container> {
        self.containers
            .iter()
            .filter(|c| c.app_name == app_name)
            .cloned()
            .collect()
    }

    fn insert(&mut self, container: Container) {
        self.containers.push(container);
    }

    fn remove(&mut self, id: &str) -> Result<(), DockhandError> {
        let before = self.containers.len();
        self.containers.retain(|c| c.id != id);
        if self.containers.len() == before {
            return Err(DockhandError::ContainerNotFound(id.to_string()));
        }
        Ok(())
    }

    fn save_image(&mut self, name: &str) {
        if !self.images.iter().any(|image| image == name) {
            self.images.push(name.to_string());
        }
    }
}

/// In-memory store, the default for tests and embedded use.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Records>>,
}

impl ContainerStore for MemoryStore {
    async fn find_by_name(&self, id: &str) -> Result<Container, DockhandError> {
        self.records.read().await.find(id)
    }

    async fn find_all_by_app(&self, app_name: &str) -> Result<Vec<Container>, DockhandError> {
        Ok(self.records.read().await.by_app(app_name))
    }

    async fn insert(&self, container: Container) -> Result<(), DockhandError> {
        self.records.write().await.insert(container);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), DockhandError> {
        self.records.write().await.remove(id)
    }

    async fn save_image(&self, name: &str) -> Result<(), DockhandError> {
        self.records.write().await.save_image(name);
        Ok(())
    }
}

/// File-backed store used by the CLI: records live in one JSON document,
/// loaded on open and written through on every mutation.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
    records: Arc<RwLock<Records>>,
}

impl JsonStore {
    pub async fn open(path: &Path) -> Result<JsonStore, DockhandError> {
        let records = match tokio::fs::read_to_string(path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| DockhandError::Store(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Records::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(JsonStore {
            path: path.to_path_buf(),
            records: Arc::new(RwLock::new(records)),
        })
    }

    async fn persist(&self, records: &Records) -> Result<(), DockhandError> {
        let raw = serde_json::to_string_pretty(records)
            .map_err(|e| DockhandError::Store(e.to_string()))?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

impl ContainerStore for JsonStore {
    async fn find_by_name(&self, id: &str) -> Result<Container, DockhandError> {
        self.records.read().await.find(id)
    }

    async fn find_all_by_app(&self, app_name: &str) -> Result<Vec<Container>, DockhandError> {
        Ok(self.records.read().await.by_app(app_name))
    }

    async fn insert(&self, container: Container) -> Result<(), DockhandError> {
        let mut records = self.records.write().await;
        records.insert(container);
        self.persist(&records).await
    }

    async fn remove(&self, id: &str) -> Result<(), DockhandError> {
        let mut records = self.records.write().await;
        records.remove(id)?;
        self.persist(&records).await
    }

    async fn save_image(&self, name: &str) -> Result<(), DockhandError> {
        let mut records = self.records.write().await;
        records.save_image(name);
        self.persist(&records).await
    }
}
