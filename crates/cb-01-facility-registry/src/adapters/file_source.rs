//! Local file Facility Source

use crate::error::{RegistryError, RegistryResult};
use crate::ports::outbound::FacilitySource;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads the facility table from a local file (offline deployments, fixtures).
pub struct FileFacilitySource {
    path: PathBuf,
}

impl FileFacilitySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FacilitySource for FileFacilitySource {
    async fn fetch(&self) -> RegistryResult<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            RegistryError::unreachable(format!("cannot read {}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}
