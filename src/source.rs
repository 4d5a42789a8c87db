//! Where registries, settings, and image inventories come from

use crate::{
    errors::SourceError,
    image::ImageSummary,
    registry::{PublicSettings, Registry},
};
use serde::de::DeserializeOwned;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Identifies the environment whose container engine lists the images
pub type EnvironmentId = u32;

/// Upstream data needed to fill in an image form
///
/// Each query may fail on its own. Callers treat a failure as "nothing
/// known" rather than aborting.
pub trait Source {
    /// Is the virtual anonymous Docker Hub entry hidden by the operator?
    fn default_registry_hidden(&self) -> Result<bool, SourceError>;

    /// All registries configured for use
    fn registries(&self) -> Result<Vec<Registry>, SourceError>;

    /// Images known to the container engine of an environment
    fn images(&self, environment: EnvironmentId) -> Result<Vec<ImageSummary>, SourceError>;
}

/// A directory of JSON documents as returned by the management API
///
/// - `settings.json`, the public settings; a missing file means defaults
/// - `registries.json`, the registry list
/// - `images-<environment>.json`, the engine's image list per environment
#[derive(Clone, Debug)]
pub struct JsonFiles {
    dir: PathBuf,
}

impl JsonFiles {
    pub fn new(dir: &Path) -> Self {
        JsonFiles {
            dir: dir.to_path_buf(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T, SourceError> {
        log::debug!("reading {:?}", path);
        let data = fs::read(path).map_err(|source| SourceError::IO {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl Source for JsonFiles {
    fn default_registry_hidden(&self) -> Result<bool, SourceError> {
        let path = self.path("settings.json");
        match self.read::<PublicSettings>(&path) {
            Ok(settings) => Ok(settings.default_registry.hide),
            Err(SourceError::IO { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::debug!("no settings at {:?}, using defaults", path);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn registries(&self) -> Result<Vec<Registry>, SourceError> {
        self.read(&self.path("registries.json"))
    }

    fn images(&self, environment: EnvironmentId) -> Result<Vec<ImageSummary>, SourceError> {
        self.read(&self.path(&format!("images-{}.json", environment)))
    }
}
