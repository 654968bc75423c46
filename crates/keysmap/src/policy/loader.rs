//! Locating keys map sources.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::error::ResourceError;

/// Opens a keys map by locator.
pub trait ResourceLoader {
    fn open(&self, locator: &str) -> Result<Box<dyn Read + '_>, ResourceError>;
}

/// Loads keys maps from the file system.
///
/// Relative locators are resolved against the base directory when one is
/// set. A `file:` prefix is accepted and ignored.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    base_dir: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn resolve(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator.strip_prefix("file:").unwrap_or(locator));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ResourceLoader for FileLoader {
    fn open(&self, locator: &str) -> Result<Box<dyn Read + '_>, ResourceError> {
        let path = self.resolve(locator);
        log::debug!("Loading keys map from {}", path.display());
        match File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ResourceError::NotFound(locator.to_string()))
            }
            Err(source) => Err(ResourceError::Io {
                locator: locator.to_string(),
                source,
            }),
        }
    }
}

/// Serves keys maps held in memory, keyed by locator.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, locator: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.sources.insert(locator.into(), content.into());
        self
    }
}

impl ResourceLoader for MemoryLoader {
    fn open(&self, locator: &str) -> Result<Box<dyn Read + '_>, ResourceError> {
        self.sources
            .get(locator)
            .map(|bytes| Box::new(Cursor::new(bytes.as_slice())) as Box<dyn Read + '_>)
            .ok_or_else(|| ResourceError::NotFound(locator.to_string()))
    }
}
