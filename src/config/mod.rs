//! Configuration - settings, saved requests and their locations
//!
//! Built once at startup into a [`ConfigContext`] and passed explicitly to
//! the request pipeline.

pub mod paths;
pub mod settings;
pub mod store;

use std::cell::OnceCell;

pub use paths::Paths;
pub use settings::Settings;
pub use store::RequestStore;

use crate::error::Result;

/// Everything the pipeline reads from disk.
#[derive(Debug)]
pub struct ConfigContext {
    pub paths: Paths,
    pub settings: Settings,
    requests: OnceCell<RequestStore>,
}

impl ConfigContext {
    /// Loads settings now; saved requests are read on first lookup.
    pub fn load(paths: Paths) -> Result<Self> {
        let settings = Settings::load(paths.config_file())?;
        Ok(ConfigContext {
            paths,
            settings,
            requests: OnceCell::new(),
        })
    }

    /// Context with an already-loaded requests document.
    pub fn with_requests(paths: Paths, settings: Settings, requests: RequestStore) -> Self {
        ConfigContext {
            paths,
            settings,
            requests: OnceCell::from(requests),
        }
    }

    /// The saved requests document, loaded at most once.
    pub fn requests(&self) -> Result<&RequestStore> {
        if let Some(store) = self.requests.get() {
            return Ok(store);
        }
        let store = RequestStore::load(self.paths.requests_file())?;
        Ok(self.requests.get_or_init(|| store))
    }
}
