//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DiffService, SessionService, TreeStore};
use crate::config::Settings;
use crate::domain::TreeCodec;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub diff: DiffService,
    pub store: Arc<TreeStore>,
    pub session: SessionService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let codec = TreeCodec::new(settings.default_root);
        let store = Arc::new(TreeStore::new(Arc::clone(&fs)));

        Self {
            diff: DiffService::new(Arc::clone(&fs), codec),
            session: SessionService::new(Arc::clone(&store)),
            store,
            settings,
            fs,
        }
    }
}
