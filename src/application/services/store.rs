//! Structured tree persistence
//!
//! Stores the adjacency map itself as JSON, independent of the indented render.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{NodeId, Tree};
use crate::infrastructure::traits::FileSystem;

/// Saves and restores trees as JSON documents.
pub struct TreeStore {
    fs: Arc<dyn FileSystem>,
}

impl TreeStore {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Write `tree` to `path`, creating parent directories.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn save(&self, tree: &Tree, path: &Path) -> ApplicationResult<()> {
        let json = serde_json::to_string_pretty(tree).map_err(|e| {
            ApplicationError::OperationFailed {
                context: format!("serialize tree for {}", path.display()),
                source: Box::new(e),
            }
        })?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &json)
            .with_path_context("write tree", path)?;
        debug!("saved {} nodes", tree.len());
        Ok(())
    }

    /// Read a tree previously written by [`TreeStore::save`].
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Tree> {
        let json = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree", path)?;
        let tree: Tree = serde_json::from_str(&json).map_err(|e| ApplicationError::Persistence {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("loaded {} nodes, root {}", tree.len(), tree.root());
        Ok(tree)
    }

    /// Load `path` when given, otherwise start from a lone `default_root`.
    pub fn load_or_new(&self, path: Option<&Path>, default_root: NodeId) -> ApplicationResult<Tree> {
        match path {
            Some(p) => self.load(p),
            None => Ok(Tree::new(default_root)),
        }
    }
}
