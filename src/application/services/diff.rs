//! Diff service
//!
//! Reads bracketed edge-list files and computes edit scripts between them.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{EditScript, Tree, TreeCodec};
use crate::infrastructure::traits::FileSystem;

/// Service for decoding edge-list files and diffing them.
pub struct DiffService {
    fs: Arc<dyn FileSystem>,
    codec: TreeCodec,
}

impl DiffService {
    pub fn new(fs: Arc<dyn FileSystem>, codec: TreeCodec) -> Self {
        Self { fs, codec }
    }

    /// Decode the edge list stored at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn read_tree(&self, path: &Path) -> ApplicationResult<Tree> {
        let text = self
            .fs
            .read_to_string(path)
            .with_path_context("read edge list", path)?;
        Ok(self.codec.decode(&text)?)
    }

    /// Script turning the tree in `first` into the tree in `second`.
    ///
    /// Both files are decoded before anything is compared, so a malformed
    /// second file never yields a partial script.
    #[instrument(level = "debug", skip(self))]
    pub fn diff_files(&self, first: &Path, second: &Path) -> ApplicationResult<EditScript> {
        let mut source = self.read_tree(first)?;
        let target = self.read_tree(second)?;
        let script = source.transform_to(&target)?;
        debug!("diff: {} steps", script.len());
        Ok(script)
    }

    /// Indented render of the tree stored at `path`.
    pub fn render_file(&self, path: &Path) -> ApplicationResult<String> {
        Ok(self.codec.encode(&self.read_tree(path)?))
    }
}
