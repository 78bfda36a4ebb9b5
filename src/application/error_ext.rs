//! Path context for edge-list and tree-store I/O
//!
//! A bare `io::Error` does not say which tree file failed; services attach
//! the file and the step here before the error leaves the application layer.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Turns an `io::Result` into an [`ApplicationResult`] naming the tree file.
pub trait IoResultExt<T> {
    /// Wrap a failure as `OperationFailed` with context `"<action>: <path>"`.
    ///
    /// # Example
    /// ```ignore
    /// let text = self.fs.read_to_string(path).with_path_context("read edge list", path)?;
    /// let tree = self.codec.decode(&text)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}
