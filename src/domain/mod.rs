//! Domain layer: the tree, its textual encoding and the diff engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod codec;
pub mod diff;
pub mod edit;
pub mod error;
pub mod tree;

pub use codec::TreeCodec;
pub use edit::{EditOp, EditScript};
pub use error::{DomainError, DomainResult};
pub use tree::{NodeId, Refusal, Tree, DEFAULT_ROOT};
