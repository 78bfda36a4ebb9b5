//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod diff;
mod session;
mod store;

pub use diff::DiffService;
pub use session::{SessionCommand, SessionOutcome, SessionService};
pub use store::TreeStore;
