//! Interactive session service
//!
//! Interprets the line-oriented command vocabulary against a tree:
//! `ADD(p,c)`, `REMOVE(n)`, `SAVE <path>` and `EXIT`.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::TreeStore;
use crate::application::ApplicationResult;
use crate::domain::{EditOp, Refusal, Tree};
use crate::util::path::expand_path;

const SAVE_KEYWORD: &str = "SAVE";
const EXIT_KEYWORD: &str = "EXIT";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Edit(EditOp),
    /// Target path as typed; `~` and `$VAR` are expanded when saving.
    Save(String),
    Exit,
    Unrecognized(String),
}

impl SessionCommand {
    /// Parse one input line; never fails, unknown text becomes `Unrecognized`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == EXIT_KEYWORD {
            return SessionCommand::Exit;
        }
        if let Some(rest) = line.strip_prefix(SAVE_KEYWORD) {
            let path = rest.trim();
            if rest.starts_with(char::is_whitespace) && !path.is_empty() {
                return SessionCommand::Save(path.to_string());
            }
            return SessionCommand::Unrecognized(line.to_string());
        }
        match line.parse::<EditOp>() {
            Ok(op) => SessionCommand::Edit(op),
            Err(_) => SessionCommand::Unrecognized(line.to_string()),
        }
    }
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Applied(EditOp),
    Refused(Refusal),
    Saved(String),
    Exit,
    Unrecognized(String),
}

impl SessionOutcome {
    /// Whether the session should keep reading input.
    pub fn is_continue(&self) -> bool {
        !matches!(self, SessionOutcome::Exit)
    }

    /// Whether the tree should be shown again after this outcome.
    pub fn shows_tree(&self) -> bool {
        matches!(self, SessionOutcome::Applied(_) | SessionOutcome::Refused(_))
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Applied(op) => write!(f, "{}", op),
            SessionOutcome::Refused(refusal) => write!(f, "{}", refusal),
            SessionOutcome::Saved(path) => write!(f, "Tree was saved in '{}'", path),
            SessionOutcome::Exit => write!(f, "bye"),
            SessionOutcome::Unrecognized(_) => write!(f, "Wrong command. Try again."),
        }
    }
}

/// Applies session commands to a tree.
pub struct SessionService {
    store: Arc<TreeStore>,
}

impl SessionService {
    pub fn new(store: Arc<TreeStore>) -> Self {
        Self { store }
    }

    /// Parse and execute one input line.
    pub fn execute_line(&self, tree: &mut Tree, line: &str) -> ApplicationResult<SessionOutcome> {
        self.execute(tree, SessionCommand::parse(line))
    }

    /// Execute one command.
    ///
    /// Refusals and unknown commands are outcomes, not errors; only a failed
    /// save is reported as `Err`. An `ADD` that would close a cycle is refused
    /// before touching the tree.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn execute(
        &self,
        tree: &mut Tree,
        command: SessionCommand,
    ) -> ApplicationResult<SessionOutcome> {
        let outcome = match command {
            SessionCommand::Edit(op) => match Self::apply_checked(tree, &op) {
                Ok(()) => SessionOutcome::Applied(op),
                Err(refusal) => SessionOutcome::Refused(refusal),
            },
            SessionCommand::Save(typed) => {
                let path = PathBuf::from(expand_path(&typed));
                self.store.save(tree, &path)?;
                SessionOutcome::Saved(typed)
            }
            SessionCommand::Exit => SessionOutcome::Exit,
            SessionCommand::Unrecognized(text) => SessionOutcome::Unrecognized(text),
        };
        debug!("outcome: {:?}", outcome);
        Ok(outcome)
    }

    fn apply_checked(tree: &mut Tree, op: &EditOp) -> Result<(), Refusal> {
        if let EditOp::Add { parent, node } = *op {
            tree.check_attach(parent, node)?;
        }
        tree.apply(op)
    }
}
