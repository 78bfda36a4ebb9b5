//! Edit script computation between two trees sharing a root.
//!
//! Nodes correspond purely by id. A node whose parent differs between the two
//! trees is expressed as a removal followed by an addition, never as a move.

use tracing::{debug, instrument};

use crate::domain::edit::{EditOp, EditScript};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{NodeId, Refusal, Tree};

impl Tree {
    /// Turn `self` into `target` in place and return the steps taken.
    ///
    /// The receiver is mutated through [`Tree::add`] and [`Tree::remove`]; the
    /// returned script replays the same steps on any copy of the original.
    /// All removals come first, each removed subtree deepest-first. Additions
    /// follow, each added subtree's descendants listed before the edge that
    /// attaches it. Sibling order is unspecified.
    ///
    /// Fails without touching `self` when the roots differ.
    #[instrument(level = "debug", skip_all, fields(root = self.root()))]
    pub fn transform_to(&mut self, target: &Tree) -> DomainResult<EditScript> {
        if self.root() != target.root() {
            return Err(DomainError::RootMismatch {
                source_root: self.root(),
                target_root: target.root(),
            });
        }

        let mut script = EditScript::new();
        self.prune_towards(self.root(), target, &mut script)?;
        self.grow_towards(self.root(), target, &mut script);
        debug!("transform produced {} steps", script.len());
        Ok(script)
    }

    /// Compute the script from `self` to `target` on a copy, leaving `self` as is.
    pub fn diff(&self, target: &Tree) -> DomainResult<EditScript> {
        self.clone().transform_to(target)
    }

    /// Apply one step.
    pub fn apply(&mut self, op: &EditOp) -> Result<(), Refusal> {
        match *op {
            EditOp::Add { parent, node } => {
                self.add(parent, node);
                Ok(())
            }
            EditOp::Remove { node } => self.remove(node),
        }
    }

    /// Apply every step in order, stopping at the first refusal.
    pub fn apply_script(&mut self, script: &EditScript) -> Result<(), Refusal> {
        script.iter().try_for_each(|op| self.apply(op))
    }

    /// Remove every child of `node` absent from `target`, then descend into the
    /// children both trees keep.
    fn prune_towards(
        &mut self,
        node: NodeId,
        target: &Tree,
        script: &mut EditScript,
    ) -> DomainResult<()> {
        let wanted = target.child_set(node);
        for child in self.child_set(node) {
            if wanted.contains(&child) {
                self.prune_towards(child, target, script)?;
            } else {
                self.remove_subtree(child, script)?;
            }
        }
        Ok(())
    }

    /// Attach every child of `node` present only in `target`, then descend into
    /// the children both trees share.
    fn grow_towards(&mut self, node: NodeId, target: &Tree, script: &mut EditScript) {
        let present = self.child_set(node);
        for child in target.children(node) {
            if present.contains(&child) {
                self.grow_towards(child, target, script);
            } else {
                self.add_subtree(node, child, target, script);
            }
        }
    }

    fn remove_subtree(&mut self, node: NodeId, script: &mut EditScript) -> DomainResult<()> {
        for child in self.child_set(node) {
            self.remove_subtree(child, script)?;
        }
        self.remove(node)?;
        script.push(EditOp::Remove { node });
        Ok(())
    }

    fn add_subtree(&mut self, parent: NodeId, node: NodeId, target: &Tree, script: &mut EditScript) {
        self.add(parent, node);
        for child in target.children(node) {
            self.add_subtree(node, child, target, script);
        }
        script.push(EditOp::Add { parent, node });
    }
}
