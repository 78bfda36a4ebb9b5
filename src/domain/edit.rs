//! Edit operations and scripts.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::tree::NodeId;

static ADD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ADD\(\s*(-?\d+)\s*,\s*(-?\d+)\s*\)$").expect("static ADD pattern")
});

static REMOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^REMOVE\(\s*(-?\d+)\s*\)$").expect("static REMOVE pattern"));

/// A single step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditOp {
    Add { parent: NodeId, node: NodeId },
    Remove { node: NodeId },
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Add { parent, node } => write!(f, "ADD({},{})", parent, node),
            EditOp::Remove { node } => write!(f, "REMOVE({})", node),
        }
    }
}

impl FromStr for EditOp {
    type Err = DomainError;

    /// Parse `ADD(p,c)` or `REMOVE(n)`, tolerating whitespace around numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unknown = || DomainError::UnknownOperation(s.to_string());

        if let Some(caps) = ADD_RE.captures(s) {
            let parent = caps[1].parse().map_err(|_| unknown())?;
            let node = caps[2].parse().map_err(|_| unknown())?;
            return Ok(EditOp::Add { parent, node });
        }
        if let Some(caps) = REMOVE_RE.captures(s) {
            let node = caps[1].parse().map_err(|_| unknown())?;
            return Ok(EditOp::Remove { node });
        }
        Err(unknown())
    }
}

/// Ordered sequence of edit operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditScript {
    ops: Vec<EditOp>,
}

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: EditOp) {
        self.ops.push(op);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Textual form of every step, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.ops.iter().map(ToString::to_string).collect()
    }

    /// Render all steps joined by `delimiter`.
    pub fn join(&self, delimiter: &str) -> String {
        self.ops.iter().join(delimiter)
    }

    /// Index of `op` in the script, if present.
    pub fn position_of(&self, op: &EditOp) -> Option<usize> {
        self.ops.iter().position(|o| o == op)
    }
}

impl From<Vec<EditOp>> for EditScript {
    fn from(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }
}

impl FromIterator<EditOp> for EditScript {
    fn from_iter<I: IntoIterator<Item = EditOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EditScript {
    type Item = EditOp;
    type IntoIter = std::vec::IntoIter<EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a EditOp;
    type IntoIter = std::slice::Iter<'a, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ADD(1,2)", EditOp::Add { parent: 1, node: 2 })]
    #[case("ADD( 1 , 2 )", EditOp::Add { parent: 1, node: 2 })]
    #[case("  REMOVE(7)  ", EditOp::Remove { node: 7 })]
    #[case("ADD(-3,4)", EditOp::Add { parent: -3, node: 4 })]
    fn given_valid_text_when_parsing_then_returns_op(#[case] input: &str, #[case] expected: EditOp) {
        assert_eq!(input.parse::<EditOp>().unwrap(), expected);
    }

    #[rstest]
    #[case("ADD(1)")]
    #[case("REMOVE(a)")]
    #[case("add(1,2)")]
    #[case("ADD(1,2,3)")]
    #[case("ADD(99999999999,1)")]
    #[case("")]
    fn given_invalid_text_when_parsing_then_unknown_operation(#[case] input: &str) {
        assert!(matches!(
            input.parse::<EditOp>(),
            Err(DomainError::UnknownOperation(_))
        ));
    }

    #[test]
    fn given_script_when_joining_then_uses_delimiter() {
        let script: EditScript = vec![
            EditOp::Remove { node: 4 },
            EditOp::Add { parent: 2, node: 5 },
        ]
        .into();

        assert_eq!(script.join(", "), "REMOVE(4), ADD(2,5)");
        assert_eq!(script.join("\n"), "REMOVE(4)\nADD(2,5)");
        assert_eq!(script.to_strings(), vec!["REMOVE(4)", "ADD(2,5)"]);
    }

    #[test]
    fn given_script_when_serializing_then_tagged_ops() {
        let script: EditScript = vec![EditOp::Add { parent: 1, node: 2 }].into();

        let json = serde_json::to_string(&script).unwrap();

        assert_eq!(json, r#"[{"op":"add","parent":1,"node":2}]"#);
    }
}
