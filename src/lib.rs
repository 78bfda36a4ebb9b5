//! Rooted integer trees and the minimal edit scripts between them.
//!
//! A [`domain::Tree`] is decoded from a bracketed edge list such as
//! `[1,2][1,3][2,4]`, mutated with `add`/`remove`, and compared with another
//! tree sharing its root through [`domain::Tree::transform_to`], which yields
//! an ordered script of `ADD(parent,node)` and `REMOVE(node)` steps.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
