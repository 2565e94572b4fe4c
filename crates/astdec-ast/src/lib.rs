//! Syntax tree for the astdec decorator transforms.
//!
//! This crate provides:
//! - The arena (`NodeArena`) and index types (`NodeIndex`, `NodeList`)
//! - Node shapes for classes, members, decorators, statements and expressions
//! - In-place splicing (`replace_with_multiple`, `insert_before`)
//! - Lexical binding lookup and the per-pass `UidGenerator`
//! - A JavaScript `Printer`

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::*;

pub mod node_access;
pub mod node_arena;
pub use node_arena::NodeArena;

pub mod scope;
pub use scope::{Binding, UidGenerator, resolve_binding, to_identifier};

pub mod printer;
pub use printer::Printer;
