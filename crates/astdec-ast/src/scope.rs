//! Lexical scope queries and unique identifier generation.
//!
//! `resolve_binding` answers "what does this name refer to at this node" by
//! walking the enclosing statement lists and function parameter lists.
//! `UidGenerator` hands out names that cannot clash with anything already in the
//! tree; it is owned by one compilation pass and never shared between passes.

use crate::base::NodeIndex;
use crate::node::{ImportSpecifier, NodeData, VariableKind};
use crate::node_arena::NodeArena;
use rustc_hash::FxHashSet;
use tracing::trace;

/// What an identifier resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    /// `function name() {}`
    Function(NodeIndex),
    /// `const name = init;`
    Variable {
        declaration: NodeIndex,
        kind: VariableKind,
        initializer: Option<NodeIndex>,
    },
    /// `class Name {}`
    Class(NodeIndex),
    /// A binding introduced by an import declaration.
    Import {
        declaration: NodeIndex,
        source: String,
        specifier: ImportSpecifier,
    },
    /// A parameter of an enclosing function or method.
    Parameter(NodeIndex),
}

/// Resolve `name` as seen from `from`, innermost scope first.
pub fn resolve_binding(arena: &NodeArena, from: NodeIndex, name: &str) -> Option<Binding> {
    let mut current = from;
    while current.is_some() {
        let node = arena.get(current)?;
        match &node.data {
            NodeData::Program(list) | NodeData::Block(list) => {
                for stmt in list.statements.iter() {
                    if let Some(binding) = declared_binding(arena, stmt, name) {
                        return Some(binding);
                    }
                }
            }
            NodeData::Function(func) | NodeData::FunctionDeclaration(func) => {
                if let Some(param) = func
                    .params
                    .iter()
                    .find(|&p| arena.identifier_text(p) == Some(name))
                {
                    return Some(Binding::Parameter(param));
                }
            }
            NodeData::Method(method) => {
                if let Some(param) = method
                    .params
                    .iter()
                    .find(|&p| arena.identifier_text(p) == Some(name))
                {
                    return Some(Binding::Parameter(param));
                }
            }
            _ => {}
        }
        current = node.parent;
    }
    None
}

fn declared_binding(arena: &NodeArena, stmt: NodeIndex, name: &str) -> Option<Binding> {
    match &arena.get(stmt)?.data {
        NodeData::FunctionDeclaration(func) if func.name.as_deref() == Some(name) => {
            Some(Binding::Function(stmt))
        }
        NodeData::VariableStatement(var) if var.name == name => Some(Binding::Variable {
            declaration: stmt,
            kind: var.kind,
            initializer: var.initializer,
        }),
        NodeData::Class(class) if !class.is_expression && class.name.as_deref() == Some(name) => {
            Some(Binding::Class(stmt))
        }
        NodeData::Import(import) => import
            .specifiers
            .iter()
            .find(|spec| spec.local() == name)
            .map(|spec| Binding::Import {
                declaration: stmt,
                source: import.source.clone(),
                specifier: spec.clone(),
            }),
        _ => None,
    }
}

/// Turn an arbitrary string into a valid identifier: characters that cannot
/// appear in an identifier are dropped and the following letter is upper-cased
/// (`my-prop` becomes `myProp`); a leading digit gets a `_` prefix.
pub fn to_identifier(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;
    for ch in input.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '$' {
            if upper_next && !out.is_empty() {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    if out.is_empty() {
        return "_".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Identifier-like words of opaque source text. Words inside string literals
/// and comments are included too.
fn identifier_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|word| word.starts_with(|c: char| !c.is_ascii_digit()))
}

/// Per-pass allocator of collision-free identifiers.
///
/// Names follow the `_hint`, `_hint2`, `_hint3`, ... sequence. A name is
/// skipped when any identifier, declaration, import, word of `Raw` text or
/// previously generated name already uses it.
#[derive(Clone, Debug, Default)]
pub struct UidGenerator {
    used: FxHashSet<String>,
}

impl UidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the generator with every name appearing under `root`.
    pub fn for_tree(arena: &NodeArena, root: NodeIndex) -> Self {
        let mut uids = Self::new();
        uids.collect(arena, root);
        uids
    }

    fn collect(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        match &node.data {
            NodeData::Identifier(name) => {
                self.used.insert(name.clone());
            }
            NodeData::VariableStatement(var) => {
                self.used.insert(var.name.clone());
            }
            NodeData::FunctionDeclaration(func) | NodeData::Function(func) => {
                if let Some(name) = &func.name {
                    self.used.insert(name.clone());
                }
            }
            NodeData::Class(class) => {
                if let Some(name) = &class.name {
                    self.used.insert(name.clone());
                }
            }
            NodeData::Import(import) => {
                for spec in &import.specifiers {
                    self.used.insert(spec.local().to_string());
                }
            }
            NodeData::Raw(text) => {
                self.used.extend(identifier_tokens(text).map(str::to_string));
            }
            _ => {}
        }
        for child in arena.children(idx) {
            self.collect(arena, child);
        }
    }

    /// Mark `name` as taken.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Allocate a fresh identifier derived from `hint`.
    pub fn generate(&mut self, hint: &str) -> String {
        let base = to_identifier(hint);
        let base = base.trim_start_matches('_').trim_end_matches(|c: char| c.is_ascii_digit());
        let base = if base.is_empty() { "temp" } else { base };

        let mut i = 1u32;
        loop {
            let candidate = if i > 1 {
                format!("_{base}{i}")
            } else {
                format!("_{base}")
            };
            if self.used.insert(candidate.clone()) {
                trace!(hint, uid = %candidate, "generated uid");
                return candidate;
            }
            i += 1;
        }
    }
}

#[cfg(test)]
#[path = "../tests/scope.rs"]
mod tests;
