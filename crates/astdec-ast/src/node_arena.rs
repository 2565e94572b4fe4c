//! NodeArena creation and mutation methods.
//!
//! Creation (`add_*`) wires the parent index of every child handed in, so a
//! freshly built subtree is consistent as soon as it is added. Mutation works on
//! index lists: replacing a member is a splice in the class member list and the
//! removed node is detached (its parent becomes `NodeIndex::NONE`).

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::node_access::{children_of, remap_children};
use serde::Serialize;
use tracing::trace;

/// Owner of every node of one compilation unit.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node and adopt its children.
    pub fn add(&mut self, data: NodeData) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len() as u32);
        let children = children_of(&data);
        self.nodes.push(Node::new(data));
        self.adopt(idx, &children);
        idx
    }

    /// Record the source range of a node (used for diagnostics).
    pub fn set_range(&mut self, idx: NodeIndex, pos: u32, end: u32) {
        if let Some(node) = self.get_mut(idx) {
            node.pos = pos;
            node.end = end;
        }
    }

    fn adopt(&mut self, parent: NodeIndex, children: &[NodeIndex]) {
        for &child in children {
            if let Some(node) = self.get_mut(child) {
                node.parent = parent;
            }
        }
    }

    fn detach(&mut self, idx: NodeIndex) {
        if let Some(node) = self.get_mut(idx) {
            node.parent = NodeIndex::NONE;
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn add_program(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::Program(StatementListData {
            statements: statements.into(),
        }))
    }

    pub fn add_block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::Block(StatementListData {
            statements: statements.into(),
        }))
    }

    pub fn add_expression_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::ExpressionStatement(expression))
    }

    pub fn add_return(&mut self, expression: Option<NodeIndex>) -> NodeIndex {
        self.add(NodeData::ReturnStatement(expression))
    }

    pub fn add_variable(
        &mut self,
        kind: VariableKind,
        name: impl Into<String>,
        initializer: Option<NodeIndex>,
    ) -> NodeIndex {
        self.add(NodeData::VariableStatement(VariableData {
            kind,
            name: name.into(),
            initializer,
        }))
    }

    pub fn add_function_declaration(&mut self, function: FunctionData) -> NodeIndex {
        self.add(NodeData::FunctionDeclaration(function))
    }

    pub fn add_import(
        &mut self,
        source: impl Into<String>,
        specifiers: Vec<ImportSpecifier>,
    ) -> NodeIndex {
        self.add(NodeData::Import(ImportData {
            source: source.into(),
            specifiers,
        }))
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub fn add_class(&mut self, class: ClassData) -> NodeIndex {
        self.add(NodeData::Class(class))
    }

    pub fn add_property(&mut self, property: PropertyData) -> NodeIndex {
        self.add(NodeData::Property(property))
    }

    pub fn add_method(&mut self, method: MethodData) -> NodeIndex {
        self.add(NodeData::Method(method))
    }

    pub fn add_decorator(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::Decorator(DecoratorData { expression }))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn add_identifier(&mut self, name: impl Into<String>) -> NodeIndex {
        self.add(NodeData::Identifier(name.into()))
    }

    pub fn add_private_name(&mut self, name: impl Into<String>) -> NodeIndex {
        self.add(NodeData::PrivateName(name.into()))
    }

    pub fn add_this(&mut self) -> NodeIndex {
        self.add(NodeData::This)
    }

    pub fn add_string(&mut self, value: impl Into<String>) -> NodeIndex {
        self.add(NodeData::StringLiteral(value.into()))
    }

    pub fn add_number(&mut self, text: impl Into<String>) -> NodeIndex {
        self.add(NodeData::NumericLiteral(text.into()))
    }

    pub fn add_raw(&mut self, text: impl Into<String>) -> NodeIndex {
        self.add(NodeData::Raw(text.into()))
    }

    pub fn add_call(&mut self, callee: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::Call(CallData {
            callee,
            arguments: arguments.into(),
        }))
    }

    pub fn add_member(&mut self, object: NodeIndex, property: NodeIndex, computed: bool) -> NodeIndex {
        self.add(NodeData::Member(MemberAccessData {
            object,
            property,
            computed,
        }))
    }

    /// `object.name`
    pub fn add_property_access(&mut self, object: NodeIndex, name: &str) -> NodeIndex {
        let property = self.add_identifier(name);
        self.add_member(object, property, false)
    }

    pub fn add_assign(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex {
        self.add(NodeData::Assign(AssignData { target, value }))
    }

    /// Function expression or arrow, depending on `function.is_arrow`.
    pub fn add_function_expression(&mut self, function: FunctionData) -> NodeIndex {
        self.add(NodeData::Function(function))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// The list of `parent` that holds `child`.
    fn list_containing_mut(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
    ) -> Option<&mut Vec<NodeIndex>> {
        let node = self.get_mut(parent)?;
        let list = match &mut node.data {
            NodeData::Program(data) | NodeData::Block(data) => &mut data.statements,
            NodeData::Class(class) => {
                if class.members.position(child).is_some() {
                    &mut class.members
                } else {
                    &mut class.decorators
                }
            }
            NodeData::Property(property) => &mut property.decorators,
            NodeData::Method(method) => &mut method.decorators,
            NodeData::Call(call) => &mut call.arguments,
            NodeData::Function(function) | NodeData::FunctionDeclaration(function) => {
                &mut function.params
            }
            _ => return None,
        };
        if list.position(child).is_some() {
            Some(&mut list.nodes)
        } else {
            None
        }
    }

    /// Replace `target` in its parent's list by `replacements`, in order.
    ///
    /// Returns the position `target` occupied, or `None` when `target` is not
    /// held in a list (root, detached node, or a single-child slot).
    pub fn replace_with_multiple(
        &mut self,
        target: NodeIndex,
        replacements: &[NodeIndex],
    ) -> Option<usize> {
        let parent = self.get(target)?.parent;
        let list = self.list_containing_mut(parent, target)?;
        let position = list.iter().position(|&n| n == target)?;
        list.splice(position..=position, replacements.iter().copied());
        self.adopt(parent, replacements);
        self.detach(target);
        trace!(
            target = target.0,
            parent = parent.0,
            count = replacements.len(),
            "replace_with_multiple"
        );
        Some(position)
    }

    pub fn replace_with(&mut self, target: NodeIndex, replacement: NodeIndex) -> Option<usize> {
        self.replace_with_multiple(target, &[replacement])
    }

    /// Insert `nodes` immediately before `anchor` in the anchor's parent list.
    pub fn insert_before(&mut self, anchor: NodeIndex, nodes: &[NodeIndex]) -> Option<usize> {
        let parent = self.get(anchor)?.parent;
        let list = self.list_containing_mut(parent, anchor)?;
        let position = list.iter().position(|&n| n == anchor)?;
        list.splice(position..position, nodes.iter().copied());
        self.adopt(parent, nodes);
        trace!(anchor = anchor.0, count = nodes.len(), "insert_before");
        Some(position)
    }

    /// Remove `target` from its parent's list and detach it.
    pub fn remove(&mut self, target: NodeIndex) -> Option<usize> {
        self.replace_with_multiple(target, &[])
    }

    /// Overwrite the decorator list of a class, property or method.
    ///
    /// Decorators that were on the node and are not in `decorators` are detached.
    pub fn set_decorators(&mut self, owner: NodeIndex, decorators: NodeList) -> bool {
        let Some(node) = self.get_mut(owner) else {
            return false;
        };
        let slot = match &mut node.data {
            NodeData::Class(class) => &mut class.decorators,
            NodeData::Property(property) => &mut property.decorators,
            NodeData::Method(method) => &mut method.decorators,
            _ => return false,
        };
        let previous = std::mem::replace(slot, decorators);
        let current = slot.nodes.clone();
        for old in previous.iter() {
            if !current.contains(&old) {
                self.detach(old);
            }
        }
        self.adopt(owner, &current);
        true
    }

    /// Deep copy of the subtree rooted at `idx`. The copy is detached.
    pub fn clone_subtree(&mut self, idx: NodeIndex) -> NodeIndex {
        let Some(node) = self.get(idx) else {
            return NodeIndex::NONE;
        };
        let (pos, end) = (node.pos, node.end);
        let mut data = node.data.clone();
        remap_children(&mut data, &mut |child| self.clone_subtree(child));
        let copy = self.add(data);
        self.set_range(copy, pos, end);
        copy
    }
}

#[cfg(test)]
#[path = "../tests/node_arena.rs"]
mod tests;
