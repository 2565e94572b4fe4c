//! Read access to the arena: typed getters, child enumeration and the member
//! and decorator queries the transforms are built on.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::node_arena::NodeArena;

/// Children of a node in source order (decorators before keys, keys before values).
pub fn children_of(data: &NodeData) -> Vec<NodeIndex> {
    let mut children = Vec::new();
    match data {
        NodeData::Program(list) | NodeData::Block(list) => {
            children.extend(list.statements.iter());
        }
        NodeData::ExpressionStatement(expr) => children.push(*expr),
        NodeData::ReturnStatement(expr) => children.extend(*expr),
        NodeData::VariableStatement(var) => children.extend(var.initializer),
        NodeData::FunctionDeclaration(func) | NodeData::Function(func) => {
            children.extend(func.params.iter());
            children.push(func.body);
        }
        NodeData::Import(_) => {}
        NodeData::Class(class) => {
            children.extend(class.decorators.iter());
            children.extend(class.super_class);
            children.extend(class.members.iter());
        }
        NodeData::Property(prop) => {
            children.extend(prop.decorators.iter());
            children.push(prop.key);
            children.extend(prop.value);
        }
        NodeData::Method(method) => {
            children.extend(method.decorators.iter());
            children.push(method.key);
            children.extend(method.params.iter());
            children.push(method.body);
        }
        NodeData::Decorator(dec) => children.push(dec.expression),
        NodeData::Call(call) => {
            children.push(call.callee);
            children.extend(call.arguments.iter());
        }
        NodeData::Member(access) => {
            children.push(access.object);
            children.push(access.property);
        }
        NodeData::Assign(assign) => {
            children.push(assign.target);
            children.push(assign.value);
        }
        NodeData::Identifier(_)
        | NodeData::PrivateName(_)
        | NodeData::This
        | NodeData::StringLiteral(_)
        | NodeData::NumericLiteral(_)
        | NodeData::Raw(_) => {}
    }
    children.retain(|c| c.is_some());
    children
}

/// Rewrite every child index of `data` through `f`.
pub fn remap_children(data: &mut NodeData, f: &mut dyn FnMut(NodeIndex) -> NodeIndex) {
    fn list(nodes: &mut NodeList, f: &mut dyn FnMut(NodeIndex) -> NodeIndex) {
        for slot in &mut nodes.nodes {
            *slot = f(*slot);
        }
    }
    fn opt(slot: &mut Option<NodeIndex>, f: &mut dyn FnMut(NodeIndex) -> NodeIndex) {
        if let Some(idx) = slot {
            *idx = f(*idx);
        }
    }

    match data {
        NodeData::Program(l) | NodeData::Block(l) => list(&mut l.statements, f),
        NodeData::ExpressionStatement(expr) => *expr = f(*expr),
        NodeData::ReturnStatement(expr) => opt(expr, f),
        NodeData::VariableStatement(var) => opt(&mut var.initializer, f),
        NodeData::FunctionDeclaration(func) | NodeData::Function(func) => {
            list(&mut func.params, f);
            func.body = f(func.body);
        }
        NodeData::Import(_) => {}
        NodeData::Class(class) => {
            list(&mut class.decorators, f);
            opt(&mut class.super_class, f);
            list(&mut class.members, f);
        }
        NodeData::Property(prop) => {
            list(&mut prop.decorators, f);
            prop.key = f(prop.key);
            opt(&mut prop.value, f);
        }
        NodeData::Method(method) => {
            list(&mut method.decorators, f);
            method.key = f(method.key);
            list(&mut method.params, f);
            method.body = f(method.body);
        }
        NodeData::Decorator(dec) => dec.expression = f(dec.expression),
        NodeData::Call(call) => {
            call.callee = f(call.callee);
            list(&mut call.arguments, f);
        }
        NodeData::Member(access) => {
            access.object = f(access.object);
            access.property = f(access.property);
        }
        NodeData::Assign(assign) => {
            assign.target = f(assign.target);
            assign.value = f(assign.value);
        }
        NodeData::Identifier(_)
        | NodeData::PrivateName(_)
        | NodeData::This
        | NodeData::StringLiteral(_)
        | NodeData::NumericLiteral(_)
        | NodeData::Raw(_) => {}
    }
}

impl NodeArena {
    #[inline]
    pub fn get(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx.0 as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(idx.0 as usize)
    }

    pub fn kind(&self, idx: NodeIndex) -> Option<NodeKind> {
        self.get(idx).map(Node::kind)
    }

    pub fn parent(&self, idx: NodeIndex) -> NodeIndex {
        self.get(idx).map_or(NodeIndex::NONE, |n| n.parent)
    }

    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.get(idx).map(|n| children_of(&n.data)).unwrap_or_default()
    }

    // =========================================================================
    // Typed getters
    // =========================================================================

    pub fn get_statements(&self, idx: NodeIndex) -> Option<&NodeList> {
        match &self.get(idx)?.data {
            NodeData::Program(list) | NodeData::Block(list) => Some(&list.statements),
            _ => None,
        }
    }

    pub fn get_class(&self, idx: NodeIndex) -> Option<&ClassData> {
        match &self.get(idx)?.data {
            NodeData::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn get_property(&self, idx: NodeIndex) -> Option<&PropertyData> {
        match &self.get(idx)?.data {
            NodeData::Property(prop) => Some(prop),
            _ => None,
        }
    }

    pub fn get_method(&self, idx: NodeIndex) -> Option<&MethodData> {
        match &self.get(idx)?.data {
            NodeData::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn get_decorator(&self, idx: NodeIndex) -> Option<&DecoratorData> {
        match &self.get(idx)?.data {
            NodeData::Decorator(dec) => Some(dec),
            _ => None,
        }
    }

    /// Function declaration, function expression or arrow.
    pub fn get_function(&self, idx: NodeIndex) -> Option<&FunctionData> {
        match &self.get(idx)?.data {
            NodeData::Function(func) | NodeData::FunctionDeclaration(func) => Some(func),
            _ => None,
        }
    }

    pub fn get_call(&self, idx: NodeIndex) -> Option<&CallData> {
        match &self.get(idx)?.data {
            NodeData::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn identifier_text(&self, idx: NodeIndex) -> Option<&str> {
        match &self.get(idx)?.data {
            NodeData::Identifier(name) => Some(name),
            _ => None,
        }
    }

    // =========================================================================
    // Tree queries
    // =========================================================================

    /// Nearest strict ancestor of `idx` matching `predicate`.
    pub fn find_parent(
        &self,
        idx: NodeIndex,
        predicate: impl Fn(&Node) -> bool,
    ) -> Option<NodeIndex> {
        let mut current = self.parent(idx);
        while current.is_some() {
            let node = self.get(current)?;
            if predicate(node) {
                return Some(current);
            }
            current = node.parent;
        }
        None
    }

    /// Nearest class declaration or expression enclosing `idx`.
    pub fn enclosing_class(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.find_parent(idx, |node| matches!(node.data, NodeData::Class(_)))
    }

    /// The statement (ancestor-or-self) that sits directly in a program or block.
    pub fn enclosing_statement(&self, idx: NodeIndex) -> Option<NodeIndex> {
        let mut current = idx;
        while current.is_some() {
            let parent = self.parent(current);
            if self.get_statements(parent).is_some() {
                return Some(current);
            }
            current = parent;
        }
        None
    }

    // =========================================================================
    // Class members
    // =========================================================================

    pub fn is_class_member(&self, idx: NodeIndex) -> bool {
        matches!(
            self.kind(idx),
            Some(NodeKind::Property) | Some(NodeKind::Method)
        )
    }

    /// `(key, computed, is_static)` of a property or method.
    pub fn member_key(&self, idx: NodeIndex) -> Option<(NodeIndex, bool, bool)> {
        match &self.get(idx)?.data {
            NodeData::Property(prop) => Some((prop.key, prop.computed, prop.is_static)),
            NodeData::Method(method) => Some((method.key, method.computed, method.is_static)),
            _ => None,
        }
    }

    /// Whether the member is keyed by a `#private` name.
    pub fn is_private_member(&self, idx: NodeIndex) -> bool {
        self.member_key(idx)
            .is_some_and(|(key, _, _)| self.kind(key) == Some(NodeKind::PrivateName))
    }

    /// Textual name of a member key: identifier or private name (without `#`),
    /// string literal value, or numeric literal text. Computed keys only have a
    /// name when they are one of those shapes.
    pub fn member_name(&self, idx: NodeIndex) -> Option<String> {
        let (key, _, _) = self.member_key(idx)?;
        match &self.get(key)?.data {
            NodeData::Identifier(name)
            | NodeData::PrivateName(name)
            | NodeData::StringLiteral(name)
            | NodeData::NumericLiteral(name) => Some(name.clone()),
            _ => None,
        }
    }

    /// Decorators of a class, property or method.
    pub fn decorators_of(&self, idx: NodeIndex) -> Option<&NodeList> {
        match &self.get(idx)?.data {
            NodeData::Class(class) => Some(&class.decorators),
            NodeData::Property(prop) => Some(&prop.decorators),
            NodeData::Method(method) => Some(&method.decorators),
            _ => None,
        }
    }

    // =========================================================================
    // Decorators
    // =========================================================================

    /// Identifier a decorator is referenced by: `@name` or `@name(...)`.
    pub fn decorator_name(&self, idx: NodeIndex) -> Option<&str> {
        let dec = self.get_decorator(idx)?;
        match &self.get(dec.expression)?.data {
            NodeData::Identifier(name) => Some(name),
            NodeData::Call(call) => self.identifier_text(call.callee),
            _ => None,
        }
    }

    /// Arguments of a call-form decorator; empty for `@name`.
    pub fn decorator_arguments(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.get_decorator(idx)
            .and_then(|dec| self.get_call(dec.expression))
            .map(|call| call.arguments.nodes.clone())
            .unwrap_or_default()
    }
}
