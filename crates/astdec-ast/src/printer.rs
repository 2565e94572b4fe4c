//! JavaScript printer for the decorator syntax tree.
//!
//! Emits one statement per line with four-space indentation. Class members are
//! printed one per line, each preceded by its decorators on their own lines.
//! The printer does no reformatting beyond that; it is what the host hands to
//! its code generation step and what the golden tests compare against.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::node_arena::NodeArena;

pub struct Printer<'a> {
    arena: &'a NodeArena,
    output: String,
    indent_level: u32,
}

impl<'a> Printer<'a> {
    pub const fn new(arena: &'a NodeArena) -> Self {
        Self {
            arena,
            output: String::new(),
            indent_level: 0,
        }
    }

    /// Print `idx` and return a fresh string.
    pub fn emit_to_string(arena: &NodeArena, idx: NodeIndex) -> String {
        let mut printer = Printer::new(arena);
        printer.emit(idx);
        printer.output
    }

    /// Print `idx` into the buffer and return the whole buffer.
    pub fn emit(&mut self, idx: NodeIndex) -> &str {
        self.emit_node(idx);
        &self.output
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str("    ");
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn emit_node(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };
        match &node.data {
            NodeData::Program(list) => {
                for (i, stmt) in list.statements.iter().enumerate() {
                    if i > 0 {
                        self.write_line();
                    }
                    self.write_indent();
                    self.emit_node(stmt);
                }
            }
            NodeData::Block(list) => self.emit_block(&list.statements),
            NodeData::ExpressionStatement(expr) => {
                self.emit_node(*expr);
                self.write(";");
            }
            NodeData::ReturnStatement(expr) => {
                self.write("return");
                if let Some(expr) = expr {
                    self.write(" ");
                    self.emit_node(*expr);
                }
                self.write(";");
            }
            NodeData::VariableStatement(var) => {
                self.write(var.kind.keyword());
                self.write(" ");
                self.write(&var.name);
                if let Some(init) = var.initializer {
                    self.write(" = ");
                    self.emit_node(init);
                }
                self.write(";");
            }
            NodeData::FunctionDeclaration(func) => self.emit_function(func),
            NodeData::Import(import) => self.emit_import(import),
            NodeData::Class(class) => self.emit_class(class),
            NodeData::Property(prop) => self.emit_property(prop),
            NodeData::Method(method) => self.emit_method(method),
            NodeData::Decorator(dec) => {
                self.write("@");
                self.emit_node(dec.expression);
            }
            NodeData::Identifier(name) | NodeData::Raw(name) | NodeData::NumericLiteral(name) => {
                self.write(name)
            }
            NodeData::PrivateName(name) => {
                self.write("#");
                self.write(name);
            }
            NodeData::This => self.write("this"),
            NodeData::StringLiteral(value) => self.emit_string(value),
            NodeData::Call(call) => {
                self.emit_operand(call.callee);
                self.write("(");
                self.emit_comma_separated(&call.arguments);
                self.write(")");
            }
            NodeData::Member(access) => {
                self.emit_operand(access.object);
                if access.computed {
                    self.write("[");
                    self.emit_node(access.property);
                    self.write("]");
                } else {
                    self.write(".");
                    self.emit_node(access.property);
                }
            }
            NodeData::Assign(assign) => {
                self.emit_node(assign.target);
                self.write(" = ");
                self.emit_node(assign.value);
            }
            NodeData::Function(func) => self.emit_function(func),
        }
    }

    /// Emit an expression used as callee or member object, parenthesized when
    /// it would otherwise bind differently.
    fn emit_operand(&mut self, idx: NodeIndex) {
        let needs_parens = matches!(
            self.arena.kind(idx),
            Some(
                NodeKind::FunctionExpression
                    | NodeKind::ArrowFunction
                    | NodeKind::Assign
                    | NodeKind::ClassExpression
                    | NodeKind::NumericLiteral
            )
        );
        if needs_parens {
            self.write("(");
            self.emit_node(idx);
            self.write(")");
        } else {
            self.emit_node(idx);
        }
    }

    fn emit_comma_separated(&mut self, nodes: &NodeList) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_node(node);
        }
    }

    fn emit_block(&mut self, statements: &NodeList) {
        if statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in statements.iter() {
            self.write_indent();
            self.emit_node(stmt);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_string(&mut self, value: &str) {
        self.output.push('"');
        for ch in value.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    fn emit_import(&mut self, import: &ImportData) {
        self.write("import ");
        let mut named = Vec::new();
        let mut wrote_clause = false;
        for spec in &import.specifiers {
            match spec {
                ImportSpecifier::Default { local } => {
                    if wrote_clause {
                        self.write(", ");
                    }
                    self.write(local);
                    wrote_clause = true;
                }
                ImportSpecifier::Namespace { local } => {
                    if wrote_clause {
                        self.write(", ");
                    }
                    self.write("* as ");
                    self.write(local);
                    wrote_clause = true;
                }
                ImportSpecifier::Named { imported, local } => named.push((imported, local)),
            }
        }
        if !named.is_empty() {
            if wrote_clause {
                self.write(", ");
            }
            self.write("{ ");
            for (i, (imported, local)) in named.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.write(imported);
                if imported != local {
                    self.write(" as ");
                    self.write(local);
                }
            }
            self.write(" }");
            wrote_clause = true;
        }
        if wrote_clause {
            self.write(" from ");
        }
        self.emit_string(&import.source);
        self.write(";");
    }

    fn emit_function(&mut self, func: &FunctionData) {
        if func.is_async {
            self.write("async ");
        }
        if func.is_arrow {
            self.write("(");
            self.emit_comma_separated(&func.params);
            self.write(") => ");
            self.emit_node(func.body);
            return;
        }
        self.write("function");
        if func.is_generator {
            self.write("*");
        }
        if let Some(name) = &func.name {
            self.write(" ");
            self.write(name);
        }
        self.write("(");
        self.emit_comma_separated(&func.params);
        self.write(") ");
        self.emit_node(func.body);
    }

    fn emit_class(&mut self, class: &ClassData) {
        // Class-level decorators of a declaration go on their own lines.
        for dec in class.decorators.iter() {
            self.emit_node(dec);
            self.write_line();
            self.write_indent();
        }
        self.write("class");
        if let Some(name) = &class.name {
            self.write(" ");
            self.write(name);
        }
        if let Some(base) = class.super_class {
            self.write(" extends ");
            self.emit_node(base);
        }
        if class.members.is_empty() {
            self.write(" {}");
            return;
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        for member in class.members.iter() {
            if let Some(decorators) = self.arena.decorators_of(member) {
                for dec in decorators.iter() {
                    self.write_indent();
                    self.emit_node(dec);
                    self.write_line();
                }
            }
            self.write_indent();
            self.emit_node(member);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_member_key(&mut self, key: NodeIndex, computed: bool) {
        if computed {
            self.write("[");
            self.emit_node(key);
            self.write("]");
        } else {
            self.emit_node(key);
        }
    }

    fn emit_property(&mut self, prop: &PropertyData) {
        if prop.is_static {
            self.write("static ");
        }
        self.emit_member_key(prop.key, prop.computed);
        if let Some(value) = prop.value {
            self.write(" = ");
            self.emit_node(value);
        }
        self.write(";");
    }

    fn emit_method(&mut self, method: &MethodData) {
        if method.is_static {
            self.write("static ");
        }
        match method.kind {
            MethodKind::Get => self.write("get "),
            MethodKind::Set => self.write("set "),
            MethodKind::Method | MethodKind::Constructor => {
                if method.is_async {
                    self.write("async ");
                }
                if method.is_generator {
                    self.write("*");
                }
            }
        }
        self.emit_member_key(method.key, method.computed);
        self.write("(");
        self.emit_comma_separated(&method.params);
        self.write(") ");
        self.emit_node(method.body);
    }
}
