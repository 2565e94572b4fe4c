//! Node shapes of the decorator syntax tree.
//!
//! The tree only models what the decorator transforms read or produce: class
//! declarations and their members, decorators, the statements that can hold a
//! class or a hoisted helper, and a small expression language. Anything else a
//! host needs to carry through untouched can be stored as `NodeData::Raw`.

use crate::base::{NodeIndex, NodeList};
use serde::Serialize;

/// A node in the arena: its payload plus tree bookkeeping.
#[derive(Clone, Debug, Serialize)]
pub struct Node {
    pub data: NodeData,
    /// Parent node, `NodeIndex::NONE` for the root or a detached node.
    pub parent: NodeIndex,
    /// Start position in the original source (0 for synthesized nodes).
    pub pos: u32,
    /// End position in the original source (0 for synthesized nodes).
    pub end: u32,
}

impl Node {
    pub const fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeIndex::NONE,
            pos: 0,
            end: 0,
        }
    }

    pub const fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum NodeData {
    // =========================================================================
    // Statements
    // =========================================================================
    Program(StatementListData),
    Block(StatementListData),
    ExpressionStatement(NodeIndex),
    ReturnStatement(Option<NodeIndex>),
    VariableStatement(VariableData),
    FunctionDeclaration(FunctionData),
    Import(ImportData),

    // =========================================================================
    // Classes
    // =========================================================================
    /// Class declaration (`is_expression == false`) or class expression.
    Class(ClassData),
    Property(PropertyData),
    Method(MethodData),
    Decorator(DecoratorData),

    // =========================================================================
    // Expressions
    // =========================================================================
    Identifier(String),
    /// `#name`; the stored text excludes the `#`.
    PrivateName(String),
    This,
    StringLiteral(String),
    NumericLiteral(String),
    /// Opaque expression text, emitted verbatim.
    Raw(String),
    Call(CallData),
    Member(MemberAccessData),
    Assign(AssignData),
    /// Function or arrow function expression.
    Function(FunctionData),
}

/// Discriminant of `NodeData`, cheap to compare and log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Program,
    Block,
    ExpressionStatement,
    ReturnStatement,
    VariableStatement,
    FunctionDeclaration,
    Import,
    ClassDeclaration,
    ClassExpression,
    Property,
    Method,
    Decorator,
    Identifier,
    PrivateName,
    This,
    StringLiteral,
    NumericLiteral,
    Raw,
    Call,
    Member,
    Assign,
    FunctionExpression,
    ArrowFunction,
}

impl NodeData {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Program(_) => NodeKind::Program,
            Self::Block(_) => NodeKind::Block,
            Self::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            Self::ReturnStatement(_) => NodeKind::ReturnStatement,
            Self::VariableStatement(_) => NodeKind::VariableStatement,
            Self::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            Self::Import(_) => NodeKind::Import,
            Self::Class(class) if class.is_expression => NodeKind::ClassExpression,
            Self::Class(_) => NodeKind::ClassDeclaration,
            Self::Property(_) => NodeKind::Property,
            Self::Method(_) => NodeKind::Method,
            Self::Decorator(_) => NodeKind::Decorator,
            Self::Identifier(_) => NodeKind::Identifier,
            Self::PrivateName(_) => NodeKind::PrivateName,
            Self::This => NodeKind::This,
            Self::StringLiteral(_) => NodeKind::StringLiteral,
            Self::NumericLiteral(_) => NodeKind::NumericLiteral,
            Self::Raw(_) => NodeKind::Raw,
            Self::Call(_) => NodeKind::Call,
            Self::Member(_) => NodeKind::Member,
            Self::Assign(_) => NodeKind::Assign,
            Self::Function(func) if func.is_arrow => NodeKind::ArrowFunction,
            Self::Function(_) => NodeKind::FunctionExpression,
        }
    }
}

/// Statements of a program or block.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StatementListData {
    pub statements: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// Single-declarator variable statement: `const name = initializer;`
#[derive(Clone, Debug, Serialize)]
pub struct VariableData {
    pub kind: VariableKind,
    pub name: String,
    pub initializer: Option<NodeIndex>,
}

/// Shared payload of function declarations, function expressions and arrows.
#[derive(Clone, Debug, Default, Serialize)]
pub struct FunctionData {
    pub name: Option<String>,
    pub params: NodeList,
    /// A `Block`, or any expression for concise arrow bodies.
    pub body: NodeIndex,
    pub is_arrow: bool,
    pub is_generator: bool,
    pub is_async: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ImportSpecifier {
    /// `import local from "source"`
    Default { local: String },
    /// `import * as local from "source"`
    Namespace { local: String },
    /// `import { imported as local } from "source"`
    Named { imported: String, local: String },
}

impl ImportSpecifier {
    pub fn local(&self) -> &str {
        match self {
            Self::Default { local } | Self::Namespace { local } | Self::Named { local, .. } => {
                local
            }
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportData {
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ClassData {
    /// Binding name; `None` for anonymous class expressions.
    pub name: Option<String>,
    pub super_class: Option<NodeIndex>,
    pub members: NodeList,
    pub decorators: NodeList,
    pub is_expression: bool,
}

/// Class field. Private when `key` is a `PrivateName`.
#[derive(Clone, Debug, Serialize)]
pub struct PropertyData {
    pub key: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
    pub value: Option<NodeIndex>,
    pub decorators: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

/// Class method or accessor. Private when `key` is a `PrivateName`.
#[derive(Clone, Debug, Serialize)]
pub struct MethodData {
    pub kind: MethodKind,
    pub key: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
    pub params: NodeList,
    /// Always a `Block`.
    pub body: NodeIndex,
    pub is_generator: bool,
    pub is_async: bool,
    pub decorators: NodeList,
}

/// `@expression`; the expression is an identifier, a member access or a call.
#[derive(Clone, Debug, Serialize)]
pub struct DecoratorData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallData {
    pub callee: NodeIndex,
    pub arguments: NodeList,
}

/// `object.property`, `object.#property` or `object[property]` when computed.
#[derive(Clone, Debug, Serialize)]
pub struct MemberAccessData {
    pub object: NodeIndex,
    pub property: NodeIndex,
    pub computed: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AssignData {
    pub target: NodeIndex,
    pub value: NodeIndex,
}
