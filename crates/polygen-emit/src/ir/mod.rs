//! Typed program IR.
//!
//! A [`Program`] is an ordered list of top-level statements: resource
//! declarations, variable bindings, outputs and bare expressions. Every node
//! carries a [`NodeId`] that the comment model and error reports refer to.
//!
//! The tree has a single root and no back edges. A statement that uses another
//! statement's result does so through [`ExprKind::Reference`], a by-name lookup
//! resolved against bindings declared earlier in program order.
//!
//! Values carry an optional [`Type`] computed by the binder that produced the
//! IR. Emitters consult it where the target language needs it (Go's input
//! wrappers, argument class names); otherwise they go by the expression kind.

mod build;
pub mod visit;

pub use build::Builder;

use crate::comments::CommentMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Stable identity of an IR node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural problems in a program that construction should have prevented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    #[error("node id {0} is used by more than one node")]
    DuplicateNodeId(NodeId),

    #[error("comment attached to unknown node {0}")]
    DanglingComment(NodeId),
}

/// Root of the IR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: NodeId,
    /// Provider packages used by the program.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageRef>,
    pub body: Vec<Stmt>,
    #[serde(default, skip_serializing_if = "CommentMap::is_empty")]
    pub comments: CommentMap,
}

impl Program {
    pub fn new(id: NodeId, body: Vec<Stmt>) -> Self {
        Self {
            id,
            packages: Vec::new(),
            body,
            comments: CommentMap::new(),
        }
    }

    pub fn with_packages(mut self, packages: Vec<PackageRef>) -> Self {
        self.packages = packages;
        self
    }

    pub fn with_comments(mut self, comments: CommentMap) -> Self {
        self.comments = comments;
        self
    }

    /// Look up the declared version of a package.
    pub fn package_version(&self, name: &str) -> Option<&str> {
        self.packages
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.version.as_deref())
    }

    /// Check that node ids are unique and that every comment targets a node.
    pub fn validate(&self) -> Result<(), IrError> {
        let mut seen = HashSet::new();
        let mut duplicate = None;
        visit::walk(self, &mut |node| {
            if !seen.insert(node.id()) && duplicate.is_none() {
                duplicate = Some(node.id());
            }
        });
        if let Some(id) = duplicate {
            return Err(IrError::DuplicateNodeId(id));
        }
        match self.comments.nodes().find(|id| !seen.contains(id)) {
            Some(id) => Err(IrError::DanglingComment(id)),
            None => Ok(()),
        }
    }
}

/// A provider package and the version the program was written against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: version.map(str::to_string),
        }
    }

    /// Major component of the version, if any.
    pub fn major_version(&self) -> Option<u64> {
        let version = self.version.as_deref()?;
        let version = version.strip_prefix('v').unwrap_or(version);
        version.split('.').next()?.parse().ok()
    }
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StmtKind {
    /// `resource name "token" { ... }`
    Resource(ResourceDecl),
    /// `name = value`
    Binding { name: String, value: Expr },
    /// `output name { value = ... }`
    Output { name: String, value: Expr },
    /// A bare expression evaluated for its effect.
    #[serde(rename = "expression")]
    Expr { expr: Expr },
}

impl StmtKind {
    /// Short variant tag used in diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            StmtKind::Resource(_) => "resource",
            StmtKind::Binding { .. } => "binding",
            StmtKind::Output { .. } => "output",
            StmtKind::Expr { .. } => "expression statement",
        }
    }
}

/// A resource instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDecl {
    /// Variable name other statements use to refer to the resource.
    pub name: String,
    /// Type token, `package:module/member:Member`.
    pub token: String,
    /// Name registered with the engine; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_name: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ResourceOption>,
}

impl ResourceDecl {
    pub fn logical_name(&self) -> &str {
        self.logical_name.as_deref().unwrap_or(&self.name)
    }
}

/// A resource option such as `provider` or `protect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceOption {
    pub id: NodeId,
    pub name: OptionName,
    pub value: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionName {
    Provider,
    Parent,
    DependsOn,
    Protect,
    IgnoreChanges,
}

impl OptionName {
    /// Name as written in the source language.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionName::Provider => "provider",
            OptionName::Parent => "parent",
            OptionName::DependsOn => "dependsOn",
            OptionName::Protect => "protect",
            OptionName::IgnoreChanges => "ignoreChanges",
        }
    }
}

/// A named value: an object property, a map entry or an invocation argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: NodeId,
    pub name: String,
    pub value: Expr,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub id: NodeId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
    #[serde(flatten)]
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(id: NodeId, kind: ExprKind) -> Self {
        Self { id, ty: None, kind }
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }

    /// The expression's own type, or `expected` when it has none.
    pub fn type_or<'a>(&'a self, expected: Option<&'a Type>) -> Option<&'a Type> {
        self.ty.as_ref().or(expected)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExprKind {
    Null,
    Bool {
        value: bool,
    },
    Int {
        value: i64,
    },
    Number {
        value: f64,
    },
    String {
        value: String,
    },
    List {
        items: Vec<Expr>,
    },
    /// Object with named properties; its type token (if any) is in `Expr::ty`.
    Object {
        properties: Vec<Property>,
    },
    /// String-keyed dictionary.
    Map {
        entries: Vec<Property>,
    },
    /// Access to an earlier binding, optionally followed by a property path.
    Reference {
        binding: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        path: Vec<PathSegment>,
    },
    /// Data-source invocation, `invoke("token", { args })`.
    Invoke {
        token: String,
        #[serde(default)]
        args: Vec<Property>,
    },
    /// Builtin function call such as `secret(x)`.
    Call {
        function: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

impl ExprKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ExprKind::Null => "null",
            ExprKind::Bool { .. } => "bool",
            ExprKind::Int { .. } => "int",
            ExprKind::Number { .. } => "number",
            ExprKind::String { .. } => "string",
            ExprKind::List { .. } => "list",
            ExprKind::Object { .. } => "object",
            ExprKind::Map { .. } => "map",
            ExprKind::Reference { .. } => "reference",
            ExprKind::Invoke { .. } => "invoke",
            ExprKind::Call { .. } => "call",
        }
    }
}

/// One step of a reference path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(i64),
    Property(String),
}

/// Binder-computed type of a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Type {
    String,
    Int,
    Number,
    Bool,
    Any,
    List(Box<Type>),
    Map(Box<Type>),
    /// Object type identified by its schema token.
    Object(String),
    Optional(Box<Type>),
}

impl Type {
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn map(element: Type) -> Self {
        Type::Map(Box::new(element))
    }

    pub fn object(token: impl Into<String>) -> Self {
        Type::Object(token.into())
    }

    pub fn optional(inner: Type) -> Self {
        Type::Optional(Box::new(inner))
    }

    /// Strip an `Optional` wrapper, reporting whether one was present.
    pub fn unwrap_optional(&self) -> (&Type, bool) {
        match self {
            Type::Optional(inner) => (inner.unwrap_optional().0, true),
            other => (other, false),
        }
    }

    /// Element type of a list or map.
    pub fn element(&self) -> Option<&Type> {
        match self.unwrap_optional().0 {
            Type::List(t) | Type::Map(t) => Some(t),
            _ => None,
        }
    }

    /// Object token, looking through `Optional`.
    pub fn object_token(&self) -> Option<&str> {
        match self.unwrap_optional().0 {
            Type::Object(token) => Some(token),
            _ => None,
        }
    }
}
