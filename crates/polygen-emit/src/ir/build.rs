//! Programmatic IR construction.

use super::*;
use std::cell::Cell;

/// Allocates node ids while building IR by hand.
///
/// Methods take `&self` so builders can be nested:
///
/// ```
/// use polygen_emit::ir::Builder;
///
/// let b = Builder::new();
/// let stmt = b.binding("names", b.list(vec![b.string("a"), b.string("b")]));
/// let program = b.program(vec![stmt]);
/// assert!(program.validate().is_ok());
/// ```
#[derive(Debug)]
pub struct Builder {
    next: Cell<u32>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// Allocate a fresh id.
    pub fn id(&self) -> NodeId {
        let id = self.next.get();
        self.next.set(id + 1);
        NodeId(id)
    }

    pub fn program(&self, body: Vec<Stmt>) -> Program {
        Program::new(self.id(), body)
    }

    pub fn stmt(&self, kind: StmtKind) -> Stmt {
        Stmt {
            id: self.id(),
            kind,
        }
    }

    pub fn resource(&self, name: &str, token: &str, properties: Vec<Property>) -> Stmt {
        self.stmt(StmtKind::Resource(ResourceDecl {
            name: name.to_string(),
            token: token.to_string(),
            logical_name: None,
            properties,
            options: Vec::new(),
        }))
    }

    pub fn resource_with_options(
        &self,
        name: &str,
        token: &str,
        properties: Vec<Property>,
        options: Vec<ResourceOption>,
    ) -> Stmt {
        self.stmt(StmtKind::Resource(ResourceDecl {
            name: name.to_string(),
            token: token.to_string(),
            logical_name: None,
            properties,
            options,
        }))
    }

    pub fn option(&self, name: OptionName, value: Expr) -> ResourceOption {
        ResourceOption {
            id: self.id(),
            name,
            value,
        }
    }

    pub fn binding(&self, name: &str, value: Expr) -> Stmt {
        self.stmt(StmtKind::Binding {
            name: name.to_string(),
            value,
        })
    }

    pub fn output(&self, name: &str, value: Expr) -> Stmt {
        self.stmt(StmtKind::Output {
            name: name.to_string(),
            value,
        })
    }

    pub fn expr_stmt(&self, expr: Expr) -> Stmt {
        self.stmt(StmtKind::Expr { expr })
    }

    pub fn prop(&self, name: &str, value: Expr) -> Property {
        Property {
            id: self.id(),
            name: name.to_string(),
            value,
        }
    }

    pub fn expr(&self, kind: ExprKind) -> Expr {
        Expr::new(self.id(), kind)
    }

    pub fn null(&self) -> Expr {
        self.expr(ExprKind::Null)
    }

    pub fn bool(&self, value: bool) -> Expr {
        self.expr(ExprKind::Bool { value })
    }

    pub fn int(&self, value: i64) -> Expr {
        self.expr(ExprKind::Int { value })
    }

    pub fn number(&self, value: f64) -> Expr {
        self.expr(ExprKind::Number { value })
    }

    pub fn string(&self, value: &str) -> Expr {
        self.expr(ExprKind::String {
            value: value.to_string(),
        })
    }

    pub fn list(&self, items: Vec<Expr>) -> Expr {
        self.expr(ExprKind::List { items })
    }

    pub fn object(&self, properties: Vec<Property>) -> Expr {
        self.expr(ExprKind::Object { properties })
    }

    pub fn map(&self, entries: Vec<Property>) -> Expr {
        self.expr(ExprKind::Map { entries })
    }

    /// Reference to `binding` followed by property names.
    pub fn reference(&self, binding: &str, path: &[&str]) -> Expr {
        self.expr(ExprKind::Reference {
            binding: binding.to_string(),
            path: path
                .iter()
                .map(|p| PathSegment::Property(p.to_string()))
                .collect(),
        })
    }

    pub fn invoke(&self, token: &str, args: Vec<Property>) -> Expr {
        self.expr(ExprKind::Invoke {
            token: token.to_string(),
            args,
        })
    }

    pub fn call(&self, function: &str, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::Call {
            function: function.to_string(),
            args,
        })
    }
}
