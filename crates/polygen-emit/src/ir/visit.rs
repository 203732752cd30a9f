//! Read-only traversal over the IR.

use super::*;
use std::collections::BTreeSet;

/// A borrowed reference to any IR node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Property(&'a Property),
    Option(&'a ResourceOption),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        match self {
            NodeRef::Program(p) => p.id,
            NodeRef::Stmt(s) => s.id,
            NodeRef::Expr(e) => e.id,
            NodeRef::Property(p) => p.id,
            NodeRef::Option(o) => o.id,
        }
    }

    /// Variant tag, e.g. `"resource"` or `"invoke"`.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeRef::Program(_) => "program",
            NodeRef::Stmt(s) => s.kind.tag(),
            NodeRef::Expr(e) => e.kind.tag(),
            NodeRef::Property(_) => "property",
            NodeRef::Option(_) => "resource option",
        }
    }

    /// Direct children in declaration order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::Program(p) => p.body.iter().map(NodeRef::Stmt).collect(),
            NodeRef::Stmt(s) => match &s.kind {
                StmtKind::Resource(r) => r
                    .properties
                    .iter()
                    .map(NodeRef::Property)
                    .chain(r.options.iter().map(NodeRef::Option))
                    .collect(),
                StmtKind::Binding { value, .. } | StmtKind::Output { value, .. } => {
                    vec![NodeRef::Expr(value)]
                }
                StmtKind::Expr { expr } => vec![NodeRef::Expr(expr)],
            },
            NodeRef::Expr(e) => match &e.kind {
                ExprKind::List { items } => items.iter().map(NodeRef::Expr).collect(),
                ExprKind::Call { args, .. } => args.iter().map(NodeRef::Expr).collect(),
                ExprKind::Object { properties: props }
                | ExprKind::Map { entries: props }
                | ExprKind::Invoke { args: props, .. } => {
                    props.iter().map(NodeRef::Property).collect()
                }
                ExprKind::Null
                | ExprKind::Bool { .. }
                | ExprKind::Int { .. }
                | ExprKind::Number { .. }
                | ExprKind::String { .. }
                | ExprKind::Reference { .. } => Vec::new(),
            },
            NodeRef::Property(p) => vec![NodeRef::Expr(&p.value)],
            NodeRef::Option(o) => vec![NodeRef::Expr(&o.value)],
        }
    }
}

/// Depth-first, pre-order walk of every node in declaration order.
pub fn walk<'a>(program: &'a Program, f: &mut impl FnMut(NodeRef<'a>)) {
    fn go<'a>(node: NodeRef<'a>, f: &mut impl FnMut(NodeRef<'a>)) {
        f(node);
        for child in node.children() {
            go(child, f);
        }
    }
    go(NodeRef::Program(program), f);
}

/// Walk the expressions below (and including) `expr`.
pub fn walk_expr<'a>(expr: &'a Expr, f: &mut impl FnMut(&'a Expr)) {
    fn go<'a>(node: NodeRef<'a>, f: &mut impl FnMut(&'a Expr)) {
        if let NodeRef::Expr(e) = node {
            f(e);
        }
        for child in node.children() {
            go(child, f);
        }
    }
    go(NodeRef::Expr(expr), f);
}

/// Number of nodes in the program, the root included.
pub fn node_count(program: &Program) -> usize {
    let mut count = 0;
    walk(program, &mut |_| count += 1);
    count
}

/// Names of bindings that some expression refers to.
pub fn referenced_bindings(program: &Program) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    walk(program, &mut |node| {
        if let NodeRef::Expr(Expr {
            kind: ExprKind::Reference { binding, .. },
            ..
        }) = node
        {
            names.insert(binding.as_str());
        }
    });
    names
}

/// Builtin function names called anywhere in the program.
pub fn called_functions(program: &Program) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    walk(program, &mut |node| {
        if let NodeRef::Expr(Expr {
            kind: ExprKind::Call { function, .. },
            ..
        }) = node
        {
            names.insert(function.as_str());
        }
    });
    names
}
