//! Formatting helpers shared by all emitters.
//!
//! Everything here is either a pure function or operates on an explicit
//! [`EmissionContext`] owned by one emitter run; there is no global state.

pub mod builtins;
mod context;
pub mod literals;
pub mod names;

pub use context::{Binding, BindingKind, EmissionContext, Style, comment_line};

use crate::ir::{Expr, ExprKind, NodeId};

/// Nodes whose comments attach to the line on which `expr` starts.
///
/// An inline expression has no line of its own, so its comments go around the
/// line that owns it: leading blocks before that line, trailing blocks after
/// the owner's last line. Builtin call arguments are rendered inline and are
/// included recursively. Children of lists, maps, objects and invocations get
/// their own lines and are not included.
pub fn hoisted_ids(expr: &Expr) -> Vec<NodeId> {
    let mut ids = Vec::new();
    collect_hoisted(expr, &mut ids);
    ids
}

fn collect_hoisted(expr: &Expr, ids: &mut Vec<NodeId>) {
    ids.push(expr.id);
    if let ExprKind::Call { args, .. } = &expr.kind {
        for arg in args {
            collect_hoisted(arg, ids);
        }
    }
}

/// Whether `expr` opens a multi-line block when rendered.
pub fn is_block(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::List { .. } | ExprKind::Object { .. } | ExprKind::Map { .. } => true,
        ExprKind::Invoke { args, .. } => !args.is_empty(),
        ExprKind::Call { args, .. } => args.iter().any(is_block),
        _ => false,
    }
}
