//! Builtin functions the IR may call.

use super::EmissionContext;
use crate::ir::{Expr, NodeId};
use crate::traits::EmitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Mark a value as secret.
    Secret,
    /// Contents of a local file as a string.
    ReadFile,
    /// JSON-encode a value.
    ToJson,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "secret" => Some(Builtin::Secret),
            "readFile" => Some(Builtin::ReadFile),
            "toJSON" => Some(Builtin::ToJson),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Secret => "secret",
            Builtin::ReadFile => "readFile",
            Builtin::ToJson => "toJSON",
        }
    }
}

/// Resolve a call to a builtin and its single argument.
pub fn resolve_call<'e>(
    ctx: &EmissionContext<'_>,
    node: NodeId,
    function: &str,
    args: &'e [Expr],
) -> Result<(Builtin, &'e Expr), EmitError> {
    let builtin = Builtin::lookup(function)
        .ok_or_else(|| ctx.unsupported(node, "call", format!("unknown function `{function}`")))?;
    match args {
        [arg] => Ok((builtin, arg)),
        _ => Err(ctx.unsupported(
            node,
            "call",
            format!("`{function}` takes 1 argument, got {}", args.len()),
        )),
    }
}
