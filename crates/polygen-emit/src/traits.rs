//! Emitter trait, options and errors.

use crate::ir::{IrError, NodeId, Program};
use crate::target::Target;

/// Error that can occur when reading IR.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read IR: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed IR: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] IrError),
}

/// Error that aborts emission for one target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("{target}: cannot emit {kind} node {node}: {detail}")]
    UnsupportedNode {
        target: Target,
        node: NodeId,
        kind: &'static str,
        detail: String,
    },

    #[error("{target}: node {node} references `{name}`, which is not declared before it")]
    MissingReference {
        target: Target,
        node: NodeId,
        name: String,
    },

    #[error("{target}: malformed type token `{token}` at node {node}")]
    InvalidToken {
        target: Target,
        node: NodeId,
        token: String,
    },

    #[error("{0} emitter is not compiled in")]
    TargetUnavailable(Target),
}

impl EmitError {
    pub fn target(&self) -> Target {
        match self {
            EmitError::UnsupportedNode { target, .. }
            | EmitError::MissingReference { target, .. }
            | EmitError::InvalidToken { target, .. }
            | EmitError::TargetUnavailable(target) => *target,
        }
    }
}

/// Go import paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoOptions {
    /// Import path of the core SDK package.
    pub sdk_import: String,
    /// Prefix of provider SDK repositories; the package name is appended.
    pub provider_prefix: String,
}

impl Default for GoOptions {
    fn default() -> Self {
        Self {
            sdk_import: "github.com/pulumi/pulumi/sdk/v3/go/pulumi".to_string(),
            provider_prefix: "github.com/pulumi/pulumi-".to_string(),
        }
    }
}

/// Per-target knobs. Targets without options ignore this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub go: GoOptions,
}

/// An emitter renders a program as source code in one target language.
pub trait Emitter: Send + Sync {
    fn target(&self) -> Target;

    /// File extension for output (e.g., "cs").
    fn extension(&self) -> &'static str {
        self.target().extension()
    }

    /// Emit the program. Deterministic: same input, same bytes.
    fn emit(&self, program: &Program, options: &EmitOptions) -> Result<String, EmitError>;
}
