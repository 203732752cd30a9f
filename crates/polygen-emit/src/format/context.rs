//! Per-run emission state.

use crate::comments::CommentPosition;
use crate::ir::{NodeId, Program};
use crate::target::Target;
use crate::traits::EmitError;
use std::collections::HashMap;

/// Indentation unit and comment marker of a target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub indent: &'static str,
    pub comment: &'static str,
}

/// What a binding name stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind<'p> {
    Resource { token: &'p str },
    Invoke { token: &'p str },
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'p> {
    pub node: NodeId,
    pub kind: BindingKind<'p>,
}

/// Output buffer, indentation and binding bookkeeping for one emitter run.
///
/// Lines are built with [`start_line`](Self::start_line),
/// [`write`](Self::write) and [`end_line`](Self::end_line). Text passed to
/// `write` may contain newlines (verbatim string literals); those are copied
/// as-is without re-indenting.
pub struct EmissionContext<'p> {
    program: &'p Program,
    target: Target,
    style: Style,
    out: String,
    depth: usize,
    bindings: HashMap<&'p str, Binding<'p>>,
}

impl<'p> EmissionContext<'p> {
    pub fn new(program: &'p Program, target: Target, style: Style) -> Self {
        Self {
            program,
            target,
            style,
            out: String::new(),
            depth: 0,
            bindings: HashMap::new(),
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.depth > 0, "unbalanced dedent");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn start_line(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(self.style.indent);
        }
    }

    pub fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub fn end_line(&mut self) {
        self.out.push('\n');
    }

    /// Write a complete line at the current indentation.
    pub fn line(&mut self, text: &str) {
        self.start_line();
        self.write(text);
        self.end_line();
    }

    pub fn blank_line(&mut self) {
        self.out.push('\n');
    }

    /// Emit the leading comment block of `node`, if any.
    pub fn leading(&mut self, node: NodeId) {
        self.comment(node, CommentPosition::Leading);
    }

    /// Emit the trailing comment block of `node`, if any.
    pub fn trailing(&mut self, node: NodeId) {
        self.comment(node, CommentPosition::Trailing);
    }

    /// Leading blocks of `nodes`, outermost first.
    pub fn leading_all(&mut self, nodes: &[NodeId]) {
        for node in nodes {
            self.leading(*node);
        }
    }

    /// Trailing blocks of `nodes`, innermost first.
    pub fn trailing_all(&mut self, nodes: &[NodeId]) {
        for node in nodes.iter().rev() {
            self.trailing(*node);
        }
    }

    pub fn has_comment(&self, node: NodeId, position: CommentPosition) -> bool {
        self.program.comments.lookup(node, position).is_some()
    }

    fn comment(&mut self, node: NodeId, position: CommentPosition) {
        let Some(block) = self.program.comments.lookup(node, position) else {
            return;
        };
        for text in block.lines().iter().flat_map(|l| l.split('\n')) {
            self.start_line();
            self.out.push_str(&comment_line(self.style.comment, text));
            self.end_line();
        }
    }

    /// A comment block of `node` rendered at column zero, for text assembled
    /// outside the buffer such as file headers.
    pub fn detached(&self, node: NodeId, position: CommentPosition) -> String {
        let mut text = String::new();
        if let Some(block) = self.program.comments.lookup(node, position) {
            for line in block.lines().iter().flat_map(|l| l.split('\n')) {
                text.push_str(&comment_line(self.style.comment, line));
                text.push('\n');
            }
        }
        text
    }

    /// Record a binding so later references can resolve it.
    pub fn declare(&mut self, name: &'p str, node: NodeId, kind: BindingKind<'p>) {
        self.bindings.insert(name, Binding { node, kind });
    }

    /// Resolve a reference made by node `at`.
    pub fn resolve(&self, name: &str, at: NodeId) -> Result<Binding<'p>, EmitError> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| EmitError::MissingReference {
                target: self.target,
                node: at,
                name: name.to_string(),
            })
    }

    pub fn unsupported(
        &self,
        node: NodeId,
        kind: &'static str,
        detail: impl Into<String>,
    ) -> EmitError {
        EmitError::UnsupportedNode {
            target: self.target,
            node,
            kind,
            detail: detail.into(),
        }
    }

    pub fn invalid_token(&self, node: NodeId, token: &str) -> EmitError {
        EmitError::InvalidToken {
            target: self.target,
            node,
            token: token.to_string(),
        }
    }

    /// Consume the context and return the generated source.
    pub fn finish(self) -> String {
        self.out
    }
}

/// Render one comment line with `marker`; an empty line is the bare marker.
pub fn comment_line(marker: &str, text: &str) -> String {
    if text.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} {text}")
    }
}
