//! Python writer.
//!
//! Emits a flat module of assignments. Calls are always exploded one
//! argument per line with trailing commas, which keeps every argument on a
//! line of its own for comments and matches what black produces for
//! multi-line calls.

use crate::comments::CommentPosition;
use crate::format::builtins::{self, Builtin};
use crate::format::literals::{format_number, is_multiline, quoted};
use crate::format::names::{Token, escape_reserved, pascal_case, snake_case};
use crate::format::{BindingKind, EmissionContext, Style, hoisted_ids};
use crate::ir::*;
use crate::target::Target;
use crate::traits::{EmitError, EmitOptions, Emitter};
use std::collections::BTreeSet;

/// Static instance of the Python emitter for the registry.
pub static PYTHON_EMITTER: PythonEmitter = PythonEmitter;

/// Python emitter implementing the Emitter trait.
pub struct PythonEmitter;

impl Emitter for PythonEmitter {
    fn target(&self) -> Target {
        Target::Python
    }

    fn emit(&self, program: &Program, _options: &EmitOptions) -> Result<String, EmitError> {
        PythonWriter::emit(program)
    }
}

const STYLE: Style = Style {
    indent: "    ",
    comment: "#",
};

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "json", "pulumi",
];

/// Emits a program as Python source.
pub struct PythonWriter<'p> {
    ctx: EmissionContext<'p>,
    std: BTreeSet<&'static str>,
    packages: BTreeSet<&'p str>,
}

impl<'p> PythonWriter<'p> {
    fn new(program: &'p Program) -> Self {
        Self {
            ctx: EmissionContext::new(program, Target::Python, STYLE),
            std: BTreeSet::new(),
            packages: BTreeSet::new(),
        }
    }

    /// Emit a program to Python source.
    pub fn emit(program: &'p Program) -> Result<String, EmitError> {
        let mut writer = Self::new(program);
        for stmt in &program.body {
            writer.write_stmt(stmt)?;
        }
        Ok(writer.finish())
    }

    fn finish(self) -> String {
        let root = self.ctx.program().id;
        let mut out = self.ctx.detached(root, CommentPosition::Leading);
        let footer = self.ctx.detached(root, CommentPosition::Trailing);

        for module in &self.std {
            out.push_str(&format!("import {module}\n"));
        }
        out.push_str("import pulumi\n");
        for package in &self.packages {
            let module = package.replace('-', "_");
            out.push_str(&format!("import pulumi_{module} as {module}\n"));
        }
        out.push('\n');
        out.push_str(&self.ctx.finish());
        out.push_str(&footer);
        out
    }

    fn write_stmt(&mut self, stmt: &'p Stmt) -> Result<(), EmitError> {
        match &stmt.kind {
            StmtKind::Resource(decl) => self.write_resource(stmt.id, decl),

            StmtKind::Binding { name, value } => {
                self.write_line(stmt.id, &format!("{} = ", ident(name)), value, "")?;
                let kind = match &value.kind {
                    ExprKind::Invoke { token, .. } => BindingKind::Invoke { token },
                    _ => BindingKind::Local,
                };
                self.ctx.declare(name, stmt.id, kind);
                Ok(())
            }

            StmtKind::Output { name, value } => {
                let head = format!("pulumi.export({}, ", quoted(name));
                self.write_line(stmt.id, &head, value, ")")
            }

            StmtKind::Expr { expr } => self.write_line(stmt.id, "", expr, ""),
        }
    }

    fn write_resource(&mut self, id: NodeId, decl: &'p ResourceDecl) -> Result<(), EmitError> {
        let token = self.parse_token(id, &decl.token)?;
        let class = format!("{}.{}", self.qualified(&token), pascal_case(token.member));
        let logical = quoted(decl.logical_name());

        self.ctx.leading(id);
        self.ctx.start_line();
        self.ctx.write(&format!("{} = {class}(", ident(&decl.name)));
        if decl.properties.is_empty() && decl.options.is_empty() {
            self.ctx.write(&logical);
            self.ctx.write(")");
            self.ctx.end_line();
        } else {
            self.ctx.end_line();
            self.ctx.indent();
            self.ctx.line(&format!("{logical},"));
            self.write_keywords(&decl.properties)?;
            if !decl.options.is_empty() {
                self.ctx.line("opts=pulumi.ResourceOptions(");
                self.ctx.indent();
                for option in &decl.options {
                    let head = format!("{}=", snake_case(option.name.as_str()));
                    self.write_line(option.id, &head, &option.value, ",")?;
                }
                self.ctx.dedent();
                self.ctx.line("),");
            }
            self.ctx.dedent();
            self.ctx.line(")");
        }
        self.ctx.trailing(id);

        self.ctx.declare(&decl.name, id, BindingKind::Resource { token: &decl.token });
        Ok(())
    }

    /// A line owned by `owner`: `head`, the value, then `tail`, with the
    /// value's inline comments hoisted around it.
    fn write_line(
        &mut self,
        owner: NodeId,
        head: &str,
        value: &'p Expr,
        tail: &str,
    ) -> Result<(), EmitError> {
        let ids = hoisted_ids(value);
        self.ctx.leading(owner);
        self.ctx.leading_all(&ids);
        self.ctx.start_line();
        self.ctx.write(head);
        self.write_expr(value, None)?;
        self.ctx.write(tail);
        self.ctx.end_line();
        self.ctx.trailing_all(&ids);
        self.ctx.trailing(owner);
        Ok(())
    }

    /// `name=value,` per property.
    fn write_keywords(&mut self, properties: &'p [Property]) -> Result<(), EmitError> {
        for prop in properties {
            let head = format!("{}=", ident(&snake_case(&prop.name)));
            self.write_line(prop.id, &head, &prop.value, ",")?;
        }
        Ok(())
    }

    fn write_expr(&mut self, expr: &'p Expr, expected: Option<&'p Type>) -> Result<(), EmitError> {
        let ty = expr.type_or(expected);
        match &expr.kind {
            ExprKind::Null => self.ctx.write("None"),
            ExprKind::Bool { value } => self.ctx.write(if *value { "True" } else { "False" }),
            ExprKind::Int { value } => self.ctx.write(&value.to_string()),
            ExprKind::Number { value } => self.ctx.write(&format_number(*value)),
            ExprKind::String { value } => self.ctx.write(&string_literal(value)),

            ExprKind::List { items } => {
                let element = ty.and_then(Type::element);
                self.ctx.write("[");
                self.ctx.end_line();
                self.ctx.indent();
                for item in items {
                    let ids = hoisted_ids(item);
                    self.ctx.leading_all(&ids);
                    self.ctx.start_line();
                    self.write_expr(item, element)?;
                    self.ctx.write(",");
                    self.ctx.end_line();
                    self.ctx.trailing_all(&ids);
                }
                self.ctx.dedent();
                self.ctx.start_line();
                self.ctx.write("]");
            }

            ExprKind::Map { entries } => {
                let element = ty.and_then(Type::element);
                self.write_dict(entries, element)?;
            }

            ExprKind::Object { properties } => match ty.and_then(Type::object_token) {
                Some(token) => {
                    let token = self.parse_token(expr.id, token)?;
                    let class = format!(
                        "{}.{}Args",
                        self.qualified(&token),
                        pascal_case(token.member)
                    );
                    self.ctx.write(&format!("{class}("));
                    self.ctx.end_line();
                    self.ctx.indent();
                    self.write_keywords(properties)?;
                    self.ctx.dedent();
                    self.ctx.start_line();
                    self.ctx.write(")");
                }
                None => self.write_dict(properties, None)?,
            },

            ExprKind::Reference { binding, path } => {
                self.ctx.resolve(binding, expr.id)?;
                let mut text = ident(binding);
                for segment in path {
                    match segment {
                        PathSegment::Property(name) => {
                            text.push('.');
                            text.push_str(&snake_case(name));
                        }
                        PathSegment::Index(i) => text.push_str(&format!("[{i}]")),
                    }
                }
                self.ctx.write(&text);
            }

            ExprKind::Invoke { token, args } => {
                let parsed = self.parse_token(expr.id, token)?;
                let function = format!("{}.{}", self.qualified(&parsed), snake_case(parsed.member));
                if args.is_empty() {
                    self.ctx.write(&format!("{function}()"));
                } else {
                    self.ctx.write(&format!("{function}("));
                    self.ctx.end_line();
                    self.ctx.indent();
                    self.write_keywords(args)?;
                    self.ctx.dedent();
                    self.ctx.start_line();
                    self.ctx.write(")");
                }
            }

            ExprKind::Call { function, args } => {
                let (builtin, arg) = builtins::resolve_call(&self.ctx, expr.id, function, args)?;
                let head = match builtin {
                    Builtin::Secret => "pulumi.Output.secret(",
                    Builtin::ReadFile => "(lambda path: open(path).read())(",
                    Builtin::ToJson => {
                        self.std.insert("json");
                        "json.dumps("
                    }
                };
                self.ctx.write(head);
                self.write_expr(arg, None)?;
                self.ctx.write(")");
            }
        }
        Ok(())
    }

    fn write_dict(
        &mut self,
        entries: &'p [Property],
        element: Option<&'p Type>,
    ) -> Result<(), EmitError> {
        self.ctx.write("{");
        self.ctx.end_line();
        self.ctx.indent();
        for entry in entries {
            let ids = hoisted_ids(&entry.value);
            self.ctx.leading(entry.id);
            self.ctx.leading_all(&ids);
            self.ctx.start_line();
            self.ctx.write(&format!("{}: ", quoted(&entry.name)));
            self.write_expr(&entry.value, element)?;
            self.ctx.write(",");
            self.ctx.end_line();
            self.ctx.trailing_all(&ids);
            self.ctx.trailing(entry.id);
        }
        self.ctx.dedent();
        self.ctx.start_line();
        self.ctx.write("}");
        Ok(())
    }

    fn parse_token(&self, node: NodeId, token: &'p str) -> Result<Token<'p>, EmitError> {
        Token::parse(token).ok_or_else(|| self.ctx.invalid_token(node, token))
    }

    /// `aws.ec2`, recording the package import.
    fn qualified(&mut self, token: &Token<'p>) -> String {
        self.packages.insert(token.package);
        let mut name = token.package.replace('-', "_");
        if let Some(module) = token.module {
            name.push('.');
            name.push_str(&snake_case(module));
        }
        name
    }
}

fn ident(name: &str) -> String {
    escape_reserved(snake_case(name), KEYWORDS, |n| format!("{n}_"))
}

fn string_literal(s: &str) -> String {
    let triple_safe = !s.contains("\"\"\"")
        && !s.contains('\\')
        && !s.ends_with('"')
        && !s.chars().any(|c| c.is_control() && c != '\n' && c != '\t');
    if is_multiline(s) && triple_safe {
        format!("\"\"\"{s}\"\"\"")
    } else {
        quoted(s)
    }
}
