//! Go emitter.
//!
//! Emits a `pulumi.Run` program. Resource arguments are written with the
//! SDK's input wrappers (`pulumi.String`, `ec2.SecurityGroupIngressArray`);
//! invocation arguments are plain Go values with `pulumi.XRef` for optional
//! scalars. Key/value lines are aligned the way gofmt aligns them.

use crate::comments::CommentPosition;
use crate::format::builtins::{self, Builtin};
use crate::format::literals::{format_number, is_multiline, quoted};
use crate::format::names::{Token, escape_reserved, pascal_case};
use crate::format::{BindingKind, EmissionContext, Style, hoisted_ids};
use crate::ir::visit::referenced_bindings;
use crate::ir::*;
use crate::target::Target;
use crate::traits::{EmitError, EmitOptions, Emitter, GoOptions};
use std::collections::BTreeSet;

/// Static instance of the Go emitter for the registry.
pub static GO_EMITTER: GoEmitter = GoEmitter;

/// Go emitter implementing the Emitter trait.
pub struct GoEmitter;

impl Emitter for GoEmitter {
    fn target(&self) -> Target {
        Target::Go
    }

    fn emit(&self, program: &Program, options: &EmitOptions) -> Result<String, EmitError> {
        GoWriter::emit(program, &options.go)
    }
}

const STYLE: Style = Style {
    indent: "\t",
    comment: "//",
};

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var", "ctx", "err", "nil", "pulumi",
];

const READ_FILE_HELPER: &str = "\
func readFileOrPanic(path string) pulumi.StringPtrInput {
\tdata, err := os.ReadFile(path)
\tif err != nil {
\t\tpanic(err.Error())
\t}
\treturn pulumi.String(string(data))
}
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Resource arguments and exports: input wrappers.
    Input,
    /// Invocation arguments and locals: plain Go values.
    Plain,
    /// Plain object inside a typed slice or map; the type is elided.
    Elided,
}

/// One `key: value` line of a composite literal.
struct Field<'p> {
    owner: NodeId,
    key: String,
    value: &'p Expr,
}

/// Emits a program as Go source.
pub struct GoWriter<'p> {
    ctx: EmissionContext<'p>,
    options: &'p GoOptions,
    referenced: BTreeSet<&'p str>,
    std: BTreeSet<&'static str>,
    imports: BTreeSet<String>,
    err_declared: bool,
    read_file: bool,
}

impl<'p> GoWriter<'p> {
    fn new(program: &'p Program, options: &'p GoOptions) -> Self {
        let mut imports = BTreeSet::new();
        imports.insert(options.sdk_import.clone());
        Self {
            ctx: EmissionContext::new(program, Target::Go, STYLE),
            options,
            referenced: referenced_bindings(program),
            std: BTreeSet::new(),
            imports,
            err_declared: false,
            read_file: false,
        }
    }

    /// Emit a program to Go source.
    pub fn emit(program: &'p Program, options: &'p GoOptions) -> Result<String, EmitError> {
        let mut writer = Self::new(program, options);
        writer.ctx.indent();
        writer.ctx.indent();
        for stmt in &program.body {
            writer.write_stmt(stmt)?;
        }
        writer.ctx.dedent();
        writer.ctx.dedent();
        Ok(writer.finish())
    }

    fn finish(self) -> String {
        let root = self.ctx.program().id;
        let mut out = self.ctx.detached(root, CommentPosition::Leading);
        let footer = self.ctx.detached(root, CommentPosition::Trailing);

        out.push_str("package main\n\nimport (\n");
        for path in &self.std {
            out.push_str(&format!("\t\"{path}\"\n"));
        }
        if !self.std.is_empty() {
            out.push('\n');
        }
        for path in &self.imports {
            out.push_str(&format!("\t\"{path}\"\n"));
        }
        out.push_str(")\n\n");
        if self.read_file {
            out.push_str(READ_FILE_HELPER);
            out.push('\n');
        }
        out.push_str("func main() {\n\tpulumi.Run(func(ctx *pulumi.Context) error {\n");
        out.push_str(&self.ctx.finish());
        out.push_str("\t\treturn nil\n\t})\n}\n");
        out.push_str(&footer);
        out
    }

    fn write_stmt(&mut self, stmt: &'p Stmt) -> Result<(), EmitError> {
        match &stmt.kind {
            StmtKind::Resource(decl) => self.write_resource(stmt.id, decl),

            StmtKind::Binding { name, value } => {
                if let ExprKind::Invoke { token, args } = &value.kind {
                    self.write_invoke(stmt.id, Some(name.as_str()), value, token, args)?;
                    self.ctx.declare(name, stmt.id, BindingKind::Invoke { token });
                    return Ok(());
                }
                let var = ident(name);
                let unused = !self.referenced.contains(name.as_str());
                self.owned(stmt.id, value, |w| {
                    w.ctx.start_line();
                    w.ctx.write(&format!("{var} := "));
                    w.write_value(value, None, Mode::Plain)?;
                    w.ctx.end_line();
                    if unused {
                        w.ctx.line(&format!("_ = {var}"));
                    }
                    Ok(())
                })?;
                self.ctx.declare(name, stmt.id, BindingKind::Local);
                Ok(())
            }

            StmtKind::Output { name, value } => self.owned(stmt.id, value, |w| {
                w.ctx.start_line();
                w.ctx.write(&format!("ctx.Export({}, ", quoted(name)));
                w.write_value(value, None, Mode::Input)?;
                w.ctx.write(")");
                w.ctx.end_line();
                Ok(())
            }),

            StmtKind::Expr { expr } => match &expr.kind {
                ExprKind::Invoke { token, args } => self.write_invoke(stmt.id, None, expr, token, args),
                _ => self.owned(stmt.id, expr, |w| {
                    w.ctx.start_line();
                    w.ctx.write("_ = ");
                    w.write_value(expr, None, Mode::Plain)?;
                    w.ctx.end_line();
                    Ok(())
                }),
            },
        }
    }

    fn write_resource(&mut self, id: NodeId, decl: &'p ResourceDecl) -> Result<(), EmitError> {
        let token = self.parse_token(id, &decl.token)?;
        let module = self.module(&token);
        let member = pascal_case(token.member);

        self.ctx.leading(id);
        let lhs = self.assign(Some(decl.name.as_str()));
        self.ctx.start_line();
        self.ctx.write(&format!(
            "{lhs} {module}.New{member}(ctx, {}, ",
            quoted(decl.logical_name())
        ));
        if decl.properties.is_empty() {
            self.ctx.write("nil");
        } else {
            self.ctx.write(&format!("&{module}.{member}Args{{"));
            self.ctx.end_line();
            self.write_fields(&named_fields(&decl.properties), Mode::Input)?;
            self.ctx.start_line();
            self.ctx.write("}");
        }
        if decl.options.is_empty() {
            self.ctx.write(")");
            self.ctx.end_line();
        } else {
            self.ctx.write(",");
            self.ctx.end_line();
            self.ctx.indent();
            for option in &decl.options {
                self.write_option(option)?;
            }
            self.ctx.dedent();
            self.ctx.line(")");
        }
        self.write_err_check();
        self.ctx.trailing(id);

        self.ctx.declare(&decl.name, id, BindingKind::Resource { token: &decl.token });
        Ok(())
    }

    fn write_option(&mut self, option: &'p ResourceOption) -> Result<(), EmitError> {
        let value = &option.value;
        self.owned(option.id, value, |w| {
            w.ctx.start_line();
            match option.name {
                OptionName::DependsOn => {
                    w.ctx.write("pulumi.DependsOn([]pulumi.Resource{");
                    match &value.kind {
                        ExprKind::List { items } => {
                            w.ctx.end_line();
                            w.write_items(items, None, Mode::Plain)?;
                            w.ctx.start_line();
                        }
                        _ => w.write_value(value, None, Mode::Plain)?,
                    }
                    w.ctx.write("}),");
                }
                name => {
                    w.ctx.write(&format!("pulumi.{}(", pascal_case(name.as_str())));
                    w.write_value(value, None, Mode::Plain)?;
                    w.ctx.write("),");
                }
            }
            w.ctx.end_line();
            Ok(())
        })
    }

    /// `x, err := pkg.GetX(ctx, &pkg.GetXArgs{...}, nil)` and its error check.
    fn write_invoke(
        &mut self,
        stmt: NodeId,
        name: Option<&'p str>,
        invoke: &'p Expr,
        token: &'p str,
        args: &'p [Property],
    ) -> Result<(), EmitError> {
        let parsed = self.parse_token(invoke.id, token)?;
        let module = self.module(&parsed);
        let member = pascal_case(parsed.member);

        let ids = hoisted_ids(invoke);
        self.ctx.leading(stmt);
        self.ctx.leading_all(&ids);
        let lhs = self.assign(name);
        self.ctx.start_line();
        self.ctx.write(&format!("{lhs} {module}.{member}(ctx, "));
        if args.is_empty() {
            self.ctx.write("nil, nil)");
        } else {
            self.ctx.write(&format!("&{module}.{member}Args{{"));
            self.ctx.end_line();
            self.write_fields(&named_fields(args), Mode::Plain)?;
            self.ctx.start_line();
            self.ctx.write("}, nil)");
        }
        self.ctx.end_line();
        self.write_err_check();
        self.ctx.trailing_all(&ids);
        self.ctx.trailing(stmt);
        Ok(())
    }

    /// Left-hand side of a call returning `(value, error)`.
    fn assign(&mut self, name: Option<&'p str>) -> String {
        let lhs = match name.filter(|n| self.referenced.contains(n)) {
            Some(name) => format!("{}, err :=", ident(name)),
            None if self.err_declared => "_, err =".to_string(),
            None => "_, err :=".to_string(),
        };
        self.err_declared = true;
        lhs
    }

    fn write_err_check(&mut self) {
        self.ctx.line("if err != nil {");
        self.ctx.indent();
        self.ctx.line("return err");
        self.ctx.dedent();
        self.ctx.line("}");
    }

    /// Run `body` between the comments of `owner` and those hoisted from
    /// `value`.
    fn owned(
        &mut self,
        owner: NodeId,
        value: &'p Expr,
        body: impl FnOnce(&mut Self) -> Result<(), EmitError>,
    ) -> Result<(), EmitError> {
        let ids = hoisted_ids(value);
        self.ctx.leading(owner);
        self.ctx.leading_all(&ids);
        body(self)?;
        self.ctx.trailing_all(&ids);
        self.ctx.trailing(owner);
        Ok(())
    }

    /// Indented `key: value,` lines; alignment follows gofmt.
    fn write_fields(&mut self, fields: &[Field<'p>], mode: Mode) -> Result<(), EmitError> {
        let widths = self.key_widths(fields);
        self.ctx.indent();
        for (field, width) in fields.iter().zip(widths) {
            let key = format!("{}:", field.key);
            self.owned(field.owner, field.value, |w| {
                w.ctx.start_line();
                w.ctx.write(&format!("{key:<width$} "));
                w.write_value(field.value, None, mode)?;
                w.ctx.write(",");
                w.ctx.end_line();
                Ok(())
            })?;
        }
        self.ctx.dedent();
        Ok(())
    }

    /// Padded key width per field. Runs of single-line fields share the
    /// widest key; multi-line values and comment lines end a run.
    fn key_widths(&self, fields: &[Field<'p>]) -> Vec<usize> {
        fn flush(run: &mut Vec<usize>, keys: &[usize], widths: &mut [usize]) {
            let width = run.iter().map(|&i| keys[i]).max().unwrap_or(0);
            for &i in run.iter() {
                widths[i] = width;
            }
            run.clear();
        }

        let keys: Vec<usize> = fields.iter().map(|f| f.key.chars().count() + 1).collect();
        let mut widths = keys.clone();
        let mut run = Vec::new();
        for (i, field) in fields.iter().enumerate() {
            let mut ids = vec![field.owner];
            ids.extend(hoisted_ids(field.value));
            let commented = |position| ids.iter().any(|&id| self.ctx.has_comment(id, position));
            let single = !renders_multiline(field.value);

            if commented(CommentPosition::Leading) || !single {
                flush(&mut run, &keys, &mut widths);
            }
            if single {
                run.push(i);
            }
            if commented(CommentPosition::Trailing) || !single {
                flush(&mut run, &keys, &mut widths);
            }
        }
        flush(&mut run, &keys, &mut widths);
        widths
    }

    /// Indented `item,` lines.
    fn write_items(
        &mut self,
        items: &'p [Expr],
        element: Option<&'p Type>,
        mode: Mode,
    ) -> Result<(), EmitError> {
        self.ctx.indent();
        for item in items {
            let ids = hoisted_ids(item);
            self.ctx.leading_all(&ids);
            self.ctx.start_line();
            self.write_value(item, element, mode)?;
            self.ctx.write(",");
            self.ctx.end_line();
            self.ctx.trailing_all(&ids);
        }
        self.ctx.dedent();
        Ok(())
    }

    fn write_value(
        &mut self,
        expr: &'p Expr,
        expected: Option<&'p Type>,
        mode: Mode,
    ) -> Result<(), EmitError> {
        match mode {
            Mode::Input => self.write_input(expr, expected),
            Mode::Plain => self.write_plain(expr, expected, false),
            Mode::Elided => self.write_plain(expr, expected, true),
        }
    }

    fn write_input(&mut self, expr: &'p Expr, expected: Option<&'p Type>) -> Result<(), EmitError> {
        let ty = expr.type_or(expected);
        match &expr.kind {
            ExprKind::Null => self.ctx.write("nil"),
            ExprKind::Bool { value } => self.ctx.write(&format!("pulumi.Bool({value})")),
            ExprKind::Int { value } => self.ctx.write(&format!("pulumi.Int({value})")),
            ExprKind::Number { value } => {
                self.ctx.write(&format!("pulumi.Float64({})", format_number(*value)))
            }
            ExprKind::String { value } => {
                self.ctx.write(&format!("pulumi.String({})", string_literal(value)))
            }

            ExprKind::List { items } => {
                let element = ty.and_then(Type::element);
                let array = match element.map(|t| t.unwrap_optional().0) {
                    Some(Type::Object(token)) => {
                        let token = self.parse_token(expr.id, token)?;
                        format!("{}.{}Array", self.module(&token), pascal_case(token.member))
                    }
                    Some(t) => scalar_name(t).map_or("pulumi.Array".to_string(), |s| {
                        format!("pulumi.{s}Array")
                    }),
                    None => common_scalar(items).map_or("pulumi.Array".to_string(), |s| {
                        format!("pulumi.{s}Array")
                    }),
                };
                self.ctx.write(&format!("{array}{{"));
                self.ctx.end_line();
                self.write_items(items, element, Mode::Input)?;
                self.ctx.start_line();
                self.ctx.write("}");
            }

            ExprKind::Map { entries } => {
                let element = ty.and_then(Type::element);
                let map = match element.map(|t| t.unwrap_optional().0) {
                    Some(Type::Object(token)) => {
                        let token = self.parse_token(expr.id, token)?;
                        format!("{}.{}Map", self.module(&token), pascal_case(token.member))
                    }
                    Some(t) => scalar_name(t)
                        .map_or("pulumi.Map".to_string(), |s| format!("pulumi.{s}Map")),
                    None => common_scalar(entries.iter().map(|e| &e.value))
                        .map_or("pulumi.Map".to_string(), |s| format!("pulumi.{s}Map")),
                };
                self.ctx.write(&format!("{map}{{"));
                self.ctx.end_line();
                self.write_fields(&quoted_fields(entries), Mode::Input)?;
                self.ctx.start_line();
                self.ctx.write("}");
            }

            ExprKind::Object { properties } => match ty.and_then(Type::object_token) {
                Some(token) => {
                    let token = self.parse_token(expr.id, token)?;
                    let module = self.module(&token);
                    self.ctx
                        .write(&format!("&{module}.{}Args{{", pascal_case(token.member)));
                    self.ctx.end_line();
                    self.write_fields(&named_fields(properties), Mode::Input)?;
                    self.ctx.start_line();
                    self.ctx.write("}");
                }
                None => {
                    self.ctx.write("pulumi.Map{");
                    self.ctx.end_line();
                    self.write_fields(&quoted_fields(properties), Mode::Input)?;
                    self.ctx.start_line();
                    self.ctx.write("}");
                }
            },

            ExprKind::Reference { binding, path } => {
                let resolved = self.ctx.resolve(binding, expr.id)?;
                let text = reference_text(binding, path, resolved.kind);
                let wrapped = match resolved.kind {
                    BindingKind::Resource { .. } => text,
                    _ => match ty.map(|t| t.unwrap_optional().0) {
                        Some(Type::List(element)) if **element == Type::String => {
                            format!("pulumi.ToStringArray({text})")
                        }
                        Some(t) => match scalar_name(t) {
                            Some(s) => format!("pulumi.{s}({text})"),
                            None => format!("pulumi.Any({text})"),
                        },
                        None => format!("pulumi.Any({text})"),
                    },
                };
                self.ctx.write(&wrapped);
            }

            ExprKind::Invoke { .. } => {
                return Err(self.ctx.unsupported(
                    expr.id,
                    "invoke",
                    "invocations return (result, error) and must be bound to a variable",
                ));
            }

            ExprKind::Call { function, args } => {
                let (builtin, arg) = builtins::resolve_call(&self.ctx, expr.id, function, args)?;
                match builtin {
                    Builtin::Secret => {
                        let output = arg
                            .ty
                            .as_ref()
                            .and_then(|t| scalar_name(t.unwrap_optional().0))
                            .or_else(|| literal_scalar(arg))
                            .unwrap_or("Any");
                        self.ctx.write("pulumi.ToSecret(");
                        self.write_input(arg, None)?;
                        self.ctx.write(&format!(").(pulumi.{output}Output)"));
                    }
                    Builtin::ReadFile => {
                        self.std.insert("os");
                        self.read_file = true;
                        self.ctx.write("readFileOrPanic(");
                        self.write_plain(arg, None, false)?;
                        self.ctx.write(")");
                    }
                    Builtin::ToJson => {
                        return Err(self.ctx.unsupported(
                            expr.id,
                            "call",
                            "`toJSON` has no Go rendering",
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn write_plain(
        &mut self,
        expr: &'p Expr,
        expected: Option<&'p Type>,
        elided: bool,
    ) -> Result<(), EmitError> {
        let ty = expr.type_or(expected);
        let optional = ty.is_some_and(|t| t.unwrap_optional().1);
        match &expr.kind {
            ExprKind::Null => self.ctx.write("nil"),
            ExprKind::Bool { value } if optional => {
                self.ctx.write(&format!("pulumi.BoolRef({value})"))
            }
            ExprKind::Bool { value } => self.ctx.write(&value.to_string()),
            ExprKind::Int { value } if optional => {
                self.ctx.write(&format!("pulumi.IntRef({value})"))
            }
            ExprKind::Int { value } => self.ctx.write(&value.to_string()),
            ExprKind::Number { value } if optional => {
                self.ctx.write(&format!("pulumi.Float64Ref({})", format_number(*value)))
            }
            ExprKind::Number { value } => self.ctx.write(&format_number(*value)),
            ExprKind::String { value } if optional => {
                self.ctx.write(&format!("pulumi.StringRef({})", string_literal(value)))
            }
            ExprKind::String { value } => self.ctx.write(&string_literal(value)),

            ExprKind::List { items } => {
                let element = ty.and_then(Type::element);
                let name = self.element_type(expr.id, element, items.iter())?;
                self.ctx.write(&format!("[]{name}{{"));
                self.ctx.end_line();
                self.write_items(items, element, element_mode(element))?;
                self.ctx.start_line();
                self.ctx.write("}");
            }

            ExprKind::Map { entries } => {
                let element = ty.and_then(Type::element);
                let name = self.element_type(expr.id, element, entries.iter().map(|e| &e.value))?;
                self.ctx.write(&format!("map[string]{name}{{"));
                self.ctx.end_line();
                self.write_fields(&quoted_fields(entries), element_mode(element))?;
                self.ctx.start_line();
                self.ctx.write("}");
            }

            ExprKind::Object { properties } => {
                match ty.and_then(Type::object_token) {
                    Some(_) if elided => self.ctx.write("{"),
                    Some(token) => {
                        let token = self.parse_token(expr.id, token)?;
                        let module = self.module(&token);
                        let pointer = if optional { "&" } else { "" };
                        self.ctx
                            .write(&format!("{pointer}{module}.{}{{", pascal_case(token.member)));
                    }
                    None => self.ctx.write("map[string]interface{}{"),
                }
                self.ctx.end_line();
                let fields = match ty.and_then(Type::object_token) {
                    Some(_) => named_fields(properties),
                    None => quoted_fields(properties),
                };
                self.write_fields(&fields, Mode::Plain)?;
                self.ctx.start_line();
                self.ctx.write("}");
            }

            ExprKind::Reference { binding, path } => {
                let resolved = self.ctx.resolve(binding, expr.id)?;
                self.ctx.write(&reference_text(binding, path, resolved.kind));
            }

            ExprKind::Invoke { .. } => {
                return Err(self.ctx.unsupported(
                    expr.id,
                    "invoke",
                    "invocations return (result, error) and must be bound to a variable",
                ));
            }

            ExprKind::Call { function, args } => {
                let (builtin, arg) = builtins::resolve_call(&self.ctx, expr.id, function, args)?;
                match builtin {
                    Builtin::Secret => {
                        self.ctx.write("pulumi.ToSecret(");
                        self.write_input(arg, None)?;
                        self.ctx.write(")");
                    }
                    Builtin::ReadFile => {
                        return Err(self.ctx.unsupported(
                            expr.id,
                            "call",
                            "`readFile` is only available for resource inputs",
                        ));
                    }
                    Builtin::ToJson => {
                        return Err(self.ctx.unsupported(
                            expr.id,
                            "call",
                            "`toJSON` has no Go rendering",
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Go type of slice or map elements in a plain value.
    fn element_type(
        &mut self,
        node: NodeId,
        element: Option<&'p Type>,
        values: impl Iterator<Item = &'p Expr>,
    ) -> Result<String, EmitError> {
        match element {
            Some(ty) => self.plain_type(node, ty),
            None => Ok(common_scalar(values)
                .map_or("interface{}", plain_scalar)
                .to_string()),
        }
    }

    fn plain_type(&mut self, node: NodeId, ty: &'p Type) -> Result<String, EmitError> {
        Ok(match ty {
            Type::String | Type::Int | Type::Number | Type::Bool => {
                scalar_name(ty).map_or("interface{}", plain_scalar).to_string()
            }
            Type::Any => "interface{}".to_string(),
            Type::List(element) => format!("[]{}", self.plain_type(node, element)?),
            Type::Map(element) => format!("map[string]{}", self.plain_type(node, element)?),
            Type::Object(token) => {
                let token = self.parse_token(node, token)?;
                format!("{}.{}", self.module(&token), pascal_case(token.member))
            }
            Type::Optional(inner) => self.plain_type(node, inner)?,
        })
    }

    fn parse_token(&self, node: NodeId, token: &'p str) -> Result<Token<'p>, EmitError> {
        Token::parse(token).ok_or_else(|| self.ctx.invalid_token(node, token))
    }

    /// Package identifier for a token, recording its import.
    fn module(&mut self, token: &Token<'p>) -> String {
        let program = self.ctx.program();
        let major = program
            .packages
            .iter()
            .find(|p| p.name == token.package)
            .and_then(PackageRef::major_version)
            .filter(|major| *major > 1);

        let mut path = format!("{}{}/sdk", self.options.provider_prefix, token.package);
        if let Some(major) = major {
            path.push_str(&format!("/v{major}"));
        }
        path.push_str(&format!("/go/{}", token.package));

        let name = match token.module {
            Some(module) => {
                let module = module.to_lowercase();
                path.push('/');
                path.push_str(&module);
                module.replace('-', "")
            }
            None => token.package.replace('-', ""),
        };
        self.imports.insert(path);
        name
    }
}

fn ident(name: &str) -> String {
    escape_reserved(name.to_string(), KEYWORDS, |n| format!("{n}_"))
}

fn named_fields(properties: &[Property]) -> Vec<Field<'_>> {
    properties
        .iter()
        .map(|p| Field {
            owner: p.id,
            key: pascal_case(&p.name),
            value: &p.value,
        })
        .collect()
}

fn quoted_fields(entries: &[Property]) -> Vec<Field<'_>> {
    entries
        .iter()
        .map(|e| Field {
            owner: e.id,
            key: quoted(&e.name),
            value: &e.value,
        })
        .collect()
}

fn element_mode(element: Option<&Type>) -> Mode {
    match element.and_then(Type::object_token) {
        Some(_) => Mode::Elided,
        None => Mode::Plain,
    }
}

fn reference_text(binding: &str, path: &[PathSegment], kind: BindingKind<'_>) -> String {
    let mut text = ident(binding);
    for segment in path {
        match (segment, kind) {
            (PathSegment::Property(name), _) => {
                text.push('.');
                text.push_str(&pascal_case(name));
            }
            (PathSegment::Index(i), BindingKind::Resource { .. }) => {
                text.push_str(&format!(".Index(pulumi.Int({i}))"));
            }
            (PathSegment::Index(i), _) => text.push_str(&format!("[{i}]")),
        }
    }
    text
}

/// Wrapper name of a scalar type: `String`, `Int`, `Float64`, `Bool`.
fn scalar_name(ty: &Type) -> Option<&'static str> {
    match ty {
        Type::String => Some("String"),
        Type::Int => Some("Int"),
        Type::Number => Some("Float64"),
        Type::Bool => Some("Bool"),
        _ => None,
    }
}

fn literal_scalar(expr: &Expr) -> Option<&'static str> {
    match expr.kind {
        ExprKind::String { .. } => Some("String"),
        ExprKind::Int { .. } => Some("Int"),
        ExprKind::Number { .. } => Some("Float64"),
        ExprKind::Bool { .. } => Some("Bool"),
        _ => None,
    }
}

/// The scalar kind shared by every value, if there is one.
fn common_scalar<'e>(values: impl IntoIterator<Item = &'e Expr>) -> Option<&'static str> {
    let mut common = None;
    for value in values {
        let kind = value
            .ty
            .as_ref()
            .and_then(|t| scalar_name(t.unwrap_optional().0))
            .or_else(|| literal_scalar(value))?;
        match common {
            Some(seen) if seen != kind => return None,
            _ => common = Some(kind),
        }
    }
    common
}

fn plain_scalar(name: &'static str) -> &'static str {
    match name {
        "String" => "string",
        "Int" => "int",
        "Float64" => "float64",
        "Bool" => "bool",
        _ => "interface{}",
    }
}

fn string_literal(s: &str) -> String {
    if is_raw(s) {
        format!("`{s}`")
    } else {
        quoted(s)
    }
}

fn is_raw(s: &str) -> bool {
    is_multiline(s) && !s.contains('`') && !s.contains('\r')
}

fn renders_multiline(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::List { .. }
        | ExprKind::Object { .. }
        | ExprKind::Map { .. }
        | ExprKind::Invoke { .. } => true,
        ExprKind::String { value } => is_raw(value),
        ExprKind::Call { args, .. } => args.iter().any(renders_multiline),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{CommentBlock, CommentMap};
    use pretty_assertions::assert_eq;

    fn emit(program: &Program) -> Result<String, EmitError> {
        GoWriter::emit(program, &GoOptions::default())
    }

    #[test]
    fn test_empty_program() {
        let b = Builder::new();
        let program = b.program(vec![]);
        assert_eq!(
            emit(&program).unwrap(),
            "package main\n\nimport (\n\t\"github.com/pulumi/pulumi/sdk/v3/go/pulumi\"\n)\n\n\
             func main() {\n\tpulumi.Run(func(ctx *pulumi.Context) error {\n\t\treturn nil\n\t})\n}\n"
        );
    }

    #[test]
    fn test_error_variable_declared_once() {
        let b = Builder::new();
        let first = b.resource("first", "aws:s3/bucket:Bucket", vec![]);
        let second = b.resource("second", "aws:s3/bucket:Bucket", vec![]);
        let program = b.program(vec![first, second]).with_packages(vec![PackageRef::new("aws", Some("6.0.0"))]);
        let out = emit(&program).unwrap();
        assert!(out.contains("\t\"github.com/pulumi/pulumi-aws/sdk/v6/go/aws/s3\"\n"));
        assert!(out.contains("\t\t_, err := s3.NewBucket(ctx, \"first\", nil)\n"));
        assert!(out.contains("\t\t_, err = s3.NewBucket(ctx, \"second\", nil)\n"));
    }

    #[test]
    fn test_gofmt_alignment() {
        let b = Builder::new();
        let bucket = b.resource(
            "bucket",
            "aws:s3/bucket:Bucket",
            vec![
                b.prop("acl", b.string("private")),
                b.prop("forceDestroy", b.bool(true)),
                b.prop("tags", b.map(vec![b.prop("Name", b.string("x"))])),
                b.prop("bucket", b.string("logs")),
            ],
        );
        let program = b.program(vec![bucket]);
        let out = emit(&program).unwrap();
        assert!(out.contains(
            "\t\t\tAcl:          pulumi.String(\"private\"),\n\
             \t\t\tForceDestroy: pulumi.Bool(true),\n\
             \t\t\tTags: pulumi.StringMap{\n\
             \t\t\t\t\"Name\": pulumi.String(\"x\"),\n\
             \t\t\t},\n\
             \t\t\tBucket: pulumi.String(\"logs\"),\n"
        ));
    }

    #[test]
    fn test_comment_breaks_alignment() {
        let b = Builder::new();
        let short = b.prop("a", b.int(1));
        let long = b.prop("longName", b.int(2));
        let long_id = long.id;
        let program = b.program(vec![b.resource("r", "aws:s3/bucket:Bucket", vec![short, long])]);
        let mut comments = CommentMap::new();
        comments
            .attach(long_id, CommentBlock::from_text("why"), CommentPosition::Leading)
            .unwrap();
        let out = emit(&program.with_comments(comments)).unwrap();
        assert!(out.contains(
            "\t\t\tA: pulumi.Int(1),\n\t\t\t// why\n\t\t\tLongName: pulumi.Int(2),\n"
        ));
    }

    #[test]
    fn test_options_and_unused_local() {
        let b = Builder::new();
        let parent = b.resource("parent", "aws:s3/bucket:Bucket", vec![]);
        let child = b.resource_with_options(
            "child",
            "aws:s3/bucket:Bucket",
            vec![],
            vec![
                b.option(OptionName::Parent, b.reference("parent", &[])),
                b.option(OptionName::DependsOn, b.list(vec![b.reference("parent", &[])])),
                b.option(OptionName::IgnoreChanges, b.list(vec![b.string("tags")])),
            ],
        );
        let local = b.binding("region", b.string("us-west-2"));
        let program = b.program(vec![parent, child, local]);
        let out = emit(&program).unwrap();
        assert!(out.contains(
            "\t\tparent, err := s3.NewBucket(ctx, \"parent\", nil)\n\
             \t\tif err != nil {\n\
             \t\t\treturn err\n\
             \t\t}\n\
             \t\t_, err = s3.NewBucket(ctx, \"child\", nil,\n\
             \t\t\tpulumi.Parent(parent),\n\
             \t\t\tpulumi.DependsOn([]pulumi.Resource{\n\
             \t\t\t\tparent,\n\
             \t\t\t}),\n\
             \t\t\tpulumi.IgnoreChanges([]string{\n\
             \t\t\t\t\"tags\",\n\
             \t\t\t}),\n\
             \t\t)\n"
        ));
        assert!(out.contains("\t\tregion := \"us-west-2\"\n\t\t_ = region\n"));
    }

    #[test]
    fn test_read_file_helper_and_secret() {
        let b = Builder::new();
        let object = b.resource(
            "object",
            "aws:s3/bucketObject:BucketObject",
            vec![
                b.prop("content", b.call("readFile", vec![b.string("index.html")])),
                b.prop("etag", b.call("secret", vec![b.string("x")])),
            ],
        );
        let program = b.program(vec![object]);
        let out = emit(&program).unwrap();
        assert!(out.starts_with("package main\n\nimport (\n\t\"os\"\n\n"));
        assert!(out.contains(READ_FILE_HELPER));
        assert!(out.contains("Content: readFileOrPanic(\"index.html\"),\n"));
        assert!(out.contains("Etag:    pulumi.ToSecret(pulumi.String(\"x\")).(pulumi.StringOutput),\n"));
    }

    #[test]
    fn test_unsupported_shapes() {
        let b = Builder::new();
        let nested = b.invoke("aws:index/getAmi:getAmi", vec![]);
        let nested_id = nested.id;
        let program = b.program(vec![b.output("ami", nested)]);
        match emit(&program) {
            Err(EmitError::UnsupportedNode { node, kind, .. }) => {
                assert_eq!(node, nested_id);
                assert_eq!(kind, "invoke");
            }
            other => panic!("unexpected {other:?}"),
        }

        let b = Builder::new();
        let call = b.call("toJSON", vec![b.int(1)]);
        let call_id = call.id;
        let program = b.program(vec![b.output("json", call)]);
        match emit(&program) {
            Err(EmitError::UnsupportedNode { node, .. }) => assert_eq!(node, call_id),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_token() {
        let b = Builder::new();
        let stmt = b.resource("r", "not-a-token", vec![]);
        let id = stmt.id;
        let program = b.program(vec![stmt]);
        assert_eq!(
            emit(&program),
            Err(EmitError::InvalidToken {
                target: Target::Go,
                node: id,
                token: "not-a-token".into(),
            })
        );
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(string_literal("a\nb"), "`a\nb`");
        assert_eq!(string_literal("a\n`b`"), "\"a\\n`b`\"");
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(ident("type"), "type_");
    }
}
