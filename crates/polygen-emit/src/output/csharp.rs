//! C# emitter.
//!
//! Emits a top-level-statement program around `Deployment.RunAsync`.
//! Resources take target-typed `new()` argument initializers, invocations
//! use the output-returning `Invoke` form, and the trailing run of outputs
//! becomes the dictionary the lambda returns.

use crate::comments::CommentPosition;
use crate::format::builtins::{self, Builtin};
use crate::format::literals::{format_number, is_multiline, quoted};
use crate::format::names::{Token, camel_case, escape_reserved, pascal_case};
use crate::format::{BindingKind, EmissionContext, Style, hoisted_ids};
use crate::ir::*;
use crate::target::Target;
use crate::traits::{EmitError, EmitOptions, Emitter};
use std::collections::BTreeSet;

/// Static instance of the C# emitter for the registry.
pub static CSHARP_EMITTER: CSharpEmitter = CSharpEmitter;

/// C# emitter implementing the Emitter trait.
pub struct CSharpEmitter;

impl Emitter for CSharpEmitter {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn emit(&self, program: &Program, _options: &EmitOptions) -> Result<String, EmitError> {
        CSharpWriter::emit(program)
    }
}

const STYLE: Style = Style {
    indent: "    ",
    comment: "//",
};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

const GENERIC: &str = "System.Collections.Generic";

/// Whose argument types a nested object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// `Pkg.Mod.Inputs.XArgs`
    Resource,
    /// `Pkg.Mod.Inputs.XInputArgs`
    Invoke,
}

/// Where a value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Place {
    /// Right-hand side of a property in an object initializer; maps use a
    /// collection initializer.
    Property,
    /// A property that only accepts a collection initializer.
    Initializer,
    /// Anywhere else.
    Value,
}

#[derive(Debug, Clone, Copy)]
struct Slot<'p> {
    expected: Option<&'p Type>,
    scope: Scope,
    place: Place,
}

impl<'p> Slot<'p> {
    fn value(scope: Scope) -> Self {
        Slot {
            expected: None,
            scope,
            place: Place::Value,
        }
    }
}

/// Emits a program as C# source.
pub struct CSharpWriter<'p> {
    ctx: EmissionContext<'p>,
    system: BTreeSet<&'static str>,
    packages: BTreeSet<&'p str>,
}

impl<'p> CSharpWriter<'p> {
    fn new(program: &'p Program) -> Self {
        Self {
            ctx: EmissionContext::new(program, Target::CSharp, STYLE),
            system: BTreeSet::new(),
            packages: BTreeSet::new(),
        }
    }

    /// Emit a program to C# source.
    pub fn emit(program: &'p Program) -> Result<String, EmitError> {
        let mut writer = Self::new(program);
        writer.ctx.indent();
        writer.write_body(&program.body)?;
        writer.ctx.dedent();
        Ok(writer.finish())
    }

    fn finish(self) -> String {
        let root = self.ctx.program().id;
        let mut out = self.ctx.detached(root, CommentPosition::Leading);
        let footer = self.ctx.detached(root, CommentPosition::Trailing);

        for namespace in &self.system {
            out.push_str(&format!("using {namespace};\n"));
        }
        out.push_str("using Pulumi;\n");
        for package in &self.packages {
            let alias = pascal_case(package);
            out.push_str(&format!("using {alias} = Pulumi.{alias};\n"));
        }
        out.push('\n');
        out.push_str("return await Deployment.RunAsync(() => \n{\n");
        out.push_str(&self.ctx.finish());
        out.push_str("});\n");
        out.push_str(&footer);
        out
    }

    fn write_body(&mut self, body: &'p [Stmt]) -> Result<(), EmitError> {
        let split = body
            .iter()
            .position(|s| matches!(s.kind, StmtKind::Output { .. }))
            .unwrap_or(body.len());
        let (stmts, outputs) = body.split_at(split);
        if let Some(stmt) = outputs
            .iter()
            .find(|s| !matches!(s.kind, StmtKind::Output { .. }))
        {
            return Err(self.ctx.unsupported(
                stmt.id,
                stmt.kind.tag(),
                "statement after an output; outputs are returned from the program and must come last",
            ));
        }

        for (i, stmt) in stmts.iter().enumerate() {
            if i > 0 {
                self.ctx.blank_line();
            }
            self.write_stmt(stmt)?;
        }
        if !outputs.is_empty() {
            if !stmts.is_empty() {
                self.ctx.blank_line();
            }
            self.write_outputs(outputs)?;
        }
        Ok(())
    }

    fn write_stmt(&mut self, stmt: &'p Stmt) -> Result<(), EmitError> {
        match &stmt.kind {
            StmtKind::Resource(decl) => self.write_resource(stmt.id, decl),

            StmtKind::Binding { name, value } => {
                let head = format!("var {} = ", ident(name));
                self.write_line_with(Some(stmt.id), &head, value, Slot::value(Scope::Resource), ";")?;
                let kind = match &value.kind {
                    ExprKind::Invoke { token, .. } => BindingKind::Invoke { token },
                    _ => BindingKind::Local,
                };
                self.ctx.declare(name, stmt.id, kind);
                Ok(())
            }

            StmtKind::Expr { expr } => {
                // Method calls are valid statements; anything else is discarded.
                let head = match expr.kind {
                    ExprKind::Invoke { .. } => "",
                    _ => "_ = ",
                };
                self.write_line_with(Some(stmt.id), head, expr, Slot::value(Scope::Resource), ";")
            }

            StmtKind::Output { .. } => Err(self.ctx.unsupported(
                stmt.id,
                "output",
                "outputs must form the end of the program",
            )),
        }
    }

    fn write_resource(&mut self, id: NodeId, decl: &'p ResourceDecl) -> Result<(), EmitError> {
        let token = self.parse_token(id, &decl.token)?;
        let type_name = format!("{}.{}", self.qualified(&token), pascal_case(token.member));

        self.ctx.leading(id);
        self.ctx.start_line();
        self.ctx.write(&format!(
            "var {} = new {type_name}({}",
            ident(&decl.name),
            quoted(decl.logical_name())
        ));

        if decl.properties.is_empty() && decl.options.is_empty() {
            self.ctx.write(");");
            self.ctx.end_line();
        } else {
            if decl.properties.is_empty() {
                self.ctx.write(", null");
            } else {
                self.ctx.write(", new()");
                self.ctx.end_line();
                self.write_properties(&decl.properties, Scope::Resource)?;
                self.ctx.start_line();
                self.ctx.write("}");
            }
            if !decl.options.is_empty() {
                self.ctx.write(", new CustomResourceOptions");
                self.ctx.end_line();
                self.ctx.line("{");
                self.ctx.indent();
                for option in &decl.options {
                    let (key, place) = match option.name {
                        OptionName::IgnoreChanges => ("IgnoreChanges", Place::Initializer),
                        name => (option_key(name), Place::Value),
                    };
                    let slot = Slot {
                        expected: None,
                        scope: Scope::Resource,
                        place,
                    };
                    self.write_line_with(Some(option.id), &format!("{key} = "), &option.value, slot, ",")?;
                }
                self.ctx.dedent();
                self.ctx.start_line();
                self.ctx.write("}");
            }
            self.ctx.write(");");
            self.ctx.end_line();
        }
        self.ctx.trailing(id);

        self.ctx.declare(&decl.name, id, BindingKind::Resource { token: &decl.token });
        Ok(())
    }

    /// The trailing run of outputs, folded into the returned dictionary.
    fn write_outputs(&mut self, outputs: &'p [Stmt]) -> Result<(), EmitError> {
        self.system.insert(GENERIC);
        let last = outputs.len().saturating_sub(1);

        if let Some(first) = outputs.first() {
            self.ctx.leading(first.id);
        }
        self.ctx.line("return new Dictionary<string, object?>");
        self.ctx.line("{");
        self.ctx.indent();
        for (i, stmt) in outputs.iter().enumerate() {
            let StmtKind::Output { name, value } = &stmt.kind else {
                continue;
            };
            let ids = hoisted_ids(value);
            if i > 0 {
                self.ctx.leading(stmt.id);
            }
            self.ctx.leading_all(&ids);
            self.ctx.start_line();
            self.ctx.write(&format!("[{}] = ", quoted(name)));
            self.write_expr(value, Slot::value(Scope::Resource))?;
            self.ctx.write(",");
            self.ctx.end_line();
            self.ctx.trailing_all(&ids);
            if i < last {
                self.ctx.trailing(stmt.id);
            }
        }
        self.ctx.dedent();
        self.ctx.line("};");
        if let Some(stmt) = outputs.last() {
            self.ctx.trailing(stmt.id);
        }
        Ok(())
    }

    /// One line (or block) owned by `owner`: `head`, the value, then `tail`.
    fn write_line_with(
        &mut self,
        owner: Option<NodeId>,
        head: &str,
        value: &'p Expr,
        slot: Slot<'p>,
        tail: &str,
    ) -> Result<(), EmitError> {
        let ids = hoisted_ids(value);
        if let Some(owner) = owner {
            self.ctx.leading(owner);
        }
        self.ctx.leading_all(&ids);
        self.ctx.start_line();
        self.ctx.write(head);
        self.write_expr(value, slot)?;
        self.ctx.write(tail);
        self.ctx.end_line();
        self.ctx.trailing_all(&ids);
        if let Some(owner) = owner {
            self.ctx.trailing(owner);
        }
        Ok(())
    }

    /// `{` and one `Name = value,` line per property; leaves the closing
    /// brace to the caller.
    fn write_properties(&mut self, properties: &'p [Property], scope: Scope) -> Result<(), EmitError> {
        self.ctx.line("{");
        self.ctx.indent();
        for prop in properties {
            let slot = Slot {
                expected: None,
                scope,
                place: Place::Property,
            };
            let head = format!("{} = ", pascal_case(&prop.name));
            self.write_line_with(Some(prop.id), &head, &prop.value, slot, ",")?;
        }
        self.ctx.dedent();
        Ok(())
    }

    /// Write `expr` starting at the current position. Block values end on
    /// their closing brace with the line left open.
    fn write_expr(&mut self, expr: &'p Expr, slot: Slot<'p>) -> Result<(), EmitError> {
        match &expr.kind {
            ExprKind::Null => self.ctx.write("null"),
            ExprKind::Bool { value } => self.ctx.write(if *value { "true" } else { "false" }),
            ExprKind::Int { value } => self.ctx.write(&value.to_string()),
            ExprKind::Number { value } => self.ctx.write(&format_number(*value)),
            ExprKind::String { value } => self.ctx.write(&string_literal(value)),

            ExprKind::List { items } => {
                let element = expr.type_or(slot.expected).and_then(Type::element);
                if slot.place == Place::Initializer {
                    self.ctx.end_line();
                } else if items.is_empty() {
                    let name = match element.map(|t| t.unwrap_optional().0) {
                        Some(Type::Object(token)) => self.input_class(expr.id, token, slot.scope)?,
                        other => array_element(other).to_string(),
                    };
                    self.ctx.write(&format!("new {name}[]"));
                    self.ctx.end_line();
                } else {
                    self.ctx.write("new[]");
                    self.ctx.end_line();
                }
                self.ctx.line("{");
                self.ctx.indent();
                for item in items {
                    let item_slot = Slot {
                        expected: element,
                        scope: slot.scope,
                        place: Place::Value,
                    };
                    self.write_line_with(None, "", item, item_slot, ",")?;
                }
                self.ctx.dedent();
                self.ctx.start_line();
                self.ctx.write("}");
            }

            ExprKind::Map { entries } => {
                let element = expr.type_or(slot.expected).and_then(Type::element);
                if slot.place == Place::Value {
                    self.write_dictionary(entries, element, slot.scope)?;
                } else {
                    self.ctx.end_line();
                    self.ctx.line("{");
                    self.ctx.indent();
                    for entry in entries {
                        let entry_slot = Slot {
                            expected: element,
                            scope: slot.scope,
                            place: Place::Value,
                        };
                        let head = format!("{{ {}, ", quoted(&entry.name));
                        self.write_line_with(Some(entry.id), &head, &entry.value, entry_slot, " },")?;
                    }
                    self.ctx.dedent();
                    self.ctx.start_line();
                    self.ctx.write("}");
                }
            }

            ExprKind::Object { properties } => {
                match expr.type_or(slot.expected).and_then(Type::object_token) {
                    Some(token) => {
                        let class = self.input_class(expr.id, token, slot.scope)?;
                        self.ctx.write(&format!("new {class}"));
                        self.ctx.end_line();
                        self.write_properties(properties, slot.scope)?;
                        self.ctx.start_line();
                        self.ctx.write("}");
                    }
                    None => self.write_dictionary(properties, None, slot.scope)?,
                }
            }

            ExprKind::Reference { binding, path } => {
                let text = self.reference(expr.id, binding, path)?;
                self.ctx.write(&text);
            }

            ExprKind::Invoke { token, args } => {
                let parsed = self.parse_token(expr.id, token)?;
                let function = format!("{}.{}", self.qualified(&parsed), pascal_case(parsed.member));
                if args.is_empty() {
                    self.ctx.write(&format!("{function}.Invoke()"));
                } else {
                    self.ctx.write(&format!("{function}.Invoke(new()"));
                    self.ctx.end_line();
                    self.write_properties(args, Scope::Invoke)?;
                    self.ctx.start_line();
                    self.ctx.write("})");
                }
            }

            ExprKind::Call { function, args } => {
                let (builtin, arg) = builtins::resolve_call(&self.ctx, expr.id, function, args)?;
                let head = match builtin {
                    Builtin::Secret => "Output.CreateSecret(",
                    Builtin::ReadFile => {
                        self.system.insert("System.IO");
                        "File.ReadAllText("
                    }
                    Builtin::ToJson => {
                        self.system.insert("System.Text.Json");
                        "JsonSerializer.Serialize("
                    }
                };
                self.ctx.write(head);
                self.write_expr(arg, Slot::value(slot.scope))?;
                self.ctx.write(")");
            }
        }
        Ok(())
    }

    fn write_dictionary(
        &mut self,
        entries: &'p [Property],
        element: Option<&'p Type>,
        scope: Scope,
    ) -> Result<(), EmitError> {
        self.system.insert(GENERIC);
        self.ctx.write("new Dictionary<string, object?>");
        self.ctx.end_line();
        self.ctx.line("{");
        self.ctx.indent();
        for entry in entries {
            let slot = Slot {
                expected: element,
                scope,
                place: Place::Value,
            };
            let head = format!("[{}] = ", quoted(&entry.name));
            self.write_line_with(Some(entry.id), &head, &entry.value, slot, ",")?;
        }
        self.ctx.dedent();
        self.ctx.start_line();
        self.ctx.write("}");
        Ok(())
    }

    fn reference(&self, at: NodeId, name: &str, path: &[PathSegment]) -> Result<String, EmitError> {
        let binding = self.ctx.resolve(name, at)?;
        let var = ident(name);
        let text = match binding.kind {
            // Output properties are lifted one level; deeper access goes
            // through `Apply`.
            BindingKind::Resource { .. } => match path.split_first() {
                Some((PathSegment::Property(first), rest)) if !rest.is_empty() => {
                    let param = camel_case(first);
                    format!(
                        "{var}.{}.Apply({param} => {param}{})",
                        pascal_case(first),
                        member_path(rest)
                    )
                }
                _ => format!("{var}{}", member_path(path)),
            },
            BindingKind::Invoke { token } if !path.is_empty() => {
                let member = Token::parse(token).map_or("invoke", |t| t.member);
                let param = format!("{}Result", camel_case(member));
                format!("{var}.Apply({param} => {param}{})", member_path(path))
            }
            _ => format!("{var}{}", member_path(path)),
        };
        Ok(text)
    }

    /// `Aws.S3.Inputs.BucketRuleArgs` for an object type token.
    fn input_class(&mut self, node: NodeId, token: &'p str, scope: Scope) -> Result<String, EmitError> {
        let token = self.parse_token(node, token)?;
        let suffix = match scope {
            Scope::Resource => "Args",
            Scope::Invoke => "InputArgs",
        };
        Ok(format!(
            "{}.Inputs.{}{suffix}",
            self.qualified(&token),
            pascal_case(token.member)
        ))
    }

    fn parse_token(&self, node: NodeId, token: &'p str) -> Result<Token<'p>, EmitError> {
        Token::parse(token).ok_or_else(|| self.ctx.invalid_token(node, token))
    }

    /// `Aws.Ec2`, recording the package alias.
    fn qualified(&mut self, token: &Token<'p>) -> String {
        self.packages.insert(token.package);
        let mut name = pascal_case(token.package);
        if let Some(module) = token.module {
            name.push('.');
            name.push_str(&pascal_case(module));
        }
        name
    }
}

fn ident(name: &str) -> String {
    escape_reserved(name.to_string(), KEYWORDS, |n| format!("@{n}"))
}

fn option_key(name: OptionName) -> &'static str {
    match name {
        OptionName::Provider => "Provider",
        OptionName::Parent => "Parent",
        OptionName::DependsOn => "DependsOn",
        OptionName::Protect => "Protect",
        OptionName::IgnoreChanges => "IgnoreChanges",
    }
}

fn member_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(|segment| match segment {
            PathSegment::Property(name) => format!(".{}", pascal_case(name)),
            PathSegment::Index(i) => format!("[{i}]"),
        })
        .collect()
}

/// Element type for an empty array, which has nothing to infer from.
fn array_element(element: Option<&Type>) -> &'static str {
    match element {
        Some(Type::String) => "string",
        Some(Type::Int) => "int",
        Some(Type::Number) => "double",
        Some(Type::Bool) => "bool",
        _ => "object",
    }
}

fn string_literal(s: &str) -> String {
    if is_multiline(s) {
        format!("@\"{}\"", s.replace('"', "\"\""))
    } else {
        quoted(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{CommentBlock, CommentMap};
    use pretty_assertions::assert_eq;

    const PRELUDE: &str = "return await Deployment.RunAsync(() => \n{\n";

    fn comment(map: &mut CommentMap, node: NodeId, text: &str, position: CommentPosition) {
        map.attach(node, CommentBlock::from_text(text), position).unwrap();
    }

    #[test]
    fn test_resource_without_properties() {
        let b = Builder::new();
        let program = b.program(vec![b.resource("bucket", "aws:s3/bucket:Bucket", vec![])]);
        let out = CSharpWriter::emit(&program).unwrap();
        assert_eq!(
            out,
            format!(
                "using Pulumi;\nusing Aws = Pulumi.Aws;\n\n{PRELUDE}    var bucket = new Aws.S3.Bucket(\"bucket\");\n}});\n"
            )
        );
    }

    #[test]
    fn test_resource_options() {
        let b = Builder::new();
        let provider = b.resource("east", "pulumi:providers:aws", vec![]);
        let bucket = b.resource_with_options(
            "bucket",
            "aws:s3/bucket:Bucket",
            vec![],
            vec![
                b.option(OptionName::Provider, b.reference("east", &[])),
                b.option(OptionName::Protect, b.bool(true)),
                b.option(OptionName::IgnoreChanges, b.list(vec![b.string("tags")])),
            ],
        );
        let program = b.program(vec![provider, bucket]);
        let out = CSharpWriter::emit(&program).unwrap();
        assert_eq!(
            out,
            format!(
                "using Pulumi;\nusing Aws = Pulumi.Aws;\n\n{PRELUDE}\
                 \x20   var east = new Aws.Provider(\"east\");\n\
                 \n\
                 \x20   var bucket = new Aws.S3.Bucket(\"bucket\", null, new CustomResourceOptions\n\
                 \x20   {{\n\
                 \x20       Provider = east,\n\
                 \x20       Protect = true,\n\
                 \x20       IgnoreChanges = \n\
                 \x20       {{\n\
                 \x20           \"tags\",\n\
                 \x20       }},\n\
                 \x20   }});\n\
                 }});\n"
            )
        );
    }

    #[test]
    fn test_inline_comments_are_hoisted() {
        let b = Builder::new();
        let inner = b.string("hunter2");
        let inner_id = inner.id;
        let call = b.call("secret", vec![inner]);
        let call_id = call.id;
        let stmt = b.binding("password", call);
        let stmt_id = stmt.id;
        let program = b.program(vec![stmt]);

        let mut comments = CommentMap::new();
        comment(&mut comments, stmt_id, "statement", CommentPosition::Leading);
        comment(&mut comments, call_id, "call", CommentPosition::Leading);
        comment(&mut comments, inner_id, "argument", CommentPosition::Leading);
        comment(&mut comments, inner_id, "after argument", CommentPosition::Trailing);
        comment(&mut comments, stmt_id, "after statement", CommentPosition::Trailing);
        let program = program.with_comments(comments);

        let out = CSharpWriter::emit(&program).unwrap();
        assert_eq!(
            out,
            format!(
                "using Pulumi;\n\n{PRELUDE}\
                 \x20   // statement\n\
                 \x20   // call\n\
                 \x20   // argument\n\
                 \x20   var password = Output.CreateSecret(\"hunter2\");\n\
                 \x20   // after argument\n\
                 \x20   // after statement\n\
                 }});\n"
            )
        );
    }

    #[test]
    fn test_builtins_add_usings() {
        let b = Builder::new();
        let file = b.binding("key", b.call("readFile", vec![b.string("key.pub")]));
        let policy = b.binding(
            "policy",
            b.call("toJSON", vec![b.map(vec![b.prop("Version", b.string("2012-10-17"))])]),
        );
        let program = b.program(vec![file, policy]);
        let out = CSharpWriter::emit(&program).unwrap();
        assert!(out.starts_with(
            "using System.Collections.Generic;\nusing System.IO;\nusing System.Text.Json;\nusing Pulumi;\n"
        ));
        assert!(out.contains("    var key = File.ReadAllText(\"key.pub\");\n"));
        assert!(out.contains(
            "    var policy = JsonSerializer.Serialize(new Dictionary<string, object?>\n    {\n        [\"Version\"] = \"2012-10-17\",\n    });\n"
        ));
    }

    #[test]
    fn test_output_comments_around_wrapper() {
        let b = Builder::new();
        let first = b.output("a", b.int(1));
        let second = b.output("b", b.int(2));
        let (first_id, second_id) = (first.id, second.id);
        let program = b.program(vec![first, second]);

        let mut comments = CommentMap::new();
        comment(&mut comments, first_id, "first", CommentPosition::Leading);
        comment(&mut comments, first_id, "after first", CommentPosition::Trailing);
        comment(&mut comments, second_id, "second", CommentPosition::Leading);
        comment(&mut comments, second_id, "last", CommentPosition::Trailing);
        let program = program.with_comments(comments);

        let out = CSharpWriter::emit(&program).unwrap();
        assert_eq!(
            out,
            format!(
                "using System.Collections.Generic;\nusing Pulumi;\n\n{PRELUDE}\
                 \x20   // first\n\
                 \x20   return new Dictionary<string, object?>\n\
                 \x20   {{\n\
                 \x20       [\"a\"] = 1,\n\
                 \x20       // after first\n\
                 \x20       // second\n\
                 \x20       [\"b\"] = 2,\n\
                 \x20   }};\n\
                 \x20   // last\n\
                 }});\n"
            )
        );
    }

    #[test]
    fn test_statement_after_output_is_unsupported() {
        let b = Builder::new();
        let output = b.output("a", b.int(1));
        let binding = b.binding("x", b.int(2));
        let binding_id = binding.id;
        let program = b.program(vec![output, binding]);
        match CSharpWriter::emit(&program) {
            Err(EmitError::UnsupportedNode { node, kind, .. }) => {
                assert_eq!(node, binding_id);
                assert_eq!(kind, "binding");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_references() {
        let b = Builder::new();
        let ami = b.binding("ami", b.invoke("aws:index/getAmi:getAmi", vec![]));
        let bucket = b.resource("bucket", "aws:s3/bucket:Bucket", vec![]);
        let a = b.binding("a", b.reference("ami", &["id"]));
        let c = b.binding("c", b.reference("bucket", &["loggings", "targetBucket"]));
        let program = b.program(vec![ami, bucket, a, c]);
        let out = CSharpWriter::emit(&program).unwrap();
        assert!(out.contains("    var ami = Aws.GetAmi.Invoke();\n"));
        assert!(out.contains("    var a = ami.Apply(getAmiResult => getAmiResult.Id);\n"));
        assert!(out.contains("    var c = bucket.Loggings.Apply(loggings => loggings.TargetBucket);\n"));
    }

    #[test]
    fn test_missing_reference() {
        let b = Builder::new();
        let reference = b.reference("nowhere", &["id"]);
        let reference_id = reference.id;
        let program = b.program(vec![b.binding("x", reference)]);
        assert_eq!(
            CSharpWriter::emit(&program),
            Err(EmitError::MissingReference {
                target: Target::CSharp,
                node: reference_id,
                name: "nowhere".into(),
            })
        );
    }

    #[test]
    fn test_empty_list_names_its_element_type() {
        let b = Builder::new();
        let program = b.program(vec![
            b.binding("untyped", b.list(vec![])),
            b.binding("names", b.list(vec![]).with_type(Type::list(Type::String))),
        ]);
        let out = CSharpWriter::emit(&program).unwrap();
        assert!(out.contains("    var untyped = new object[]\n    {\n    };\n"), "{out}");
        assert!(out.contains("    var names = new string[]\n    {\n    };\n"), "{out}");

        let rules = b.resource(
            "bucket",
            "aws:s3/bucket:Bucket",
            vec![b.prop(
                "rules",
                b.list(vec![]).with_type(Type::list(Type::object("aws:s3/BucketRule:BucketRule"))),
            )],
        );
        let out = CSharpWriter::emit(&b.program(vec![rules])).unwrap();
        assert!(out.contains("        Rules = new Aws.S3.Inputs.BucketRuleArgs[]\n"), "{out}");
    }

    #[test]
    fn test_keywords_and_strings() {
        assert_eq!(ident("class"), "@class");
        assert_eq!(ident("bucket"), "bucket");
        assert_eq!(string_literal("a\n\"b\""), "@\"a\n\"\"b\"\"\"");
        assert_eq!(string_literal("tab\there"), "\"tab\\there\"");
    }
}
