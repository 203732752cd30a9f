//! Identifier casing and type token parsing.

/// A parsed type token, `package:module/member:Member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub package: &'a str,
    /// `None` for the package's root (`index`) module.
    pub module: Option<&'a str>,
    pub member: &'a str,
}

impl<'a> Token<'a> {
    /// Parse a token. `pulumi:providers:<pkg>` names the package's provider.
    pub fn parse(token: &'a str) -> Option<Self> {
        let mut parts = token.split(':');
        let (package, module, member) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || package.is_empty() || module.is_empty() || member.is_empty()
        {
            return None;
        }

        if package == "pulumi" && module == "providers" {
            return Some(Token {
                package: member,
                module: None,
                member: "Provider",
            });
        }

        // `ec2/securityGroup` names the file inside the module; only the
        // leading segment is the module.
        let module = module.split('/').next().filter(|m| !m.is_empty())?;
        Some(Token {
            package,
            module: (module != "index").then_some(module),
            member,
        })
    }
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == '-' || c == '_' || c == ' ' || c == '.')
        .filter(|w| !w.is_empty())
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `fromPort` → `FromPort`, `azure-native` → `AzureNative`.
pub fn pascal_case(s: &str) -> String {
    words(s).map(upper_first).collect()
}

/// `FromPort` → `fromPort`, `get-ami` → `getAmi`.
pub fn camel_case(s: &str) -> String {
    let pascal = pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `cidrBlocks` → `cidr_blocks`, `HTTPServer` → `http_server`.
pub fn snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' || c == '.' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Apply `escape` to `name` if it is a reserved word.
pub fn escape_reserved(
    name: String,
    reserved: &[&str],
    escape: impl Fn(String) -> String,
) -> String {
    if reserved.contains(&name.as_str()) {
        escape(name)
    } else {
        name
    }
}
