//! Tokens and the token tree they are flattened from.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{Result, TokenError};

/// Category/type/item classification derived from a token's path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub category: Option<String>,
    pub kind: Option<String>,
    pub item: Option<String>,
}

impl Attributes {
    /// Whether any classification level equals `value`.
    pub fn includes(&self, value: &str) -> bool {
        [&self.category, &self.kind, &self.item]
            .iter()
            .any(|level| level.as_deref() == Some(value))
    }
}

/// A token as declared in the source tree, before any platform transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceToken {
    pub path: Vec<String>,
    pub value: String,
}

/// A token after a platform's transforms have run.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Hierarchical name, e.g. `["color", "primary"]`.
    pub path: Vec<String>,
    /// Output identifier produced by the platform's name transforms.
    pub name: String,
    /// Resolved, transformed value.
    pub value: String,
    /// Value as declared, references intact.
    pub original: String,
    pub attributes: Attributes,
}

impl Token {
    pub(crate) fn from_source(source: &SourceToken) -> Self {
        Self {
            path: source.path.clone(),
            name: source.path.join("-"),
            value: source.value.clone(),
            original: source.value.clone(),
            attributes: Attributes::default(),
        }
    }

    /// Dotted hierarchical name, the form references use.
    pub fn key(&self) -> String {
        self.path.join(".")
    }

    /// Top-level group of the token (`color`, `sizing`, `font`, ...).
    pub fn category(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    /// Whether any path segment equals `segment`.
    pub fn in_group(&self, segment: &str) -> bool {
        self.path.iter().any(|p| p == segment)
    }

    /// Whether the declared value points at other tokens.
    pub fn is_alias(&self) -> bool {
        !references(&self.original).is_empty()
    }
}

/// The transformed tokens of one platform, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    tokens: Vec<Token>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.key(), i))
            .collect();
        Self { tokens, index }
    }

    /// All tokens in declaration order.
    pub fn all_tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Look up a token by dotted key.
    pub fn get(&self, key: &str) -> Option<&Token> {
        self.index.get(normalize_reference(key)).map(|&i| &self.tokens[i])
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Extract `{a.b}` references from a value, in order of appearance.
pub fn references(value: &str) -> Vec<&str> {
    let mut refs = Vec::new();
    let mut rest = value;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let inner = &after[..end];
        if is_reference_body(inner) {
            refs.push(normalize_reference(inner));
        }
        rest = &after[end + 1..];
    }

    refs
}

/// The referenced key when the whole value is a single reference.
pub fn alias_target(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix('{')?.strip_suffix('}')?;
    is_reference_body(inner).then(|| normalize_reference(inner))
}

/// Replace every reference in `value` using `lookup`.
pub(crate) fn substitute(
    value: &str,
    mut lookup: impl FnMut(&str) -> Result<String>,
) -> Result<String> {
    if let Some(target) = alias_target(value) {
        return lookup(target);
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let inner = &after[..end];
        out.push_str(&rest[..start]);
        if is_reference_body(inner) {
            out.push_str(&lookup(normalize_reference(inner))?);
        } else {
            out.push_str(&rest[start..start + end + 2]);
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

fn is_reference_body(inner: &str) -> bool {
    !inner.is_empty() && !inner.contains(|c: char| c.is_whitespace() || c == '{' || c == '"')
}

fn normalize_reference(key: &str) -> &str {
    key.strip_suffix(".value").unwrap_or(key)
}

/// Flatten a token tree into source tokens, in declaration order.
///
/// A leaf is any object carrying a `value` key; other scalars at group level
/// are ignored.
pub fn flatten_tree(tree: &Map<String, Value>) -> Result<Vec<SourceToken>> {
    let mut tokens = Vec::new();
    let mut path = Vec::new();
    walk(tree, &mut path, &mut tokens)?;
    Ok(tokens)
}

fn walk(
    node: &Map<String, Value>,
    path: &mut Vec<String>,
    out: &mut Vec<SourceToken>,
) -> Result<()> {
    for (key, child) in node {
        let Value::Object(obj) = child else {
            continue;
        };

        path.push(key.clone());
        match obj.get("value") {
            Some(value) => out.push(SourceToken {
                path: path.clone(),
                value: scalar_to_string(value, path)?,
            }),
            None => walk(obj, path, out)?,
        }
        path.pop();
    }
    Ok(())
}

fn scalar_to_string(value: &Value, path: &[String]) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(TokenError::Parse {
            message: format!("Token '{}' must have a scalar value", path.join(".")),
            help: None,
        }),
    }
}
