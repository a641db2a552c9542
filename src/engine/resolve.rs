//! Per-platform transform and reference resolution.

use std::collections::HashMap;

use super::hooks::{HookSet, Transform, ValueTransform};
use super::token::{self, Dictionary, SourceToken, Token};
use super::PlatformConfig;
use crate::error::{Result, TokenError};
use crate::validation::Diagnostics;

#[derive(Clone)]
enum State {
    Pending,
    Resolving,
    Done(String),
}

/// Apply a platform's transforms to every token and resolve references.
///
/// Attribute and name transforms run first, in listed order. Values are then
/// resolved depth-first: a reference takes the final value of its target.
/// Non-transitive value transforms only touch tokens declared without
/// references.
pub(crate) fn transform_tokens(
    sources: &[SourceToken],
    platform: &PlatformConfig,
    hooks: &HookSet,
    diagnostics: &mut Diagnostics,
) -> Result<Dictionary> {
    let transforms = platform
        .transforms
        .iter()
        .map(|name| hooks.transform(name))
        .collect::<Result<Vec<_>>>()?;

    let mut tokens: Vec<Token> = sources.iter().map(Token::from_source).collect();
    for token in &mut tokens {
        for transform in &transforms {
            match transform {
                Transform::Attribute(f) => token.attributes = f(token),
                Transform::Name(f) => token.name = f(token, platform),
                Transform::Value(_) => {}
            }
        }
    }

    let value_transforms: Vec<ValueTransform> = transforms
        .iter()
        .filter_map(|t| match t {
            Transform::Value(v) => Some(*v),
            _ => None,
        })
        .collect();

    let index: HashMap<String, usize> = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| (t.key(), i))
        .collect();

    let mut resolver = Resolver {
        tokens: &tokens,
        index: &index,
        transforms: &value_transforms,
        states: vec![State::Pending; tokens.len()],
        diagnostics,
    };
    for i in 0..tokens.len() {
        resolver.resolve(i)?;
    }

    let values: Vec<String> = resolver
        .states
        .into_iter()
        .map(|s| match s {
            State::Done(v) => v,
            _ => String::new(),
        })
        .collect();
    for (token, value) in tokens.iter_mut().zip(values) {
        token.value = value;
    }

    Ok(Dictionary::new(tokens))
}

struct Resolver<'a> {
    tokens: &'a [Token],
    index: &'a HashMap<String, usize>,
    transforms: &'a [ValueTransform],
    states: Vec<State>,
    diagnostics: &'a mut Diagnostics,
}

impl Resolver<'_> {
    fn resolve(&mut self, i: usize) -> Result<String> {
        match &self.states[i] {
            State::Done(value) => return Ok(value.clone()),
            State::Resolving => {
                return Err(TokenError::Reference {
                    message: format!("Circular reference involving '{}'", self.tokens[i].key()),
                    help: Some("Break the cycle by giving one token a literal value".to_string()),
                })
            }
            State::Pending => {}
        }
        self.states[i] = State::Resolving;

        let source = self.tokens[i].clone();
        let alias = source.is_alias();
        let owner = source.key();

        let value = if alias {
            token::substitute(&source.original, |key| {
                let &target = self.index.get(key).ok_or_else(|| TokenError::Reference {
                    message: format!("Token '{}' references '{}' which does not exist", owner, key),
                    help: None,
                })?;
                self.resolve(target)
            })?
        } else {
            source.original.clone()
        };

        let mut current = Token { value, ..source };
        for transform in self.transforms {
            if alias && !transform.transitive {
                continue;
            }
            if transform.filter.map_or(true, |f| f(&current)) {
                current.value = (transform.transform)(&current, self.diagnostics)?;
            }
        }

        self.states[i] = State::Done(current.value.clone());
        Ok(current.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::hooks::{COLOR_CSS, NAME_KEBAB};
    use pretty_assertions::assert_eq;

    fn source(path: &str, value: &str) -> SourceToken {
        SourceToken {
            path: path.split('.').map(str::to_string).collect(),
            value: value.to_string(),
        }
    }

    fn platform(transforms: &[&str]) -> PlatformConfig {
        PlatformConfig {
            transforms: transforms.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn upper(token: &Token, _: &mut Diagnostics) -> Result<String> {
        Ok(token.value.to_uppercase())
    }

    fn resolve(
        sources: &[SourceToken],
        hooks: &HookSet,
        transforms: &[&str],
    ) -> Result<Dictionary> {
        transform_tokens(sources, &platform(transforms), hooks, &mut Diagnostics::new())
    }

    #[test]
    fn test_alias_takes_final_value() {
        let sources = vec![
            source("color.text", "{color.base}"),
            source("color.base", "#FFAA00"),
            source("border.main", "1px solid {color.base}"),
        ];
        let dict = resolve(&sources, &HookSet::builtin(), &[NAME_KEBAB, COLOR_CSS]).unwrap();

        assert_eq!(dict.get("color.base").unwrap().value, "#ffaa00");
        // color/css is not transitive, so the alias keeps the target's output
        assert_eq!(dict.get("color.text").unwrap().value, "#ffaa00");
        assert_eq!(dict.get("border.main").unwrap().value, "1px solid #ffaa00");
        assert_eq!(dict.get("color.text").unwrap().name, "color-text");
        assert_eq!(dict.get("color.text").unwrap().original, "{color.base}");
    }

    #[test]
    fn test_transitive_runs_on_aliases() {
        let hooks = HookSet::new()
            .with_transform(
                "value/upper",
                Transform::Value(ValueTransform {
                    filter: None,
                    transitive: true,
                    transform: upper,
                }),
            )
            .with_transform(
                "value/upper-literal",
                Transform::Value(ValueTransform {
                    filter: None,
                    transitive: false,
                    transform: upper,
                }),
            );
        let sources = vec![source("a", "x"), source("b", "{a}-y")];

        let dict = resolve(&sources, &hooks, &["value/upper"]).unwrap();
        assert_eq!(dict.get("b").unwrap().value, "X-Y");

        let dict = resolve(&sources, &hooks, &["value/upper-literal"]).unwrap();
        assert_eq!(dict.get("b").unwrap().value, "X-y");
    }

    #[test]
    fn test_unknown_reference() {
        let sources = vec![source("color.a", "{color.missing}")];
        let err = resolve(&sources, &HookSet::builtin(), &[]).unwrap_err();
        assert!(matches!(err, TokenError::Reference { .. }));
        assert!(err.to_string().contains("color.missing"));
    }

    #[test]
    fn test_cycle() {
        let sources = vec![source("a", "{b}"), source("b", "{c}"), source("c", "{a}")];
        let err = resolve(&sources, &HookSet::builtin(), &[]).unwrap_err();
        assert!(err.to_string().contains("Circular reference"));
    }

    #[test]
    fn test_unknown_transform() {
        let err = resolve(&[], &HookSet::builtin(), &["nope"]).unwrap_err();
        assert!(err.to_string().contains("Unknown transform 'nope'"));
    }
}
