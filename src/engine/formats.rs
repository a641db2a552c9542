//! Builtin output formats.

use super::hooks::FormatArgs;
use crate::error::Result;

/// Header used when a file names no header hook.
pub const DEFAULT_HEADER: &str = "Do not edit directly, this file was auto-generated.";

/// Render header lines as a `/** ... */` block followed by a blank line.
pub fn long_comment(lines: &[String]) -> String {
    let mut out = String::from("/**\n");
    for line in lines {
        out.push_str(" * ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(" */\n\n");
    out
}

/// `$name: value;` declarations.
pub fn scss_variables(args: &FormatArgs<'_>) -> Result<String> {
    let mut out = long_comment(&args.header);
    for token in &args.tokens {
        out.push_str(&format!("${}: {};\n", token.name, token.value));
    }
    Ok(out)
}

/// `export const name = "value";` declarations.
pub fn javascript_es6(args: &FormatArgs<'_>) -> Result<String> {
    let mut out = long_comment(&args.header);
    for token in &args.tokens {
        let value = serde_json::to_string(&token.value)?;
        out.push_str(&format!("export const {} = {};\n", token.name, value));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::hooks::{FORMAT_JAVASCRIPT_ES6, FORMAT_SCSS_VARIABLES};
    use crate::engine::token::{Attributes, Dictionary, Token};
    use crate::engine::{FileConfig, PlatformConfig};

    fn token(name: &str, value: &str) -> Token {
        Token {
            path: vec!["color".to_string(), name.to_string()],
            name: name.to_string(),
            value: value.to_string(),
            original: value.to_string(),
            attributes: Attributes::default(),
        }
    }

    #[test]
    fn test_scss_and_es6() {
        let dictionary =
            Dictionary::new(vec![token("color-bg", "#ffffff"), token("color-fg", "#000000")]);
        let file = FileConfig::new("out", FORMAT_SCSS_VARIABLES);
        let platform = PlatformConfig::default();
        let args = FormatArgs {
            dictionary: &dictionary,
            tokens: dictionary.all_tokens().iter().collect(),
            file: &file,
            platform: &platform,
            header: vec!["Generated".to_string()],
        };

        insta::assert_snapshot!(scss_variables(&args).unwrap(), @r###"
        /**
         * Generated
         */

        $color-bg: #ffffff;
        $color-fg: #000000;
        "###);

        let es6 = javascript_es6(&args).unwrap();
        assert!(es6.starts_with("/**\n * Generated\n */\n\n"));
        assert!(es6.ends_with("export const color-fg = \"#000000\";\n"));
    }

    #[test]
    fn test_es6_escapes_values() {
        let dictionary = Dictionary::new(vec![token("fontFamily", "\"Inter\", sans-serif")]);
        let file = FileConfig::new("out", FORMAT_JAVASCRIPT_ES6);
        let platform = PlatformConfig::default();
        let args = FormatArgs {
            dictionary: &dictionary,
            tokens: dictionary.all_tokens().iter().collect(),
            file: &file,
            platform: &platform,
            header: vec![],
        };

        let es6 = javascript_es6(&args).unwrap();
        assert!(es6.contains(r#"export const fontFamily = "\"Inter\", sans-serif";"#));
    }
}
