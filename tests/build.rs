//! End-to-end theme builds against temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use design_tokens::tokens::SCRATCH_DIR_NAME;
use design_tokens::{
    build_tokens, BuildOptions, BuildResult, OutputFormat, ResolvedConfig, ThemeDefinition,
    TokenMap,
};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

fn map(entries: &[(&str, &str)]) -> TokenMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn config_in(dir: &Path, themes: Vec<ThemeDefinition>, formats: &[OutputFormat]) -> ResolvedConfig {
    let mut config = ResolvedConfig::with_themes(themes);
    config.output.directory = dir.join("out");
    config.output.formats = formats.to_vec();
    config
}

fn build(dir: &TempDir, config: &ResolvedConfig) -> BuildResult {
    build_tokens(config, &BuildOptions::in_dir(dir.path()))
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

fn scratch_exists(dir: &TempDir) -> bool {
    dir.path().join(SCRATCH_DIR_NAME).exists()
}

#[test]
fn single_theme_css() {
    let dir = tempdir().unwrap();
    let config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("primary", "#ff0000")]))],
        &[OutputFormat::Css],
    );

    let result = build(&dir, &config);

    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.generated_files, vec![dir.path().join("out/light.css")]);
    assert_eq!(
        read(dir.path().join("out/light.css")),
        "/**\n * Generated by design-tokens\n * Do not edit directly, this file was auto-generated.\n **/\n\n\
         .light {\n  --dt-color-primary: #ff0000;\n}\n\n"
    );
    assert!(!dir.path().join("out/light.scss").exists());
    assert!(!scratch_exists(&dir));
}

#[test]
fn empty_themes_fail_without_output() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), vec![], &OutputFormat::DEFAULTS);

    let result = build(&dir, &config);

    assert!(!result.success);
    assert!(result.errors[0].contains("At least one theme"));
    assert!(result.generated_files.is_empty());
    assert!(!dir.path().join("out").exists());
    assert!(!scratch_exists(&dir));
}

#[test]
fn repeated_builds_are_identical() {
    let dir = tempdir().unwrap();
    let mut config = config_in(
        dir.path(),
        vec![
            ThemeDefinition::new("light", map(&[("bg", "{color.white}"), ("fg", "#000000")])),
            ThemeDefinition::new("dark", map(&[("bg", "#000000"), ("fg", "{color.white}")]))
                .extending("light"),
        ],
        &OutputFormat::DEFAULTS,
    );
    config.base_colors = map(&[("white", "#FFFFFF")]);
    config.sizing = map(&[("sm", "4px")]);
    config.color_variants = true;

    let first = build(&dir, &config);
    assert!(first.success, "{:?}", first.errors);
    assert!(!scratch_exists(&dir));
    let snapshot: Vec<String> = first.generated_files.iter().map(|p| read(p.clone())).collect();

    let second = build(&dir, &config);
    assert!(second.success, "{:?}", second.errors);
    assert!(!scratch_exists(&dir));
    assert_eq!(first.generated_files, second.generated_files);
    let again: Vec<String> = second.generated_files.iter().map(|p| read(p.clone())).collect();
    assert_eq!(snapshot, again);
}

#[test]
fn child_theme_inherits_parent_colors() {
    let dir = tempdir().unwrap();
    let config = config_in(
        dir.path(),
        vec![
            ThemeDefinition::new("light", map(&[("bg", "#FFFFFF"), ("fg", "#000000")])),
            ThemeDefinition::new("dark", map(&[("bg", "#111111")])).extending("light"),
        ],
        &OutputFormat::DEFAULTS,
    );

    let result = build(&dir, &config);
    assert!(result.success, "{:?}", result.errors);

    let out = dir.path().join("out");
    assert_eq!(
        result.generated_files,
        vec![
            out.join("light.css"),
            out.join("light.scss"),
            out.join("light.ts"),
            out.join("dark.css"),
            out.join("dark.scss"),
            out.join("dark.ts"),
        ]
    );

    let css = read(out.join("dark.css"));
    assert!(css.contains(".dark {\n  --dt-color-bg: #111111;\n  --dt-color-fg: #000000;\n}\n"));

    let scss = read(out.join("dark.scss"));
    assert!(scss.contains("$color-bg: #111111;\n$color-fg: #000000;\n"));

    let ts = read(out.join("dark.ts"));
    assert!(ts.contains(
        "export const colorBg = \"#111111\";\nexport const colorFg = \"#000000\";\n"
    ));

    // SCSS lowercases hex, CSS keeps the declared value
    assert!(read(out.join("light.css")).contains("--dt-color-bg: #FFFFFF;"));
    assert!(read(out.join("light.scss")).contains("$color-bg: #ffffff;"));
}

#[test]
fn color_variants_per_format() {
    let dir = tempdir().unwrap();
    let mut config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("primary", "#ff0000")]))],
        &OutputFormat::DEFAULTS,
    );
    config.color_variants = true;

    let result = build(&dir, &config);
    assert!(result.success, "{:?}", result.errors);
    let out = dir.path().join("out");

    let css = read(out.join("light.css"));
    assert!(css.contains(
        "  --dt-color-primary: #ff0000;\n  \
         --dt-color-primary-rgb: 255,0,0;\n  \
         --dt-color-primary-hsl: 0 100% 50%;\n  \
         --dt-color-primary-oklch: 0.628 0.258 29.2;\n"
    ));

    let scss = read(out.join("light.scss"));
    assert!(scss.contains("$color-primary: #ff0000;\n"));
    assert!(scss.contains("$color-primary-hsl: #ff0000;\n"));
    assert!(!scss.contains("rgb"));

    let ts = read(out.join("light.ts"));
    assert!(ts.contains("export const colorPrimary = \"#ff0000\";\n"));
    assert!(!ts.contains("Rgb"));
    assert!(!ts.contains("Hsl"));
    assert!(!ts.contains("Oklch"));
}

#[test]
fn aliases_emit_css_references() {
    let dir = tempdir().unwrap();
    let mut config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("bg", "{color.white}")]))],
        &OutputFormat::DEFAULTS,
    );
    config.base_colors = map(&[("white", "#ffffff")]);

    let result = build(&dir, &config);
    assert!(result.success, "{:?}", result.errors);
    let out = dir.path().join("out");

    let css = read(out.join("light.css"));
    assert!(
        css.contains("  --dt-color-white: #ffffff;\n  --dt-color-bg: var(--dt-color-white);\n")
    );
    assert!(read(out.join("light.scss")).contains("$color-bg: #ffffff;"));
    assert!(read(out.join("light.ts")).contains("export const colorBg = \"#ffffff\";"));
}

#[test]
fn shared_sizing_and_font() {
    let dir = tempdir().unwrap();
    let mut config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("bg", "#fff")]))],
        &[OutputFormat::Css, OutputFormat::Scss, OutputFormat::Ts],
    );
    config.sizing = map(&[("sm", "4px")]);
    config.font = map(&[("body", "16px Inter")]);

    let result = build(&dir, &config);
    assert!(result.success, "{:?}", result.errors);
    let out = dir.path().join("out");

    let css = read(out.join("light.css"));
    assert!(css.contains("  --dt-sizing-sm: 4px;\n"));
    assert!(css.contains("  --dt-font-body: 16px Inter;\n"));

    let scss = read(out.join("light.scss"));
    assert!(scss.contains("$sizing-sm: 4px;\n"));
    assert!(!scss.contains("font"));

    let ts = read(out.join("light.ts"));
    assert!(!ts.contains("sizing"));
    assert!(ts.contains("export const colorBg = \"#ffffff\";"));
}

#[test]
fn generated_files_follow_requested_order() {
    let dir = tempdir().unwrap();
    let config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("bg", "#fff")]))],
        &[OutputFormat::Scss, OutputFormat::Css],
    );

    let result = build(&dir, &config);
    assert!(result.success, "{:?}", result.errors);
    let out = dir.path().join("out");
    assert_eq!(result.generated_files, vec![out.join("light.scss"), out.join("light.css")]);
    assert!(!out.join("light.ts").exists());
}

#[test]
fn missing_parent_fails_and_cleans_up() {
    let dir = tempdir().unwrap();
    let config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("dark", map(&[("bg", "#000")])).extending("light")],
        &OutputFormat::DEFAULTS,
    );

    let result = build(&dir, &config);

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains(r#"Theme "dark" extends "light" which does not exist"#));
    assert!(result.generated_files.is_empty());
    assert!(!dir.path().join("out").exists());
    assert!(!scratch_exists(&dir));
}

#[test]
fn oklch_failure_degrades_to_warning() {
    let dir = tempdir().unwrap();
    let config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("brand-oklch", "rebeccapurple")]))],
        &[OutputFormat::Css],
    );

    let result = build(&dir, &config);

    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("[light] "));
    assert!(result.warnings[0].contains("color.brand-oklch"));
    assert!(read(dir.path().join("out/light.css"))
        .contains("  --dt-color-brand-oklch: rebeccapurple;\n"));
}

#[test]
fn rgb_failure_stops_the_build() {
    let dir = tempdir().unwrap();
    let config = config_in(
        dir.path(),
        vec![
            ThemeDefinition::new("light", map(&[("brand-rgb", "red")])),
            ThemeDefinition::new("dark", map(&[("bg", "#000")])),
        ],
        &[OutputFormat::Css],
    );

    let result = build(&dir, &config);

    assert!(!result.success);
    assert!(result.errors[0].contains("not a hex colour"));
    assert!(result.generated_files.is_empty());
    assert!(!dir.path().join("out/dark.css").exists());
    assert!(!scratch_exists(&dir));
}

#[test]
fn unknown_reference_fails() {
    let dir = tempdir().unwrap();
    let config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("bg", "{color.missing}")]))],
        &[OutputFormat::Css],
    );

    let result = build(&dir, &config);

    assert!(!result.success);
    assert!(result.errors[0].contains("color.missing"));
}

#[test]
fn empty_value_fails_without_output() {
    let dir = tempdir().unwrap();
    let config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("primary", "")]))],
        &[OutputFormat::Css],
    );

    let result = build(&dir, &config);

    assert!(!result.success);
    assert!(result.errors[0].contains("Token 'primary' in theme 'light' has an empty value"));
    assert!(result.generated_files.is_empty());
    assert!(!dir.path().join("out/light.css").exists());
    assert!(!scratch_exists(&dir));
}

#[test]
fn reserved_token_name_fails() {
    let dir = tempdir().unwrap();
    let mut config = config_in(
        dir.path(),
        vec![ThemeDefinition::new("light", map(&[("bg", "#fff")]))],
        &[OutputFormat::Css],
    );
    config.sizing = map(&[("value", "4px")]);

    let result = build(&dir, &config);

    assert!(!result.success);
    assert!(result.errors[0].contains("Token name 'value' in sizing is reserved"));
}
