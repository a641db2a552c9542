//! Starter config written by `design-tokens init`.

const TEMPLATE: &str = r##"# design-tokens configuration
themes:
  - name: light
    colors:
      surface0: "#ffffff"
      surface100: "#f2f3f4"
      surface500: "#6e7076"
      surface900: "#0e0f12"
      accent: "{color.blue500}"
      positive: "{color.green500}"
      negative: "{color.red500}"
      warning: "{color.yellow500}"

  - name: dark
    extends: light
    colors:
      surface0: "#040405"
      surface100: "#15161a"
      surface500: "#888a8f"
      surface900: "#f2f3f4"

# Shared colours every theme can reference as {color.<name>}
baseColors:
  blue500: "#2c42d3"
  green500: "#1b9f47"
  red500: "#b82121"
  yellow500: "#d59a03"

sizing:
  spacing0: "0"
  spacing1: 4px
  spacing2: 8px
  spacing3: 16px

font:
  family: "system-ui, -apple-system, sans-serif"
  sizeSm: 14px
  sizeMd: 16px

# Add -rgb, -hsl and -oklch variants for every colour
colorVariants: true

output:
  directory: ./tokens
  formats: [css, scss, ts]
  prefix: dt
"##;

/// The starter YAML config.
pub fn config_template() -> &'static str {
    TEMPLATE
}
