//! Structured-value rendering.
//!
//! This is the boundary to the pretty-printer the percent-directives
//! delegate to. It renders a [`serde_json::Value`] as an indented,
//! optionally colorized tree, honoring the pass-through options from
//! the environment (`depth`, `colors`).

use serde_json::Value;

use crate::config::InspectOpts;

/// Options for one rendering pass.
///
/// Derived from an instance's option snapshot right before rendering,
/// so the color flag always matches the surrounding line.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Colorize scalar values with ANSI escapes.
    pub colors: bool,
    /// Nesting depth beyond which composites collapse to a placeholder.
    /// `None` renders the full tree.
    pub depth: Option<u32>,
}

impl RenderOptions {
    pub fn from_opts(opts: &InspectOpts, colors: bool) -> Self {
        Self {
            colors,
            depth: opts.depth(),
        }
    }
}

/// Render a value as a multi-line tree with two-space indentation.
///
/// Scalars render on a single line; non-empty arrays and objects open
/// one line per element. The single-line collapse for `%o` happens in
/// the directive, not here.
pub fn render(value: &Value, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_value(&mut out, value, options, 0);
    out
}

fn write_value(out: &mut String, value: &Value, options: &RenderOptions, level: u32) {
    match value {
        Value::Null => paint(out, options, "90", "null"),
        Value::Bool(b) => paint(out, options, "33", if *b { "true" } else { "false" }),
        Value::Number(n) => paint(out, options, "33", &n.to_string()),
        Value::String(s) => paint(out, options, "32", &format!("{:?}", s)),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
            } else if elided(options, level) {
                out.push_str("[Array]");
            } else {
                out.push_str("[\n");
                for (i, item) in items.iter().enumerate() {
                    indent(out, level + 1);
                    write_value(out, item, options, level + 1);
                    if i + 1 < items.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                indent(out, level);
                out.push(']');
            }
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
            } else if elided(options, level) {
                out.push_str("[Object]");
            } else {
                out.push_str("{\n");
                for (i, (key, item)) in map.iter().enumerate() {
                    indent(out, level + 1);
                    out.push_str(key);
                    out.push_str(": ");
                    write_value(out, item, options, level + 1);
                    if i + 1 < map.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                indent(out, level);
                out.push('}');
            }
        }
    }
}

// A composite nested deeper than the configured depth collapses; the
// top level always renders.
fn elided(options: &RenderOptions, level: u32) -> bool {
    options.depth.map(|depth| level > depth).unwrap_or(false)
}

fn indent(out: &mut String, level: u32) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn paint(out: &mut String, options: &RenderOptions, code: &str, text: &str) {
    if options.colors {
        out.push_str("\x1b[");
        out.push_str(code);
        out.push('m');
        out.push_str(text);
        out.push_str("\x1b[0m");
    } else {
        out.push_str(text);
    }
}
