//! Line assembly: percent-directive interpolation plus the color or
//! timestamp decoration around the interpolated body.
//!
//! Formatting is pure. [`interpolate`] turns a format string and its
//! arguments into a body; [`decorate`] wraps the body in the prefix and
//! suffix for the instance's mode. Nothing here touches the channel.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::config::InspectOpts;
use crate::humanize::humanize;
use crate::inspect::{self, RenderOptions};

/// A percent-directive renderer.
///
/// Receives the argument, the instance's option snapshot, and the
/// current color-enabled flag.
pub type FormatterFn = fn(&Value, &InspectOpts, bool) -> String;

/// Registry of percent-directive formatters.
///
/// Maps a single directive character to its renderer. `%o` (single
/// line) and `%O` (multi line) are built in; anything else can be added
/// with [`Formatters::register`].
#[derive(Debug, Clone)]
pub struct Formatters {
    map: HashMap<char, FormatterFn>,
}

impl Default for Formatters {
    fn default() -> Self {
        let mut map: HashMap<char, FormatterFn> = HashMap::new();
        map.insert('o', format_compact);
        map.insert('O', format_expanded);
        Self { map }
    }
}

impl Formatters {
    /// Register a renderer for `%<directive>`, replacing any existing one.
    pub fn register(&mut self, directive: char, formatter: FormatterFn) {
        self.map.insert(directive, formatter);
    }

    pub fn get(&self, directive: char) -> Option<FormatterFn> {
        self.map.get(&directive).copied()
    }
}

/// `%o` - structured value collapsed onto a single line.
fn format_compact(value: &Value, opts: &InspectOpts, use_colors: bool) -> String {
    let rendered = inspect::render(value, &RenderOptions::from_opts(opts, use_colors));
    rendered
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `%O` - structured value with its line structure preserved.
fn format_expanded(value: &Value, opts: &InspectOpts, use_colors: bool) -> String {
    inspect::render(value, &RenderOptions::from_opts(opts, use_colors))
}

/// Interpolate `args` into `fmt`.
///
/// Understands `%s`, `%d`/`%i`, `%f`, `%j`, `%%`, and every registered
/// directive. A directive with no argument left is emitted verbatim; an
/// unrecognized directive is emitted verbatim without consuming an
/// argument; surplus arguments are appended space-separated.
pub fn interpolate(
    fmt: &str,
    args: &[Value],
    formatters: &Formatters,
    opts: &InspectOpts,
    use_colors: bool,
) -> String {
    let mut out = String::new();
    let mut remaining = args.iter();
    let mut chars = fmt.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        let Some(directive) = chars.next() else {
            out.push('%');
            break;
        };
        if directive == '%' {
            out.push('%');
            continue;
        }
        let known = directive == 's'
            || directive == 'd'
            || directive == 'i'
            || directive == 'f'
            || directive == 'j'
            || formatters.get(directive).is_some();
        if !known {
            out.push('%');
            out.push(directive);
            continue;
        }
        match remaining.next() {
            Some(arg) => out.push_str(&apply(directive, arg, formatters, opts, use_colors)),
            None => {
                out.push('%');
                out.push(directive);
            }
        }
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&stringify(arg));
    }
    out
}

fn apply(
    directive: char,
    arg: &Value,
    formatters: &Formatters,
    opts: &InspectOpts,
    use_colors: bool,
) -> String {
    // Registered formatters win, so built-ins can be replaced.
    if let Some(formatter) = formatters.get(directive) {
        return formatter(arg, opts, use_colors);
    }
    match directive {
        's' => stringify(arg),
        'd' | 'i' => match arg.as_f64() {
            Some(n) => format!("{}", n.trunc() as i64),
            None => "NaN".to_string(),
        },
        'f' => match arg.as_f64() {
            Some(n) => format!("{}", n),
            None => "NaN".to_string(),
        },
        'j' => single_line_json(arg),
        _ => format!("%{}", directive),
    }
}

/// `%s` and surplus-argument rendering: strings verbatim, everything
/// else as single-line JSON.
fn stringify(arg: &Value) -> String {
    match arg {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        composite => single_line_json(composite),
    }
}

fn single_line_json(arg: &Value) -> String {
    serde_json::to_string(arg).unwrap_or_else(|_| "null".to_string())
}

/// How the interpolated body gets wrapped for output.
#[derive(Debug, Clone)]
pub enum Decoration {
    /// Colored prefix on every line plus the `+elapsed` suffix.
    Color {
        color: u8,
        namespace: String,
        elapsed: Duration,
    },
    /// Timestamp (possibly empty) and namespace, once, at the front.
    Plain { date: String, namespace: String },
}

/// ANSI foreground escape for a palette entry, without the trailing `m`.
///
/// Codes 0-7 use the short form, everything above the 256-color form.
pub fn color_escape(color: u8) -> String {
    if color < 8 {
        format!("\x1b[3{}", color)
    } else {
        format!("\x1b[38;5;{}", color)
    }
}

/// Assemble the final line from body and decoration.
pub fn decorate(body: &str, decoration: &Decoration) -> String {
    match decoration {
        Decoration::Color {
            color,
            namespace,
            elapsed,
        } => {
            let escape = color_escape(*color);
            let prefix = format!("  {escape};1m{namespace} \x1b[0m");
            let prefixed = body
                .split('\n')
                .map(|line| format!("{prefix}{line}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{prefixed} {escape}m+{}\x1b[0m", humanize(*elapsed))
        }
        Decoration::Plain { date, namespace } => format!("{date}{namespace} {body}"),
    }
}
