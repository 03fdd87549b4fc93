//! Environment-derived rendering configuration.
//!
//! Every environment variable starting with `DEBUG_` feeds the option
//! map: `DEBUG_COLORS=no DEBUG_DEPTH=10 DEBUG_SHOW_HIDDEN=enabled`
//! becomes `{colors: false, depth: 10, showHidden: true}`. A handful of
//! keys steer this crate directly (`colors`, `fd`, `hideDate`); the
//! rest are handed through to the structured-value renderer untouched.

use std::collections::BTreeMap;

/// A coerced configuration value.
///
/// Environment values are plain strings; they are coerced once, at
/// extraction time, so downstream code never re-parses text.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Null,
    Number(f64),
    Str(String),
}

impl ConfigValue {
    /// Coerce a raw environment string into a typed value.
    ///
    /// Precedence: boolean words, the literal `null`, a number whose
    /// parse round-trips exactly, then the raw string. Never fails.
    pub fn coerce(raw: &str) -> Self {
        let truthy = ["yes", "on", "true", "enabled"];
        let falsy = ["no", "off", "false", "disabled"];

        if truthy.iter().any(|w| raw.eq_ignore_ascii_case(w)) {
            return ConfigValue::Bool(true);
        }
        if falsy.iter().any(|w| raw.eq_ignore_ascii_case(w)) {
            return ConfigValue::Bool(false);
        }
        if raw == "null" {
            return ConfigValue::Null;
        }
        if let Ok(n) = raw.parse::<f64>() {
            // Only accept numbers that render back to the exact input,
            // so "1e3" or "007" stay strings.
            if n.to_string() == raw {
                return ConfigValue::Number(n);
            }
        }
        ConfigValue::Str(raw.to_string())
    }

    /// Loose truthiness, for flags that may arrive as any variant.
    pub fn truthy(&self) -> bool {
        match self {
            ConfigValue::Bool(b) => *b,
            ConfigValue::Null => false,
            ConfigValue::Number(n) => *n != 0.0,
            ConfigValue::Str(s) => !s.is_empty(),
        }
    }

    /// Short variant name plus payload, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            ConfigValue::Bool(b) => format!("boolean ({})", b),
            ConfigValue::Null => "null".to_string(),
            ConfigValue::Number(n) => format!("number ({})", n),
            ConfigValue::Str(s) => format!("string ({:?})", s),
        }
    }
}

/// The extracted option map.
///
/// Built once per process from the environment; each debug instance
/// takes its own clone at creation so later mutation never aliases the
/// process-wide map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectOpts {
    options: BTreeMap<String, ConfigValue>,
}

/// Environment prefix recognized by the extractor.
pub const ENV_PREFIX: &str = "DEBUG_";

impl InspectOpts {
    /// Extract options from the live process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Extract options from an explicit environment snapshot.
    ///
    /// Keys are matched case-insensitively against [`ENV_PREFIX`],
    /// stripped, and camel-cased; values are coerced. Duplicate derived
    /// keys overwrite in encounter order.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut options = BTreeMap::new();
        for (key, value) in vars {
            let Some(head) = key.get(..ENV_PREFIX.len()) else {
                continue;
            };
            if !head.eq_ignore_ascii_case(ENV_PREFIX) {
                continue;
            }
            let tail = &key[ENV_PREFIX.len()..];
            options.insert(camel_case(tail), ConfigValue::coerce(&value));
        }
        Self { options }
    }

    /// Look up an option by its camel-cased key.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.options.get(key)
    }

    /// Insert or overwrite an option.
    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.options.insert(key.into(), value);
    }

    /// Explicit color override, if the `colors` key is present.
    pub fn colors(&self) -> Option<bool> {
        self.get("colors").map(ConfigValue::truthy)
    }

    /// Destination option (`DEBUG_FD`), uncoerced beyond extraction.
    pub fn fd(&self) -> Option<&ConfigValue> {
        self.get("fd")
    }

    /// Suppress the timestamp prefix in non-color mode.
    pub fn hide_date(&self) -> bool {
        self.get("hideDate").map(ConfigValue::truthy).unwrap_or(false)
    }

    /// Depth limit for the structured-value renderer, if set to a number.
    pub fn depth(&self) -> Option<u32> {
        match self.get("depth") {
            Some(ConfigValue::Number(n)) if *n >= 0.0 => Some(*n as u32),
            _ => None,
        }
    }

    /// All options, for pass-through to the structured-value renderer.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// `SHOW_HIDDEN` -> `showHidden`.
///
/// An underscore followed by a letter is folded into the upper-cased
/// letter; any other underscore survives as-is (matching `_5` staying
/// `_5`).
fn camel_case(suffix: &str) -> String {
    let lower = suffix.to_ascii_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '_' {
            match chars.peek() {
                Some(next) if next.is_ascii_lowercase() => {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                }
                _ => out.push('_'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
