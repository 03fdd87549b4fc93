//! Debug instances and the process-wide hub that creates them.
//!
//! The [`Hub`] owns everything that is process-wide in this crate: the
//! extracted option map, the selected palette, the formatter registry,
//! and the shared output channel. Instances are cheap handles created
//! per namespace; each takes its own option snapshot at creation so
//! per-instance overrides never alias the hub's map.
//!
//! The enabled/disabled decision and the namespace pattern matching
//! live outside this crate. An instance exposes the surface that layer
//! drives: `format_args`, `log`, `use_colors`, `get_date`, `init`, and
//! the deprecated `destroy`.

use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::warn;

use crate::channel::{Channel, SharedChannel};
use crate::color;
use crate::config::InspectOpts;
use crate::error::TapResult;
use crate::format::{self, Decoration, FormatterFn, Formatters};

/// Environment variable holding the enabled-namespace patterns.
///
/// Read and written by the pattern-matching layer through [`load`] and
/// [`save`]; this crate only provides the accessors.
pub const NAMESPACES_ENV: &str = "DEBUG";

/// Process-wide state: options, palette, formatters, output channel.
#[derive(Debug)]
pub struct Hub {
    opts: InspectOpts,
    palette: &'static [u8],
    formatters: Arc<Mutex<Formatters>>,
    channel: SharedChannel,
}

impl Hub {
    /// Build a hub from the live environment and resolve the channel.
    ///
    /// Fails when the configured destination cannot be set up; a debug
    /// channel that cannot reach its destination fails loudly instead
    /// of swallowing output.
    pub fn new() -> TapResult<Self> {
        Self::with_opts(InspectOpts::from_env())
    }

    /// Build a hub from an explicit option map (injectable for tests).
    pub fn with_opts(opts: InspectOpts) -> TapResult<Self> {
        let channel = SharedChannel::new(Channel::resolve(&opts)?);
        Ok(Self {
            opts,
            palette: color::detect_palette(),
            formatters: Arc::new(Mutex::new(Formatters::default())),
            channel,
        })
    }

    /// Override the palette (the auto-detected one depends on the
    /// terminal the process happens to run under).
    pub fn with_palette(mut self, palette: &'static [u8]) -> Self {
        self.palette = palette;
        self
    }

    /// Create the instance for a namespace.
    pub fn tap(&self, namespace: impl Into<String>) -> Tap {
        let namespace = namespace.into();
        Tap {
            color: color::color_for(&namespace, self.palette),
            use_colors: self
                .opts
                .colors()
                .unwrap_or_else(color::default_color_enabled),
            opts: self.opts.clone(),
            formatters: Arc::clone(&self.formatters),
            channel: self.channel.clone(),
            namespace,
            enabled: true,
            prev: None,
            diff: Duration::ZERO,
        }
    }

    /// Register a `%<directive>` formatter for all instances.
    pub fn register_formatter(&self, directive: char, formatter: FormatterFn) {
        self.formatters.lock().unwrap().register(directive, formatter);
    }

    /// Re-read configuration and re-resolve the shared channel.
    ///
    /// Existing instances keep their option snapshots but start writing
    /// to the newly resolved channel.
    pub fn reinit(&mut self, opts: InspectOpts) -> TapResult<()> {
        self.channel.replace(Channel::resolve(&opts)?);
        self.opts = opts;
        Ok(())
    }

    pub fn opts(&self) -> &InspectOpts {
        &self.opts
    }

    pub fn channel(&self) -> &SharedChannel {
        &self.channel
    }
}

/// One namespace's debug output handle.
#[derive(Debug)]
pub struct Tap {
    namespace: String,
    color: u8,
    use_colors: bool,
    enabled: bool,
    opts: InspectOpts,
    formatters: Arc<Mutex<Formatters>>,
    channel: SharedChannel,
    prev: Option<Instant>,
    diff: Duration,
}

static DESTROY_DEPRECATION: Once = Once::new();

impl Tap {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Palette entry assigned to this namespace.
    pub fn color(&self) -> u8 {
        self.color
    }

    /// Whether output is currently enabled. Owned by the external
    /// pattern-matching layer; defaults to on.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether lines are colorized: the `colors` option when present,
    /// terminal auto-detection otherwise. Fixed at creation; `init`
    /// re-evaluates it.
    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// This instance's option snapshot.
    pub fn inspect_opts(&self) -> &InspectOpts {
        &self.opts
    }

    /// Mutable access for per-instance overrides; call [`Tap::init`]
    /// afterwards if the destination changed.
    pub fn inspect_opts_mut(&mut self) -> &mut InspectOpts {
        &mut self.opts
    }

    /// Elapsed time between the two most recent emissions.
    pub fn elapsed(&self) -> Duration {
        self.diff
    }

    /// Timestamp prefix for non-color mode: ISO-8601 plus a trailing
    /// space, or empty when `hideDate` is set.
    pub fn get_date(&self) -> String {
        if self.opts.hide_date() {
            String::new()
        } else {
            format!(
                "{} ",
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
            )
        }
    }

    /// Produce the final line for a call's format string and arguments.
    ///
    /// Pure with respect to the arguments: interpolation and decoration
    /// build a new string, nothing is mutated in place.
    pub fn format_args(&self, fmt: &str, args: &[Value]) -> String {
        let formatters = self.formatters.lock().unwrap();
        let body = format::interpolate(fmt, args, &formatters, &self.opts, self.use_colors);
        let decoration = if self.use_colors {
            Decoration::Color {
                color: self.color,
                namespace: self.namespace.clone(),
                elapsed: self.diff,
            }
        } else {
            Decoration::Plain {
                date: self.get_date(),
                namespace: self.namespace.clone(),
            }
        };
        format::decorate(&body, &decoration)
    }

    /// Format and write one line to the shared channel.
    ///
    /// Updates the elapsed-time bookkeeping first, so the colored
    /// suffix shows the gap since this namespace's previous emission.
    /// Write failures surface to the caller; there are no retries.
    pub fn log(&mut self, fmt: &str, args: &[Value]) -> TapResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let now = Instant::now();
        self.diff = self
            .prev
            .map(|prev| now.duration_since(prev))
            .unwrap_or_default();
        self.prev = Some(now);

        let line = self.format_args(fmt, args);
        self.channel.write_line(&line)?;
        Ok(())
    }

    /// Re-evaluate colors and re-resolve the shared channel from this
    /// instance's option snapshot.
    pub fn init(&mut self) -> TapResult<()> {
        self.use_colors = self
            .opts
            .colors()
            .unwrap_or_else(color::default_color_enabled);
        self.channel.replace(Channel::resolve(&self.opts)?);
        Ok(())
    }

    /// Deprecated no-op, kept for callers of the old lifecycle API.
    ///
    /// The first call per process logs a deprecation warning; every
    /// call leaves channel and configuration untouched.
    pub fn destroy(&self) {
        DESTROY_DEPRECATION.call_once(|| {
            warn!(
                "Tap::destroy() is deprecated and no longer does anything; \
                 it will be removed in a future release"
            );
        });
    }
}

/// Read the persisted namespace patterns from the environment.
pub fn load() -> Option<String> {
    std::env::var(NAMESPACES_ENV).ok()
}

/// Persist namespace patterns to the environment.
///
/// Saving `None` or an empty string deletes the variable instead of
/// storing a literal empty value.
pub fn save(namespaces: Option<&str>) {
    match namespaces {
        Some(patterns) if !patterns.is_empty() => std::env::set_var(NAMESPACES_ENV, patterns),
        _ => std::env::remove_var(NAMESPACES_ENV),
    }
}
