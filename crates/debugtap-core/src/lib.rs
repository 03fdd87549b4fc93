//! debugtap Core Library
//!
//! Namespaced debug output channels: formatted, colorized, and
//! optionally routed through a named pipe so the stream can be tailed
//! from a separate terminal.
//!
//! ## Overview
//!
//! Every debug line belongs to a namespace (`app:server`,
//! `worker:queue`). The namespace picks a stable color, the environment
//! picks the destination and rendering options, and each emission
//! carries the time elapsed since the namespace's previous one.
//!
//! Configuration comes from `DEBUG_*` environment variables:
//!
//! ```bash
//! DEBUG_COLORS=no DEBUG_DEPTH=10 DEBUG_FD=/tmp/tap.pipe my-program
//! ```
//!
//! `DEBUG_FD` routes output to a named pipe created on demand, so a
//! full-screen terminal application can keep its own screen while a
//! second terminal runs `cat /tmp/tap.pipe`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use debugtap_core::Hub;
//! use serde_json::json;
//!
//! fn main() -> debugtap_core::TapResult<()> {
//!     let hub = Hub::new()?;
//!     let mut log = hub.tap("app:server");
//!
//!     log.log("listening on %s", &[json!("0.0.0.0:8080")])?;
//!     log.log("config %o", &[json!({"workers": 4, "tls": false})])?;
//!     Ok(())
//! }
//! ```
//!
//! The enabled/disabled decision per namespace (the `DEBUG` pattern
//! list) belongs to a matching layer outside this crate; instances
//! expose `set_enabled` plus the [`load`]/[`save`] accessors that layer
//! uses to persist its patterns.

pub mod channel;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod humanize;
pub mod inspect;
pub mod instance;

// Re-exports
pub use channel::{Channel, SharedChannel};
pub use color::{color_for, detect_palette, BASIC_PALETTE, EXTENDED_PALETTE};
pub use config::{ConfigValue, InspectOpts, ENV_PREFIX};
pub use error::{TapError, TapResult};
pub use format::{Decoration, FormatterFn, Formatters};
pub use humanize::humanize;
pub use instance::{load, save, Hub, Tap, NAMESPACES_ENV};
