//! Per-namespace color assignment.
//!
//! Each namespace hashes to one entry of the active palette, so a given
//! namespace keeps its color across runs and across processes. The
//! palette itself is picked once per process from the terminal's color
//! depth: basic ANSI colors on a plain terminal, a 256-color selection
//! when the terminal reports at least 256 colors.

use std::io::IsTerminal;

/// Palette used when the terminal only supports the basic ANSI colors.
pub const BASIC_PALETTE: &[u8] = &[6, 2, 3, 4, 5, 1];

/// Palette used on 256-color-capable terminals.
///
/// A hand-picked subset of the 256-color cube that stays readable on
/// both light and dark backgrounds.
pub const EXTENDED_PALETTE: &[u8] = &[
    20, 21, 26, 27, 32, 33, 38, 39, 40, 41, 42, 43, 44, 45, 56, 57, 62, 63, 68, 69, 74, 75, 76,
    77, 78, 79, 80, 81, 92, 93, 98, 99, 112, 113, 128, 129, 134, 135, 148, 149, 160, 161, 162,
    163, 164, 165, 166, 167, 168, 169, 170, 171, 172, 173, 178, 179, 184, 185, 196, 197, 198, 199,
    200, 201, 202, 203, 204, 205, 206, 207, 208, 209, 214, 215, 220, 221,
];

/// Pick the process-wide palette from the terminal attached to stderr.
pub fn detect_palette() -> &'static [u8] {
    if stderr_has_256_color() {
        EXTENDED_PALETTE
    } else {
        BASIC_PALETTE
    }
}

/// Whether color output should be on when no explicit override is set.
///
/// `NO_COLOR` (any value) wins, then plain TTY detection on stderr.
pub fn default_color_enabled() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

/// True when stderr is a terminal reporting a depth of 256 colors or
/// more (truecolor implies 256).
fn stderr_has_256_color() -> bool {
    if !std::io::stderr().is_terminal() {
        return false;
    }
    if let Ok(colorterm) = std::env::var("COLORTERM") {
        let colorterm = colorterm.to_ascii_lowercase();
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return true;
        }
    }
    std::env::var("TERM")
        .map(|term| term.contains("256color"))
        .unwrap_or(false)
}

/// Deterministically map a namespace to a palette entry.
///
/// Standard string hash (h = h*31 + c over the namespace's characters,
/// 32-bit wrapping), reduced modulo the palette length. Distinct
/// namespaces may collide; that is fine.
pub fn color_for(namespace: &str, palette: &[u8]) -> u8 {
    let mut hash: i32 = 0;
    for ch in namespace.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(ch as i32);
    }
    palette[hash.unsigned_abs() as usize % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_sizes() {
        assert_eq!(BASIC_PALETTE.len(), 6);
        assert_eq!(EXTENDED_PALETTE.len(), 76);
    }

    #[test]
    fn test_color_is_deterministic() {
        let a = color_for("app:server", EXTENDED_PALETTE);
        let b = color_for("app:server", EXTENDED_PALETTE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_color_stays_in_palette() {
        for ns in ["", "a", "app", "app:server", "worker:queue:retry", "日本語"] {
            let basic = color_for(ns, BASIC_PALETTE);
            assert!(BASIC_PALETTE.contains(&basic), "{ns}");
            let extended = color_for(ns, EXTENDED_PALETTE);
            assert!(EXTENDED_PALETTE.contains(&extended), "{ns}");
        }
    }

    #[test]
    fn test_distinct_namespaces_may_differ() {
        // Not a uniqueness guarantee, just a sanity check that the hash
        // actually spreads over the palette.
        let colors: std::collections::BTreeSet<u8> = (0..32)
            .map(|i| color_for(&format!("ns:{i}"), EXTENDED_PALETTE))
            .collect();
        assert!(colors.len() > 1);
    }
}
