// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font metrics shared by the layout estimator and the renderer.

/// Section sign that introduces a two-character style code (`§a`, `§l`, ...).
const STYLE_CODE_PREFIX: char = '\u{a7}';

/// Text measurement.
///
/// The estimator and the renderer must be given the same metrics, or the
/// measured layout and the drawn layout drift apart.
///
/// Any `Fn(&str) -> u32` closure is a valid implementation.
pub trait FontMetrics {
    /// Width of `text` in layout units.
    fn text_width(&self, text: &str) -> u32;
}

impl<F> FontMetrics for F
where
    F: Fn(&str) -> u32,
{
    fn text_width(&self, text: &str) -> u32 {
        self(text)
    }
}

/// Fixed-advance metrics.
///
/// Style codes (a section sign followed by one character) take no space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MonospaceMetrics {
    /// Advance of every visible character.
    pub advance: u32,
}

impl MonospaceMetrics {
    /// Create metrics with the given per-character advance.
    pub const fn new(advance: u32) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(6)
    }
}

impl FontMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str) -> u32 {
        let mut visible = 0_u32;
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == STYLE_CODE_PREFIX {
                chars.next();
                continue;
            }
            visible = visible.saturating_add(1);
        }
        visible.saturating_mul(self.advance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_counts_visible_chars() {
        let metrics = MonospaceMetrics::new(6);
        assert_eq!(metrics.text_width(""), 0);
        assert_eq!(metrics.text_width("Fuel"), 24);
        assert_eq!(metrics.text_width("\u{a7}aFuel\u{a7}r"), 24);
    }

    #[test]
    fn trailing_style_prefix_is_ignored() {
        assert_eq!(MonospaceMetrics::new(8).text_width("X\u{a7}"), 8);
    }

    #[test]
    fn closures_are_metrics() {
        let metrics = |text: &str| -> u32 { if text == "X" { 8 } else { 0 } };
        assert_eq!(metrics.text_width("X"), 8);
        assert_eq!(metrics.text_width("Y"), 0);
    }
}
