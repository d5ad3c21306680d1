// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HUD settings.

use core::fmt;

use probe_hud_imaging::Color;

/// Default raycast reach, in blocks.
pub const DEFAULT_REACH: f64 = 4.0;

/// Settings shared by the target resolver and the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct HudConfig {
    /// How far from the eye the resolver looks for a target, in blocks.
    pub reach: f64,
    /// Outline the canvas and the preferred layout bounds.
    pub show_debug_overlay: bool,
    /// Color of labels and bar captions.
    pub text_color: Color,
    /// Outer frame of a bar.
    pub bar_border_color: Color,
    /// Unfilled interior of a bar.
    pub bar_background_color: Color,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            reach: DEFAULT_REACH,
            show_debug_overlay: false,
            text_color: Color::WHITE,
            bar_border_color: Color::WHITE,
            bar_background_color: Color::BLACK,
        }
    }
}

impl HudConfig {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns these settings with a different reach.
    #[must_use]
    pub fn with_reach(mut self, reach: f64) -> Self {
        self.reach = reach;
        self
    }

    /// Returns these settings with the debug overlay toggled.
    #[must_use]
    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.show_debug_overlay = enabled;
        self
    }

    /// Returns these settings with a different text color.
    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Returns these settings with different bar frame colors.
    #[must_use]
    pub fn with_bar_colors(mut self, border: Color, background: Color) -> Self {
        self.bar_border_color = border;
        self.bar_background_color = background;
        self
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reach.is_finite() {
            return Err(ConfigError::NonFiniteReach(self.reach));
        }
        if self.reach <= 0.0 {
            return Err(ConfigError::NonPositiveReach(self.reach));
        }
        Ok(())
    }
}

/// A setting in [`HudConfig`] is out of range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The reach is NaN or infinite.
    NonFiniteReach(f64),
    /// The reach is zero or negative.
    NonPositiveReach(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteReach(reach) => write!(f, "reach must be finite, got {reach}"),
            Self::NonPositiveReach(reach) => write!(f, "reach must be positive, got {reach}"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn default_is_valid() {
        let config = HudConfig::default();
        assert_eq!(config.reach, DEFAULT_REACH);
        assert!(!config.show_debug_overlay);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn reach_must_be_finite_and_positive() {
        assert_eq!(
            HudConfig::new().with_reach(f64::INFINITY).validate(),
            Err(ConfigError::NonFiniteReach(f64::INFINITY))
        );
        assert!(matches!(
            HudConfig::new().with_reach(f64::NAN).validate(),
            Err(ConfigError::NonFiniteReach(_))
        ));
        assert_eq!(
            HudConfig::new().with_reach(0.0).validate(),
            Err(ConfigError::NonPositiveReach(0.0))
        );
        assert_eq!(
            HudConfig::new().with_reach(-2.0).validate(),
            Err(ConfigError::NonPositiveReach(-2.0))
        );
    }

    #[test]
    fn errors_describe_the_bad_value() {
        assert_eq!(
            ConfigError::NonPositiveReach(-1.5).to_string(),
            "reach must be positive, got -1.5"
        );
    }
}
