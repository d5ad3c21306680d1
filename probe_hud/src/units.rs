// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Units of measurement for probe bars.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;

use probe_hud_imaging::{Color, SpriteId};

/// Fill color for units without a dedicated color.
pub const DEFAULT_UNIT_COLOR: Color = Color::from_rgba8(0xAA, 0xAA, 0xAA, 0xFF);

const ENERGY_COLOR: Color = Color::from_rgba8(0xAA, 0x00, 0x00, 0xFF);
const TESLA_COLOR: Color = Color::from_rgba8(0x00, 0xAA, 0xFF, 0xFF);
const DANKS_COLOR: Color = Color::from_rgba8(0x00, 0xAA, 0x00, 0xFF);
const FLUID_COLOR: Color = Color::from_rgba8(0x00, 0x00, 0xAA, 0xFF);

/// Suffix marking a per-tick rate unit.
const PER_TICK_SUFFIX: &str = "/t";

/// A unit of measurement attached to a [`Bar`](crate::Bar).
///
/// A unit knows how to turn a raw bar value into display text, which color to
/// fill the bar with, and, for fluids, which sprite to tile the fill with.
///
/// Values are divided by [`UnitTag::divisor`] and truncated toward zero before
/// the symbol is appended, so a deci-percent value of `455` formats as `45%`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitTag {
    symbol: Cow<'static, str>,
    divisor: u32,
    color: Color,
    fluid: Option<SpriteId>,
}

impl UnitTag {
    /// Create a unit that displays values as-is with the given symbol.
    pub const fn new(symbol: &'static str, color: Color) -> Self {
        Self::scaled(symbol, 1, color)
    }

    /// Create a unit that divides values by `divisor` before display.
    ///
    /// A divisor of zero is treated as one.
    pub const fn scaled(symbol: &'static str, divisor: u32, color: Color) -> Self {
        Self {
            symbol: Cow::Borrowed(symbol),
            divisor: if divisor == 0 { 1 } else { divisor },
            color,
            fluid: None,
        }
    }

    /// Create a unit from a symbol supplied at runtime, picking the standard
    /// color for it.
    ///
    /// This is the entry point for data sources that only know a unit by its
    /// abbreviation.
    pub fn named(symbol: impl Into<Cow<'static, str>>) -> Self {
        let symbol = symbol.into();
        let color = color_for_symbol(&symbol);
        Self {
            symbol,
            divisor: 1,
            color,
            fluid: None,
        }
    }

    /// Returns this unit with a fluid texture; bars in a fluid unit are filled
    /// with tiled sprite segments instead of a solid color.
    #[must_use]
    pub fn with_fluid(mut self, sprite: SpriteId) -> Self {
        self.fluid = Some(sprite);
        self
    }

    /// Returns this unit with a different fill color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Returns the rate variant of this unit (`RF` becomes `RF/t`).
    #[must_use]
    pub fn per_tick(&self) -> Self {
        Self {
            symbol: Cow::Owned(format!("{}{PER_TICK_SUFFIX}", self.symbol)),
            ..self.clone()
        }
    }

    /// Display symbol appended to formatted values.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Divisor applied to values before display.
    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Bar fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Fluid sprite, if this unit measures a fluid.
    pub fn fluid(&self) -> Option<SpriteId> {
        self.fluid
    }

    /// Returns `true` if this unit measures a fluid.
    pub fn is_fluid(&self) -> bool {
        self.fluid.is_some()
    }

    /// Format `value` for display.
    pub fn format(&self, value: f64) -> String {
        format!(
            "{}{}",
            truncate(value / f64::from(self.divisor)),
            self.symbol
        )
    }
}

/// Format a value with no unit.
pub(crate) fn format_plain(value: f64) -> String {
    format!("{}", truncate(value))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "bar values are displayed as whole numbers; `as` saturates and maps NaN to 0"
)]
fn truncate(value: f64) -> i64 {
    value as i64
}

/// Returns the standard fill color for a unit symbol.
///
/// Per-tick rates share the color of their base unit.
pub fn color_for_symbol(symbol: &str) -> Color {
    let base = symbol.strip_suffix(PER_TICK_SUFFIX).unwrap_or(symbol);
    match base {
        "FU" | "RF" => ENERGY_COLOR,
        "T" => TESLA_COLOR,
        "Dk" => DANKS_COLOR,
        "mB" => FLUID_COLOR,
        _ => DEFAULT_UNIT_COLOR,
    }
}

/// Game ticks.
pub const TICKS: UnitTag = UnitTag::new("t", DEFAULT_UNIT_COLOR);
/// Whole percent.
pub const PERCENT: UnitTag = UnitTag::new("%", DEFAULT_UNIT_COLOR);
/// Tenths of a percent, displayed as whole percent.
pub const DECI_PERCENT: UnitTag = UnitTag::scaled("%", 10, DEFAULT_UNIT_COLOR);
/// Hundredths of a percent, displayed as whole percent.
pub const CENTI_PERCENT: UnitTag = UnitTag::scaled("%", 100, DEFAULT_UNIT_COLOR);
/// Thousandths of a percent, displayed as whole percent.
pub const MILLI_PERCENT: UnitTag = UnitTag::scaled("%", 1000, DEFAULT_UNIT_COLOR);
/// Forge Units of energy.
pub const FORGE_UNITS: UnitTag = UnitTag::new("FU", ENERGY_COLOR);
/// Redstone Flux.
pub const REDSTONE_FLUX: UnitTag = UnitTag::new("RF", ENERGY_COLOR);
/// Tesla power.
pub const TESLA: UnitTag = UnitTag::new("T", TESLA_COLOR);
/// Danks.
pub const DANKS: UnitTag = UnitTag::new("Dk", DANKS_COLOR);
/// Millibuckets of fluid. Attach a sprite with [`UnitTag::with_fluid`] to get
/// textured fills.
pub const MILLIBUCKETS: UnitTag = UnitTag::new("mB", FLUID_COLOR);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_percent_units_divide_and_truncate() {
        assert_eq!(PERCENT.format(45.9), "45%");
        assert_eq!(DECI_PERCENT.format(455.0), "45%");
        assert_eq!(CENTI_PERCENT.format(4_599.0), "45%");
        assert_eq!(MILLI_PERCENT.format(45_000.0), "45%");
        assert_eq!(TICKS.format(120.0), "120t");
    }

    #[test]
    fn negative_values_truncate_toward_zero() {
        assert_eq!(REDSTONE_FLUX.format(-12.7), "-12RF");
        assert_eq!(format_plain(-0.5), "0");
    }

    #[test]
    fn zero_divisor_is_treated_as_one() {
        let unit = UnitTag::scaled("x", 0, DEFAULT_UNIT_COLOR);
        assert_eq!(unit.divisor(), 1);
        assert_eq!(unit.format(3.0), "3x");
    }

    #[test]
    fn per_tick_keeps_color_and_extends_symbol() {
        let rate = REDSTONE_FLUX.per_tick();
        assert_eq!(rate.symbol(), "RF/t");
        assert_eq!(rate.color(), REDSTONE_FLUX.color());
        assert_eq!(rate.format(80.0), "80RF/t");
    }

    #[test]
    fn named_units_pick_standard_colors() {
        assert_eq!(UnitTag::named("RF").color(), ENERGY_COLOR);
        assert_eq!(UnitTag::named("FU/t").color(), ENERGY_COLOR);
        assert_eq!(UnitTag::named("T").color(), TESLA_COLOR);
        assert_eq!(UnitTag::named("Dk").color(), DANKS_COLOR);
        assert_eq!(UnitTag::named("mB").color(), FLUID_COLOR);
        assert_eq!(UnitTag::named("widgets").color(), DEFAULT_UNIT_COLOR);
    }

    #[test]
    fn fluid_units_carry_their_sprite() {
        let water = MILLIBUCKETS.with_fluid(SpriteId(4));
        assert!(water.is_fluid());
        assert_eq!(water.fluid(), Some(SpriteId(4)));
        assert!(!MILLIBUCKETS.is_fluid());
    }
}
