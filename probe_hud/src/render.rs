// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scaled rendering of entries into a canvas.
//!
//! The renderer measures the entries, computes a uniform [`contain_scale`],
//! sets one transform and then emits every row in unscaled layout units. Row
//! geometry comes from the same plan the estimator uses.

use alloc::format;

use probe_hud_imaging::{
    Affine, BlendMode, Color, Compose, DrawOp, HudBackend, HudBackendExt, ItemId, Mix, RectF,
    ResourceBackend, SpriteDesc, SpriteId, StateOp,
};

use crate::config::{ConfigError, HudConfig};
use crate::entry::{Bar, ProbeEntry, Slot};
use crate::fit::{contain_scale, descale};
use crate::layout::{
    BAR_HEIGHT, FIXED_GRID_COLUMNS, ICON_SIZE, LayoutBounds, LayoutResult, RowGrid, RowPlan,
    SLOT_SIZE, TEXT_HEIGHT, measure, plan_rows, slots_per_row,
};
use crate::metrics::FontMetrics;
use crate::units::DEFAULT_UNIT_COLOR;

/// Texture of one inventory slot frame.
pub const SLOT_TEXTURE: &str = "probe_hud:textures/gui/slot.png";
/// Texture strip of the loading spinner.
pub const SPINNER_TEXTURE: &str = "probe_hud:textures/gui/spinner.png";

/// Frames in the spinner strip.
pub const SPINNER_FRAMES: u32 = 6;
/// Side of one spinner frame.
pub const SPINNER_SIZE: u32 = 16;
/// Width of one fluid fill tile.
pub const FLUID_TILE_WIDTH: f32 = 16.0;

/// Stack counts from this value up are drawn at half size.
const SMALL_COUNT_THRESHOLD: u32 = 100;

const CANVAS_DEBUG_COLOR: Color = Color::from_rgba8(0x00, 0xFF, 0x00, 0xFF);
const PREFERRED_DEBUG_COLOR: Color = Color::from_rgba8(0xFF, 0x00, 0x00, 0xAA);

/// Which kind of surface is being drawn to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// A screen overlay with a fixed pixel budget.
    ///
    /// The layout is re-measured under the descaled canvas, so packed grids
    /// can use the room that shrinking makes.
    #[default]
    Hud,
    /// An in-world overlay. The canvas is not a hard budget, so no re-measure
    /// happens, and item icons are drawn lit.
    Glasses,
}

/// The region entries are rendered into.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Canvas {
    /// Width in canvas units.
    pub width: u32,
    /// Height in canvas units.
    pub height: u32,
    /// Transform from canvas space to the backend's space.
    pub origin: Affine,
}

impl Canvas {
    /// A canvas at the backend's origin.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin: Affine::IDENTITY,
        }
    }

    /// Returns this canvas placed by `origin`.
    #[must_use]
    pub const fn with_origin(mut self, origin: Affine) -> Self {
        self.origin = origin;
        self
    }
}

/// Sprites the renderer draws with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HudTextures {
    /// 18x18 slot frame.
    pub slot: SpriteId,
    /// 96x16 spinner strip.
    pub spinner: SpriteId,
}

impl HudTextures {
    /// Register the HUD textures with `backend`.
    pub fn register<B: ResourceBackend + ?Sized>(backend: &mut B) -> Self {
        let slot = backend.create_sprite(SpriteDesc::new(SLOT_TEXTURE, SLOT_SIZE, SLOT_SIZE));
        let spinner = backend.create_sprite(SpriteDesc::new(
            SPINNER_TEXTURE,
            SPINNER_SIZE * SPINNER_FRAMES,
            SPINNER_SIZE,
        ));
        Self { slot, spinner }
    }

    /// Destroy the textures in `backend`.
    pub fn release<B: ResourceBackend + ?Sized>(self, backend: &mut B) {
        backend.destroy_sprite(self.slot);
        backend.destroy_sprite(self.spinner);
    }
}

/// Result of [`Renderer::render`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rendered {
    /// Scale applied to the content.
    pub contain: f32,
    /// Layout the content was drawn at, in unscaled units.
    pub layout: LayoutResult,
}

/// Draws probe entries through a [`HudBackend`].
#[derive(Clone, Debug)]
pub struct Renderer {
    config: HudConfig,
    textures: HudTextures,
}

impl Renderer {
    /// Create a renderer, rejecting invalid settings.
    pub fn new(config: HudConfig, textures: HudTextures) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, textures })
    }

    /// Settings in use.
    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    /// Textures in use.
    pub fn textures(&self) -> HudTextures {
        self.textures
    }

    /// Render `entries` into `canvas`.
    ///
    /// `preferred` is the layout to fit; when `None` the entries are measured
    /// with the canvas size as preferred and maximum bounds.
    ///
    /// The backend transform is left at `canvas.origin`.
    pub fn render<B, M>(
        &self,
        backend: &mut B,
        entries: &[ProbeEntry],
        metrics: &M,
        canvas: Canvas,
        mode: RenderMode,
        preferred: Option<LayoutResult>,
    ) -> Rendered
    where
        B: HudBackend + ?Sized,
        M: FontMetrics + ?Sized,
    {
        let mut layout = preferred.unwrap_or_else(|| {
            measure(
                entries,
                metrics,
                LayoutBounds::uniform(canvas.width, canvas.height),
            )
        });
        let mut contain = contain_scale(canvas.width, canvas.height, layout);
        // Width the packed grid wraps at; must match the bounds it was measured under.
        let mut wrap_width = canvas.width;

        if mode == RenderMode::Hud {
            let bounds = LayoutBounds::uniform(
                descale(canvas.width, contain),
                descale(canvas.height, contain),
            );
            layout = measure(entries, metrics, bounds);
            contain = contain_scale(canvas.width, canvas.height, layout);
            wrap_width = bounds.max_width;
            log::trace!(
                "re-measured under {}x{}: {}x{} at {contain}",
                bounds.max_width,
                bounds.max_height,
                layout.width,
                layout.height
            );
        }

        let actual_width = match mode {
            RenderMode::Glasses => canvas.width,
            RenderMode::Hud => descale(canvas.width, contain).max(layout.width),
        };
        let transform = canvas.origin * Affine::scale(f64::from(contain));

        if self.config.show_debug_overlay {
            backend.state(StateOp::SetTransform(canvas.origin));
            backend.draw(DrawOp::StrokeRect {
                rect: rect_u32(0, 0, canvas.width, canvas.height),
                color: CANVAS_DEBUG_COLOR,
            });
        }
        backend.state(StateOp::SetTransform(transform));
        if self.config.show_debug_overlay {
            backend.draw(DrawOp::StrokeRect {
                rect: rect_u32(0, 0, layout.width, layout.height),
                color: PREFERRED_DEBUG_COLOR,
            });
        }

        let painter = Painter {
            config: &self.config,
            textures: self.textures,
            metrics,
            transform,
            lit: mode == RenderMode::Glasses,
            right: actual_width as f32,
        };

        let plan = plan_rows(entries, metrics);
        for row in &plan.rows {
            painter.row(backend, row);
        }
        if plan.deferred_slots > 0 {
            let per_row = slots_per_row(wrap_width);
            let top = plan.deferred_grid_top();
            for (index, slot) in plan.deferred_grid_slots().enumerate() {
                let (col, line) = grid_cell(index, per_row);
                painter.slot(
                    backend,
                    slot,
                    col.saturating_mul(SLOT_SIZE) as f32,
                    top.saturating_add(line.saturating_mul(SLOT_SIZE)) as f32,
                );
            }
        }

        backend.state(StateOp::SetTransform(canvas.origin));
        Rendered { contain, layout }
    }

    /// Draw the loading spinner with its top-left corner at `(x, y)`.
    ///
    /// The frame advances every two ticks.
    pub fn render_spinner<B>(&self, backend: &mut B, x: f32, y: f32, ticks: u64)
    where
        B: HudBackend + ?Sized,
    {
        let size = SPINNER_SIZE as f32;
        let frame = spinner_frame(ticks) as f32;
        backend.draw(DrawOp::DrawSprite {
            sprite: self.textures.spinner,
            src: RectF::from_origin_size(frame * size, 0.0, size, size),
            dst: RectF::from_origin_size(x, y, size, size),
        });
    }
}

/// Spinner frame shown after `ticks` ticks.
pub fn spinner_frame(ticks: u64) -> u32 {
    // Always below SPINNER_FRAMES.
    u32::try_from((ticks / 2) % u64::from(SPINNER_FRAMES)).unwrap_or(0)
}

/// Horizontal extent of a bar's fill between `left` and `right`, the outer
/// edges of the bar frame.
///
/// The fill runs from the zero point (or the bar minimum, when the minimum is
/// not negative) to the current value. Both ends are clamped into
/// `[left + 1, right - 1]`, so out-of-range values never draw outside the
/// frame. Returns `None` for a bar with a zero or undefined range, or when the
/// frame has no interior.
pub fn bar_fill_span(bar: &Bar, left: f32, right: f32) -> Option<(f32, f32)> {
    let range = bar.range();
    let lo = f64::from(left) + 1.0;
    let hi = f64::from(right) - 1.0;
    if !(range > 0.0) || !(hi > lo) {
        return None;
    }
    let span = hi - lo;
    let zero = if bar.minimum() < 0.0 {
        -bar.minimum() / range
    } else {
        0.0
    };
    let current = (bar.current() - bar.minimum()) / range;
    let clamp = |fraction: f64| {
        let x = lo + fraction * span;
        if x.is_nan() { lo } else { x.clamp(lo, hi) }
    };
    let (a, b) = (clamp(zero), clamp(current));
    Some((narrow(a.min(b)), narrow(a.max(b))))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "fill coordinates are clamped to a frame given in f32"
)]
fn narrow(value: f64) -> f32 {
    value as f32
}

/// Indices of the fluid tiles overlapping `[from, to)`, measured from the
/// first tile's left edge.
#[allow(
    clippy::cast_possible_truncation,
    reason = "tile indices are whole numbers; `as` saturates and clamps negatives to 0"
)]
fn fluid_tiles(from: f32, to: f32) -> core::ops::Range<u32> {
    let first = (from / FLUID_TILE_WIDTH).floor() as u32;
    let last = (to / FLUID_TILE_WIDTH).ceil() as u32;
    first..last
}

fn rect_u32(x0: u32, y0: u32, x1: u32, y1: u32) -> RectF {
    RectF::new(x0 as f32, y0 as f32, x1 as f32, y1 as f32)
}

fn grid_cell(index: usize, per_row: u32) -> (u32, u32) {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    (index % per_row, index / per_row)
}

/// Per-frame drawing context.
struct Painter<'a, M: ?Sized> {
    config: &'a HudConfig,
    textures: HudTextures,
    metrics: &'a M,
    /// Transform rows are drawn under.
    transform: Affine,
    lit: bool,
    /// Right edge of bars, in layout units.
    right: f32,
}

impl<M: FontMetrics + ?Sized> Painter<'_, M> {
    fn row<B: HudBackend + ?Sized>(&self, backend: &mut B, row: &RowPlan<'_>) {
        let top = row.top as f32;
        let text_x = row.text_x as f32;

        if let Some(Some(stack)) = row.icon {
            self.item(backend, stack.item, 0.0, top);
        }

        if let (Some(bar), Some(caption)) = (&row.entry.bar, &row.caption) {
            let bar_y = row.bar_y() as f32;
            self.bar(backend, bar, text_x, bar_y);
            let x = self.right - 1.0 - caption.width as f32;
            let color = self.config.text_color;
            backend.with_blend_layer(BlendMode::new(Mix::Difference, Compose::SrcOver), |b| {
                b.draw(DrawOp::DrawText {
                    text: caption.text.clone(),
                    x,
                    y: bar_y + 2.0,
                    color,
                    shadow: false,
                });
            });
        }

        if let Some(label) = &row.label {
            backend.draw(DrawOp::DrawText {
                text: label.text.clone(),
                x: text_x,
                y: row.label_y() as f32,
                color: self.config.text_color,
                shadow: false,
            });
        }

        if let RowGrid::Fixed { top: grid_top } = row.grid {
            for (index, slot) in row.entry.inventory.iter().enumerate() {
                let (col, line) = grid_cell(index, FIXED_GRID_COLUMNS);
                self.slot(
                    backend,
                    slot,
                    col.saturating_mul(SLOT_SIZE) as f32,
                    grid_top.saturating_add(line.saturating_mul(SLOT_SIZE)) as f32,
                );
            }
        }
    }

    fn bar<B: HudBackend + ?Sized>(&self, backend: &mut B, bar: &Bar, left: f32, top: f32) {
        let height = BAR_HEIGHT as f32;
        backend.draw(DrawOp::FillRect {
            rect: RectF::new(left, top, self.right, top + height),
            color: self.config.bar_border_color,
        });
        backend.draw(DrawOp::FillRect {
            rect: RectF::new(left + 1.0, top + 1.0, self.right - 1.0, top + height - 1.0),
            color: self.config.bar_background_color,
        });

        let Some((start, end)) = bar_fill_span(bar, left, self.right) else {
            return;
        };
        if end <= start {
            return;
        }
        let fill = RectF::new(start, top + 1.0, end, top + height - 1.0);
        match bar.unit().and_then(|unit| unit.fluid()) {
            Some(sprite) => {
                // Tiles are aligned to the bar interior, not to the fill start.
                let origin = left + 1.0;
                let tiles = fluid_tiles(start - origin, end - origin);
                backend.with_clip_rect(fill, |b| {
                    for tile in tiles {
                        let x = origin + tile as f32 * FLUID_TILE_WIDTH;
                        b.draw(DrawOp::DrawSprite {
                            sprite,
                            src: RectF::new(0.0, 0.0, FLUID_TILE_WIDTH, fill.height()),
                            dst: RectF::new(x, fill.y0, x + FLUID_TILE_WIDTH, fill.y1),
                        });
                    }
                });
            }
            None => {
                let color = bar.unit().map_or(DEFAULT_UNIT_COLOR, |unit| unit.color());
                backend.draw(DrawOp::FillRect { rect: fill, color });
            }
        }
    }

    fn slot<B: HudBackend + ?Sized>(&self, backend: &mut B, slot: &Slot, x: f32, y: f32) {
        let size = SLOT_SIZE as f32;
        backend.draw(DrawOp::DrawSprite {
            sprite: self.textures.slot,
            src: RectF::new(0.0, 0.0, size, size),
            dst: RectF::from_origin_size(x, y, size, size),
        });
        let Some(stack) = slot else {
            return;
        };
        self.item(backend, stack.item, x + 1.0, y + 1.0);
        if stack.count > 1 {
            self.count(backend, stack.count, x + 1.0, y + 1.0);
        }
    }

    fn item<B: HudBackend + ?Sized>(&self, backend: &mut B, item: ItemId, x: f32, y: f32) {
        backend.draw(DrawOp::DrawItem {
            item,
            x,
            y,
            lit: self.lit,
        });
    }

    /// Stack count right-aligned against the bottom-right of the icon box at
    /// `(x, y)`.
    fn count<B: HudBackend + ?Sized>(&self, backend: &mut B, count: u32, x: f32, y: f32) {
        let text = format!("{count}");
        let width = self.metrics.text_width(&text) as f32;
        let icon = ICON_SIZE as f32;
        let text_height = TEXT_HEIGHT as f32;
        let color = self.config.text_color;

        if count < SMALL_COUNT_THRESHOLD {
            backend.draw(DrawOp::DrawText {
                text,
                x: x + icon - width,
                y: y + icon - text_height,
                color,
                shadow: true,
            });
            return;
        }

        let half = self.transform
            * Affine::translate((f64::from(x), f64::from(y)))
            * Affine::scale(0.5);
        backend.with_transform(half, self.transform, |b| {
            b.draw(DrawOp::DrawText {
                text,
                x: 2.0 * icon - width,
                y: 2.0 * icon - text_height,
                color,
                shadow: true,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::PERCENT;

    #[test]
    fn spinner_cycles_every_twelve_ticks() {
        let frames: alloc::vec::Vec<u32> = (0..14).map(spinner_frame).collect();
        assert_eq!(frames, [0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 0, 0]);
        assert_eq!(spinner_frame(u64::MAX), 1);
    }

    #[test]
    fn fill_runs_from_minimum_to_current() {
        let bar = Bar::new(0.0, 5.0, 10.0);
        assert_eq!(bar_fill_span(&bar, 0.0, 102.0), Some((1.0, 51.0)));
    }

    #[test]
    fn negative_minimum_fills_from_zero() {
        let bar = Bar::new(-10.0, 0.0, 10.0);
        let (start, end) = bar_fill_span(&bar, 0.0, 102.0).expect("has range");
        assert_eq!(start, 51.0);
        assert_eq!(end, 51.0);

        let below = Bar::new(-10.0, -5.0, 10.0);
        assert_eq!(bar_fill_span(&below, 0.0, 102.0), Some((26.0, 51.0)));
    }

    #[test]
    fn fill_is_clamped_into_frame() {
        for current in [-1e9, -3.0, 0.0, 7.0, 10.0, 11.0, 1e12, f64::INFINITY] {
            let bar = Bar::new(0.0, current, 10.0).with_unit(PERCENT);
            let (start, end) = bar_fill_span(&bar, 20.0, 80.0).expect("has range");
            assert!(start >= 21.0 && end <= 79.0, "{current}: {start}..{end}");
            assert!(start <= end);
        }
    }

    #[test]
    fn degenerate_bars_have_no_fill() {
        assert_eq!(bar_fill_span(&Bar::new(5.0, 5.0, 5.0), 0.0, 100.0), None);
        assert_eq!(bar_fill_span(&Bar::new(0.0, f64::NAN, f64::NAN), 0.0, 100.0), None);
        assert_eq!(bar_fill_span(&Bar::new(0.0, 1.0, 2.0), 10.0, 11.0), None);
    }

    #[test]
    fn fluid_tiles_cover_the_fill() {
        assert_eq!(fluid_tiles(0.0, 98.0), 0..7);
        assert_eq!(fluid_tiles(20.0, 32.0), 1..2);
        assert_eq!(fluid_tiles(5.0, 5.0), 0..1);
    }

    #[test]
    fn fluid_tiles_stay_bounded_past_f32_precision() {
        // At this offset adding a tile width to an f32 no longer changes it.
        let far = 268_435_456.0_f32;
        assert_eq!(far + FLUID_TILE_WIDTH, far);
        let tiles = fluid_tiles(far, far + 64.0);
        assert_eq!(tiles.start, 16_777_216);
        assert!(tiles.len() <= 4, "{tiles:?}");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let textures = HudTextures {
            slot: SpriteId(0),
            spinner: SpriteId(1),
        };
        let err = Renderer::new(HudConfig::new().with_reach(-1.0), textures).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveReach(-1.0));
    }
}
