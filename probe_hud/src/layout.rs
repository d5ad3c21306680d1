// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout estimation.
//!
//! The estimator walks normalized entries row by row and folds each row's
//! extent into a grow-only [`LayoutResult`]. Rows are planned once, and both
//! [`measure`] and the renderer consume the same plan, so what is measured is
//! what is drawn.
//!
//! Inventory that is not attached to a row as an icon is not laid out in
//! place. It closes the current row and is tallied; all tallied slots are
//! packed into one grid below the last row, wrapping at whatever width the
//! rest of the content allows. A grid of exactly [`FIXED_GRID_SLOTS`] slots is
//! the exception and is laid out in place as a 3x3 block.

use alloc::string::String;
use alloc::vec::Vec;

use crate::entry::{ProbeEntry, Slot};
use crate::metrics::FontMetrics;

/// Vertical gap between rows.
pub const ROW_PADDING: u32 = 2;
/// Side of the box an attached item icon is drawn into.
pub const ICON_SIZE: u32 = 16;
/// Horizontal advance past an attached icon.
pub const ICON_ADVANCE: u32 = 20;
/// Height of a progress bar.
pub const BAR_HEIGHT: u32 = 11;
/// Space kept between the bar start and its caption.
pub const BAR_CAPTION_INSET: u32 = 4;
/// Line height of a row holding both a bar and a label.
pub const BAR_WITH_LABEL_HEIGHT: u32 = 22;
/// Line height of a text run.
pub const TEXT_HEIGHT: u32 = 8;
/// Side of one inventory slot.
pub const SLOT_SIZE: u32 = 18;
/// Upper bound on slots per packed grid row.
pub const MAX_SLOTS_PER_ROW: u32 = 9;
/// Inventory size that is laid out in place instead of being packed.
pub const FIXED_GRID_SLOTS: usize = 9;
/// Columns of the in-place grid.
pub const FIXED_GRID_COLUMNS: u32 = 3;

/// Width and height of laid-out content, in layout units.
///
/// Both fields only ever grow while a layout is being estimated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutResult {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl LayoutResult {
    /// An empty layout.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a layout result.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Grow the width to at least `width`.
    pub fn grow_width(&mut self, width: u32) {
        self.width = self.width.max(width);
    }

    /// Grow the height to at least `height`.
    pub fn grow_height(&mut self, height: u32) {
        self.height = self.height.max(height);
    }

    /// Returns this layout limited to at most `max_width` by `max_height`.
    #[must_use]
    pub fn clamped_to(self, max_width: u32, max_height: u32) -> Self {
        Self::new(self.width.min(max_width), self.height.min(max_height))
    }

    /// Returns `true` if either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Size hints for [`measure`].
///
/// `preferred_width` is a floor for the width of any row with a bar, since bars
/// stretch to the available width. `max_width` controls how many slots a
/// packed grid row may hold. `preferred_height` does not drive any row; it is
/// carried so callers can pass canvas sizes through unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutBounds {
    /// Preferred width.
    pub preferred_width: u32,
    /// Preferred height.
    pub preferred_height: u32,
    /// Maximum width.
    pub max_width: u32,
    /// Maximum height.
    pub max_height: u32,
}

impl LayoutBounds {
    /// Create bounds from preferred and maximum sizes.
    pub const fn new(
        preferred_width: u32,
        preferred_height: u32,
        max_width: u32,
        max_height: u32,
    ) -> Self {
        Self {
            preferred_width,
            preferred_height,
            max_width,
            max_height,
        }
    }

    /// Bounds where the preferred and maximum sizes are the same.
    pub const fn uniform(width: u32, height: u32) -> Self {
        Self::new(width, height, width, height)
    }
}

/// A layout together with the same layout clamped to a maximum size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeasuredLayout {
    /// [`actual`](Self::actual) limited to the maximum size.
    pub clamped: LayoutResult,
    /// Unclamped preferred size.
    pub actual: LayoutResult,
}

/// Shape of a packed slot grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotPacking {
    /// Slots per full row.
    pub per_row: u32,
    /// Columns actually occupied.
    pub columns: u32,
    /// Rows occupied, including a trailing partial row.
    pub rows: u32,
}

impl SlotPacking {
    /// Width of the grid.
    pub fn width(&self) -> u32 {
        self.columns.saturating_mul(SLOT_SIZE)
    }

    /// Height of the grid.
    pub fn height(&self) -> u32 {
        self.rows.saturating_mul(SLOT_SIZE)
    }
}

/// Number of slots that fit on one grid row within `max_width`.
///
/// Always between 1 and [`MAX_SLOTS_PER_ROW`].
pub fn slots_per_row(max_width: u32) -> u32 {
    (max_width / SLOT_SIZE).clamp(1, MAX_SLOTS_PER_ROW)
}

/// Pack `slots` slots into rows no wider than `max_width`.
pub fn pack_slots(slots: u32, max_width: u32) -> SlotPacking {
    let per_row = slots_per_row(max_width);
    SlotPacking {
        per_row,
        columns: per_row.min(slots),
        rows: slots.div_ceil(per_row),
    }
}

/// Estimate the size of `entries` when laid out under `bounds`.
///
/// `metrics` must be the same metrics the renderer will use.
pub fn measure<M>(entries: &[ProbeEntry], metrics: &M, bounds: LayoutBounds) -> LayoutResult
where
    M: FontMetrics + ?Sized,
{
    let plan = plan_rows(entries, metrics);
    let mut result = LayoutResult::ZERO;

    for row in &plan.rows {
        if row.icon.is_some() {
            result.grow_width(ICON_SIZE);
        }
        if let Some(caption) = &row.caption {
            result.grow_width(bounds.preferred_width);
            result.grow_width(
                row.text_x
                    .saturating_add(BAR_CAPTION_INSET)
                    .saturating_add(caption.width),
            );
        }
        if let Some(label) = &row.label {
            result.grow_width(row.text_x.saturating_add(label.width));
        }
        if let RowGrid::Fixed { .. } = row.grid {
            result.grow_width(FIXED_GRID_COLUMNS * SLOT_SIZE);
        }
    }

    if plan.deferred_slots > 0 {
        let packing = pack_slots(plan.deferred_slots, bounds.max_width);
        result.grow_width(packing.width());
        result.grow_height(plan.deferred_grid_top().saturating_add(packing.height()));
    }
    result.grow_height(plan.bottom);
    result
}

/// Estimate the size of `entries`, also returning it clamped to the maximum
/// size in `bounds`.
pub fn measure_clamped<M>(entries: &[ProbeEntry], metrics: &M, bounds: LayoutBounds) -> MeasuredLayout
where
    M: FontMetrics + ?Sized,
{
    let actual = measure(entries, metrics, bounds);
    MeasuredLayout {
        clamped: actual.clamped_to(bounds.max_width, bounds.max_height),
        actual,
    }
}

/// A run of text and its measured width.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TextRun {
    pub(crate) text: String,
    pub(crate) width: u32,
}

/// How a row's inventory is laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum RowGrid {
    /// No grid: no inventory, or a single attached icon.
    None,
    /// 3x3 grid laid out in place, starting at `top`.
    Fixed { top: u32 },
    /// Slots are packed into the shared grid below the last row.
    Deferred,
}

/// Geometry of one row, shared by the estimator and the renderer.
#[derive(Clone, Debug)]
pub(crate) struct RowPlan<'a> {
    pub(crate) entry: &'a ProbeEntry,
    /// Top edge of the row.
    pub(crate) top: u32,
    /// The attached icon slot, when the row has one.
    pub(crate) icon: Option<Slot>,
    /// Left edge of the bar and label.
    pub(crate) text_x: u32,
    /// Text drawn inside the bar.
    pub(crate) caption: Option<TextRun>,
    /// Label drawn as its own run; `None` when absent or used as the caption.
    pub(crate) label: Option<TextRun>,
    /// Height of the row's icon, bar and label, before any grid.
    pub(crate) line: u32,
    pub(crate) grid: RowGrid,
}

impl RowPlan<'_> {
    /// Top edge of the bar.
    pub(crate) fn bar_y(&self) -> u32 {
        if self.label.is_some() {
            self.top.saturating_add(BAR_WITH_LABEL_HEIGHT - BAR_HEIGHT - 1)
        } else {
            self.top.saturating_add(self.line.saturating_sub(BAR_HEIGHT) / 2)
        }
    }

    /// Top edge of the label run.
    pub(crate) fn label_y(&self) -> u32 {
        if self.icon.is_some() && self.caption.is_none() {
            self.top.saturating_add((ICON_SIZE - TEXT_HEIGHT) / 2)
        } else {
            self.top
        }
    }
}

/// Row geometry for a whole entry list.
#[derive(Clone, Debug)]
pub(crate) struct RowsPlan<'a> {
    pub(crate) rows: Vec<RowPlan<'a>>,
    /// Cursor after the last row.
    pub(crate) bottom: u32,
    /// Slots tallied for the packed grid.
    pub(crate) deferred_slots: u32,
}

impl RowsPlan<'_> {
    /// Top edge of the packed grid.
    pub(crate) fn deferred_grid_top(&self) -> u32 {
        if self.bottom > 0 {
            self.bottom.saturating_add(ROW_PADDING)
        } else {
            0
        }
    }

    /// Slots of the packed grid in display order.
    pub(crate) fn deferred_grid_slots(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.rows
            .iter()
            .filter(|row| row.grid == RowGrid::Deferred)
            .flat_map(|row| row.entry.inventory.iter())
    }
}

/// Plan the rows of `entries`.
pub(crate) fn plan_rows<'a, M>(entries: &'a [ProbeEntry], metrics: &M) -> RowsPlan<'a>
where
    M: FontMetrics + ?Sized,
{
    let mut rows = Vec::with_capacity(entries.len());
    let mut y = 0_u32;
    let mut deferred_slots = 0_u32;

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            y = y.saturating_add(ROW_PADDING);
        }
        let top = y;
        let mut line = 0_u32;
        let mut text_x = 0_u32;

        let icon = entry.has_attached_icon().then(|| entry.inventory[0]);
        if icon.is_some() {
            text_x += ICON_ADVANCE;
            line = line.max(ICON_SIZE);
        }

        let mut label_consumed = false;
        let caption = entry.bar_caption().map(|(text, consumes_label)| {
            label_consumed = consumes_label;
            line = line.max(if entry.has_label() {
                BAR_WITH_LABEL_HEIGHT
            } else {
                BAR_HEIGHT
            });
            let width = metrics.text_width(&text);
            TextRun { text, width }
        });

        let label = entry
            .label
            .as_ref()
            .filter(|_| !label_consumed)
            .map(|text| {
                line = line.max(TEXT_HEIGHT);
                TextRun {
                    text: text.clone(),
                    width: metrics.text_width(text),
                }
            });

        let row_line = line;
        let grid = if entry.has_inventory() && icon.is_none() {
            if line > 0 {
                y = y.saturating_add(line).saturating_add(ROW_PADDING);
                line = 0;
            }
            if entry.inventory.len() == FIXED_GRID_SLOTS {
                let grid_top = y;
                y = y.saturating_add(FIXED_GRID_COLUMNS * SLOT_SIZE);
                RowGrid::Fixed { top: grid_top }
            } else {
                deferred_slots = deferred_slots.saturating_add(slot_count(entry));
                RowGrid::Deferred
            }
        } else {
            RowGrid::None
        };
        y = y.saturating_add(line);

        rows.push(RowPlan {
            entry,
            top,
            icon,
            text_x,
            caption,
            label,
            line: row_line,
            grid,
        });
    }

    RowsPlan {
        rows,
        bottom: y,
        deferred_slots,
    }
}

fn slot_count(entry: &ProbeEntry) -> u32 {
    u32::try_from(entry.inventory.len()).unwrap_or(u32::MAX)
}
