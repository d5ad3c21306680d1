// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Probe HUD: layout and rendering for a block inspection overlay.
//!
//! The overlay shows what the observer is looking at: the block's icon and
//! name, and any number of rows of extra information ([`ProbeEntry`]) made of
//! a label, a progress [`Bar`], and an inventory of item slots.
//!
//! The crate is split along the frame pipeline:
//! - [`normalize`] folds the block's identity and its first plain bar into one
//!   row.
//! - [`measure`] estimates the size of the rows. Inventories that are not
//!   attached to a row are packed into one grid that wraps to the width the
//!   other rows already need.
//! - [`contain_scale`] finds the uniform shrink that fits a layout into a
//!   canvas.
//! - [`Renderer`] draws rows through a [`HudBackend`](probe_hud_imaging::HudBackend),
//!   emitting retained draw ops in unscaled layout units under one transform.
//! - [`poll`] tracks the targeted block across frames with an owned
//!   [`TargetState`]; [`sync_and_measure`] and [`sync_and_render`] combine a
//!   poll with the estimator and the renderer.
//!
//! Text is measured through [`FontMetrics`]. The estimator and the renderer
//! must see the same metrics.
//!
//! ## Minimal example
//!
//! ```rust
//! use probe_hud::{
//!     Bar, Canvas, HudConfig, HudTextures, Identity, ItemStack, MonospaceMetrics, ProbeEntry,
//!     RenderMode, Renderer, normalize, units,
//! };
//! use probe_hud_imaging::ItemId;
//! use probe_hud_imaging_ref::RefBackend;
//!
//! let mut backend = RefBackend::default();
//! let textures = HudTextures::register(&mut backend);
//! let renderer = Renderer::new(HudConfig::default(), textures).unwrap();
//!
//! let raw = [
//!     ProbeEntry::new().with_label("Fuel").with_bar(Bar::new(0.0, 80.0, 200.0)),
//!     ProbeEntry::new().with_bar(Bar::new(0.0, 55.0, 100.0).with_unit(units::PERCENT)),
//! ];
//! let furnace = Identity::new(ItemStack::single(ItemId(61)), "Furnace");
//! let entries = normalize(&raw, furnace);
//! assert_eq!(entries.len(), 2);
//!
//! let metrics = MonospaceMetrics::default();
//! let rendered = renderer.render(
//!     &mut backend,
//!     &entries,
//!     &metrics,
//!     Canvas::new(120, 60),
//!     RenderMode::Hud,
//!     None,
//! );
//! assert!(rendered.contain <= 1.0);
//! assert!(backend.texts().any(|text| text == "Fuel"));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod config;
mod entry;
mod fit;
mod layout;
mod metrics;
mod normalize;
mod render;
mod target;
pub mod units;

pub use config::{ConfigError, DEFAULT_REACH, HudConfig};
pub use entry::{Bar, EntryFeatures, Identity, ItemStack, ProbeEntry, Slot};
pub use fit::{contain_scale, descale};
pub use layout::{
    BAR_CAPTION_INSET, BAR_HEIGHT, BAR_WITH_LABEL_HEIGHT, FIXED_GRID_COLUMNS, FIXED_GRID_SLOTS,
    ICON_ADVANCE, ICON_SIZE, LayoutBounds, LayoutResult, MAX_SLOTS_PER_ROW, MeasuredLayout,
    ROW_PADDING, SLOT_SIZE, SlotPacking, TEXT_HEIGHT, measure, measure_clamped, pack_slots,
    slots_per_row,
};
pub use metrics::{FontMetrics, MonospaceMetrics};
pub use normalize::normalize;
pub use render::{
    Canvas, FLUID_TILE_WIDTH, HudTextures, RenderMode, Rendered, Renderer, SLOT_TEXTURE,
    SPINNER_FRAMES, SPINNER_SIZE, SPINNER_TEXTURE, bar_fill_span, spinner_frame,
};
pub use target::{
    BlockPos, Observer, ProbeWorld, TargetPhase, TargetState, poll, sync_and_measure,
    sync_and_measure_clamped, sync_and_render,
};
pub use units::UnitTag;
