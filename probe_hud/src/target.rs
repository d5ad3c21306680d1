// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target resolution: what the observer is looking at, and its cached entries.
//!
//! [`poll`] is the state machine. The caller owns the [`TargetState`] and
//! threads it through every frame:
//!
//! - a raycast miss clears the state ([`TargetPhase::NoTarget`]);
//! - a hit on a new position drops the old data and asks the world for
//!   entries; while they are not available the target is loading;
//! - raw entries are normalized exactly once
//!   ([`TargetPhase::Changed`] with `needs_format: true`);
//! - after that, polls reuse the normalized entries ([`TargetPhase::Stable`]).
//!
//! [`sync_and_measure`] and [`sync_and_render`] wrap a poll with the layout
//! estimator and the renderer.

use alloc::vec::Vec;

use glam::{DVec3, IVec3};
use probe_hud_imaging::HudBackend;

use crate::config::HudConfig;
use crate::entry::{Identity, ProbeEntry};
use crate::layout::{LayoutBounds, LayoutResult, MeasuredLayout, measure, measure_clamped};
use crate::metrics::FontMetrics;
use crate::normalize::normalize;
use crate::render::{Canvas, RenderMode, Rendered, Renderer};

/// Integer coordinates of a block in the world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockPos(pub IVec3);

impl BlockPos {
    /// Create a block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }
}

/// Where the observer is and where they are looking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observer {
    /// Eye position.
    pub eye: DVec3,
    /// Look direction; expected to be unit length.
    pub look: DVec3,
}

impl Observer {
    /// Create an observer.
    pub const fn new(eye: DVec3, look: DVec3) -> Self {
        Self { eye, look }
    }

    /// End point of a ray of length `max_distance` along the look direction.
    pub fn ray_end(&self, max_distance: f64) -> DVec3 {
        self.eye + self.look * max_distance
    }
}

/// The world the HUD inspects.
pub trait ProbeWorld {
    /// First block hit by the ray from `eye` along `look`, at most
    /// `max_distance` away.
    fn raycast(&self, eye: DVec3, look: DVec3, max_distance: f64) -> Option<BlockPos>;

    /// Returns `true` if the block at `pos` has extended data to show.
    ///
    /// Blocks without a data source show only their identity entry.
    fn has_data_source(&self, pos: BlockPos) -> bool;

    /// The representative item and display name of the block at `pos`.
    fn identity(&self, pos: BlockPos) -> Identity;

    /// Entries for the block at `pos`, or `None` while they are still being
    /// fetched.
    fn poll_entries(&mut self, pos: BlockPos) -> Option<Vec<ProbeEntry>>;
}

/// Outcome of one [`poll`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetPhase {
    /// Nothing is targeted.
    NoTarget,
    /// The target or its data changed this poll.
    ///
    /// `needs_format` is `true` when fresh entries were normalized, and
    /// `false` while entries for a new target are still loading.
    Changed {
        /// Targeted block.
        position: BlockPos,
        /// Whether normalized entries were produced.
        needs_format: bool,
    },
    /// Cached entries for an unchanged target are current.
    Stable {
        /// Targeted block.
        position: BlockPos,
    },
}

impl TargetPhase {
    /// Targeted block, if any.
    pub fn position(&self) -> Option<BlockPos> {
        match *self {
            Self::NoTarget => None,
            Self::Changed { position, .. } | Self::Stable { position } => Some(position),
        }
    }

    /// Returns `true` while the targeted block's entries are still loading.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::Changed {
                needs_format: false,
                ..
            }
        )
    }
}

/// Cached data about the current target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetState {
    position: Option<BlockPos>,
    raw: Option<Vec<ProbeEntry>>,
    formatted: Option<Vec<ProbeEntry>>,
}

impl TargetState {
    /// An empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Position whose data is cached or pending.
    pub fn position(&self) -> Option<BlockPos> {
        self.position
    }

    /// Normalized entries for the cached position.
    pub fn formatted(&self) -> Option<&[ProbeEntry]> {
        self.formatted.as_deref()
    }

    /// Returns `true` if raw entries are waiting to be normalized.
    pub fn has_pending(&self) -> bool {
        self.raw.is_some()
    }

    /// Hand in entries for `pos`.
    ///
    /// Hosts that receive data asynchronously call this when it arrives; the
    /// next [`poll`] that hits `pos` normalizes it.
    pub fn deliver(&mut self, pos: BlockPos, entries: Vec<ProbeEntry>) {
        self.position = Some(pos);
        self.raw = Some(entries);
        self.formatted = None;
    }

    /// Forget the cached target.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Advance the target state machine by one frame.
pub fn poll<W>(
    mut state: TargetState,
    world: &mut W,
    observer: &Observer,
    config: &HudConfig,
) -> (TargetState, TargetPhase)
where
    W: ProbeWorld + ?Sized,
{
    let Some(pos) = world.raycast(observer.eye, observer.look, config.reach) else {
        if let Some(old) = state.position {
            log::debug!("target lost at {:?}", old.0);
        }
        state.clear();
        return (state, TargetPhase::NoTarget);
    };

    if state.position != Some(pos) {
        state.clear();
        if !world.has_data_source(pos) {
            log::debug!("target changed to {:?} (no data source)", pos.0);
            state.deliver(pos, Vec::new());
        } else if let Some(entries) = world.poll_entries(pos) {
            log::debug!("target changed to {:?} ({} entries)", pos.0, entries.len());
            state.deliver(pos, entries);
        } else {
            log::debug!("target changed to {:?}, waiting for data", pos.0);
            return (
                state,
                TargetPhase::Changed {
                    position: pos,
                    needs_format: false,
                },
            );
        }
    }

    if let Some(raw) = state.raw.take() {
        let formatted = normalize(&raw, world.identity(pos));
        log::debug!(
            "formatted {} raw entries into {} rows",
            raw.len(),
            formatted.len()
        );
        state.formatted = Some(formatted);
        return (
            state,
            TargetPhase::Changed {
                position: pos,
                needs_format: true,
            },
        );
    }

    log::trace!("reusing cached entries for {:?}", pos.0);
    (state, TargetPhase::Stable { position: pos })
}

/// Entries shown while a target's data is loading.
fn placeholder<W: ProbeWorld + ?Sized>(world: &W, pos: BlockPos) -> Vec<ProbeEntry> {
    normalize(&[], world.identity(pos))
}

/// Poll, then measure what would be shown.
///
/// Measures the normalized entries of the target, the identity-only
/// placeholder while loading, or nothing when there is no target.
pub fn sync_and_measure<W, M>(
    state: TargetState,
    world: &mut W,
    observer: &Observer,
    metrics: &M,
    config: &HudConfig,
    bounds: LayoutBounds,
) -> (TargetState, LayoutResult)
where
    W: ProbeWorld + ?Sized,
    M: FontMetrics + ?Sized,
{
    let (state, phase) = poll(state, world, observer, config);
    let size = match phase {
        TargetPhase::NoTarget => LayoutResult::ZERO,
        TargetPhase::Changed {
            position,
            needs_format: false,
        } => measure(&placeholder(world, position), metrics, bounds),
        _ => measure(state.formatted().unwrap_or_default(), metrics, bounds),
    };
    (state, size)
}

/// Like [`sync_and_measure`], also clamping to the maximum size in `bounds`.
pub fn sync_and_measure_clamped<W, M>(
    state: TargetState,
    world: &mut W,
    observer: &Observer,
    metrics: &M,
    config: &HudConfig,
    bounds: LayoutBounds,
) -> (TargetState, MeasuredLayout)
where
    W: ProbeWorld + ?Sized,
    M: FontMetrics + ?Sized,
{
    let (state, phase) = poll(state, world, observer, config);
    let size = match phase {
        TargetPhase::NoTarget => MeasuredLayout::default(),
        TargetPhase::Changed {
            position,
            needs_format: false,
        } => measure_clamped(&placeholder(world, position), metrics, bounds),
        _ => measure_clamped(state.formatted().unwrap_or_default(), metrics, bounds),
    };
    (state, size)
}

/// Poll, then render what is targeted.
///
/// While entries load, the identity-only placeholder is drawn with the spinner
/// over its top-left corner. Returns `None` when nothing is targeted.
///
/// `preferred` is forwarded to [`Renderer::render`]; pass the size from a
/// previous [`sync_and_measure`] to skip measuring again.
pub fn sync_and_render<W, B, M>(
    state: TargetState,
    world: &mut W,
    observer: &Observer,
    renderer: &Renderer,
    backend: &mut B,
    metrics: &M,
    canvas: Canvas,
    mode: RenderMode,
    preferred: Option<LayoutResult>,
    ticks: u64,
) -> (TargetState, Option<Rendered>)
where
    W: ProbeWorld + ?Sized,
    B: HudBackend + ?Sized,
    M: FontMetrics + ?Sized,
{
    let (state, phase) = poll(state, world, observer, renderer.config());
    let rendered = match phase {
        TargetPhase::NoTarget => None,
        TargetPhase::Changed {
            position,
            needs_format: false,
        } => {
            let entries = placeholder(world, position);
            let rendered = renderer.render(backend, &entries, metrics, canvas, mode, preferred);
            renderer.render_spinner(backend, 0.0, 0.0, ticks);
            Some(rendered)
        }
        _ => {
            let entries = state.formatted().unwrap_or_default();
            Some(renderer.render(backend, entries, metrics, canvas, mode, preferred))
        }
    };
    (state, rendered)
}
