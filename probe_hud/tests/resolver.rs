// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for target resolution driving the estimator and the renderer.

use std::cell::Cell;

use glam::DVec3;
use probe_hud::{
    Bar, BlockPos, Canvas, HudConfig, HudTextures, Identity, ItemStack, LayoutBounds,
    LayoutResult, MonospaceMetrics, Observer, ProbeEntry, ProbeWorld, RenderMode, Renderer,
    TargetPhase, TargetState, poll, sync_and_measure, sync_and_measure_clamped, sync_and_render,
};
use probe_hud_imaging::{DrawOp, ItemId, RectF};
use probe_hud_imaging_ref::RefBackend;

const FURNACE: BlockPos = BlockPos::new(10, 70, 10);
const METRICS: MonospaceMetrics = MonospaceMetrics::new(6);

/// A world with one furnace whose data arrives once `ready` is set.
struct FurnaceWorld {
    looking_at_furnace: bool,
    ready: bool,
    last_reach: Cell<f64>,
}

impl FurnaceWorld {
    fn new() -> Self {
        Self {
            looking_at_furnace: true,
            ready: false,
            last_reach: Cell::new(0.0),
        }
    }
}

impl ProbeWorld for FurnaceWorld {
    fn raycast(&self, _eye: DVec3, _look: DVec3, max_distance: f64) -> Option<BlockPos> {
        self.last_reach.set(max_distance);
        self.looking_at_furnace.then_some(FURNACE)
    }

    fn has_data_source(&self, _pos: BlockPos) -> bool {
        true
    }

    fn identity(&self, _pos: BlockPos) -> Identity {
        Identity::new(ItemStack::single(ItemId(61)), "Furnace")
    }

    fn poll_entries(&mut self, _pos: BlockPos) -> Option<Vec<ProbeEntry>> {
        self.ready.then(|| {
            vec![
                ProbeEntry::new()
                    .with_label("Fuel")
                    .with_bar(Bar::new(0.0, 10.0, 20.0)),
            ]
        })
    }
}

fn observer() -> Observer {
    Observer::new(DVec3::new(10.5, 71.6, 12.5), DVec3::NEG_Z)
}

fn setup() -> (RefBackend, Renderer) {
    let mut backend = RefBackend::default();
    let textures = HudTextures::register(&mut backend);
    let renderer = Renderer::new(HudConfig::default(), textures).expect("valid config");
    (backend, renderer)
}

#[test]
fn reach_comes_from_config() {
    let mut world = FurnaceWorld::new();
    poll(
        TargetState::new(),
        &mut world,
        &observer(),
        &HudConfig::new().with_reach(6.5),
    );
    assert_eq!(world.last_reach.get(), 6.5);

    poll(TargetState::new(), &mut world, &observer(), &HudConfig::new());
    assert_eq!(world.last_reach.get(), 4.0);
}

#[test]
fn nothing_targeted_measures_and_renders_nothing() {
    let mut world = FurnaceWorld::new();
    world.looking_at_furnace = false;

    let (state, size) = sync_and_measure(
        TargetState::new(),
        &mut world,
        &observer(),
        &METRICS,
        &HudConfig::new(),
        LayoutBounds::uniform(100, 100),
    );
    assert_eq!(size, LayoutResult::ZERO);

    let (mut backend, renderer) = setup();
    let (_, rendered) = sync_and_render(
        state,
        &mut world,
        &observer(),
        &renderer,
        &mut backend,
        &METRICS,
        Canvas::new(100, 100),
        RenderMode::Hud,
        None,
        0,
    );
    assert_eq!(rendered, None);
    assert!(backend.events().is_empty());
}

#[test]
fn loading_target_measures_the_placeholder() {
    let mut world = FurnaceWorld::new();

    let (state, size) = sync_and_measure(
        TargetState::new(),
        &mut world,
        &observer(),
        &METRICS,
        &HudConfig::new(),
        LayoutBounds::uniform(0, 0),
    );
    // Icon plus "Furnace" at six units per character.
    assert_eq!(size, LayoutResult::new(62, 16));

    let (_, measured) = sync_and_measure_clamped(
        state,
        &mut world,
        &observer(),
        &METRICS,
        &HudConfig::new(),
        LayoutBounds::new(0, 0, 50, 10),
    );
    assert_eq!(measured.actual, LayoutResult::new(62, 16));
    assert_eq!(measured.clamped, LayoutResult::new(50, 10));
}

#[test]
fn loading_target_renders_placeholder_and_spinner() {
    let mut world = FurnaceWorld::new();
    let (mut backend, renderer) = setup();

    let (state, rendered) = sync_and_render(
        TargetState::new(),
        &mut world,
        &observer(),
        &renderer,
        &mut backend,
        &METRICS,
        Canvas::new(100, 60),
        RenderMode::Hud,
        None,
        7,
    );

    assert!(rendered.is_some());
    assert_eq!(state.formatted(), None);
    assert_eq!(backend.texts().collect::<Vec<_>>(), ["Furnace"]);
    let (last, last_state) = backend.draws().last().expect("spinner drawn");
    assert_eq!(
        *last,
        DrawOp::DrawSprite {
            sprite: renderer.textures().spinner,
            src: RectF::new(48.0, 0.0, 64.0, 16.0),
            dst: RectF::new(0.0, 0.0, 16.0, 16.0),
        }
    );
    assert_eq!(last_state.transform, probe_hud_imaging::Affine::IDENTITY);
}

#[test]
fn loaded_target_renders_formatted_entries_without_spinner() {
    let mut world = FurnaceWorld::new();
    let (mut backend, renderer) = setup();
    let canvas = Canvas::new(120, 60);

    let (state, _) = sync_and_render(
        TargetState::new(),
        &mut world,
        &observer(),
        &renderer,
        &mut backend,
        &METRICS,
        canvas,
        RenderMode::Hud,
        None,
        0,
    );
    world.ready = true;
    backend.clear_events();

    let (state, rendered) = sync_and_render(
        state,
        &mut world,
        &observer(),
        &renderer,
        &mut backend,
        &METRICS,
        canvas,
        RenderMode::Hud,
        None,
        1,
    );
    let rendered = rendered.expect("target rendered");
    assert_eq!(rendered.layout, LayoutResult::new(120, 22));
    assert_eq!(state.formatted().map(<[_]>::len), Some(1));

    let texts: Vec<_> = backend.texts().collect();
    assert_eq!(texts, ["Fuel", "Furnace"]);
    let spinner = renderer.textures().spinner;
    assert!(
        !backend
            .draws()
            .any(|(op, _)| matches!(op, DrawOp::DrawSprite { sprite, .. } if *sprite == spinner))
    );
}

#[test]
fn stable_target_is_not_reformatted() {
    let mut world = FurnaceWorld::new();
    world.ready = true;
    let config = HudConfig::new();

    let (state, first) = poll(TargetState::new(), &mut world, &observer(), &config);
    assert_eq!(
        first,
        TargetPhase::Changed {
            position: FURNACE,
            needs_format: true,
        }
    );
    let cached = state.formatted().map(<[_]>::to_vec);

    // New data from the world is ignored until the target changes.
    world.ready = false;
    let (state, second) = poll(state, &mut world, &observer(), &config);
    assert_eq!(second, TargetPhase::Stable { position: FURNACE });
    assert_eq!(state.formatted().map(<[_]>::to_vec), cached);

    world.looking_at_furnace = false;
    let (state, third) = poll(state, &mut world, &observer(), &config);
    assert_eq!(third, TargetPhase::NoTarget);
    assert_eq!(state.position(), None);
}

#[test]
fn render_fits_the_supplied_size() {
    let mut world = FurnaceWorld::new();
    world.ready = true;
    let (mut backend, renderer) = setup();

    // Glasses mode does not re-measure, so the supplied size drives the scale.
    let preferred = LayoutResult::new(400, 50);
    let (_, rendered) = sync_and_render(
        TargetState::new(),
        &mut world,
        &observer(),
        &renderer,
        &mut backend,
        &METRICS,
        Canvas::new(100, 100),
        RenderMode::Glasses,
        Some(preferred),
        2,
    );
    let rendered = rendered.expect("target rendered");
    assert_eq!(rendered.layout, preferred);
    assert_eq!(rendered.contain, 0.25);
}
