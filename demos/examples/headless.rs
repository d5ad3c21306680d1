// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless HUD frames over the recording backend.
//!
//! The observer sweeps across a row of demo blocks (stone, a furnace that
//! reports late, a chest and a fluid tank). Each frame polls the target,
//! renders it into a 160x90 canvas, and prints the recorded ops.
//!
//! Set `RUST_LOG=probe_hud=debug` to see target changes and formatting.
//!
//! Example:
//!   `cargo run -p probe_hud_demos --example headless`

use std::process::ExitCode;

use glam::DVec3;
use probe_hud::{
    BlockPos, Canvas, HudConfig, HudTextures, MonospaceMetrics, Observer, RenderMode, Renderer,
    TargetState, sync_and_render,
};
use probe_hud_demos::{DemoWorld, describe_events};
use probe_hud_imaging::{ResourceBackend, SpriteDesc};
use probe_hud_imaging_ref::RefBackend;

const FRAMES_PER_BLOCK: u64 = 6;

fn main() -> ExitCode {
    env_logger::init();

    let mut backend = RefBackend::default();
    let textures = HudTextures::register(&mut backend);
    let water = backend.create_sprite(SpriteDesc::new("minecraft:block/water_still", 16, 512));
    let renderer = match Renderer::new(HudConfig::new().with_reach(6.0), textures) {
        Ok(renderer) => renderer,
        Err(err) => {
            log::error!("invalid HUD config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut world = DemoWorld::sample(water);
    let metrics = MonospaceMetrics::default();
    let canvas = Canvas::new(160, 90);
    let eye = DVec3::new(0.5, 1.6, 0.5);
    let mut state = TargetState::new();

    for x in -2..=1 {
        let look = (DemoWorld::center(BlockPos::new(x, 1, -3)) - eye).normalize();
        let observer = Observer::new(eye, look);
        for _ in 0..FRAMES_PER_BLOCK {
            let tick = world.tick();
            let (next, rendered) = sync_and_render(
                state,
                &mut world,
                &observer,
                &renderer,
                &mut backend,
                &metrics,
                canvas,
                RenderMode::Hud,
                None,
                tick,
            );
            state = next;

            match rendered {
                Some(rendered) => println!(
                    "tick {tick}: {}x{} at scale {:.3}",
                    rendered.layout.width,
                    rendered.layout.height,
                    rendered.contain,
                ),
                None => println!("tick {tick}: nothing targeted"),
            }
            for line in describe_events(backend.events()) {
                println!("  {line}");
            }
            backend.clear_events();
            world.advance();
        }
    }

    renderer.textures().release(&mut backend);
    ExitCode::SUCCESS
}
