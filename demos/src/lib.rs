// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the Probe HUD demos: a small scripted world and a
//! printer for recorded ops.

use std::collections::HashMap;

use glam::DVec3;
use probe_hud::units::{MILLIBUCKETS, REDSTONE_FLUX, TICKS};
use probe_hud::{Bar, BlockPos, Identity, ItemStack, ProbeEntry, ProbeWorld};
use probe_hud_imaging::{DrawOp, ItemId, SpriteId, StateOp};
use probe_hud_imaging_ref::Event;

/// Distance between raycast samples, in blocks.
const RAY_STEP: f64 = 0.05;

/// One block of the demo world.
#[derive(Clone, Debug)]
pub struct DemoBlock {
    /// Display name.
    pub name: &'static str,
    /// Icon item.
    pub item: ItemId,
    /// Entries served for the block; `None` for blocks without a data source.
    pub entries: Option<Vec<ProbeEntry>>,
    /// First tick at which entries are available.
    pub ready_at: u64,
}

/// A handful of blocks in a row in front of the origin.
#[derive(Clone, Debug, Default)]
pub struct DemoWorld {
    blocks: HashMap<BlockPos, DemoBlock>,
    tick: u64,
}

impl DemoWorld {
    /// The sample layout: stone, a furnace that takes a few ticks to report,
    /// a chest and a water tank, left to right at `z = -3`.
    pub fn sample(water: SpriteId) -> Self {
        let mut world = Self::default();
        world.insert(
            BlockPos::new(-2, 1, -3),
            DemoBlock {
                name: "Stone",
                item: ItemId(1),
                entries: None,
                ready_at: 0,
            },
        );
        world.insert(
            BlockPos::new(-1, 1, -3),
            DemoBlock {
                name: "Furnace",
                item: ItemId(61),
                entries: Some(vec![
                    ProbeEntry::new()
                        .with_label("Fuel")
                        .with_bar(Bar::new(0.0, 1_200.0, 1_600.0)),
                    ProbeEntry::new()
                        .with_label("Smelting")
                        .with_bar(Bar::new(0.0, 120.0, 200.0).with_unit(TICKS)),
                    ProbeEntry::new()
                        .with_item(ItemStack::new(ItemId(263), 12))
                        .with_label("Coal"),
                ]),
                ready_at: 4,
            },
        );
        let mut chest = vec![None; 27];
        chest[0] = Some(ItemStack::new(ItemId(4), 64));
        chest[1] = Some(ItemStack::new(ItemId(264), 3));
        chest[13] = Some(ItemStack::new(ItemId(331), 250));
        world.insert(
            BlockPos::new(0, 1, -3),
            DemoBlock {
                name: "Chest",
                item: ItemId(54),
                entries: Some(vec![ProbeEntry::new().with_inventory(chest)]),
                ready_at: 0,
            },
        );
        world.insert(
            BlockPos::new(1, 1, -3),
            DemoBlock {
                name: "Tank",
                item: ItemId(900),
                entries: Some(vec![
                    ProbeEntry::new().with_bar(
                        Bar::new(0.0, 6_500.0, 16_000.0).with_unit(MILLIBUCKETS.with_fluid(water)),
                    ),
                    ProbeEntry::new()
                        .with_label("Pump")
                        .with_bar(Bar::new(0.0, 40.0, 80.0).with_unit(REDSTONE_FLUX.per_tick())),
                ]),
                ready_at: 0,
            },
        );
        world
    }

    /// Add or replace a block.
    pub fn insert(&mut self, pos: BlockPos, block: DemoBlock) {
        self.blocks.insert(pos, block);
    }

    /// Advance the world clock by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Current tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Center of the block at `pos`.
    pub fn center(pos: BlockPos) -> DVec3 {
        pos.0.as_dvec3() + DVec3::splat(0.5)
    }
}

impl ProbeWorld for DemoWorld {
    fn raycast(&self, eye: DVec3, look: DVec3, max_distance: f64) -> Option<BlockPos> {
        let mut t = 0.0;
        while t <= max_distance {
            let pos = BlockPos((eye + look * t).floor().as_ivec3());
            if self.blocks.contains_key(&pos) {
                return Some(pos);
            }
            t += RAY_STEP;
        }
        None
    }

    fn has_data_source(&self, pos: BlockPos) -> bool {
        self.blocks
            .get(&pos)
            .is_some_and(|block| block.entries.is_some())
    }

    fn identity(&self, pos: BlockPos) -> Identity {
        match self.blocks.get(&pos) {
            Some(block) => Identity::new(ItemStack::single(block.item), block.name),
            None => Identity::new(ItemStack::single(ItemId(0)), "Air"),
        }
    }

    fn poll_entries(&mut self, pos: BlockPos) -> Option<Vec<ProbeEntry>> {
        let block = self.blocks.get(&pos)?;
        if self.tick < block.ready_at {
            return None;
        }
        block.entries.clone()
    }
}

/// One line per recorded event, indented by layer depth.
pub fn describe_events(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| match event {
            Event::State { op, state } => {
                let indent = "  ".repeat(state.layer_stack_depth as usize);
                match op {
                    StateOp::SetTransform(tx) => {
                        let [a, _, _, d, e, f] = tx.as_coeffs();
                        format!("{indent}transform scale({a:.3}, {d:.3}) translate({e}, {f})")
                    }
                    StateOp::PushLayer(layer) => format!("{indent}push {layer:?}"),
                    StateOp::PopLayer => format!("{indent}pop"),
                }
            }
            Event::Draw { op, state } => {
                let indent = "  ".repeat(state.layer_stack_depth as usize);
                format!("{indent}{}", describe_draw(op))
            }
        })
        .collect()
}

fn describe_draw(op: &DrawOp) -> String {
    match op {
        DrawOp::FillRect { rect, .. } => {
            format!("fill ({}, {})..({}, {})", rect.x0, rect.y0, rect.x1, rect.y1)
        }
        DrawOp::StrokeRect { rect, .. } => {
            format!("stroke ({}, {})..({}, {})", rect.x0, rect.y0, rect.x1, rect.y1)
        }
        DrawOp::DrawSprite { sprite, dst, .. } => {
            format!("sprite #{} at ({}, {})", sprite.0, dst.x0, dst.y0)
        }
        DrawOp::DrawItem { item, x, y, lit } => {
            format!("item #{} at ({x}, {y}){}", item.0, if *lit { " lit" } else { "" })
        }
        DrawOp::DrawText { text, x, y, .. } => format!("text {text:?} at ({x}, {y})"),
    }
}
