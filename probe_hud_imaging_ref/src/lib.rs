// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Probe HUD Imaging Reference Backend.
//!
//! This crate provides a small, stateful implementation of [`HudBackend`] and
//! [`ResourceBackend`] for **op recording and state tracing**.
//!
//! It does not rasterize anything. It is intended for tests, benches and
//! debugging that want to assert on emitted ops and on the transform and layer
//! state at the time each op was applied.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use probe_hud_imaging::{
    Affine, DrawOp, HudBackend, LayerOp, ResourceBackend, SpriteDesc, SpriteId, StateOp,
};

/// Snapshot of the current drawing state inside the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Affine,
    /// Number of active layers on the layer stack.
    pub layer_stack_depth: u32,
    /// The most recently pushed layer op, if any.
    pub layer_top: Option<LayerOp>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            layer_stack_depth: 0,
            layer_top: None,
        }
    }
}

/// Event recorded by the reference backend.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// Simple reference implementation of the HUD backend.
///
/// This backend:
/// - Stores sprite descriptors in a vector keyed by their IDs,
/// - Tracks the current transform and layer stack,
/// - Records an [`Event`] for every state and draw operation applied.
#[derive(Default, Debug)]
pub struct RefBackend {
    sprites: Vec<Option<SpriteDesc>>,

    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Current drawing state.
    state: StateSnapshot,
    layer_stack: Vec<LayerOp>,
}

impl RefBackend {
    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterates over draw operations together with the state they were drawn under.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &StateSnapshot)> {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Iterates over the text runs drawn so far.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.draws().filter_map(|(op, _)| match op {
            DrawOp::DrawText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns the descriptor of a live sprite.
    pub fn sprite(&self, id: SpriteId) -> Option<&SpriteDesc> {
        self.sprites.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Returns the current drawing state.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Clears all recorded events but keeps resources and the current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl ResourceBackend for RefBackend {
    fn create_sprite(&mut self, desc: SpriteDesc) -> SpriteId {
        let id = u32::try_from(self.sprites.len())
            .expect("RefBackend: too many sprites for u32 SpriteId");
        self.sprites.push(Some(desc));
        SpriteId(id)
    }

    fn destroy_sprite(&mut self, id: SpriteId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.sprites.get_mut(idx) {
            *slot = None;
        }
    }
}

impl HudBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::SetTransform(tx) => self.state.transform = *tx,
            StateOp::PushLayer(layer) => {
                self.layer_stack.push(layer.clone());
                self.state.layer_stack_depth = u32::try_from(self.layer_stack.len())
                    .expect("RefBackend: too many layer stack entries for u32");
                self.state.layer_top = self.layer_stack.last().cloned();
            }
            StateOp::PopLayer => {
                self.layer_stack.pop();
                self.state.layer_stack_depth = u32::try_from(self.layer_stack.len())
                    .expect("RefBackend: too many layer stack entries for u32");
                self.state.layer_top = self.layer_stack.last().cloned();
            }
        }

        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }
}
