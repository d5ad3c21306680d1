// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Probe HUD Imaging: backend-agnostic drawing IR for HUD overlays.
//!
//! This crate defines a small, plain‑old‑data (POD) friendly set of drawing
//! operations and the traits for backends that consume them. It sits between
//! the layout/measurement code in `probe_hud` and whatever actually puts
//! pixels on screen (a game engine's GUI renderer, a wgpu pass, or the
//! recording backend in `probe_hud_imaging_ref`).
//!
//! # Core concepts
//!
//! - **Resources**: opaque handles. [`SpriteId`] names a region of a texture
//!   registered through [`ResourceBackend`]; [`ItemId`] names an item whose
//!   icon the host knows how to draw.
//! - **Operations**: [`StateOp`] (mutate the transform or layer stack) and
//!   [`DrawOp`] (produce pixels).
//! - **Backends**: [`HudBackend`] accepts operations; [`HudBackendExt`] wraps
//!   scoped layers and transforms around a closure.
//!
//! All draw coordinates are local. The caller establishes one transform with
//! [`StateOp::SetTransform`] and then emits geometry in its own unscaled space;
//! backends apply the transform when they rasterize.
//!
//! # Example
//!
//! ```ignore
//! # use probe_hud_imaging::*;
//! # use peniko::Color;
//! # struct MyBackend { /* implements ResourceBackend + HudBackend */ }
//! let mut backend = MyBackend { /* ... */ };
//!
//! let slot = backend.create_sprite(SpriteDesc::new("textures/gui/slot.png", 18, 18));
//! backend.state(StateOp::SetTransform(Affine::scale(0.5)));
//! backend.draw(DrawOp::FillRect {
//!     rect: RectF::new(0.0, 0.0, 40.0, 11.0),
//!     color: Color::WHITE,
//! });
//! backend.draw(DrawOp::DrawSprite {
//!     sprite: slot,
//!     src: RectF::new(0.0, 0.0, 18.0, 18.0),
//!     dst: RectF::new(0.0, 12.0, 18.0, 30.0),
//! });
//! ```

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use alloc::string::String;
pub use peniko::{BlendMode, Color, Compose, Mix};

/// Identifier for a sprite resource.
///
/// This is a small, opaque handle that is stable for the lifetime of the
/// resource. Sprites are registered once (slot frames, spinner strips, fluid
/// textures) and reused every frame.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Identifier for an item the host can draw as a 16x16 icon.
///
/// The HUD never looks inside an item; it only forwards this handle to
/// [`DrawOp::DrawItem`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

/// Affine transform type used by the drawing IR.
pub type Affine = kurbo::Affine;

/// A simple axis-aligned rectangle in f32 coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectF {
    /// Minimum X coordinate.
    pub x0: f32,
    /// Minimum Y coordinate.
    pub y0: f32,
    /// Maximum X coordinate.
    pub x1: f32,
    /// Maximum Y coordinate.
    pub y1: f32,
}

impl RectF {
    /// Create a new rectangle from min/max corners.
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width of the rectangle; negative if the corners are inverted.
    #[inline]
    pub fn width(self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle; negative if the corners are inverted.
    #[inline]
    pub fn height(self) -> f32 {
        self.y1 - self.y0
    }
}

/// Parameters for a pushed layer.
///
/// Layers scope clipping and compositing: `clip` restricts drawing within the
/// layer to a local rectangle, and `blend` controls how the layer is
/// composited into its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerOp {
    /// Optional clip rectangle in local coordinates.
    pub clip: Option<RectF>,
    /// Optional blend mode used when compositing this layer into its parent.
    pub blend: Option<BlendMode>,
}

impl LayerOp {
    /// A layer that only clips.
    #[inline]
    pub const fn clip(rect: RectF) -> Self {
        Self {
            clip: Some(rect),
            blend: None,
        }
    }

    /// A layer that only changes the blend mode.
    #[inline]
    pub const fn blend(mode: BlendMode) -> Self {
        Self {
            clip: None,
            blend: Some(mode),
        }
    }
}

/// State operations that mutate the current drawing state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Set the current transform matrix.
    SetTransform(Affine),
    /// Push a new layer onto the layer stack.
    ///
    /// Layers must be well-nested: every `PushLayer` must eventually be
    /// matched by a [`StateOp::PopLayer`].
    PushLayer(LayerOp),
    /// Pop the most recently pushed layer.
    PopLayer,
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill an axis-aligned rectangle with a solid color.
    FillRect {
        /// Rectangle in local coordinates.
        rect: RectF,
        /// Fill color.
        color: Color,
    },
    /// Outline an axis-aligned rectangle with a one-unit border.
    StrokeRect {
        /// Rectangle in local coordinates.
        rect: RectF,
        /// Border color.
        color: Color,
    },
    /// Draw a sub-region of a sprite resource into a destination rectangle.
    ///
    /// - `src` is in sprite pixel coordinates.
    /// - `dst` is in local coordinates (subject to the current transform).
    DrawSprite {
        /// Sprite resource to sample.
        sprite: SpriteId,
        /// Source rectangle in sprite pixels.
        src: RectF,
        /// Destination rectangle in local coordinates.
        dst: RectF,
    },
    /// Draw an item icon into the 16x16 box whose top-left corner is `(x, y)`.
    DrawItem {
        /// Item to draw.
        item: ItemId,
        /// Left edge of the icon box.
        x: f32,
        /// Top edge of the icon box.
        y: f32,
        /// Whether the host should enable GUI item lighting (in-world overlays).
        lit: bool,
    },
    /// Draw a run of text with its top-left corner at `(x, y)`.
    DrawText {
        /// Text to draw, including any style codes the host understands.
        text: String,
        /// Left edge of the run.
        x: f32,
        /// Top edge of the run.
        y: f32,
        /// Text color.
        color: Color,
        /// Whether a drop shadow is drawn under the run.
        shadow: bool,
    },
}

/// Description of a sprite resource.
///
/// `location` is whatever the host uses to find the texture (a resource
/// path, an atlas key); `width`/`height` are the full texture dimensions in
/// pixels, which [`DrawOp::DrawSprite`] source rectangles index into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteDesc {
    /// Host-defined texture location.
    pub location: Cow<'static, str>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
}

impl SpriteDesc {
    /// Create a sprite description.
    #[inline]
    pub fn new(location: impl Into<Cow<'static, str>>, width: u32, height: u32) -> Self {
        Self {
            location: location.into(),
            width,
            height,
        }
    }
}

/// Resource lifetime interface.
///
/// Implementations must ensure that IDs remain valid and refer to the same
/// logical resource until the corresponding `destroy_*` function is called.
pub trait ResourceBackend {
    /// Register a sprite resource.
    fn create_sprite(&mut self, desc: SpriteDesc) -> SpriteId;
    /// Destroy a previously registered sprite.
    fn destroy_sprite(&mut self, id: SpriteId);
}

/// Minimal HUD backend trait.
pub trait HudBackend: ResourceBackend {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Push a new layer onto the layer stack.
    ///
    /// This is equivalent to `self.state(StateOp::PushLayer(op))`.
    #[inline]
    fn layer_push(&mut self, op: LayerOp) {
        self.state(StateOp::PushLayer(op));
    }

    /// Pop the most recently pushed layer.
    ///
    /// This is equivalent to `self.state(StateOp::PopLayer)`.
    #[inline]
    fn layer_pop(&mut self) {
        self.state(StateOp::PopLayer);
    }
}

/// Convenience helpers for `HudBackend` implementations and callers.
///
/// This is separate from [`HudBackend`] so that methods can accept closures and
/// return values without complicating trait object usage (`&mut dyn HudBackend`).
pub trait HudBackendExt: HudBackend {
    /// Run `f` inside a pushed layer, popping it afterwards.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_layer<R>(&mut self, op: LayerOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.layer_push(op);
        let out = f(self);
        self.layer_pop();
        out
    }

    /// Run `f` inside a rectangular clip layer.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_clip_rect<R>(&mut self, rect: RectF, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::clip(rect), f)
    }

    /// Run `f` inside a blend layer.
    #[inline]
    fn with_blend_layer<R>(&mut self, blend: BlendMode, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::blend(blend), f)
    }

    /// Run `f` under `transform`, restoring `restore` afterwards.
    ///
    /// The IR has no transform stack, so the caller names the transform to
    /// return to.
    #[inline]
    fn with_transform<R>(
        &mut self,
        transform: Affine,
        restore: Affine,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.state(StateOp::SetTransform(transform));
        let out = f(self);
        self.state(StateOp::SetTransform(restore));
        out
    }
}

impl<B: HudBackend + ?Sized> HudBackendExt for B {}
