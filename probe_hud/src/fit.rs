// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform containment of a layout inside a canvas.

use crate::layout::LayoutResult;

/// Scale factor that fits `layout` inside a `canvas_width` by `canvas_height`
/// canvas while preserving its aspect ratio.
///
/// Content is only ever shrunk: the result is `1.0` when the layout already
/// fits on both axes, and otherwise the smaller of the two axis ratios.
pub fn contain_scale(canvas_width: u32, canvas_height: u32, layout: LayoutResult) -> f32 {
    if layout.width <= canvas_width && layout.height <= canvas_height {
        return 1.0;
    }
    let sx = ratio(canvas_width, layout.width);
    let sy = ratio(canvas_height, layout.height);
    sx.min(sy)
}

/// Canvas extent in layout units once content is scaled by `contain`.
///
/// A non-positive scale leaves the extent unchanged.
#[allow(
    clippy::cast_possible_truncation,
    reason = "descaled extents are whole layout units; `as` saturates"
)]
pub fn descale(extent: u32, contain: f32) -> u32 {
    if contain > 0.0 {
        (extent as f32 / contain) as u32
    } else {
        extent
    }
}

fn ratio(canvas: u32, content: u32) -> f32 {
    if content == 0 {
        // An empty axis never constrains the scale.
        f32::INFINITY
    } else {
        canvas as f32 / content as f32
    }
}
