// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the rounding and distance helpers used when
//! converting detector output to pixel positions and hit-testing them.

use crate::models::path::Position;

/// Round image-plane coordinates to the nearest pixel.
///
/// Halves round away from zero, so `2.5` becomes `3` and `-2.5` becomes `-3`.
/// Finite values beyond the `i32` range clamp to its bounds. Returns `None`
/// if either coordinate is NaN or infinite.
pub fn round_coordinates(x: f64, y: f64) -> Option<Position> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Position {
        x: x.round() as i32,
        y: y.round() as i32,
    })
}

/// Euclidean distance between a stored position and an arbitrary point.
pub fn distance_to(position: &Position, x: f64, y: f64) -> f64 {
    let dx = position.x as f64 - x;
    let dy = position.y as f64 - y;
    dx.hypot(dy)
}

/// Linear blend between `a` and `b` at `t` in `[0, 1]`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
