// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Gap interpolation for sparse trajectories.
//!
//! Given known `(frame, position)` samples sorted by frame, these functions
//! estimate a position for every frame of an inclusive range. Known samples
//! are returned as-is. Frames before the first sample or after the last one
//! are clamped to that sample; nothing is extrapolated.
//!
//! Everything here is pure: the same samples and range always give the same
//! output, and no path state is touched.

use crate::models::path::Position;
use crate::util::geometry::lerp;
use serde::{Deserialize, Serialize};

/// Curve-fitting strategy used to fill gaps between known samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Straight line between the surrounding samples.
    #[default]
    Linear,
    /// Copy the closest sample; the earlier one wins a tie.
    Nearest,
    /// Hold the last known sample until the next one (zero-order hold).
    Previous,
    /// Cubic Catmull-Rom spline through the neighbouring samples.
    CatmullRom,
}

/// Estimate positions for every frame in `begin..=end`.
///
/// `samples` must be sorted by frame with no duplicates. Returns one entry
/// per frame of the range, or nothing when there are no samples at all.
pub fn interpolate_positions(
    samples: &[(usize, Position)],
    begin: usize,
    end: usize,
    mode: InterpolationMode,
) -> Vec<(usize, (f64, f64))> {
    if samples.is_empty() || begin > end {
        return Vec::new();
    }

    (begin..=end)
        .map(|frame| (frame, estimate(samples, frame, mode)))
        .collect()
}

fn estimate(samples: &[(usize, Position)], frame: usize, mode: InterpolationMode) -> (f64, f64) {
    let upper = match samples.binary_search_by_key(&frame, |(f, _)| *f) {
        Ok(i) => return as_f64(&samples[i].1),
        Err(i) => i,
    };

    // Clamp outside the known span
    if upper == 0 {
        return as_f64(&samples[0].1);
    }
    if upper == samples.len() {
        return as_f64(&samples[samples.len() - 1].1);
    }

    let lower = upper - 1;
    let (f1, p1) = samples[lower];
    let (f2, p2) = samples[upper];
    let t = (frame - f1) as f64 / (f2 - f1) as f64;

    match mode {
        InterpolationMode::Linear => (
            lerp(p1.x as f64, p2.x as f64, t),
            lerp(p1.y as f64, p2.y as f64, t),
        ),
        InterpolationMode::Nearest => {
            if frame - f1 <= f2 - frame {
                as_f64(&p1)
            } else {
                as_f64(&p2)
            }
        }
        InterpolationMode::Previous => as_f64(&p1),
        InterpolationMode::CatmullRom => {
            let p0 = if lower > 0 { samples[lower - 1].1 } else { p1 };
            let p3 = samples.get(upper + 1).map(|(_, p)| *p).unwrap_or(p2);
            (
                catmull_rom(p0.x as f64, p1.x as f64, p2.x as f64, p3.x as f64, t),
                catmull_rom(p0.y as f64, p1.y as f64, p2.y as f64, p3.y as f64, t),
            )
        }
    }
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

fn as_f64(position: &Position) -> (f64, f64) {
    (position.x as f64, position.y as f64)
}
