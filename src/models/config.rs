// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation settings shared by every object of a video.

use crate::interpolation::InterpolationMode;
use serde::{Deserialize, Serialize};

/// Hit-test radius, in pixels, used when none is configured.
pub const DEFAULT_COLLISION_RADIUS: f64 = 20.0;

/// Settings applied to paths when they are created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub interpolation_mode: InterpolationMode,
    pub collision_radius: f64,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            interpolation_mode: InterpolationMode::default(),
            collision_radius: DEFAULT_COLLISION_RADIUS,
        }
    }
}
