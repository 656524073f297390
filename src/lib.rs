// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VIDANNOT - video annotation data layer.
//!
//! Models a video, the trackable objects within it, and per-object datasets
//! such as frame-indexed trajectories ([`Path`]) with gap interpolation.

pub mod error;
pub mod interpolation;
pub mod io;
pub mod models;
pub mod util;

pub use error::PathError;
pub use interpolation::InterpolationMode;
pub use models::{
    config::AnnotationConfig,
    dataset::{Dataset, DatasetKind, ValueSeries},
    object2d::Object2D,
    path::{Detection, Path, Position, Selection},
    video::{Image, Note, Video, VideoChild},
};
