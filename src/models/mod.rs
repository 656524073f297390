// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data model: videos, objects and their datasets.

pub mod config;
pub mod dataset;
pub mod object2d;
pub mod path;
pub mod video;
