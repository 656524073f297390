// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Small numeric helpers shared by the models.

pub mod geometry;
