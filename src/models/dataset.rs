// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset contract shared by every per-object data series.
//!
//! A dataset is a named, frame-indexed series owned by an
//! [`Object2D`](crate::models::object2d::Object2D). Paths are one kind;
//! [`ValueSeries`] is the other kind kept here.

use crate::models::path::Path;

/// Naming and length contract every dataset kind satisfies.
pub trait Dataset {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// Number of frame slots stored, gaps included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sparse per-frame scalar measurement, such as an area or an angle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueSeries {
    name: String,
    values: Vec<Option<f64>>,
}

impl ValueSeries {
    /// Create an empty series for an owner that already has
    /// `sibling_count` datasets.
    pub fn new(sibling_count: usize) -> Self {
        Self {
            name: child_name("value", sibling_count),
            values: Vec::new(),
        }
    }

    /// Store `value` at `frame`, growing with gaps as needed.
    pub fn set_value(&mut self, frame: usize, value: Option<f64>) {
        if frame >= self.values.len() {
            self.values.resize(frame + 1, None);
        }
        self.values[frame] = value;
    }

    pub fn get_value(&self, frame: usize) -> Option<f64> {
        self.values.get(frame).copied().flatten()
    }
}

impl Dataset for ValueSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

impl Dataset for Path {
    fn name(&self) -> &str {
        Path::name(self)
    }

    fn set_name(&mut self, name: String) {
        Path::set_name(self, name);
    }

    fn len(&self) -> usize {
        Path::len(self)
    }
}

/// Every dataset kind an object can own.
#[derive(Debug, Clone)]
pub enum DatasetKind {
    Path(Path),
    Values(ValueSeries),
}

impl DatasetKind {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            DatasetKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut Path> {
        match self {
            DatasetKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_values(&self) -> Option<&ValueSeries> {
        match self {
            DatasetKind::Values(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_values_mut(&mut self) -> Option<&mut ValueSeries> {
        match self {
            DatasetKind::Values(values) => Some(values),
            _ => None,
        }
    }
}

impl Dataset for DatasetKind {
    fn name(&self) -> &str {
        match self {
            DatasetKind::Path(path) => Dataset::name(path),
            DatasetKind::Values(values) => values.name(),
        }
    }

    fn set_name(&mut self, name: String) {
        match self {
            DatasetKind::Path(path) => Dataset::set_name(path, name),
            DatasetKind::Values(values) => values.set_name(name),
        }
    }

    fn len(&self) -> usize {
        match self {
            DatasetKind::Path(path) => Dataset::len(path),
            DatasetKind::Values(values) => values.len(),
        }
    }
}

/// `kind` for the first dataset of an owner, `kind(<n>)` afterwards.
pub(crate) fn child_name(kind: &str, sibling_count: usize) -> String {
    if sibling_count > 0 {
        format!("{}({})", kind, sibling_count)
    } else {
        kind.to_string()
    }
}
