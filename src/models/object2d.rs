// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Trackable objects and the datasets they own.

use crate::models::config::AnnotationConfig;
use crate::models::dataset::{Dataset, DatasetKind, ValueSeries};
use crate::models::path::Path;

/// An object tracked across the frames of a video.
#[derive(Debug, Clone)]
pub struct Object2D {
    pub name: String,
    datasets: Vec<DatasetKind>,
    config: AnnotationConfig,
}

impl Object2D {
    /// Create an object with no datasets. New paths inherit `config`.
    pub fn new(name: String, config: AnnotationConfig) -> Self {
        Self {
            name,
            datasets: Vec::new(),
            config,
        }
    }

    /// Number of datasets owned by the object.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Add a new empty path and return its dataset index.
    pub fn create_path(&mut self) -> usize {
        let path = Path::with_config(self.datasets.len(), &self.config);
        self.push_dataset(DatasetKind::Path(path))
    }

    /// Add a new empty value series and return its dataset index.
    pub fn create_values(&mut self) -> usize {
        let values = ValueSeries::new(self.datasets.len());
        self.push_dataset(DatasetKind::Values(values))
    }

    fn push_dataset(&mut self, dataset: DatasetKind) -> usize {
        log::info!("{}: created dataset {}", self.name, dataset.name());
        self.datasets.push(dataset);
        self.datasets.len() - 1
    }

    pub fn datasets(&self) -> &[DatasetKind] {
        &self.datasets
    }

    pub fn dataset(&self, index: usize) -> Option<&DatasetKind> {
        self.datasets.get(index)
    }

    pub fn dataset_mut(&mut self, index: usize) -> Option<&mut DatasetKind> {
        self.datasets.get_mut(index)
    }

    /// The path at dataset `index`, if that dataset is a path.
    pub fn path(&self, index: usize) -> Option<&Path> {
        self.datasets.get(index).and_then(DatasetKind::as_path)
    }

    pub fn path_mut(&mut self, index: usize) -> Option<&mut Path> {
        self.datasets.get_mut(index).and_then(DatasetKind::as_path_mut)
    }

    /// Paths in creation order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.datasets.iter().filter_map(DatasetKind::as_path)
    }

    pub fn paths_mut(&mut self) -> impl Iterator<Item = &mut Path> {
        self.datasets.iter_mut().filter_map(DatasetKind::as_path_mut)
    }

    /// Remove and return the dataset at `index`.
    pub fn remove_dataset(&mut self, index: usize) -> Option<DatasetKind> {
        if index >= self.datasets.len() {
            return None;
        }
        Some(self.datasets.remove(index))
    }
}
