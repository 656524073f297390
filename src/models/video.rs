// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video container.
//!
//! A video owns its objects, images and notes as a single ordered list of
//! [`VideoChild`] values. It only records where the file lives; decoding
//! frames is left to the caller.

use crate::models::config::AnnotationConfig;
use crate::models::object2d::Object2D;
use std::path::{Path as FsPath, PathBuf};

/// A still image captured from the video.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub name: String,
    /// Frame the image was taken from, if known.
    pub frame: Option<usize>,
}

/// A free-text note attached to the video.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub name: String,
    pub text: String,
}

/// Every kind of child a video can own.
#[derive(Debug, Clone)]
pub enum VideoChild {
    Object(Object2D),
    Image(Image),
    Note(Note),
}

impl VideoChild {
    pub fn name(&self) -> &str {
        match self {
            VideoChild::Object(object) => &object.name,
            VideoChild::Image(image) => &image.name,
            VideoChild::Note(note) => &note.name,
        }
    }
}

/// A video and the annotations made on it.
#[derive(Debug, Clone, Default)]
pub struct Video {
    pub name: String,
    filepath: Option<PathBuf>,
    children: Vec<VideoChild>,
    config: AnnotationConfig,
}

impl Video {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a video whose objects apply `config` to their paths.
    pub fn with_config(config: AnnotationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// Number of children (objects, images and notes).
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn filepath(&self) -> Option<&FsPath> {
        self.filepath.as_deref()
    }

    /// Point the video at a file. The video is renamed after the file stem.
    pub fn set_filepath(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.filepath = Some(path);
    }

    /// File name with extension, if a file is set.
    pub fn filename(&self) -> Option<String> {
        self.filepath
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
    }

    /// First name of the form `<prefix><n>` (n from 1) not used by a child.
    pub fn generate_child_name(&self, prefix: &str) -> String {
        (1..)
            .map(|n| format!("{}{}", prefix, n))
            .find(|name| self.children.iter().all(|c| c.name() != name))
            .unwrap_or_default()
    }

    /// Add a new object and return its child index.
    pub fn create_object(&mut self) -> usize {
        let name = self.generate_child_name("Object ");
        let object = Object2D::new(name, self.config.clone());
        self.push_child(VideoChild::Object(object))
    }

    /// Add an image taken from `frame` and return its child index.
    pub fn create_image(&mut self, frame: Option<usize>) -> usize {
        let image = Image {
            name: self.generate_child_name("Image "),
            frame,
        };
        self.push_child(VideoChild::Image(image))
    }

    /// Add a note with `text` and return its child index.
    pub fn create_note(&mut self, text: impl Into<String>) -> usize {
        let note = Note {
            name: self.generate_child_name("Note "),
            text: text.into(),
        };
        self.push_child(VideoChild::Note(note))
    }

    fn push_child(&mut self, child: VideoChild) -> usize {
        log::info!("{}: added {}, total children: {}", self.name, child.name(), self.children.len() + 1);
        self.children.push(child);
        self.children.len() - 1
    }

    /// Remove and return the child at `index`.
    pub fn remove_child(&mut self, index: usize) -> Option<VideoChild> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        log::info!("{}: removed {}, total children: {}", self.name, child.name(), self.children.len());
        Some(child)
    }

    pub fn children(&self) -> &[VideoChild] {
        &self.children
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut VideoChild> {
        self.children.get_mut(index)
    }

    /// The object at child `index`, if that child is an object.
    pub fn object(&self, index: usize) -> Option<&Object2D> {
        match self.children.get(index) {
            Some(VideoChild::Object(object)) => Some(object),
            _ => None,
        }
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut Object2D> {
        match self.children.get_mut(index) {
            Some(VideoChild::Object(object)) => Some(object),
            _ => None,
        }
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object2D> {
        self.children.iter().filter_map(|c| match c {
            VideoChild::Object(object) => Some(object),
            _ => None,
        })
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object2D> {
        self.children.iter_mut().filter_map(|c| match c {
            VideoChild::Object(object) => Some(object),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.children.iter().filter_map(|c| match c {
            VideoChild::Image(image) => Some(image),
            _ => None,
        })
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.children.iter().filter_map(|c| match c {
            VideoChild::Note(note) => Some(note),
            _ => None,
        })
    }
}
