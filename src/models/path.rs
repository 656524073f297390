// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame-indexed object trajectories.
//!
//! A [`Path`] stores one optional pixel position per frame. Gaps are
//! explicit empty slots, and writing past the end backfills with gaps.
//! On top of the stored positions it keeps the transient editing state a
//! user interface needs: up to two selected frames and an uncommitted
//! interpolation preview.

use crate::error::{PathError, Result};
use crate::interpolation::{interpolate_positions, InterpolationMode};
use crate::models::config::{AnnotationConfig, DEFAULT_COLLISION_RADIUS};
use crate::models::dataset::child_name;
use crate::util::geometry::{distance_to, round_coordinates};
use serde::{Deserialize, Serialize};

/// Known samples needed before a preview is computed.
const PREVIEW_MIN_SAMPLES: usize = 2;

/// Known samples needed before an interpolation is committed.
/// Stricter than the preview on purpose.
const COMMIT_MIN_SAMPLES: usize = 3;

/// A pixel position in the image plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Anything a detector produces that has a centroid.
pub trait Detection {
    /// Centre of the detection in image coordinates.
    fn centroid(&self) -> (f64, f64);
}

/// Range selection state used for interpolation and deletion.
///
/// The first selected frame is the start of the range and the second is
/// the end. A third selection is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    One(usize),
    Two(usize, usize),
}

impl Selection {
    pub fn len(&self) -> usize {
        match self {
            Selection::Idle => 0,
            Selection::One(_) => 1,
            Selection::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    pub fn contains(&self, frame: usize) -> bool {
        match *self {
            Selection::Idle => false,
            Selection::One(a) => a == frame,
            Selection::Two(a, b) => a == frame || b == frame,
        }
    }
}

/// Trajectory of one object across the frames of a video.
#[derive(Debug, Clone)]
pub struct Path {
    name: String,
    positions: Vec<Option<Position>>,
    preview: Vec<Position>,
    selection: Selection,
    interpolation_mode: InterpolationMode,
    collision_radius: f64,
}

impl Path {
    /// Create an empty path for an owner that already has `sibling_count`
    /// datasets. The first one is named `path`, later ones `path(<n>)`.
    pub fn new(sibling_count: usize) -> Self {
        Self {
            name: child_name("path", sibling_count),
            positions: Vec::new(),
            preview: Vec::new(),
            selection: Selection::Idle,
            interpolation_mode: InterpolationMode::default(),
            collision_radius: DEFAULT_COLLISION_RADIUS,
        }
    }

    /// Create an empty path with the interpolation mode and hit radius
    /// taken from `config`.
    pub fn with_config(sibling_count: usize, config: &AnnotationConfig) -> Self {
        let mut path = Self::new(sibling_count);
        path.interpolation_mode = config.interpolation_mode;
        path.collision_radius = config.collision_radius;
        path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of frame slots, including gaps.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All slots in frame order.
    pub fn positions(&self) -> &[Option<Position>] {
        &self.positions
    }

    pub fn interpolation_mode(&self) -> InterpolationMode {
        self.interpolation_mode
    }

    /// Mode used by preview, and by commit when no mode is given.
    pub fn set_interpolation_mode(&mut self, mode: InterpolationMode) {
        self.interpolation_mode = mode;
    }

    pub fn collision_radius(&self) -> f64 {
        self.collision_radius
    }

    // ------------------------------------------------------------------
    // Positions
    // ------------------------------------------------------------------

    /// Store a position at `frame`, rounded to the nearest pixel.
    ///
    /// If either coordinate is `None`, NaN or infinite the slot is cleared.
    /// Coordinates beyond the `i32` range clamp to its bounds. Writing past
    /// the end grows the path, filling the new frames with gaps.
    pub fn set_position(&mut self, frame: usize, x: Option<f64>, y: Option<f64>) {
        if frame >= self.positions.len() {
            self.positions.resize(frame + 1, None);
        }

        self.positions[frame] = match (x, y) {
            (Some(x), Some(y)) => round_coordinates(x, y),
            _ => None,
        };
    }

    /// Store the centroid of `detection`, or a gap if there is none.
    pub fn set_from_detection<D: Detection + ?Sized>(&mut self, frame: usize, detection: Option<&D>) {
        match detection {
            Some(detection) => {
                let (x, y) = detection.centroid();
                self.set_position(frame, Some(x), Some(y));
            }
            None => self.set_position(frame, None, None),
        }
    }

    /// Position at `frame`, or `None` for a gap or a frame past the end.
    pub fn get_position(&self, frame: usize) -> Option<Position> {
        self.positions.get(frame).copied().flatten()
    }

    /// Displacement between `frame - 1` and `frame`, as previous minus
    /// current. `None` if either position is missing.
    ///
    /// Widened to `i64` so that no pair of stored positions can overflow.
    pub fn get_velocity(&self, frame: usize) -> Option<(i64, i64)> {
        let previous_frame = frame.checked_sub(1)?;
        let current = self.get_position(frame)?;
        let previous = self.get_position(previous_frame)?;
        Some((
            i64::from(previous.x) - i64::from(current.x),
            i64::from(previous.y) - i64::from(current.y),
        ))
    }

    /// Velocity at `frame - 1` minus velocity at `frame`.
    pub fn get_acceleration(&self, frame: usize) -> Option<(i64, i64)> {
        let previous_frame = frame.checked_sub(1)?;
        let current = self.get_velocity(frame)?;
        let previous = self.get_velocity(previous_frame)?;
        Some((previous.0 - current.0, previous.1 - current.1))
    }

    /// Hit-test `(x, y)` against the position at `frame` using the path's
    /// collision radius.
    pub fn collides_with(&self, frame: usize, x: f64, y: f64) -> bool {
        self.collides_within(frame, x, y, self.collision_radius)
    }

    /// True if a position is stored at `frame` and lies strictly closer
    /// than `radius` to `(x, y)`.
    pub fn collides_within(&self, frame: usize, x: f64, y: f64, radius: f64) -> bool {
        match self.get_position(frame) {
            Some(position) => distance_to(&position, x, y) < radius,
            None => false,
        }
    }

    /// Known `(frame, position)` pairs in `begin..=end`, in frame order.
    pub fn known_positions(&self, begin: usize, end: usize) -> Vec<(usize, Position)> {
        if begin > end {
            return Vec::new();
        }

        let last = end.min(self.positions.len().saturating_sub(1));
        (begin..=last)
            .filter_map(|frame| self.get_position(frame).map(|p| (frame, p)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Current selection; the first frame is the range start.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Add `frame` to the selection.
    ///
    /// Returns `false` when two frames are already selected. Selecting a
    /// frame that is already selected changes nothing.
    pub fn select_frame(&mut self, frame: usize) -> bool {
        if self.selection.contains(frame) {
            return true;
        }

        self.selection = match self.selection {
            Selection::Idle => Selection::One(frame),
            Selection::One(first) => Selection::Two(first, frame),
            Selection::Two(first, second) => {
                log::warn!(
                    "{}: frames {} and {} already selected, ignoring frame {}",
                    self.name,
                    first,
                    second,
                    frame
                );
                return false;
            }
        };
        true
    }

    /// Remove `frame` from the selection. Any preview is discarded.
    ///
    /// Returns `false` if the frame was not selected.
    pub fn deselect_frame(&mut self, frame: usize) -> bool {
        let next = match self.selection {
            Selection::One(a) if a == frame => Selection::Idle,
            Selection::Two(a, b) if a == frame => Selection::One(b),
            Selection::Two(a, b) if b == frame => Selection::One(a),
            _ => return false,
        };

        self.selection = next;
        self.preview.clear();
        true
    }

    /// Drop the selection and any preview.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::Idle;
        self.preview.clear();
    }

    // ------------------------------------------------------------------
    // Interpolation
    // ------------------------------------------------------------------

    /// Uncommitted interpolation, one entry per frame of the selected range.
    pub fn preview_positions(&self) -> &[Position] {
        &self.preview
    }

    pub fn clear_preview(&mut self) {
        self.preview.clear();
    }

    /// Compute an interpolation preview over the selected range.
    ///
    /// Needs exactly two selected frames, start before end, and at least two
    /// known positions between them (inclusive). On success the preview holds
    /// one position per frame of the range and its length is returned. On
    /// failure the preview is left empty.
    pub fn preview_interpolation(&mut self) -> Result<usize> {
        self.preview.clear();

        let (begin, end) = match self.selection {
            Selection::Two(begin, end) => (begin, end),
            other => {
                return Err(PathError::InvalidSelection {
                    selected: other.len(),
                })
            }
        };
        if begin >= end {
            return Err(PathError::InvalidRange { begin, end });
        }

        let samples = self.known_positions(begin, end);
        if samples.len() < PREVIEW_MIN_SAMPLES {
            return Err(PathError::InsufficientSamples {
                found: samples.len(),
                required: PREVIEW_MIN_SAMPLES,
            });
        }

        self.preview = interpolate_positions(&samples, begin, end, self.interpolation_mode)
            .into_iter()
            .filter_map(|(_, (x, y))| round_coordinates(x, y))
            .collect();

        log::debug!(
            "{}: previewed frames {}..={} from {} samples",
            self.name,
            begin,
            end,
            samples.len()
        );
        Ok(self.preview.len())
    }

    /// Fill the gaps in `begin..=end` and store the result.
    ///
    /// Needs more than two known positions in the range. `mode` defaults to
    /// the path's own mode, so a commit stores what the preview showed.
    /// On success the preview is cleared and the number of frames written is
    /// returned. On failure nothing is stored.
    pub fn commit_interpolation(
        &mut self,
        begin: usize,
        end: usize,
        mode: Option<InterpolationMode>,
    ) -> Result<usize> {
        if begin >= end {
            return Err(PathError::InvalidRange { begin, end });
        }

        let samples = self.known_positions(begin, end);
        if samples.len() < COMMIT_MIN_SAMPLES {
            return Err(PathError::InsufficientSamples {
                found: samples.len(),
                required: COMMIT_MIN_SAMPLES,
            });
        }

        let mode = mode.unwrap_or(self.interpolation_mode);
        let estimated = interpolate_positions(&samples, begin, end, mode);
        for &(frame, (x, y)) in &estimated {
            self.set_position(frame, Some(x), Some(y));
        }
        self.preview.clear();

        log::debug!(
            "{}: interpolated frames {}..={} from {} samples",
            self.name,
            begin,
            end,
            samples.len()
        );
        Ok(estimated.len())
    }

    /// Clear every frame strictly between `begin` and `end`, and any preview.
    ///
    /// The endpoints keep their positions. Frames past the end are ignored.
    pub fn delete_range(&mut self, begin: usize, end: usize) {
        let stop = end.min(self.positions.len());
        let start = begin.saturating_add(1);
        if start < stop {
            for slot in &mut self.positions[start..stop] {
                *slot = None;
            }
            log::debug!("{}: cleared frames {}..{}", self.name, start, stop);
        }
        self.preview.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blob {
        centroid: (f64, f64),
    }

    impl Detection for Blob {
        fn centroid(&self) -> (f64, f64) {
            self.centroid
        }
    }

    fn path_with(points: &[(usize, i32, i32)]) -> Path {
        let mut path = Path::new(0);
        for &(frame, x, y) in points {
            path.set_position(frame, Some(x as f64), Some(y as f64));
        }
        path
    }

    #[test]
    fn test_naming_from_sibling_count() {
        assert_eq!(Path::new(0).name(), "path");
        assert_eq!(Path::new(1).name(), "path(1)");
        assert_eq!(Path::new(4).name(), "path(4)");
    }

    #[test]
    fn test_with_config() {
        let config = AnnotationConfig {
            interpolation_mode: InterpolationMode::Nearest,
            collision_radius: 5.0,
        };
        let path = Path::with_config(0, &config);
        assert_eq!(path.interpolation_mode(), InterpolationMode::Nearest);
        assert_eq!(path.collision_radius(), 5.0);
    }

    #[test]
    fn test_set_position_rounds() {
        let mut path = Path::new(0);
        path.set_position(3, Some(10.6), Some(-2.4));
        assert_eq!(path.get_position(3), Some(Position::new(11, -2)));

        path.set_position(4, Some(0.5), Some(1.5));
        assert_eq!(path.get_position(4), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_set_position_backfills() {
        let mut path = path_with(&[(0, 1, 1)]);
        path.set_position(100, Some(5.0), Some(5.0));

        assert_eq!(path.len(), 101);
        assert!((1..100).all(|f| path.get_position(f).is_none()));
        assert_eq!(path.get_position(0), Some(Position::new(1, 1)));
        assert_eq!(path.get_position(100), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_set_position_none_clears() {
        let mut path = path_with(&[(2, 4, 4)]);
        path.set_position(2, None, Some(1.0));
        assert_eq!(path.get_position(2), None);
        assert_eq!(path.len(), 3);

        // Clearing past the end still grows the path
        path.set_position(6, None, None);
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn test_get_position_out_of_range() {
        let path = path_with(&[(0, 1, 1)]);
        assert_eq!(path.get_position(1), None);
        assert_eq!(path.get_position(usize::MAX), None);
    }

    #[test]
    fn test_set_from_detection() {
        let mut path = Path::new(0);
        let blob = Blob {
            centroid: (12.2, 7.8),
        };

        path.set_from_detection(1, Some(&blob));
        assert_eq!(path.get_position(1), Some(Position::new(12, 8)));

        path.set_from_detection::<Blob>(1, None);
        assert_eq!(path.get_position(1), None);
    }

    #[test]
    fn test_velocity_previous_minus_current() {
        let path = path_with(&[(4, 2, 2), (5, 5, 6)]);
        assert_eq!(path.get_velocity(5), Some((-3, -4)));
        assert_eq!(path.get_velocity(4), None);
        assert_eq!(path.get_velocity(0), None);
    }

    #[test]
    fn test_acceleration() {
        let path = path_with(&[(0, 0, 0), (1, 1, 0), (2, 4, 0)]);
        // v(1) = -1, v(2) = -3
        assert_eq!(path.get_acceleration(2), Some((2, 0)));
        assert_eq!(path.get_acceleration(1), None);
        assert_eq!(path.get_acceleration(0), None);
    }

    #[test]
    fn test_kinematics_at_coordinate_extremes() {
        let mut path = Path::new(0);
        path.set_position(0, Some(3e9), Some(0.0));
        path.set_position(1, Some(-3e9), Some(0.0));
        path.set_position(2, Some(3e9), Some(0.0));

        let span = i64::from(i32::MAX) - i64::from(i32::MIN);
        assert_eq!(path.get_velocity(1), Some((span, 0)));
        assert_eq!(path.get_velocity(2), Some((-span, 0)));
        assert_eq!(path.get_acceleration(2), Some((2 * span, 0)));
    }

    #[test]
    fn test_set_position_non_finite_clears() {
        let mut path = path_with(&[(0, 1, 1)]);
        path.set_position(0, Some(f64::NAN), Some(5.0));
        assert_eq!(path.get_position(0), None);

        path.set_position(3, Some(2.0), Some(f64::INFINITY));
        assert_eq!(path.get_position(3), None);
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_acceleration_with_gap() {
        let path = path_with(&[(0, 0, 0), (2, 4, 0), (3, 5, 0)]);
        assert_eq!(path.get_acceleration(3), None);
    }

    #[test]
    fn test_collision_boundary_is_exclusive() {
        let path = path_with(&[(0, 0, 0)]);
        assert!(path.collides_with(0, 19.9, 0.0));
        assert!(!path.collides_with(0, 20.0, 0.0));
        assert!(path.collides_within(0, 3.0, 4.0, 5.1));
        assert!(!path.collides_within(0, 3.0, 4.0, 5.0));
        assert!(!path.collides_with(1, 0.0, 0.0));
    }

    #[test]
    fn test_selection_state_machine() {
        let mut path = Path::new(0);
        assert_eq!(path.selection(), Selection::Idle);

        assert!(path.select_frame(8));
        assert_eq!(path.selection(), Selection::One(8));

        assert!(path.select_frame(8));
        assert_eq!(path.selection(), Selection::One(8));

        assert!(path.select_frame(2));
        assert_eq!(path.selection(), Selection::Two(8, 2));

        assert!(!path.select_frame(5));
        assert_eq!(path.selection(), Selection::Two(8, 2));

        assert!(path.deselect_frame(8));
        assert_eq!(path.selection(), Selection::One(2));
        assert!(!path.deselect_frame(8));

        path.clear_selection();
        assert!(path.selection().is_empty());
    }

    #[test]
    fn test_preview_needs_two_samples() {
        let mut path = path_with(&[(0, 0, 0), (10, 10, 10)]);
        path.select_frame(0);
        path.select_frame(10);

        assert_eq!(path.preview_interpolation(), Ok(11));
        assert_eq!(path.preview_positions().len(), 11);
        assert_eq!(path.preview_positions()[5], Position::new(5, 5));
        // Preview does not touch stored positions
        assert_eq!(path.get_position(5), None);
    }

    #[test]
    fn test_preview_with_one_sample_fails() {
        let mut path = path_with(&[(0, 0, 0), (10, 10, 10)]);
        path.select_frame(0);
        path.select_frame(10);
        path.preview_interpolation().unwrap();

        path.set_position(10, None, None);
        let err = path.preview_interpolation().unwrap_err();
        assert_eq!(
            err,
            PathError::InsufficientSamples {
                found: 1,
                required: 2
            }
        );
        assert!(path.preview_positions().is_empty());
    }

    #[test]
    fn test_preview_invalid_selection() {
        let mut path = path_with(&[(0, 0, 0), (10, 10, 10)]);
        assert_eq!(
            path.preview_interpolation(),
            Err(PathError::InvalidSelection { selected: 0 })
        );

        path.select_frame(10);
        assert_eq!(
            path.preview_interpolation(),
            Err(PathError::InvalidSelection { selected: 1 })
        );

        path.select_frame(0);
        assert_eq!(
            path.preview_interpolation(),
            Err(PathError::InvalidRange { begin: 10, end: 0 })
        );
    }

    #[test]
    fn test_preview_uses_path_mode() {
        let mut path = path_with(&[(0, 0, 0), (4, 8, 8)]);
        path.set_interpolation_mode(InterpolationMode::Previous);
        path.select_frame(0);
        path.select_frame(4);
        path.preview_interpolation().unwrap();

        assert_eq!(path.preview_positions()[3], Position::new(0, 0));
    }

    #[test]
    fn test_deselect_discards_preview() {
        let mut path = path_with(&[(0, 0, 0), (10, 10, 10)]);
        path.select_frame(0);
        path.select_frame(10);
        path.preview_interpolation().unwrap();

        path.deselect_frame(10);
        assert!(path.preview_positions().is_empty());
    }

    #[test]
    fn test_commit_with_two_samples_is_noop() {
        let mut path = path_with(&[(0, 0, 0), (10, 10, 10)]);
        let before = path.positions().to_vec();

        let err = path.commit_interpolation(0, 10, None).unwrap_err();
        assert!(err.is_insufficient_samples());
        assert_eq!(path.positions(), &before[..]);
    }

    #[test]
    fn test_commit_fills_gaps() {
        let mut path = path_with(&[(0, 0, 0), (4, 4, 4), (10, 10, 10)]);
        path.select_frame(0);
        path.select_frame(10);
        path.preview_interpolation().unwrap();

        assert_eq!(path.commit_interpolation(0, 10, None), Ok(11));
        assert!((0..=10).all(|f| path.get_position(f).is_some()));
        assert_eq!(path.get_position(5), Some(Position::new(5, 5)));
        assert_eq!(path.get_position(4), Some(Position::new(4, 4)));
        assert!(path.preview_positions().is_empty());
    }

    #[test]
    fn test_commit_defaults_to_path_mode() {
        let mut path = path_with(&[(0, 0, 0), (2, 2, 2), (6, 6, 6)]);
        path.set_interpolation_mode(InterpolationMode::Previous);

        path.commit_interpolation(0, 6, None).unwrap();
        assert_eq!(path.get_position(4), Some(Position::new(2, 2)));

        let mut path = path_with(&[(0, 0, 0), (2, 2, 2), (6, 6, 6)]);
        path.set_interpolation_mode(InterpolationMode::Previous);
        path.commit_interpolation(0, 6, Some(InterpolationMode::Linear))
            .unwrap();
        assert_eq!(path.get_position(4), Some(Position::new(4, 4)));
    }

    #[test]
    fn test_commit_matches_preview() {
        let config = AnnotationConfig {
            interpolation_mode: InterpolationMode::CatmullRom,
            ..AnnotationConfig::default()
        };
        let mut path = Path::with_config(0, &config);
        for &(frame, x, y) in &[(0, 0, 0), (3, 9, 2), (7, 4, 11), (12, 20, 5)] {
            path.set_position(frame, Some(x as f64), Some(y as f64));
        }
        path.select_frame(0);
        path.select_frame(12);
        path.preview_interpolation().unwrap();
        let previewed = path.preview_positions().to_vec();

        path.commit_interpolation(0, 12, None).unwrap();
        let committed: Vec<Position> = (0..=12).filter_map(|f| path.get_position(f)).collect();
        assert_eq!(committed, previewed);
    }

    #[test]
    fn test_commit_invalid_range() {
        let mut path = path_with(&[(0, 0, 0), (1, 1, 1), (2, 2, 2)]);
        assert_eq!(
            path.commit_interpolation(2, 2, None),
            Err(PathError::InvalidRange { begin: 2, end: 2 })
        );
    }

    #[test]
    fn test_delete_range_keeps_endpoints() {
        let mut path = path_with(&[(0, 0, 0), (1, 1, 1), (2, 2, 2), (3, 3, 3), (4, 4, 4)]);
        path.delete_range(1, 4);

        assert_eq!(path.get_position(1), Some(Position::new(1, 1)));
        assert_eq!(path.get_position(2), None);
        assert_eq!(path.get_position(3), None);
        assert_eq!(path.get_position(4), Some(Position::new(4, 4)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_delete_range_past_end() {
        let mut path = path_with(&[(0, 0, 0), (1, 1, 1), (2, 2, 2)]);
        path.delete_range(0, 50);

        assert_eq!(path.len(), 3);
        assert_eq!(path.get_position(0), Some(Position::new(0, 0)));
        assert_eq!(path.get_position(1), None);
        assert_eq!(path.get_position(2), None);
    }

    #[test]
    fn test_delete_range_clears_preview() {
        let mut path = path_with(&[(0, 0, 0), (10, 10, 10)]);
        path.select_frame(0);
        path.select_frame(10);
        path.preview_interpolation().unwrap();

        path.delete_range(0, 1);
        assert!(path.preview_positions().is_empty());
    }

    #[test]
    fn test_known_positions() {
        let path = path_with(&[(1, 1, 1), (3, 3, 3), (7, 7, 7)]);
        let known = path.known_positions(2, 20);
        assert_eq!(known, vec![(3, Position::new(3, 3)), (7, Position::new(7, 7))]);
        assert!(path.known_positions(5, 2).is_empty());
        assert!(Path::new(0).known_positions(0, 3).is_empty());
    }
}
