//! Overlay box bookkeeping for one editor session
//!
//! The store owns the list of overlay boxes, the active selection, and the
//! derived transform for each box. Boxes are identified by a stable id from
//! a monotonic counter, never by list position, so deleting a box can't
//! silently retarget anything that still refers to its neighbours.

use serde::{Deserialize, Serialize};

use crate::geometry::Quad;
use crate::homography::{self, ProjectiveMatrix};

/// Unique identifier for an overlay box within a session
pub type BoxId = u64;

/// Static CSS placement of an overlay box, carried through to the save
/// snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxStyles {
    pub position: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
}

/// One overlay box: a fixed source rectangle, the quad the user dragged its
/// corners to, and the homography between the two
#[derive(Debug, Clone)]
pub struct MockupBox {
    pub id: BoxId,
    /// The base image's rectangle, fixed at creation time
    pub source_quad: Quad,
    /// Where the corner handles currently sit
    pub dest_quad: Quad,
    /// Transform mapping `source_quad` onto `dest_quad`. Lags behind
    /// `dest_quad` only while the handles sit in a degenerate configuration.
    pub matrix: ProjectiveMatrix,
    pub styles: BoxStyles,
}

/// Result of a destination-quad update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The quad and its transform were both replaced
    Updated,
    /// The quad was recorded but is degenerate; the previous transform is
    /// retained
    Rejected,
    /// No box with that id exists
    NotFound,
}

/// Owns all overlay boxes of one editor session
#[derive(Debug, Default)]
pub struct MockupBoxStore {
    boxes: Vec<MockupBox>,
    active: Option<BoxId>,
    next_box_id: BoxId,
    last_rejection: Option<BoxId>,
}

impl MockupBoxStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a box whose destination quad starts at the source rectangle
    /// (identity placement) and make it the active box.
    pub fn add_box(&mut self, source_rect: Quad, styles: BoxStyles) -> BoxId {
        let id = self.next_box_id;
        self.next_box_id += 1;

        self.boxes.push(MockupBox {
            id,
            source_quad: source_rect,
            dest_quad: source_rect,
            matrix: ProjectiveMatrix::IDENTITY,
            styles,
        });
        self.active = Some(id);

        tracing::debug!("Added overlay box {}", id);
        id
    }

    /// Make a box the active selection. Returns false if the id is unknown.
    pub fn select_box(&mut self, id: BoxId) -> bool {
        if self.boxes.iter().any(|b| b.id == id) {
            self.active = Some(id);
            true
        } else {
            tracing::warn!("Cannot select unknown box {}", id);
            false
        }
    }

    /// Remove a box by id, returning it if it was present. Remaining boxes
    /// keep their ids; the selection is cleared if it pointed at the removed
    /// box.
    pub fn remove_box(&mut self, id: BoxId) -> Option<MockupBox> {
        let idx = self.boxes.iter().position(|b| b.id == id)?;
        let removed = self.boxes.remove(idx);

        if self.active == Some(id) {
            self.active = None;
        }
        if self.last_rejection == Some(id) {
            self.last_rejection = None;
        }

        tracing::debug!("Removed overlay box {}", id);
        Some(removed)
    }

    /// Replace a box's destination quad and re-solve its transform.
    ///
    /// The quad is recorded even when it is degenerate so the handles keep
    /// following the pointer; in that case the previous matrix is retained,
    /// the rejection is observable via [`Self::last_rejection`], and no
    /// error propagates to the caller.
    pub fn update_dest_quad(&mut self, id: BoxId, quad: Quad) -> UpdateOutcome {
        let Some(b) = self.boxes.iter_mut().find(|b| b.id == id) else {
            return UpdateOutcome::NotFound;
        };

        b.dest_quad = quad;
        match homography::solve(&b.source_quad, &quad) {
            Ok(matrix) => {
                b.matrix = matrix;
                if self.last_rejection == Some(id) {
                    self.last_rejection = None;
                }
                UpdateOutcome::Updated
            }
            Err(_) => {
                tracing::warn!("Degenerate quad for box {}, keeping previous matrix", id);
                self.last_rejection = Some(id);
                UpdateOutcome::Rejected
            }
        }
    }

    pub fn get(&self, id: BoxId) -> Option<&MockupBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn boxes(&self) -> &[MockupBox] {
        &self.boxes
    }

    pub fn active(&self) -> Option<BoxId> {
        self.active
    }

    pub fn active_box(&self) -> Option<&MockupBox> {
        self.active.and_then(|id| self.get(id))
    }

    /// The box whose most recent update was rejected as degenerate, if its
    /// transform still lags behind its destination quad
    pub fn last_rejection(&self) -> Option<BoxId> {
        self.last_rejection
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Corner, Point};

    fn test_styles() -> BoxStyles {
        BoxStyles {
            position: "absolute".to_string(),
            left: 0.0,
            top: 0.0,
            width: 800.0,
            height: 800.0,
            opacity: 1.0,
        }
    }

    fn degenerate_quad() -> Quad {
        // Top-left, bottom-left, and top-right collapsed onto x = 0.
        Quad::new([
            Point::new(0.0, 0.0),
            Point::new(0.0, 800.0),
            Point::new(0.0, 400.0),
            Point::new(800.0, 800.0),
        ])
    }

    #[test]
    fn test_add_box_starts_at_identity_and_becomes_active() {
        let mut store = MockupBoxStore::new();
        let rect = Quad::from_rect(800.0, 800.0);
        let id = store.add_box(rect, test_styles());

        let b = store.get(id).unwrap();
        assert_eq!(b.dest_quad, b.source_quad);
        assert_eq!(b.matrix, ProjectiveMatrix::IDENTITY);
        assert_eq!(store.active(), Some(id));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = MockupBoxStore::new();
        let rect = Quad::from_rect(100.0, 100.0);

        let first = store.add_box(rect, test_styles());
        store.remove_box(first);
        let second = store.add_box(rect, test_styles());

        assert_ne!(first, second);
    }

    #[test]
    fn test_select_unknown_box_fails() {
        let mut store = MockupBoxStore::new();
        assert!(!store.select_box(42));
        assert_eq!(store.active(), None);
    }

    #[test]
    fn test_remove_active_box_clears_selection() {
        let mut store = MockupBoxStore::new();
        let rect = Quad::from_rect(100.0, 100.0);
        let id = store.add_box(rect, test_styles());

        assert!(store.remove_box(id).is_some());
        assert_eq!(store.active(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_removing_first_box_leaves_second_untouched() {
        let mut store = MockupBoxStore::new();
        let rect = Quad::from_rect(800.0, 800.0);

        let first = store.add_box(rect, test_styles());
        let second = store.add_box(rect, test_styles());

        // Warp the second box so it has a distinctive quad and matrix.
        let warped = rect.with_corner(Corner::TopRight, Point::new(700.0, 100.0));
        assert_eq!(store.update_dest_quad(second, warped), UpdateOutcome::Updated);
        let quad_before = store.get(second).unwrap().dest_quad;
        let matrix_before = store.get(second).unwrap().matrix;

        // Deleting the non-active first box must not disturb the second.
        assert!(store.remove_box(first).is_some());
        let b = store.get(second).unwrap();
        assert_eq!(b.id, second);
        assert_eq!(b.dest_quad, quad_before);
        assert_eq!(b.matrix, matrix_before);
        assert_eq!(store.active(), Some(second));
    }

    #[test]
    fn test_update_replaces_matrix() {
        let mut store = MockupBoxStore::new();
        let rect = Quad::from_rect(800.0, 800.0);
        let id = store.add_box(rect, test_styles());

        let warped = rect.with_corner(Corner::TopRight, Point::new(700.0, 100.0));
        assert_eq!(store.update_dest_quad(id, warped), UpdateOutcome::Updated);

        let b = store.get(id).unwrap();
        assert_eq!(b.dest_quad, warped);
        let (x, y) = b.matrix.apply(800.0, 0.0);
        assert!((x - 700.0).abs() < 1e-6);
        assert!((y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_update_keeps_matrix_but_records_quad() {
        let mut store = MockupBoxStore::new();
        let rect = Quad::from_rect(800.0, 800.0);
        let id = store.add_box(rect, test_styles());

        let warped = rect.with_corner(Corner::TopRight, Point::new(700.0, 100.0));
        store.update_dest_quad(id, warped);
        let good_matrix = store.get(id).unwrap().matrix;

        // Collapse three corners onto a line: the quad diverges from the
        // matrix until the user drags back out.
        assert_eq!(
            store.update_dest_quad(id, degenerate_quad()),
            UpdateOutcome::Rejected
        );
        let b = store.get(id).unwrap();
        assert_eq!(b.dest_quad, degenerate_quad());
        assert_eq!(b.matrix, good_matrix);
        assert_eq!(store.last_rejection(), Some(id));

        // Dragging back to a valid configuration reconverges.
        assert_eq!(store.update_dest_quad(id, warped), UpdateOutcome::Updated);
        let b = store.get(id).unwrap();
        assert_eq!(b.dest_quad, warped);
        assert_eq!(store.last_rejection(), None);
    }

    #[test]
    fn test_update_unknown_box() {
        let mut store = MockupBoxStore::new();
        let quad = Quad::from_rect(10.0, 10.0);
        assert_eq!(store.update_dest_quad(7, quad), UpdateOutcome::NotFound);
    }
}
