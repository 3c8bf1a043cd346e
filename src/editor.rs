//! Editor session: pointer events in, transform strings out
//!
//! `MockupEditor` owns the box store and the drag session for one "add
//! mockup" editing surface. The UI layer feeds it raw pointer events; it
//! answers with events carrying fresh `matrix3d` strings for the rendering
//! layer. Everything runs synchronously on the event callback, so a
//! pointer-move is fully processed before the next one arrives.

use crate::config::EditorConfig;
use crate::drag::DragSession;
use crate::geometry::{Corner, Point, Quad};
use crate::render::RenderMatrix;
use crate::snapshot::Snapshot;
use crate::store::{BoxId, BoxStyles, MockupBoxStore, UpdateOutcome};

/// Outcome of a pointer event, for the host to process
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A box's transform was recomputed; `transform` is the `matrix3d`
    /// string ready for the renderer
    TransformUpdated { id: BoxId, transform: String },
    /// The dragged quad was recorded but produced no new transform; the
    /// overlay keeps its previous appearance
    UpdateRejected { id: BoxId },
}

/// One editor session over a single base product photo
#[derive(Debug)]
pub struct MockupEditor {
    store: MockupBoxStore,
    session: DragSession,
    /// Base image natural pixel dimensions; handles are clamped to this box
    width: f64,
    height: f64,
    config: EditorConfig,
}

impl MockupEditor {
    /// Create a session for a base image of the given natural pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(width, height, EditorConfig::default())
    }

    pub fn with_config(width: f64, height: f64, config: EditorConfig) -> Self {
        Self {
            store: MockupBoxStore::new(),
            session: DragSession::default(),
            width,
            height,
            config,
        }
    }

    /// Add an overlay box covering the base image rectangle and select it.
    /// Becoming the new selection cancels any drag in progress.
    pub fn add_box(&mut self) -> BoxId {
        self.session.end();

        let defaults = &self.config.box_defaults;
        let styles = BoxStyles {
            position: defaults.position.clone(),
            left: 0.0,
            top: 0.0,
            width: self.width,
            height: self.height,
            opacity: defaults.opacity,
        };
        self.store.add_box(Quad::from_rect(self.width, self.height), styles)
    }

    /// Select a box by id. Switching selection cancels an unfinished drag
    /// rather than carrying it over to the new box.
    pub fn select_box(&mut self, id: BoxId) -> bool {
        if self.store.select_box(id) {
            self.session.end();
            true
        } else {
            false
        }
    }

    /// Remove a box by id. A drag on the removed box ends with it.
    pub fn remove_box(&mut self, id: BoxId) -> bool {
        if let Some((dragged, _)) = self.session.target() {
            if dragged == id {
                self.session.end();
            }
        }
        self.store.remove_box(id).is_some()
    }

    /// Pointer pressed on a corner handle of the active box. Returns false
    /// when there is no active box to drag.
    pub fn on_pointer_down(&mut self, corner: Corner) -> bool {
        match self.store.active_box() {
            Some(b) => {
                tracing::debug!("Drag started on box {} corner {:?}", b.id, corner);
                self.session.begin(b.id, corner);
                true
            }
            None => false,
        }
    }

    /// Pointer moved while a handle may be held.
    ///
    /// The position is clamped to the base image bounds before it replaces
    /// the dragged corner, so an off-canvas drag can never construct an
    /// out-of-range quad. Repeated identical moves produce no event.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Option<EditorEvent> {
        let (box_id, corner) = self.session.target()?;

        let Some(b) = self.store.get(box_id) else {
            // The dragged box is gone; the gesture dies with it.
            self.session.end();
            return None;
        };

        let point = Point::new(x, y).clamped(self.width, self.height);
        if b.dest_quad.corner(corner) == point {
            return None;
        }

        let quad = b.dest_quad.with_corner(corner, point);
        match self.store.update_dest_quad(box_id, quad) {
            UpdateOutcome::Updated => {
                let Some(updated) = self.store.get(box_id) else {
                    return None;
                };
                let matrix = RenderMatrix::from_projective(&updated.matrix);
                match matrix.to_transform_string() {
                    Ok(transform) => Some(EditorEvent::TransformUpdated { id: box_id, transform }),
                    Err(err) => {
                        tracing::warn!("Skipping transform for box {}: {}", box_id, err);
                        Some(EditorEvent::UpdateRejected { id: box_id })
                    }
                }
            }
            UpdateOutcome::Rejected => Some(EditorEvent::UpdateRejected { id: box_id }),
            UpdateOutcome::NotFound => {
                self.session.end();
                None
            }
        }
    }

    /// Pointer released; the gesture ends.
    pub fn on_pointer_up(&mut self) {
        if self.session.is_dragging() {
            tracing::debug!("Drag ended");
        }
        self.session.end();
    }

    /// Pointer left the canvas; treated the same as a release.
    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
    }

    /// Serializable snapshot of all boxes for the save/submit flow.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.store)
    }

    pub fn store(&self) -> &MockupBoxStore {
        &self.store
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
