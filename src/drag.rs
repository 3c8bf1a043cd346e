//! Drag gesture state for the corner handles
//!
//! A session exists only between pointer-down on a handle and the matching
//! pointer-up (or the pointer leaving the canvas). The session carries the
//! box id, not a list index, so concurrent list edits can never retarget an
//! in-flight gesture.

use crate::geometry::Corner;
use crate::store::BoxId;

/// The active gesture, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    /// No gesture in progress; waiting for the next pointer-down
    #[default]
    Idle,
    /// A corner handle of one box is being dragged
    Dragging {
        /// Id of the box whose handle is held
        box_id: BoxId,
        /// Which corner handle is held
        corner: Corner,
    },
}

impl DragSession {
    /// Begin tracking a drag on one handle.
    pub fn begin(&mut self, box_id: BoxId, corner: Corner) {
        *self = Self::Dragging { box_id, corner };
    }

    /// End the gesture and return to idle.
    pub fn end(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The dragged box and corner while a gesture is active
    pub fn target(&self) -> Option<(BoxId, Corner)> {
        match self {
            Self::Idle => None,
            Self::Dragging { box_id, corner } => Some((*box_id, *corner)),
        }
    }
}
