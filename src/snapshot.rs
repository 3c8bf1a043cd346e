//! Serializable save payload for the persistence collaborator
//!
//! On save the editor hands off one JSON document describing every overlay
//! box: its render matrix plus the static CSS placement for both the box
//! shell and the artwork shown inside it. The payload is opaque to this
//! engine after emission; it is never read back here, so the types only
//! implement `Serialize`.

use serde::Serialize;

use crate::render::RenderMatrix;
use crate::store::{BoxId, BoxStyles, MockupBoxStore};

/// Transform and placement for one rendered layer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotLayer {
    /// Flattened column-major 4x4 render matrix
    pub matrix: RenderMatrix,
    pub styles: BoxStyles,
}

/// One overlay box in the save payload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotBox {
    pub id: BoxId,
    /// The overlay box shell as placed by the user
    #[serde(rename = "box")]
    pub overlay: SnapshotLayer,
    /// The artwork layer shown inside the box; same transform, painted at
    /// full opacity
    #[serde(rename = "imageShow")]
    pub image_show: SnapshotLayer,
}

/// The full save payload: every box in list order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    pub boxes: Vec<SnapshotBox>,
}

impl Snapshot {
    /// Capture the current state of a store.
    pub fn capture(store: &MockupBoxStore) -> Self {
        let boxes = store
            .boxes()
            .iter()
            .map(|b| {
                let matrix = RenderMatrix::from_projective(&b.matrix);
                let artwork_styles = BoxStyles {
                    opacity: 1.0,
                    ..b.styles.clone()
                };
                SnapshotBox {
                    id: b.id,
                    overlay: SnapshotLayer {
                        matrix,
                        styles: b.styles.clone(),
                    },
                    image_show: SnapshotLayer {
                        matrix,
                        styles: artwork_styles,
                    },
                }
            })
            .collect();

        Self { boxes }
    }
}
