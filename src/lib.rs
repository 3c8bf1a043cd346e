//! mockwarp - Real-time perspective placement for product mockup editors
//!
//! The "add mockup" editor lets a user drop overlay boxes onto a base
//! product photo and drag each box's four corner handles until the overlay
//! follows the photo's perspective. This crate is the engine behind that
//! interaction: it tracks the boxes, runs the drag gesture state machine,
//! solves the planar homography from each box's original rectangle to the
//! dragged quadrilateral, and emits the transform as a CSS `matrix3d`
//! string for the rendering layer.
//!
//! The solve is a fixed-size linear system, so every pointer-move is
//! processed synchronously with no throttling. Rendering, image storage,
//! and persistence stay with the host application; the engine's only
//! outputs are transform strings and the serializable save snapshot.

pub mod config;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod homography;
pub mod render;
pub mod snapshot;
pub mod store;

pub use config::EditorConfig;
pub use editor::{EditorEvent, MockupEditor};
pub use geometry::{Corner, Point, Quad};
pub use homography::{DegenerateQuadError, ProjectiveMatrix};
pub use render::{NonFiniteMatrixError, RenderMatrix};
pub use snapshot::Snapshot;
pub use store::{BoxId, BoxStyles, MockupBox, MockupBoxStore, UpdateOutcome};
